#[cfg(test)]
pub mod test;

use crate::ast::{Decl, Literal, Span, TypeName};
use crate::error::{CompileError, ErrorKind};
use crate::model::{
    Constant, ConstGroup, DefaultValue, Field, GroupId, InstId, Instantiation, Item, Method,
    ResolvedModel, ResolvedType, Slot, StructDef, StructId, TemplateDef, TemplateId, ns_display,
};

use std::collections::HashMap;

/// One parsed schema file. A compile unit is a slice of these; forward
/// references resolve across all of them.
#[derive(Debug)]
pub struct SourceUnit {
    pub file: String,
    pub decls: Vec<(Decl, Span)>,
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Struct(StructId),
    Group(GroupId),
    Inst(InstId),
}

/// Links a parsed compile unit into a `ResolvedModel`.
///
/// Two passes: the first registers every top-level name (and builds constant
/// groups, which need no resolution of their own), the second walks each
/// declaration's types and replaces name references with arena indices.
/// Unresolved references are fatal to the compile unit: every one found is
/// returned and no model escapes.
pub fn resolve(units: &[SourceUnit]) -> Result<ResolvedModel, Vec<CompileError>> {
    let mut resolver = Resolver::default();
    resolver.register(units);
    resolver.link(units);

    if resolver.errors.is_empty() {
        Ok(resolver.model)
    } else {
        Err(resolver.errors)
    }
}

#[derive(Default)]
struct Resolver {
    model: ResolvedModel,
    /// Emitted names: structs, constant groups, and instantiation aliases
    /// share one name space per namespace. First declaration wins the slot;
    /// later ones stay in the model for the validator to flag.
    registry: HashMap<(String, String), Entry>,
    /// Templates are never emitted directly and live in their own name space.
    templates: HashMap<(String, String), TemplateId>,
    errors: Vec<CompileError>,
}

impl Resolver {
    /// Pass one: assign arena indices in declaration order and register every
    /// top-level name, allowing forward references across the whole unit.
    fn register(&mut self, units: &[SourceUnit]) {
        let mut n_structs = 0;
        let mut n_templates = 0;
        let mut n_insts = 0;

        for unit in units {
            let mut ns = String::new();
            for (decl, _span) in &unit.decls {
                match decl {
                    Decl::Namespace(d) => ns = d.name.0.clone(),
                    Decl::Struct(d) => {
                        let id = StructId(n_structs);
                        n_structs += 1;
                        self.registry
                            .entry((ns.clone(), d.name.0.clone()))
                            .or_insert(Entry::Struct(id));
                        self.model.order.push(Item::Struct(id));
                    }
                    Decl::Constants(d) => {
                        let id = GroupId(self.model.groups.len());
                        self.registry
                            .entry((ns.clone(), d.name.0.clone()))
                            .or_insert(Entry::Group(id));
                        self.model.groups.push(ConstGroup {
                            namespace: ns.clone(),
                            name: d.name.0.clone(),
                            file: unit.file.clone(),
                            span: d.name.1.clone(),
                            constants: d
                                .constants
                                .iter()
                                .map(|c| Constant {
                                    name: c.name.0.clone(),
                                    value: c.value.0.clone(),
                                    span: c.name.1.clone(),
                                })
                                .collect(),
                        });
                        self.model.order.push(Item::Group(id));
                    }
                    Decl::Template(d) => {
                        let id = TemplateId(n_templates);
                        n_templates += 1;
                        self.templates
                            .entry((ns.clone(), d.name.0.clone()))
                            .or_insert(id);
                        self.model.order.push(Item::Template(id));
                    }
                    Decl::Use(d) => {
                        let id = InstId(n_insts);
                        n_insts += 1;
                        self.registry
                            .entry((ns.clone(), d.alias.0.clone()))
                            .or_insert(Entry::Inst(id));
                        self.model.order.push(Item::Inst(id));
                    }
                }
            }
        }
    }

    /// Pass two: build the model items in the same order as pass one,
    /// resolving every type reference against the registry.
    fn link(&mut self, units: &[SourceUnit]) {
        for unit in units {
            let mut ns = String::new();
            for (decl, _span) in &unit.decls {
                match decl {
                    Decl::Namespace(d) => ns = d.name.0.clone(),
                    Decl::Struct(d) => {
                        let fields = d
                            .fields
                            .iter()
                            .map(|f| self.link_field(f, &ns, &[], &unit.file))
                            .collect();
                        let methods = d
                            .methods
                            .iter()
                            .map(|m| self.link_method(m, &ns, &[], &unit.file))
                            .collect();
                        let mut slots = vec![];
                        for slot in &d.slots {
                            if let Some(target) =
                                self.lookup_struct(&ns, &slot.target.0, &unit.file, &slot.target.1)
                            {
                                slots.push(Slot {
                                    target,
                                    verb: slot.verb.0.clone(),
                                    span: slot.target.1.clone(),
                                });
                            }
                        }
                        self.model.structs.push(StructDef {
                            namespace: ns.clone(),
                            name: d.name.0.clone(),
                            file: unit.file.clone(),
                            span: d.name.1.clone(),
                            fields,
                            methods,
                            slots,
                        });
                    }
                    Decl::Constants(_) => {} // built during pass one
                    Decl::Template(d) => {
                        let params: Vec<String> =
                            d.params.iter().map(|(p, _)| p.clone()).collect();
                        let fields = d
                            .fields
                            .iter()
                            .map(|f| self.link_field(f, &ns, &params, &unit.file))
                            .collect();
                        let methods = d
                            .methods
                            .iter()
                            .map(|m| self.link_method(m, &ns, &params, &unit.file))
                            .collect();
                        self.model.templates.push(TemplateDef {
                            namespace: ns.clone(),
                            name: d.name.0.clone(),
                            file: unit.file.clone(),
                            span: d.name.1.clone(),
                            params,
                            fields,
                            methods,
                        });
                    }
                    Decl::Use(d) => {
                        let Some(template) = self
                            .templates
                            .get(&(ns.clone(), d.template.0.clone()))
                            .copied()
                        else {
                            self.errors.push(CompileError::new(
                                ErrorKind::UnresolvedReference,
                                format!(
                                    "no template named '{}' in {}",
                                    d.template.0,
                                    ns_display(&ns)
                                ),
                                &unit.file,
                                d.template.1.clone(),
                            ));
                            continue;
                        };
                        let args = d
                            .args
                            .iter()
                            .map(|(ty, span)| self.link_type(ty, &ns, &[], &unit.file, span))
                            .collect();
                        self.model.instantiations.push(Instantiation {
                            namespace: ns.clone(),
                            alias: d.alias.0.clone(),
                            file: unit.file.clone(),
                            span: d.alias.1.clone(),
                            template,
                            args,
                        });
                    }
                }
            }
        }
    }

    fn link_field(
        &mut self,
        field: &crate::ast::FieldDecl,
        ns: &str,
        params: &[String],
        file: &str,
    ) -> Field {
        let ty = self.link_type(&field.ty.0, ns, params, file, &field.ty.1);
        let default = field
            .default
            .as_ref()
            .map(|(value, span)| self.link_default(value, ns, file, span));
        Field {
            name: field.name.0.clone(),
            ty,
            default,
            span: field.name.1.clone(),
        }
    }

    fn link_method(
        &mut self,
        method: &crate::ast::MethodDecl,
        ns: &str,
        params: &[String],
        file: &str,
    ) -> Method {
        let linked_params = method
            .params
            .iter()
            .map(|(name, ty, span)| {
                (
                    name.clone(),
                    self.link_type(ty, ns, params, file, span),
                )
            })
            .collect();
        let return_type =
            self.link_type(&method.return_type.0, ns, params, file, &method.return_type.1);
        Method {
            name: method.name.0.clone(),
            params: linked_params,
            return_type,
            span: method.name.1.clone(),
        }
    }

    fn link_type(
        &mut self,
        ty: &TypeName,
        ns: &str,
        params: &[String],
        file: &str,
        span: &Span,
    ) -> ResolvedType {
        match ty {
            TypeName::Int => ResolvedType::Int,
            TypeName::Float => ResolvedType::Float,
            TypeName::Bool => ResolvedType::Bool,
            TypeName::Str => ResolvedType::Str,
            TypeName::Unit => ResolvedType::Unit,
            TypeName::Named(name) if params.contains(name) => {
                ResolvedType::Param(name.clone())
            }
            TypeName::Named(name) => match self.lookup_struct(ns, name, file, span) {
                Some(id) => ResolvedType::Struct(id),
                // the unit placeholder never escapes: the pending error
                // fails the compile unit before the model is returned
                None => ResolvedType::Unit,
            },
        }
    }

    fn link_default(
        &mut self,
        value: &Literal,
        ns: &str,
        file: &str,
        span: &Span,
    ) -> DefaultValue {
        if let Literal::ConstRef(group, member) = value {
            let group_id = match self.registry.get(&(ns.to_string(), group.clone())) {
                Some(Entry::Group(id)) => *id,
                _ => {
                    self.errors.push(CompileError::new(
                        ErrorKind::UnresolvedReference,
                        format!("no constant group named '{group}' in {}", ns_display(ns)),
                        file,
                        span.clone(),
                    ));
                    return DefaultValue::Lit(Literal::Int(0));
                }
            };
            match self.model.group(group_id).member(member) {
                Some(index) => DefaultValue::Const(group_id, index),
                None => {
                    self.errors.push(CompileError::new(
                        ErrorKind::UnresolvedReference,
                        format!("constant group '{group}' has no member '{member}'"),
                        file,
                        span.clone(),
                    ));
                    DefaultValue::Lit(Literal::Int(0))
                }
            }
        } else {
            DefaultValue::Lit(value.clone())
        }
    }

    fn lookup_struct(
        &mut self,
        ns: &str,
        name: &str,
        file: &str,
        span: &Span,
    ) -> Option<StructId> {
        match self.registry.get(&(ns.to_string(), name.to_string())) {
            Some(Entry::Struct(id)) => Some(*id),
            Some(_) => {
                self.errors.push(CompileError::new(
                    ErrorKind::UnresolvedReference,
                    format!("'{name}' does not name a struct in {}", ns_display(ns)),
                    file,
                    span.clone(),
                ));
                None
            }
            None => {
                self.errors.push(CompileError::new(
                    ErrorKind::UnresolvedReference,
                    format!("no struct named '{name}' in {}", ns_display(ns)),
                    file,
                    span.clone(),
                ));
                None
            }
        }
    }
}
