use crate::error::{CompileError, ErrorKind};
use crate::model::{Item, ResolvedModel, ns_display};

use std::collections::HashMap;

/// Flags every declaration whose (namespace, name) pair is already taken.
/// Structs, constant groups, and instantiation aliases share one emitted name
/// space per namespace; templates have their own. Field and method names must
/// be unique within their struct, constant names within their group.
pub fn check_duplicates(model: &ResolvedModel) -> Vec<CompileError> {
    let mut errors = vec![];

    let mut emitted: HashMap<(&str, &str), ()> = HashMap::new();
    let mut templates: HashMap<(&str, &str), ()> = HashMap::new();

    for item in &model.order {
        let (names, ns, name, file, span, what) = match item {
            Item::Struct(id) => {
                let s = model.struct_def(*id);
                (&mut emitted, &s.namespace, &s.name, &s.file, &s.span, "struct")
            }
            Item::Group(id) => {
                let g = model.group(*id);
                (&mut emitted, &g.namespace, &g.name, &g.file, &g.span, "constant group")
            }
            Item::Template(id) => {
                let t = model.template(*id);
                (&mut templates, &t.namespace, &t.name, &t.file, &t.span, "template")
            }
            Item::Inst(id) => {
                let i = model.instantiation(*id);
                (&mut emitted, &i.namespace, &i.alias, &i.file, &i.span, "instantiation")
            }
        };
        if names.insert((ns.as_str(), name.as_str()), ()).is_some() {
            errors.push(CompileError::new(
                ErrorKind::DuplicateDefinition,
                format!("{what} '{name}' is already defined in {}", ns_display(ns)),
                file,
                span.clone(),
            ));
        }
    }

    for def in &model.structs {
        let mut members: HashMap<&str, ()> = HashMap::new();
        for field in &def.fields {
            if members.insert(&field.name, ()).is_some() {
                errors.push(CompileError::new(
                    ErrorKind::DuplicateDefinition,
                    format!("field '{}' is already defined in struct '{}'", field.name, def.name),
                    &def.file,
                    field.span.clone(),
                ));
            }
        }
        for method in &def.methods {
            if members.insert(&method.name, ()).is_some() {
                errors.push(CompileError::new(
                    ErrorKind::DuplicateDefinition,
                    format!("method '{}' is already defined in struct '{}'", method.name, def.name),
                    &def.file,
                    method.span.clone(),
                ));
            }
        }
    }

    for group in &model.groups {
        let mut members: HashMap<&str, ()> = HashMap::new();
        for constant in &group.constants {
            if members.insert(&constant.name, ()).is_some() {
                errors.push(CompileError::new(
                    ErrorKind::DuplicateDefinition,
                    format!(
                        "constant '{}' is already defined in group '{}'",
                        constant.name, group.name
                    ),
                    &group.file,
                    constant.span.clone(),
                ));
            }
        }
    }

    errors
}
