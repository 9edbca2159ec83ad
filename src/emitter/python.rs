use crate::ast::Literal;
use crate::emitter::{
    Artifact, TargetConfig, check_reject_policy, constructor_fields, hook_symbol, pascal_case,
    snake_case,
};
use crate::error::CompileError;
use crate::model::specialize::specialize;
use crate::model::{
    ConstGroup, DefaultValue, Field, Item, ResolvedModel, ResolvedType, StructDef,
};

/// The Python target. One module per namespace (`bindings.py` for the default
/// namespace) holding every class of that namespace in declaration order.
/// Defaults are native keyword defaults; declared methods delegate to the
/// namespace's native hook module. Constant defaults are flattened to their
/// resolved literal so a class may reference a group declared after it.
pub fn emit(model: &ResolvedModel, config: &TargetConfig) -> Result<Vec<Artifact>, CompileError> {
    let mut namespaces: Vec<&str> = vec![];
    for item in &model.order {
        let ns = match item {
            Item::Struct(id) => model.struct_def(*id).namespace.as_str(),
            Item::Group(id) => model.group(*id).namespace.as_str(),
            Item::Template(_) => continue,
            Item::Inst(id) => model.instantiation(*id).namespace.as_str(),
        };
        if !namespaces.contains(&ns) {
            namespaces.push(ns);
        }
    }

    namespaces
        .iter()
        .map(|ns| emit_module(model, config, ns))
        .collect()
}

fn emit_module(
    model: &ResolvedModel,
    config: &TargetConfig,
    ns: &str,
) -> Result<Artifact, CompileError> {
    let mut blocks: Vec<Vec<String>> = vec![];
    let mut has_hooks = false;

    for item in &model.order {
        match item {
            Item::Struct(id) => {
                let def = model.struct_def(*id);
                if def.namespace == ns {
                    check_reject_policy(config, &def.name, &def.file, &def.span, &def.fields)?;
                    has_hooks |= !def.methods.is_empty();
                    blocks.push(emit_class(model, def, false));
                }
            }
            Item::Group(id) => {
                let group = model.group(*id);
                if group.namespace == ns {
                    blocks.push(emit_constants(group));
                }
            }
            Item::Template(_) => {}
            Item::Inst(id) => {
                let inst = model.instantiation(*id);
                if inst.namespace == ns {
                    let def = specialize(model, inst);
                    check_reject_policy(config, &def.name, &def.file, &def.span, &def.fields)?;
                    has_hooks |= !def.methods.is_empty();
                    let statics = def.fields.is_empty() && def.slots.is_empty();
                    blocks.push(emit_class(model, &def, statics));
                }
            }
        }
    }

    let mut lines: Vec<String> = vec!["# Generated by wrapgen. Do not edit.".to_string()];
    if has_hooks {
        lines.push(String::new());
        if ns.is_empty() {
            lines.push("import _native".to_string());
        } else {
            lines.push(format!("import {ns}_native as _native"));
        }
    }
    for block in blocks {
        lines.push(String::new());
        lines.push(String::new());
        lines.extend(block);
    }
    lines.push(String::new());

    let filename = if ns.is_empty() {
        "bindings.py".to_string()
    } else {
        format!("{ns}.py")
    };
    Ok(Artifact {
        filename,
        contents: lines.join("\n"),
    })
}

fn emit_class(model: &ResolvedModel, def: &StructDef, statics: bool) -> Vec<String> {
    let mut lines = vec![format!("class {}:", def.name)];
    let mut first = true;
    let mut separate = |lines: &mut Vec<String>| {
        if !first {
            lines.push(String::new());
        }
        first = false;
    };

    if !statics {
        separate(&mut lines);
        let params: Vec<String> = constructor_fields(&def.fields)
            .iter()
            .map(|f| format!("{}={}", snake_case(&f.name), default_value(model, f)))
            .collect();
        lines.push(format!("    def __init__(self{}):", prefix_args(&params)));
        if def.fields.is_empty() && def.slots.is_empty() {
            lines.push("        pass".to_string());
        }
        for field in &def.fields {
            let attr = attr_name(&field.name);
            if matches!(field.ty, ResolvedType::Struct(_)) {
                lines.push(format!("        self.{attr} = None"));
            } else {
                lines.push(format!("        self.{attr} = {}", snake_case(&field.name)));
            }
        }
        for slot in &def.slots {
            let target = &model.struct_def(slot.target).name;
            lines.push(format!("        self.{} = []", slot_attr_name(target)));
        }
    }

    for field in &def.fields {
        let getter = pascal_case(&field.name);
        let attr = attr_name(&field.name);
        let param = snake_case(&field.name);
        separate(&mut lines);
        lines.push(format!("    def Get{getter}(self):"));
        lines.push(format!("        return self.{attr}"));
        lines.push(String::new());
        lines.push(format!("    def Set{getter}(self, {param}):"));
        lines.push(format!("        self.{attr} = {param}"));
    }

    for slot in &def.slots {
        let target = &model.struct_def(slot.target).name;
        let attr = slot_attr_name(target);
        let param = snake_case(target);
        separate(&mut lines);
        lines.push(format!("    def {}(self, {param}):", slot.verb));
        lines.push(format!("        self.{attr}.append({param})"));
        lines.push(String::new());
        lines.push(format!("    def Get{}s(self):", pascal_case(target)));
        lines.push(format!("        return list(self.{attr})"));
    }

    for method in &def.methods {
        separate(&mut lines);
        let params: Vec<String> = method.params.iter().map(|(name, _)| name.clone()).collect();
        let mut args: Vec<String> = vec![];
        if statics {
            lines.push("    @staticmethod".to_string());
            lines.push(format!("    def {}({}):", method.name, params.join(", ")));
        } else {
            lines.push(format!("    def {}(self{}):", method.name, prefix_args(&params)));
            for field in constructor_fields(&def.fields) {
                args.push(format!("self.{}", attr_name(&field.name)));
            }
        }
        args.extend(params);
        lines.push(format!(
            "        return _native.{}({})",
            hook_symbol(&def.namespace, &def.name, &method.name),
            args.join(", ")
        ));
    }

    if statics && def.methods.is_empty() {
        lines.push("    pass".to_string());
    }

    lines
}

fn emit_constants(group: &ConstGroup) -> Vec<String> {
    let mut lines = vec![format!("class {}:", group.name)];
    if group.constants.is_empty() {
        lines.push("    pass".to_string());
    }
    for (i, constant) in group.constants.iter().enumerate() {
        let value = match &constant.value {
            Literal::Int(v) => v.to_string(),
            Literal::Str(v) => format!("{v:?}"),
            Literal::Tag(_) => group.tag_ordinal(i).to_string(),
            other => format!("{other:?}"),
        };
        lines.push(format!("    {} = {value}", constant.name));
    }
    lines
}

fn prefix_args(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!(", {}", params.join(", "))
    }
}

fn attr_name(field: &str) -> String {
    format!("_{}", snake_case(field))
}

fn slot_attr_name(target: &str) -> String {
    format!("_{}s", snake_case(target))
}

/// A constructor keyword default: the declared literal, the referenced
/// constant's resolved value, or the type's zero/identity value.
fn default_value(model: &ResolvedModel, field: &Field) -> String {
    match &field.default {
        Some(DefaultValue::Const(group, member)) => {
            let group = model.group(*group);
            match &group.constants[*member].value {
                Literal::Int(v) => v.to_string(),
                Literal::Str(v) => format!("{v:?}"),
                Literal::Tag(_) => group.tag_ordinal(*member).to_string(),
                other => format!("{other:?}"),
            }
        }
        Some(DefaultValue::Lit(value)) => match value {
            Literal::Int(v) => v.to_string(),
            Literal::Float(v) => format!("{v:?}"),
            Literal::Bool(v) => if *v { "True" } else { "False" }.to_string(),
            Literal::Str(v) => format!("{v:?}"),
            Literal::Tag(_) | Literal::ConstRef(..) => "0".to_string(),
        },
        None => match field.ty {
            ResolvedType::Float => "0.0".to_string(),
            ResolvedType::Bool => "False".to_string(),
            ResolvedType::Str => "\"\"".to_string(),
            _ => "0".to_string(),
        },
    }
}
