use crate::ast::Literal;
use crate::emitter::{
    Artifact, DefaultArgPolicy, TargetConfig, check_reject_policy, constructor_fields,
    hook_symbol, pascal_case, snake_case,
};
use crate::error::{CompileError, ErrorKind};
use crate::model::specialize::specialize;
use crate::model::{
    ConstGroup, DefaultValue, Field, Item, Method, ResolvedModel, ResolvedType, StructDef,
};

/// The C++ target. One header per struct, constant group, and template
/// instantiation, named `<ns>_<Name>.hpp` so same-named definitions in
/// different namespaces get distinct files. Classes wrap their fields
/// as private members with Get/Set accessors, composition slots as
/// `std::vector` members with an add verb and an insertion-order enumerator,
/// and declared methods as inline definitions delegating to `extern "C"`
/// native hooks.
pub fn emit(model: &ResolvedModel, config: &TargetConfig) -> Result<Vec<Artifact>, CompileError> {
    let mut artifacts = vec![];
    for item in &model.order {
        match item {
            Item::Struct(id) => {
                artifacts.push(emit_struct(model, config, model.struct_def(*id), false)?);
            }
            Item::Group(id) => artifacts.push(emit_group(model.group(*id))),
            Item::Template(_) => {} // emitted per instantiation
            Item::Inst(id) => {
                let def = specialize(model, model.instantiation(*id));
                let statics = def.fields.is_empty() && def.slots.is_empty();
                artifacts.push(emit_struct(model, config, &def, statics)?);
            }
        }
    }
    Ok(artifacts)
}

fn emit_struct(
    model: &ResolvedModel,
    config: &TargetConfig,
    def: &StructDef,
    statics: bool,
) -> Result<Artifact, CompileError> {
    check_reject_policy(config, &def.name, &def.file, &def.span, &def.fields)?;
    for method in &def.methods {
        if matches!(method.return_type, ResolvedType::Struct(_)) {
            return Err(CompileError::new(
                ErrorKind::UnsupportedConstruct,
                format!(
                    "the C++ target cannot return struct values from native hooks ('{}' in '{}')",
                    method.name, def.name
                ),
                &def.file,
                method.span.clone(),
            ));
        }
    }

    let ctor_fields = constructor_fields(&def.fields);
    let base = header_name(&def.namespace, &def.name);
    let guard = format!("{}_HPP", snake_case(&base).to_uppercase());
    let mut lines: Vec<String> = vec![];

    lines.push(format!("#ifndef {guard}"));
    lines.push(format!("#define {guard}"));
    lines.push(String::new());

    let needs_string = uses_string(def);
    let needs_vector = !def.slots.is_empty();
    if needs_string {
        lines.push("#include <string>".to_string());
    }
    if needs_vector {
        lines.push("#include <vector>".to_string());
    }
    if needs_string || needs_vector {
        lines.push(String::new());
    }

    let deps = local_includes(model, def);
    for dep in &deps {
        lines.push(format!("#include <{}.hpp>", header_name(&def.namespace, dep)));
    }
    if !deps.is_empty() {
        lines.push(String::new());
    }

    if !def.methods.is_empty() {
        lines.push("extern \"C\" {".to_string());
        for method in &def.methods {
            lines.push(format!("  {};", hook_prototype(def, method, statics, &ctor_fields)));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    let pad = if def.namespace.is_empty() { "" } else { "  " };
    if !def.namespace.is_empty() {
        lines.push(format!("namespace {} {{", def.namespace));
        lines.push(String::new());
    }

    declare_class(model, config, def, statics, &ctor_fields, pad, &mut lines);
    lines.push(String::new());
    define_members(model, config, def, statics, &ctor_fields, pad, &mut lines);

    if !def.namespace.is_empty() {
        lines.push(String::new());
        lines.push("}".to_string());
    }
    lines.push(String::new());
    lines.push(format!("#endif /* {guard} */"));
    lines.push(String::new());

    Ok(Artifact {
        filename: format!("{base}.hpp"),
        contents: lines.join("\n"),
    })
}

fn declare_class(
    model: &ResolvedModel,
    config: &TargetConfig,
    def: &StructDef,
    statics: bool,
    ctor_fields: &[&Field],
    pad: &str,
    lines: &mut Vec<String>,
) {
    lines.push(format!("{pad}class {} {{", def.name));
    lines.push(format!("{pad}public:"));

    if !statics {
        for params in constructor_signatures(model, config, ctor_fields) {
            lines.push(format!("{pad}  {}( {params} );", def.name));
        }
    }

    for field in &def.fields {
        let ty = cpp_type(model, &field.ty);
        let getter = pascal_case(&field.name);
        lines.push(format!("{pad}  {ty} Get{getter}( void ) const;"));
        lines.push(format!(
            "{pad}  void Set{getter}( {ty} {} );",
            snake_case(&field.name)
        ));
    }

    for slot in &def.slots {
        let target = &model.struct_def(slot.target).name;
        lines.push(format!(
            "{pad}  void {}( {target} {} );",
            slot.verb,
            snake_case(target)
        ));
        lines.push(format!(
            "{pad}  const std::vector<{target}> &Get{}s( void ) const;",
            pascal_case(target)
        ));
    }

    for method in &def.methods {
        let ret = cpp_type(model, &method.return_type);
        let qualifier = if statics { "static " } else { "" };
        lines.push(format!(
            "{pad}  {qualifier}{ret} {}( {} );",
            method.name,
            param_list(model, &method.params)
        ));
    }

    let members = member_variables(model, def);
    if !members.is_empty() {
        lines.push(String::new());
        lines.push(format!("{pad}private:"));
        for member in members {
            lines.push(format!("{pad}  {member};"));
        }
    }

    lines.push(format!("{pad}}};"));
}

fn define_members(
    model: &ResolvedModel,
    config: &TargetConfig,
    def: &StructDef,
    statics: bool,
    ctor_fields: &[&Field],
    pad: &str,
    lines: &mut Vec<String>,
) {
    let name = &def.name;

    if !statics {
        match config.defaults {
            DefaultArgPolicy::Synthesize => {
                for n in 0..=ctor_fields.len() {
                    define_constructor(model, def, &ctor_fields[..n], ctor_fields, pad, lines);
                    lines.push(String::new());
                }
            }
            _ => {
                define_constructor(model, def, ctor_fields, ctor_fields, pad, lines);
                lines.push(String::new());
            }
        }
    }

    for field in &def.fields {
        let ty = cpp_type(model, &field.ty);
        let getter = pascal_case(&field.name);
        let member = member_name(&field.name);
        let param = snake_case(&field.name);
        lines.push(format!("{pad}inline {ty} {name}::Get{getter}( void ) const {{"));
        lines.push(format!("{pad}  return this->{member};"));
        lines.push(format!("{pad}}}"));
        lines.push(String::new());
        lines.push(format!("{pad}inline void {name}::Set{getter}( {ty} {param} ) {{"));
        lines.push(format!("{pad}  this->{member} = {param};"));
        lines.push(format!("{pad}}}"));
        lines.push(String::new());
    }

    for slot in &def.slots {
        let target = &model.struct_def(slot.target).name;
        let member = slot_member_name(target);
        let param = snake_case(target);
        lines.push(format!("{pad}inline void {name}::{}( {target} {param} ) {{", slot.verb));
        lines.push(format!("{pad}  this->{member}.push_back( {param} );"));
        lines.push(format!("{pad}}}"));
        lines.push(String::new());
        lines.push(format!(
            "{pad}inline const std::vector<{target}> &{name}::Get{}s( void ) const {{",
            pascal_case(target)
        ));
        lines.push(format!("{pad}  return this->{member};"));
        lines.push(format!("{pad}}}"));
        lines.push(String::new());
    }

    for (i, method) in def.methods.iter().enumerate() {
        define_method(model, def, method, statics, ctor_fields, pad, lines);
        if i + 1 < def.methods.len() {
            lines.push(String::new());
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
}

/// The constructor signatures required by the default-argument policy:
/// one signature with native default arguments, or one overload per argument
/// prefix when synthesizing.
fn constructor_signatures(
    model: &ResolvedModel,
    config: &TargetConfig,
    ctor_fields: &[&Field],
) -> Vec<String> {
    match config.defaults {
        DefaultArgPolicy::Synthesize => (0..=ctor_fields.len())
            .map(|n| plain_params(model, &ctor_fields[..n]))
            .collect(),
        _ => {
            let params: Vec<String> = ctor_fields
                .iter()
                .map(|f| {
                    format!(
                        "{} {} = {}",
                        cpp_type(model, &f.ty),
                        snake_case(&f.name),
                        default_value(model, f)
                    )
                })
                .collect();
            if params.is_empty() {
                vec!["void".to_string()]
            } else {
                vec![params.join(", ")]
            }
        }
    }
}

fn define_constructor(
    model: &ResolvedModel,
    def: &StructDef,
    supplied: &[&Field],
    ctor_fields: &[&Field],
    pad: &str,
    lines: &mut Vec<String>,
) {
    let params = plain_params(model, supplied);
    lines.push(format!("{pad}inline {}::{}( {params} ) {{", def.name, def.name));
    for field in ctor_fields {
        let member = member_name(&field.name);
        if supplied.iter().any(|f| f.name == field.name) {
            lines.push(format!("{pad}  this->{member} = {};", snake_case(&field.name)));
        } else {
            lines.push(format!("{pad}  this->{member} = {};", default_value(model, field)));
        }
    }
    lines.push(format!("{pad}}}"));
}

fn define_method(
    model: &ResolvedModel,
    def: &StructDef,
    method: &Method,
    statics: bool,
    ctor_fields: &[&Field],
    pad: &str,
    lines: &mut Vec<String>,
) {
    let ret = cpp_type(model, &method.return_type);
    lines.push(format!(
        "{pad}inline {ret} {}::{}( {} ) {{",
        def.name,
        method.name,
        param_list(model, &method.params)
    ));

    let mut args: Vec<String> = vec![];
    if !statics {
        for field in ctor_fields {
            args.push(hook_argument(&field.ty, &format!("this->{}", member_name(&field.name))));
        }
    }
    for (name, ty) in &method.params {
        args.push(hook_argument(ty, name));
    }

    let call = format!(
        "{}( {} )",
        hook_symbol(&def.namespace, &def.name, &method.name),
        args.join(", ")
    );
    let statement = match method.return_type {
        ResolvedType::Unit => format!("{call};"),
        ResolvedType::Bool => format!("return {call} != 0;"),
        ResolvedType::Str => format!("return std::string( {call} );"),
        _ => format!("return {call};"),
    };
    lines.push(format!("{pad}  {statement}"));
    lines.push(format!("{pad}}}"));
}

fn emit_group(group: &ConstGroup) -> Artifact {
    let base = header_name(&group.namespace, &group.name);
    let guard = format!("{}_HPP", snake_case(&base).to_uppercase());
    let mut lines: Vec<String> = vec![];

    lines.push(format!("#ifndef {guard}"));
    lines.push(format!("#define {guard}"));
    lines.push(String::new());

    let pad = if group.namespace.is_empty() { "" } else { "  " };
    if !group.namespace.is_empty() {
        lines.push(format!("namespace {} {{", group.namespace));
        lines.push(String::new());
    }

    lines.push(format!("{pad}class {} {{", group.name));
    lines.push(format!("{pad}public:"));
    for (i, constant) in group.constants.iter().enumerate() {
        let declaration = match &constant.value {
            Literal::Str(value) => {
                format!("static constexpr const char *{} = {value:?};", constant.name)
            }
            Literal::Int(value) => {
                format!("static constexpr int {} = {value};", constant.name)
            }
            Literal::Tag(_) => {
                format!("static constexpr int {} = {};", constant.name, group.tag_ordinal(i))
            }
            other => format!("static constexpr int {} = {other:?};", constant.name),
        };
        lines.push(format!("{pad}  {declaration}"));
    }
    lines.push(format!("{pad}}};"));

    if !group.namespace.is_empty() {
        lines.push(String::new());
        lines.push("}".to_string());
    }
    lines.push(String::new());
    lines.push(format!("#endif /* {guard} */"));
    lines.push(String::new());

    Artifact {
        filename: format!("{base}.hpp"),
        contents: lines.join("\n"),
    }
}

/// The artifact base name: `<ns>_<Name>`, the prefix omitted for the default
/// namespace. Same-named definitions in different namespaces are legal, so
/// the bare name alone would collide on the filesystem.
fn header_name(ns: &str, name: &str) -> String {
    if ns.is_empty() {
        name.to_string()
    } else {
        format!("{ns}_{name}")
    }
}

fn cpp_type(model: &ResolvedModel, ty: &ResolvedType) -> String {
    match ty {
        ResolvedType::Int => "int".to_string(),
        ResolvedType::Float => "double".to_string(),
        ResolvedType::Bool => "bool".to_string(),
        ResolvedType::Str => "std::string".to_string(),
        ResolvedType::Unit => "void".to_string(),
        ResolvedType::Struct(id) => model.struct_def(*id).name.clone(),
        ResolvedType::Param(name) => name.clone(),
    }
}

/// The C type used in a native hook prototype.
fn hook_type(ty: &ResolvedType) -> &'static str {
    match ty {
        ResolvedType::Int => "int",
        ResolvedType::Float => "double",
        ResolvedType::Bool => "int",
        ResolvedType::Str => "const char *",
        ResolvedType::Unit => "void",
        ResolvedType::Struct(_) | ResolvedType::Param(_) => "const void *",
    }
}

/// How a value crosses into a native hook call.
fn hook_argument(ty: &ResolvedType, expr: &str) -> String {
    match ty {
        ResolvedType::Str => format!("{expr}.c_str()"),
        ResolvedType::Struct(_) => format!("&{expr}"),
        _ => expr.to_string(),
    }
}

fn hook_prototype(
    def: &StructDef,
    method: &Method,
    statics: bool,
    ctor_fields: &[&Field],
) -> String {
    let mut params: Vec<String> = vec![];
    if !statics {
        for field in ctor_fields {
            params.push(format!("{} {}", hook_type(&field.ty), snake_case(&field.name)));
        }
    }
    for (name, ty) in &method.params {
        params.push(format!("{} {name}", hook_type(ty)));
    }
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    format!(
        "{} {}( {params} )",
        hook_type(&method.return_type),
        hook_symbol(&def.namespace, &def.name, &method.name)
    )
}

fn plain_params(model: &ResolvedModel, fields: &[&Field]) -> String {
    if fields.is_empty() {
        return "void".to_string();
    }
    fields
        .iter()
        .map(|f| format!("{} {}", cpp_type(model, &f.ty), snake_case(&f.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn param_list(model: &ResolvedModel, params: &[(String, ResolvedType)]) -> String {
    if params.is_empty() {
        return "void".to_string();
    }
    params
        .iter()
        .map(|(name, ty)| format!("{} {name}", cpp_type(model, ty)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn member_name(field: &str) -> String {
    format!("{}_", snake_case(field))
}

fn slot_member_name(target: &str) -> String {
    format!("{}s_", snake_case(target))
}

fn member_variables(model: &ResolvedModel, def: &StructDef) -> Vec<String> {
    let mut members = vec![];
    for field in &def.fields {
        members.push(format!("{} {}", cpp_type(model, &field.ty), member_name(&field.name)));
    }
    for slot in &def.slots {
        let target = &model.struct_def(slot.target).name;
        members.push(format!("std::vector<{target}> {}", slot_member_name(target)));
    }
    members
}

/// The default expression for a constructor argument: the declared literal,
/// the scoped path of a referenced constant, or the type's zero/identity
/// value when nothing was declared.
fn default_value(model: &ResolvedModel, field: &Field) -> String {
    match &field.default {
        Some(DefaultValue::Const(group, member)) => {
            let group = model.group(*group);
            format!("{}::{}", group.name, group.constants[*member].name)
        }
        Some(DefaultValue::Lit(value)) => match value {
            Literal::Int(v) => v.to_string(),
            Literal::Float(v) => format!("{v:?}"),
            Literal::Bool(v) => v.to_string(),
            Literal::Str(v) => format!("{v:?}"),
            Literal::Tag(_) | Literal::ConstRef(..) => "0".to_string(),
        },
        None => match field.ty {
            ResolvedType::Float => "0.0".to_string(),
            ResolvedType::Bool => "false".to_string(),
            ResolvedType::Str => "\"\"".to_string(),
            _ => "0".to_string(),
        },
    }
}

fn uses_string(def: &StructDef) -> bool {
    def.fields.iter().any(|f| f.ty == ResolvedType::Str)
        || def.methods.iter().any(|m| {
            m.return_type == ResolvedType::Str
                || m.params.iter().any(|(_, ty)| *ty == ResolvedType::Str)
        })
}

/// Headers of other generated artifacts this one refers to, in first-use
/// order: struct-typed fields, slot targets, struct-typed method parameters,
/// and constant groups referenced by defaults.
fn local_includes(model: &ResolvedModel, def: &StructDef) -> Vec<String> {
    let mut deps: Vec<String> = vec![];
    let mut add = |name: &str| {
        if name != def.name && !deps.iter().any(|d| d == name) {
            deps.push(name.to_string());
        }
    };

    for field in &def.fields {
        if let ResolvedType::Struct(id) = field.ty {
            add(&model.struct_def(id).name);
        }
        if let Some(DefaultValue::Const(group, _)) = &field.default {
            add(&model.group(*group).name);
        }
    }
    for slot in &def.slots {
        add(&model.struct_def(slot.target).name);
    }
    for method in &def.methods {
        for (_, ty) in &method.params {
            if let ResolvedType::Struct(id) = ty {
                add(&model.struct_def(*id).name);
            }
        }
    }
    deps
}
