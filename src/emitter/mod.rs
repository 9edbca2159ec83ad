pub mod cpp;
pub mod python;


use crate::ast::Span;
use crate::error::{CompileError, ErrorKind};
use crate::model::{Field, ResolvedModel, ResolvedType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    Cpp,
    Python,
}

/// How a target renders the default/positional-override constructor
/// contract. `Native` uses the target's own optional parameters,
/// `Synthesize` spells out one constructor overload per argument prefix, and
/// `Reject` fails emission for any struct that declares a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultArgPolicy {
    #[default]
    Native,
    Synthesize,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetConfig {
    pub language: TargetLanguage,
    pub defaults: DefaultArgPolicy,
}

impl TargetConfig {
    pub fn new(language: TargetLanguage) -> Self {
        TargetConfig {
            language,
            defaults: DefaultArgPolicy::default(),
        }
    }
}

/// One generated binding source file. Writing it to disk is the driver's
/// job; the core never touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub contents: String,
}

/// Emits the binding artifacts for one target. The model is consumed
/// read-only, so emitters for different targets can run independently.
/// Identical model and config always produce byte-identical artifacts.
pub fn emit(model: &ResolvedModel, config: &TargetConfig) -> Result<Vec<Artifact>, CompileError> {
    match config.language {
        TargetLanguage::Cpp => cpp::emit(model, config),
        TargetLanguage::Python => python::emit(model, config),
    }
}

/// `water_filter` -> `WaterFilter`. Already-pascal names pass through.
pub(crate) fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `WaterFilter` -> `water_filter`. Already-snake names pass through.
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if i > 0 && chars[i - 1] != '_' && (prev_lower || next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }
    out
}

/// The native hook symbol a generated method delegates to:
/// `<ns>_<owner>_<method>` in snake case, the namespace omitted when empty.
pub(crate) fn hook_symbol(ns: &str, owner: &str, method: &str) -> String {
    let mut parts = vec![];
    if !ns.is_empty() {
        parts.push(snake_case(ns));
    }
    parts.push(snake_case(owner));
    parts.push(snake_case(method));
    parts.join("_")
}

/// Enforces `DefaultArgPolicy::Reject`: a struct that declares a default
/// cannot be represented and fails emission for this target.
pub(crate) fn check_reject_policy(
    config: &TargetConfig,
    name: &str,
    file: &str,
    span: &Span,
    fields: &[Field],
) -> Result<(), CompileError> {
    if config.defaults == DefaultArgPolicy::Reject
        && fields.iter().any(|f| f.default.is_some())
    {
        return Err(CompileError::new(
            ErrorKind::UnsupportedConstruct,
            format!(
                "target cannot represent default constructor arguments, but struct '{name}' declares defaults"
            ),
            file,
            span.clone(),
        ));
    }
    Ok(())
}

/// The fields that become constructor parameters: builtin-typed fields in
/// declaration order. Struct-typed fields and composition slots are assembled
/// after construction.
pub(crate) fn constructor_fields(fields: &[Field]) -> Vec<&Field> {
    fields
        .iter()
        .filter(|f| {
            !matches!(
                f.ty,
                ResolvedType::Struct(_) | ResolvedType::Unit | ResolvedType::Param(_)
            )
        })
        .collect()
}
