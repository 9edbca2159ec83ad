pub mod specialize;

use crate::ast::{Literal, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstId(pub usize);

/// A fully resolved type. Struct references are indices into the model's
/// declaration arena rather than owning pointers, so forward references and
/// cycles resolve cleanly and cycle detection stays a plain graph walk.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    Int,
    Float,
    Bool,
    Str,
    Unit,
    Struct(StructId),
    /// A template type parameter. Only appears inside template bodies; the
    /// emitter substitutes it away during specialization.
    Param(String),
}

/// A field's default value after resolution. Constant references keep the
/// link to the declared constant so each emitter can choose between the
/// scoped path and the resolved literal.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Lit(Literal),
    Const(GroupId, usize),
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: ResolvedType,
    pub default: Option<DefaultValue>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub params: Vec<(String, ResolvedType)>,
    pub return_type: ResolvedType,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub target: StructId,
    pub verb: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StructDef {
    pub namespace: String,
    pub name: String,
    pub file: String,
    pub span: Span,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
pub struct Constant {
    pub name: String,
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ConstGroup {
    pub namespace: String,
    pub name: String,
    pub file: String,
    pub span: Span,
    pub constants: Vec<Constant>,
}

impl ConstGroup {
    pub fn member(&self, name: &str) -> Option<usize> {
        self.constants.iter().position(|c| c.name == name)
    }

    /// The 0-based ordinal of a tag-valued member among the group's tags.
    /// Integer and string members do not advance the ordinal.
    pub fn tag_ordinal(&self, member: usize) -> i64 {
        self.constants[..member]
            .iter()
            .filter(|c| matches!(c.value, Literal::Tag(_)))
            .count() as i64
    }
}

#[derive(Debug, Clone)]
pub struct TemplateDef {
    pub namespace: String,
    pub name: String,
    pub file: String,
    pub span: Span,
    pub params: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

/// A requested specialization: `use Template<args> as Alias`. The resolver
/// links the template by name only; arity is validated later and the body is
/// specialized via `specialize::specialize`.
#[derive(Debug, Clone)]
pub struct Instantiation {
    pub namespace: String,
    pub alias: String,
    pub file: String,
    pub span: Span,
    pub template: TemplateId,
    pub args: Vec<ResolvedType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Struct(StructId),
    Group(GroupId),
    Template(TemplateId),
    Inst(InstId),
}

/// The fully linked view of a compile unit. Immutable after resolution; the
/// sole input to the validator and the emitters. `order` preserves source
/// declaration order exactly, which keeps emission deterministic.
#[derive(Debug, Clone, Default)]
pub struct ResolvedModel {
    pub structs: Vec<StructDef>,
    pub groups: Vec<ConstGroup>,
    pub templates: Vec<TemplateDef>,
    pub instantiations: Vec<Instantiation>,
    pub order: Vec<Item>,
}

/// Human-readable namespace name for error messages.
pub fn ns_display(ns: &str) -> String {
    if ns.is_empty() {
        "the default namespace".to_string()
    } else {
        format!("namespace '{ns}'")
    }
}

impl ResolvedModel {
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.0]
    }

    /// The source-level name of a resolved type, for error messages.
    pub fn type_name(&self, ty: &ResolvedType) -> String {
        match ty {
            ResolvedType::Int => "int".to_string(),
            ResolvedType::Float => "float".to_string(),
            ResolvedType::Bool => "bool".to_string(),
            ResolvedType::Str => "string".to_string(),
            ResolvedType::Unit => "unit".to_string(),
            ResolvedType::Struct(id) => self.struct_def(*id).name.clone(),
            ResolvedType::Param(name) => name.clone(),
        }
    }

    pub fn group(&self, id: GroupId) -> &ConstGroup {
        &self.groups[id.0]
    }

    pub fn template(&self, id: TemplateId) -> &TemplateDef {
        &self.templates[id.0]
    }

    pub fn instantiation(&self, id: InstId) -> &Instantiation {
        &self.instantiations[id.0]
    }
}
