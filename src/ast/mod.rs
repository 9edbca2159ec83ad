use std::ops::Range;

pub type Span = Range<usize>;

/// A top-level declaration as written in the schema source. No names are
/// resolved at this stage; that happens in the resolver.
#[derive(Debug, Clone)]
pub enum Decl {
    Namespace(NamespaceDecl),
    Struct(StructDecl),
    Constants(ConstGroupDecl),
    Template(TemplateDecl),
    Use(UseDecl),
}

/// `namespace NAME` sets the namespace for the declarations that follow.
#[derive(Debug, Clone)]
pub struct NamespaceDecl {
    pub name: (String, Span),
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: (String, Span),
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub slots: Vec<SlotDecl>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: (String, Span),
    pub ty: (TypeName, Span),
    pub default: Option<(Literal, Span)>,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: (String, Span),
    pub params: Vec<(String, TypeName, Span)>,
    pub return_type: (TypeName, Span),
}

/// `contains Freezer as AddFreezer`: a composition slot accepting instances
/// of another struct, filled after construction via the add verb.
#[derive(Debug, Clone)]
pub struct SlotDecl {
    pub target: (String, Span),
    pub verb: (String, Span),
}

#[derive(Debug, Clone)]
pub struct ConstGroupDecl {
    pub name: (String, Span),
    pub constants: Vec<ConstDecl>,
}

#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: (String, Span),
    pub value: (Literal, Span),
}

#[derive(Debug, Clone)]
pub struct TemplateDecl {
    pub name: (String, Span),
    pub params: Vec<(String, Span)>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

/// `use MagicMath<int> as MagicMath` requests a concrete specialization of
/// a template under the alias name.
#[derive(Debug, Clone)]
pub struct UseDecl {
    pub template: (String, Span),
    pub args: Vec<(TypeName, Span)>,
    pub alias: (String, Span),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    Int,
    Float,
    Bool,
    Str,
    Unit,
    Named(String),
}

impl TypeName {
    pub fn from_ident(name: &str) -> TypeName {
        match name {
            "int" => TypeName::Int,
            "float" => TypeName::Float,
            "bool" => TypeName::Bool,
            "string" => TypeName::Str,
            "unit" => TypeName::Unit,
            _ => TypeName::Named(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// A bare identifier in a constant group: an enumerated tag.
    Tag(String),
    /// `Group.MEMBER`: a scoped reference to a declared constant.
    ConstRef(String, String),
}
