use super::*;
use crate::ast::{Decl, Literal, TypeName};
use crate::error::ErrorKind;

use logos::Logos;

fn parse_str(input: &str) -> Result<Vec<(Decl, Span)>, CompileError> {
    let tokens = Token::lexer(input).spanned().peekable();
    let mut parser = Parser::new(tokens, "test".to_string());
    parser.parse_program()
}

fn parse_one(input: &str) -> Decl {
    let tree = parse_str(input).expect("input should parse");
    assert_eq!(tree.len(), 1);
    tree.into_iter().next().map(|(decl, _)| decl).unwrap()
}

#[test]
fn test_parse_namespace() {
    let Decl::Namespace(ns) = parse_one("namespace kitchen") else {
        panic!("expected a namespace declaration");
    };
    assert_eq!(ns.name.0, "kitchen");
}

#[test]
fn test_parse_struct_with_fields() {
    let decl = parse_one(
        "struct PlayerStats
           goals: int = 0
           assists: int = 0
           fouls: int = 0
         end",
    );
    let Decl::Struct(def) = decl else {
        panic!("expected a struct declaration");
    };
    assert_eq!(def.name.0, "PlayerStats");
    assert_eq!(def.fields.len(), 3);
    assert_eq!(def.fields[0].name.0, "goals");
    assert_eq!(def.fields[0].ty.0, TypeName::Int);
    assert_eq!(def.fields[0].default.as_ref().map(|(v, _)| v.clone()), Some(Literal::Int(0)));
}

#[test]
fn test_parse_field_without_default() {
    let Decl::Struct(def) = parse_one("struct Freezer\n temperature: int\n end") else {
        panic!("expected a struct declaration");
    };
    assert!(def.fields[0].default.is_none());
}

#[test]
fn test_parse_negative_and_typed_defaults() {
    let Decl::Struct(def) = parse_one(
        "struct Freezer
           temperature: int = -10
           ratio: float = 0.5
           frosted: bool = true
           label: string = \"main\"
         end",
    ) else {
        panic!("expected a struct declaration");
    };
    let defaults: Vec<Literal> = def
        .fields
        .iter()
        .map(|f| f.default.as_ref().map(|(v, _)| v.clone()).unwrap())
        .collect();
    assert_eq!(
        defaults,
        vec![
            Literal::Int(-10),
            Literal::Float(0.5),
            Literal::Bool(true),
            Literal::Str("main".to_string()),
        ]
    );
}

#[test]
fn test_parse_constant_reference_default() {
    let Decl::Struct(def) = parse_one("struct VCR\n mode: int = Commands.PLAY\n end") else {
        panic!("expected a struct declaration");
    };
    assert_eq!(
        def.fields[0].default.as_ref().map(|(v, _)| v.clone()),
        Some(Literal::ConstRef("Commands".to_string(), "PLAY".to_string()))
    );
}

#[test]
fn test_parse_bare_tag_default_is_rejected() {
    let err = parse_str("struct VCR\n mode: int = PLAY\n end").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_parse_methods() {
    let Decl::Struct(def) = parse_one(
        "struct Stove
           def SetBurnerLevel(burner: int, level: int) -> bool
           def Print()
         end",
    ) else {
        panic!("expected a struct declaration");
    };
    assert_eq!(def.methods.len(), 2);
    assert_eq!(def.methods[0].name.0, "SetBurnerLevel");
    assert_eq!(def.methods[0].params.len(), 2);
    assert_eq!(def.methods[0].return_type.0, TypeName::Bool);
    // omitted arrow defaults to unit
    assert_eq!(def.methods[1].return_type.0, TypeName::Unit);
}

#[test]
fn test_parse_composition_slots() {
    let Decl::Struct(def) = parse_one(
        "struct Fridge
           contains Freezer as AddFreezer
           contains IceMaker
         end",
    ) else {
        panic!("expected a struct declaration");
    };
    assert_eq!(def.slots.len(), 2);
    assert_eq!(def.slots[0].target.0, "Freezer");
    assert_eq!(def.slots[0].verb.0, "AddFreezer");
    // the verb defaults to Add<Type>
    assert_eq!(def.slots[1].verb.0, "AddIceMaker");
}

#[test]
fn test_parse_constants() {
    let Decl::Constants(group) = parse_one(
        "constants VCR
           PLAY_COMMAND = 1
           PAUSE_COMMAND = 2
           LABEL = \"vcr\"
           IDLE = idle
         end",
    ) else {
        panic!("expected a constants declaration");
    };
    assert_eq!(group.name.0, "VCR");
    assert_eq!(group.constants.len(), 4);
    assert_eq!(group.constants[0].value.0, Literal::Int(1));
    assert_eq!(group.constants[2].value.0, Literal::Str("vcr".to_string()));
    assert_eq!(group.constants[3].value.0, Literal::Tag("idle".to_string()));
}

#[test]
fn test_parse_constants_reject_float_values() {
    let err = parse_str("constants Bad\n RATIO = 1.5\n end").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_parse_template() {
    let Decl::Template(template) = parse_one(
        "template MagicMath<T>
           def IsPrime(candidate: T) -> bool
         end",
    ) else {
        panic!("expected a template declaration");
    };
    assert_eq!(template.name.0, "MagicMath");
    assert_eq!(template.params.len(), 1);
    assert_eq!(template.params[0].0, "T");
    assert_eq!(
        template.methods[0].params[0].1,
        TypeName::Named("T".to_string())
    );
}

#[test]
fn test_parse_template_rejects_slots() {
    let err = parse_str("template Box<T>\n contains Freezer\n end").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_parse_use() {
    let Decl::Use(use_decl) = parse_one("use MagicMath<int> as IntMath") else {
        panic!("expected a use declaration");
    };
    assert_eq!(use_decl.template.0, "MagicMath");
    assert_eq!(use_decl.args.len(), 1);
    assert_eq!(use_decl.args[0].0, TypeName::Int);
    assert_eq!(use_decl.alias.0, "IntMath");
}

#[test]
fn test_parse_unknown_top_level_keyword_fails() {
    let err = parse_str("export Fridge").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_parse_missing_colon_fails() {
    let err = parse_str("struct Fridge\n temperature int\n end").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn test_parse_unterminated_struct_fails_at_eof() {
    let err = parse_str("struct Fridge\n temperature: int").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.message.contains("end of file"));
}

#[test]
fn test_parse_duplicate_names_are_accepted_syntactically() {
    // semantic rejection happens in the validator, not here
    let tree = parse_str("struct A\n end\n struct A\n end").expect("should parse");
    assert_eq!(tree.len(), 2);
}
