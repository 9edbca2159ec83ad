use super::*;
use crate::lexer::Token;
use crate::parser::Parser;

use logos::Logos;

fn units(inputs: &[(&str, &str)]) -> Vec<SourceUnit> {
    inputs
        .iter()
        .map(|(file, text)| {
            let tokens = Token::lexer(text).spanned().peekable();
            let mut parser = Parser::new(tokens, file.to_string());
            SourceUnit {
                file: file.to_string(),
                decls: parser.parse_program().expect("test input should parse"),
            }
        })
        .collect()
}

fn resolve_str(input: &str) -> Result<ResolvedModel, Vec<CompileError>> {
    resolve(&units(&[("test", input)]))
}

#[test]
fn test_resolve_links_struct_fields() {
    let model = resolve_str(
        "struct Freezer
           temperature: int = -10
         end
         struct Fridge
           freezer: Freezer
         end",
    )
    .expect("should resolve");

    assert_eq!(model.structs.len(), 2);
    assert_eq!(model.structs[1].fields[0].ty, ResolvedType::Struct(StructId(0)));
}

#[test]
fn test_resolve_forward_reference() {
    // Fridge is declared before Freezer; pass one makes this legal
    let model = resolve_str(
        "struct Fridge
           contains Freezer
         end
         struct Freezer
           temperature: int
         end",
    )
    .expect("should resolve");

    assert_eq!(model.structs[0].slots[0].target, StructId(1));
}

#[test]
fn test_resolve_across_files() {
    let model = resolve(&units(&[
        ("a", "struct Fridge\n contains Freezer\n end"),
        ("b", "struct Freezer\n temperature: int\n end"),
    ]))
    .expect("should resolve");

    assert_eq!(model.structs[0].slots[0].target, StructId(1));
}

#[test]
fn test_resolve_unknown_struct_fails() {
    let errors = resolve_str("struct Fridge\n contains Freezer\n end").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedReference);
    assert!(errors[0].message.contains("Freezer"));
}

#[test]
fn test_resolve_collects_every_unresolved_reference() {
    let errors = resolve_str(
        "struct Fridge
           contains Freezer
           contains IceMaker
         end",
    )
    .unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_resolve_namespaces_are_separate() {
    let model = resolve_str(
        "namespace kitchen
         struct Fridge
           temperature: int
         end
         namespace garage
         struct Fridge
           temperature: int
         end",
    )
    .expect("same name in different namespaces should resolve");
    assert_eq!(model.structs.len(), 2);
    assert_eq!(model.structs[0].namespace, "kitchen");
    assert_eq!(model.structs[1].namespace, "garage");
}

#[test]
fn test_resolve_does_not_look_across_namespaces() {
    let errors = resolve_str(
        "namespace kitchen
         struct Freezer
           temperature: int
         end
         namespace garage
         struct Fridge
           contains Freezer
         end",
    )
    .unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedReference);
}

#[test]
fn test_resolve_constant_reference() {
    let model = resolve_str(
        "struct VCR
           mode: int = Commands.PLAY
         end
         constants Commands
           PLAY = 1
           PAUSE = 2
         end",
    )
    .expect("should resolve");

    assert_eq!(
        model.structs[0].fields[0].default,
        Some(DefaultValue::Const(GroupId(0), 0))
    );
}

#[test]
fn test_resolve_missing_constant_member_fails() {
    let errors = resolve_str(
        "constants Commands
           PLAY = 1
         end
         struct VCR
           mode: int = Commands.REWIND
         end",
    )
    .unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedReference);
    assert!(errors[0].message.contains("REWIND"));
}

#[test]
fn test_resolve_missing_constant_group_fails() {
    let errors = resolve_str("struct VCR\n mode: int = Commands.PLAY\n end").unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedReference);
    assert!(errors[0].message.contains("Commands"));
}

#[test]
fn test_resolve_template_parameters() {
    let model = resolve_str(
        "template MagicMath<T>
           def IsPrime(candidate: T) -> bool
         end
         use MagicMath<int> as IntMath",
    )
    .expect("should resolve");

    assert_eq!(model.templates.len(), 1);
    assert_eq!(
        model.templates[0].methods[0].params[0].1,
        ResolvedType::Param("T".to_string())
    );
    assert_eq!(model.instantiations[0].template, TemplateId(0));
    assert_eq!(model.instantiations[0].args, vec![ResolvedType::Int]);
}

#[test]
fn test_resolve_unknown_template_fails() {
    let errors = resolve_str("use MagicMath<int> as IntMath").unwrap_err();
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedReference);
    assert!(errors[0].message.contains("MagicMath"));
}

#[test]
fn test_resolve_keeps_duplicates_for_the_validator() {
    let model = resolve_str(
        "struct Fridge
           temperature: int
         end
         struct Fridge
           volume: int
         end",
    )
    .expect("duplicates are a validation error, not a resolution error");
    assert_eq!(model.structs.len(), 2);
}

#[test]
fn test_resolve_preserves_declaration_order() {
    let model = resolve_str(
        "struct B
           x: int
         end
         constants C
           K = 1
         end
         struct A
           x: int
         end",
    )
    .expect("should resolve");

    assert_eq!(
        model.order,
        vec![
            Item::Struct(StructId(0)),
            Item::Group(GroupId(0)),
            Item::Struct(StructId(1)),
        ]
    );
    assert_eq!(model.structs[0].name, "B");
    assert_eq!(model.structs[1].name, "A");
}
