use super::*;
use crate::error::ErrorKind;
use crate::lexer::Token;
use crate::parser::Parser;
use crate::resolver::{self, SourceUnit};

use logos::Logos;

fn model_from(input: &str) -> ResolvedModel {
    let tokens = Token::lexer(input).spanned().peekable();
    let mut parser = Parser::new(tokens, "test".to_string());
    let decls = parser.parse_program().expect("test input should parse");
    resolver::resolve(&[SourceUnit {
        file: "test".to_string(),
        decls,
    }])
    .expect("test input should resolve")
}

fn validate_str(input: &str, mode: ErrorMode) -> Vec<CompileError> {
    validate_model(&model_from(input), mode)
}

#[test]
fn test_valid_schema_passes() {
    let errors = validate_str(
        "struct Freezer
           temperature: int = -10
         end
         struct Fridge
           temperature: int = 34
           contains Freezer
           def Print()
         end",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_duplicate_struct_rejected() {
    let errors = validate_str(
        "struct Fridge
           temperature: int
         end
         struct Fridge
           volume: int
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::DuplicateDefinition);
    assert!(errors[0].message.contains("Fridge"));
}

#[test]
fn test_struct_and_group_share_a_name_space() {
    let errors = validate_str(
        "struct VCR
           mode: int
         end
         constants VCR
           PLAY = 1
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::DuplicateDefinition);
}

#[test]
fn test_same_name_in_other_namespace_is_fine() {
    let errors = validate_str(
        "namespace kitchen
         struct Fridge
           temperature: int
         end
         namespace garage
         struct Fridge
           temperature: int
         end",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty());
}

#[test]
fn test_template_alias_may_reuse_the_template_name() {
    // templates are not emitted, so the alias does not collide
    let errors = validate_str(
        "template MagicMath<T>
           def IsPrime(candidate: T) -> bool
         end
         use MagicMath<int> as MagicMath",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_duplicate_field_rejected() {
    let errors = validate_str(
        "struct Fridge
           temperature: int
           temperature: float
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::DuplicateDefinition);
    assert!(errors[0].message.contains("temperature"));
}

#[test]
fn test_duplicate_constant_rejected() {
    let errors = validate_str(
        "constants VCR
           PLAY = 1
           PLAY = 2
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::DuplicateDefinition);
}

#[test]
fn test_direct_composition_cycle_rejected() {
    let errors = validate_str(
        "struct Fridge
           contains Fridge
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::CompositionCycle);
    assert!(errors[0].message.contains("Fridge -> Fridge"));
}

#[test]
fn test_transitive_composition_cycle_rejected() {
    let errors = validate_str(
        "struct A
           contains B
         end
         struct B
           inner: C
         end
         struct C
           contains A
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::CompositionCycle);
    assert!(errors[0].message.contains("A -> B -> C -> A"));
}

#[test]
fn test_acyclic_composition_passes() {
    let errors = validate_str(
        "struct Fridge
           contains Freezer
           contains IceMaker
         end
         struct Freezer
           temperature: int
         end
         struct IceMaker
           capacity: int
         end",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty());
}

#[test]
fn test_arity_mismatch_rejected() {
    let errors = validate_str(
        "template Pair<A, B>
           first: A
           second: B
         end
         use Pair<int> as IntPair",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::ArityMismatch);
    assert!(errors[0].message.contains("2 type parameters"));
}

#[test]
fn test_default_type_mismatch_rejected() {
    let errors = validate_str(
        "struct Fridge
           temperature: int = \"cold\"
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
}

#[test]
fn test_int_default_widens_to_float() {
    let errors = validate_str(
        "struct Fridge
           ratio: float = 1
         end",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty());
}

#[test]
fn test_struct_field_with_default_rejected() {
    let errors = validate_str(
        "struct Freezer
           temperature: int
         end
         struct Fridge
           freezer: Freezer = 0
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
    assert!(errors[0].message.contains("struct-typed"));
}

#[test]
fn test_unit_field_rejected() {
    let errors = validate_str(
        "struct Fridge
           nothing: unit
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
}

#[test]
fn test_specialized_default_checked_against_the_argument() {
    let errors = validate_str(
        "template Box<T>
           value: T = 5
         end
         use Box<string> as StringBox",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
    assert!(errors[0].message.contains("value"));
}

#[test]
fn test_specialized_default_may_match_the_argument() {
    let errors = validate_str(
        "template Box<T>
           value: T = 5
         end
         use Box<int> as IntBox
         use Box<float> as FloatBox",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_unit_argument_rejected_for_parameter_field() {
    let errors = validate_str(
        "template Box<T>
           value: T
         end
         use Box<unit> as UnitBox",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
}

#[test]
fn test_arity_mismatch_skips_the_specialized_default_check() {
    let errors = validate_str(
        "template Box<T>
           value: T = 5
         end
         use Box<string, int> as Bad",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::ArityMismatch);
}

#[test]
fn test_constant_reference_default_checks_referenced_type() {
    let errors = validate_str(
        "constants Labels
           NAME = \"vcr\"
         end
         struct VCR
           mode: int = Labels.NAME
         end",
        ErrorMode::Aggregate,
    );
    assert_eq!(errors[0].kind, ErrorKind::TypeMismatch);
}

#[test]
fn test_tag_constant_counts_as_int() {
    let errors = validate_str(
        "constants Modes
           IDLE = idle
         end
         struct VCR
           mode: int = Modes.IDLE
         end",
        ErrorMode::Aggregate,
    );
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn test_aggregate_mode_collects_everything() {
    let errors = validate_str(
        "struct A
           contains A
         end
         struct A
           x: int = \"oops\"
         end",
        ErrorMode::Aggregate,
    );
    let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&ErrorKind::DuplicateDefinition));
    assert!(kinds.contains(&ErrorKind::CompositionCycle));
    assert!(kinds.contains(&ErrorKind::TypeMismatch));
}

#[test]
fn test_fail_fast_mode_stops_at_the_first_error() {
    let errors = validate_str(
        "struct A
           contains A
         end
         struct A
           x: int = \"oops\"
         end",
        ErrorMode::FailFast,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::DuplicateDefinition);
}
