use crate::ast::Literal;
use crate::error::{CompileError, ErrorKind};
use crate::model::specialize::specialize;
use crate::model::{DefaultValue, Field, ResolvedModel, ResolvedType};

/// Checks that every declared default value is compatible with its field's
/// type: int fields take integer defaults, float fields take float or integer
/// defaults, bool and string fields take their own literal kind. A constant
/// reference is checked against the referenced constant's literal, with tags
/// counting as integers. Struct-typed fields take no default, and unit is not
/// a field type at all. A template field whose type is still a parameter is
/// checked per instantiation, against the specialized body, so no emitter
/// ever sees a default the concrete type cannot hold.
pub fn check_default_types(model: &ResolvedModel) -> Vec<CompileError> {
    let mut errors = vec![];

    for def in &model.structs {
        for field in &def.fields {
            check_field(model, field, &def.name, &def.file, &mut errors);
        }
    }
    for template in &model.templates {
        for field in &template.fields {
            check_field(model, field, &template.name, &template.file, &mut errors);
        }
    }
    for inst in &model.instantiations {
        let template = model.template(inst.template);
        // arity mismatches are reported by their own check; substitution
        // would be meaningless here
        if inst.args.len() != template.params.len() {
            continue;
        }
        let def = specialize(model, inst);
        for (declared, field) in template.fields.iter().zip(&def.fields) {
            // concrete-typed fields were already checked on the template
            if matches!(declared.ty, ResolvedType::Param(_)) {
                check_field(model, field, &def.name, &def.file, &mut errors);
            }
        }
    }

    errors
}

fn check_field(
    model: &ResolvedModel,
    field: &Field,
    owner: &str,
    file: &str,
    errors: &mut Vec<CompileError>,
) {
    if field.ty == ResolvedType::Unit {
        errors.push(CompileError::new(
            ErrorKind::TypeMismatch,
            format!("field '{}' of '{owner}' may not have type unit", field.name),
            file,
            field.span.clone(),
        ));
        return;
    }

    let Some(default) = &field.default else {
        return;
    };

    let value = match default {
        DefaultValue::Lit(value) => value,
        DefaultValue::Const(group, member) => &model.group(*group).constants[*member].value,
    };

    let compatible = match &field.ty {
        ResolvedType::Int => matches!(value, Literal::Int(_) | Literal::Tag(_)),
        ResolvedType::Float => {
            matches!(value, Literal::Float(_) | Literal::Int(_) | Literal::Tag(_))
        }
        ResolvedType::Bool => matches!(value, Literal::Bool(_)),
        ResolvedType::Str => matches!(value, Literal::Str(_)),
        ResolvedType::Struct(_) => false,
        ResolvedType::Param(_) => true, // unknowable until specialization
        ResolvedType::Unit => false,    // rejected above
    };

    if !compatible {
        let reason = if matches!(field.ty, ResolvedType::Struct(_)) {
            format!(
                "field '{}' of '{owner}' is struct-typed and may not declare a default",
                field.name
            )
        } else {
            format!(
                "default value of '{}' is {} but the field is {}",
                field.name,
                literal_kind(value),
                model.type_name(&field.ty),
            )
        };
        errors.push(CompileError::new(
            ErrorKind::TypeMismatch,
            reason,
            file,
            field.span.clone(),
        ));
    }
}

fn literal_kind(value: &Literal) -> &'static str {
    match value {
        Literal::Int(_) => "an integer",
        Literal::Float(_) => "a float",
        Literal::Bool(_) => "a bool",
        Literal::Str(_) => "a string",
        Literal::Tag(_) => "a tag",
        Literal::ConstRef(..) => "a constant reference",
    }
}
