use crate::model::{Field, Instantiation, Method, ResolvedModel, ResolvedType, StructDef};

use std::collections::HashMap;

/// Produces a concrete struct definition from a template and one of its
/// instantiations. Each declared parameter is replaced by the matching
/// argument by position throughout the body. This is structural substitution
/// only; no host code runs and the result is fully concrete.
pub fn specialize(model: &ResolvedModel, inst: &Instantiation) -> StructDef {
    let template = model.template(inst.template);
    let subst: HashMap<&str, &ResolvedType> = template
        .params
        .iter()
        .map(String::as_str)
        .zip(inst.args.iter())
        .collect();

    StructDef {
        namespace: inst.namespace.clone(),
        name: inst.alias.clone(),
        file: inst.file.clone(),
        span: inst.span.clone(),
        fields: template
            .fields
            .iter()
            .map(|f| Field {
                name: f.name.clone(),
                ty: apply(&f.ty, &subst),
                default: f.default.clone(),
                span: f.span.clone(),
            })
            .collect(),
        methods: template
            .methods
            .iter()
            .map(|m| Method {
                name: m.name.clone(),
                params: m
                    .params
                    .iter()
                    .map(|(name, ty)| (name.clone(), apply(ty, &subst)))
                    .collect(),
                return_type: apply(&m.return_type, &subst),
                span: m.span.clone(),
            })
            .collect(),
        slots: vec![],
    }
}

fn apply(ty: &ResolvedType, subst: &HashMap<&str, &ResolvedType>) -> ResolvedType {
    match ty {
        ResolvedType::Param(name) => subst
            .get(name.as_str())
            .map(|t| (*t).clone())
            .unwrap_or(ResolvedType::Unit),
        other => other.clone(),
    }
}
