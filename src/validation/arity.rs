use crate::error::{CompileError, ErrorKind};
use crate::model::ResolvedModel;

/// Every instantiation must supply exactly as many type arguments as its
/// template declares parameters.
pub fn check_instantiation_arity(model: &ResolvedModel) -> Vec<CompileError> {
    let mut errors = vec![];

    for inst in &model.instantiations {
        let template = model.template(inst.template);
        if inst.args.len() != template.params.len() {
            errors.push(CompileError::new(
                ErrorKind::ArityMismatch,
                format!(
                    "template '{}' takes {} type parameter{}, got {}",
                    template.name,
                    template.params.len(),
                    if template.params.len() == 1 { "" } else { "s" },
                    inst.args.len(),
                ),
                &inst.file,
                inst.span.clone(),
            ));
        }
    }

    errors
}
