pub mod arity;
pub mod cycles;
pub mod defaults;
pub mod duplicates;

#[cfg(test)]
pub mod test;

use crate::error::{CompileError, ErrorMode};
use crate::model::ResolvedModel;

/// Runs every semantic check over the resolved model. The checks are
/// independent of one another and purely structural; no generated or native
/// code runs here. `Aggregate` mode runs all of them to completion and
/// returns the full error set in check order; `FailFast` returns the first
/// error found.
pub fn validate_model(model: &ResolvedModel, mode: ErrorMode) -> Vec<CompileError> {
    let checks: [fn(&ResolvedModel) -> Vec<CompileError>; 4] = [
        duplicates::check_duplicates,
        cycles::check_composition_cycles,
        arity::check_instantiation_arity,
        defaults::check_default_types,
    ];

    let mut errors = vec![];
    for check in checks {
        let mut found = check(model);
        if mode == ErrorMode::FailFast && !found.is_empty() {
            found.truncate(1);
            return found;
        }
        errors.append(&mut found);
    }
    errors
}
