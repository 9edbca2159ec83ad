pub mod ast;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod validation;

use crate::emitter::{Artifact, TargetConfig};
use crate::error::{CompileError, ErrorMode};
use crate::lexer::Token;
use crate::parser::Parser;
use crate::resolver::SourceUnit;

use logos::Logos;

/// One schema source file handed to `compile`. Reading it from disk is the
/// driver's job.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub file: String,
    pub text: String,
}

/// The outcome for one requested target. An emitter failure is fatal for its
/// own target only; the driver decides whether it aborts the invocation.
#[derive(Debug)]
pub struct TargetOutput {
    pub config: TargetConfig,
    pub artifacts: Result<Vec<Artifact>, CompileError>,
}

/// Compiles one compile unit (any number of schema files resolved together)
/// for the given targets. Parse and resolution errors are fatal to the whole
/// unit; validation errors follow the selected error mode. The error list is
/// never empty and preserves discovery order.
pub fn compile(
    sources: &[SourceText],
    targets: &[TargetConfig],
    mode: ErrorMode,
) -> Result<Vec<TargetOutput>, Vec<CompileError>> {
    let mut units = vec![];
    for source in sources {
        let tokens = Token::lexer(&source.text).spanned().peekable();
        let mut parser = Parser::new(tokens, source.file.clone());
        let decls = parser.parse_program().map_err(|e| vec![e])?;
        units.push(SourceUnit {
            file: source.file.clone(),
            decls,
        });
    }

    let model = resolver::resolve(&units)?;

    let errors = validation::validate_model(&model, mode);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(targets
        .iter()
        .map(|config| TargetOutput {
            config: *config,
            artifacts: emitter::emit(&model, config),
        })
        .collect())
}
