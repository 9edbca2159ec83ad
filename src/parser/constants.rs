use crate::ast::{ConstDecl, ConstGroupDecl, Decl, Literal, Span};
use crate::error::CompileError;
use crate::lexer::Token;
use crate::parser::Parser;

impl Parser<'_> {
    /// `constants Name ... end` where each member is `NAME = value` and the
    /// value is an integer, a string, or a bare tag identifier.
    pub fn parse_constants(&mut self) -> Result<(Decl, Span), CompileError> {
        let start = self.expect(&Token::KeywordConstants, "'constants'")?;
        let name = self.expect_ident("a group name after 'constants'")?;

        let mut constants = vec![];
        let end_span = loop {
            let (token, span) = self.advance("a constant or 'end'")?;
            match token {
                Token::KeywordEnd => break span,
                Token::Ident(const_name) => {
                    self.expect(&Token::Assign, "'=' after the constant name")?;
                    let (value, value_span) = self.parse_literal()?;
                    match value {
                        Literal::Int(_) | Literal::Str(_) | Literal::Tag(_) => {}
                        _ => {
                            return Err(self.syntax_error(
                                "constant value must be an integer, string, or tag".to_string(),
                                value_span,
                            ));
                        }
                    }
                    constants.push(ConstDecl {
                        name: (const_name, span),
                        value: (value, value_span),
                    });
                }
                other => {
                    return Err(
                        self.syntax_error(format!("expected a constant or 'end', got {other:?}"), span)
                    );
                }
            }
        };

        let span = start.start..end_span.end;
        Ok((Decl::Constants(ConstGroupDecl { name, constants }), span))
    }
}
