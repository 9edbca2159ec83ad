use crate::ast::{Decl, Span, TemplateDecl, UseDecl};
use crate::error::CompileError;
use crate::lexer::Token;
use crate::parser::Parser;

impl Parser<'_> {
    /// `template Name<P1, P2> ... end`: a struct-shaped body whose types may
    /// name the declared parameters. Slots are not allowed in templates.
    pub fn parse_template(&mut self) -> Result<(Decl, Span), CompileError> {
        let start = self.expect(&Token::KeywordTemplate, "'template'")?;
        let name = self.expect_ident("a template name after 'template'")?;

        self.expect(&Token::Less, "'<' after the template name")?;
        let mut params = vec![];
        loop {
            let (token, span) = self.advance("a type parameter")?;
            match token {
                Token::Ident(param) => params.push((param, span)),
                other => {
                    return Err(
                        self.syntax_error(format!("expected a type parameter, got {other:?}"), span)
                    );
                }
            }
            let (token, span) = self.advance("',' or '>'")?;
            match token {
                Token::Comma => continue,
                Token::Greater => break,
                other => {
                    return Err(self.syntax_error(format!("expected ',' or '>', got {other:?}"), span));
                }
            }
        }

        let body = self.parse_body(false)?;
        let span = start.start..body.end_span.end;
        Ok((
            Decl::Template(TemplateDecl {
                name,
                params,
                fields: body.fields,
                methods: body.methods,
            }),
            span,
        ))
    }

    /// `use Template<int> as Alias` requests a concrete specialization.
    pub fn parse_use(&mut self) -> Result<(Decl, Span), CompileError> {
        let start = self.expect(&Token::KeywordUse, "'use'")?;
        let template = self.expect_ident("a template name after 'use'")?;

        self.expect(&Token::Less, "'<' after the template name")?;
        let mut args = vec![];
        loop {
            args.push(self.parse_type_name()?);
            let (token, span) = self.advance("',' or '>'")?;
            match token {
                Token::Comma => continue,
                Token::Greater => break,
                other => {
                    return Err(self.syntax_error(format!("expected ',' or '>', got {other:?}"), span));
                }
            }
        }

        self.expect(&Token::KeywordAs, "'as' after the type arguments")?;
        let alias = self.expect_ident("an alias name after 'as'")?;

        let span = start.start..alias.1.end;
        Ok((
            Decl::Use(UseDecl {
                template,
                args,
                alias,
            }),
            span,
        ))
    }
}
