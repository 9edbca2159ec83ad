use crate::ast::{Decl, FieldDecl, Literal, MethodDecl, SlotDecl, Span, StructDecl, TypeName};
use crate::error::CompileError;
use crate::lexer::Token;
use crate::parser::Parser;

/// The body of a struct or template: fields, methods, and (for structs only)
/// composition slots, up to and including the closing `end`.
pub struct Body {
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub slots: Vec<SlotDecl>,
    pub end_span: Span,
}

impl Parser<'_> {
    pub fn parse_struct(&mut self) -> Result<(Decl, Span), CompileError> {
        let start = self.expect(&Token::KeywordStruct, "'struct'")?;
        let name = self.expect_ident("a struct name after 'struct'")?;
        let body = self.parse_body(true)?;
        let span = start.start..body.end_span.end;
        Ok((
            Decl::Struct(StructDecl {
                name,
                fields: body.fields,
                methods: body.methods,
                slots: body.slots,
            }),
            span,
        ))
    }

    pub(crate) fn parse_body(&mut self, allow_slots: bool) -> Result<Body, CompileError> {
        let mut fields = vec![];
        let mut methods = vec![];
        let mut slots = vec![];

        loop {
            let (token, span) = self.advance("a field, method, or 'end'")?;
            match token {
                Token::KeywordEnd => {
                    return Ok(Body {
                        fields,
                        methods,
                        slots,
                        end_span: span,
                    });
                }
                Token::Ident(name) => fields.push(self.parse_field((name, span))?),
                Token::KeywordDef => methods.push(self.parse_method()?),
                Token::KeywordContains if allow_slots => slots.push(self.parse_slot()?),
                Token::KeywordContains => {
                    return Err(self.syntax_error(
                        "'contains' is not allowed in a template body".to_string(),
                        span,
                    ));
                }
                other => {
                    return Err(self.syntax_error(
                        format!("expected a field, method, or 'end', got {other:?}"),
                        span,
                    ));
                }
            }
        }
    }

    /// Parses the remainder of a field declaration, the name having been
    /// consumed by the body loop: `: type` with an optional `= literal`.
    fn parse_field(&mut self, name: (String, Span)) -> Result<FieldDecl, CompileError> {
        self.expect(&Token::Colon, "':' after the field name")?;
        let ty = self.parse_type_name()?;

        let default = if let Some((Token::Assign, _)) = self.peek()? {
            self.advance("'='")?;
            let (value, span) = self.parse_literal()?;
            if let Literal::Tag(tag) = &value {
                return Err(self.syntax_error(
                    format!("'{tag}' is not a valid default; expected a literal or Group.MEMBER"),
                    span,
                ));
            }
            Some((value, span))
        } else {
            None
        };

        Ok(FieldDecl { name, ty, default })
    }

    /// `def Name(param: type, ...) -> type` with the return type defaulting
    /// to unit when the arrow is omitted.
    fn parse_method(&mut self) -> Result<MethodDecl, CompileError> {
        let name = self.expect_ident("a method name after 'def'")?;
        self.expect(&Token::LParen, "'(' after the method name")?;

        let mut params = vec![];
        loop {
            let (token, span) = self.advance("a parameter or ')'")?;
            match token {
                Token::RParen => break,
                Token::Comma if !params.is_empty() => continue,
                Token::Ident(param) => {
                    self.expect(&Token::Colon, "':' after the parameter name")?;
                    let (ty, ty_span) = self.parse_type_name()?;
                    params.push((param, ty, span.start..ty_span.end));
                }
                other => {
                    return Err(
                        self.syntax_error(format!("expected a parameter or ')', got {other:?}"), span)
                    );
                }
            }
        }

        let return_type = if let Some((Token::Arrow, _)) = self.peek()? {
            self.advance("'->'")?;
            self.parse_type_name()?
        } else {
            (TypeName::Unit, name.1.clone())
        };

        Ok(MethodDecl {
            name,
            params,
            return_type,
        })
    }

    /// `contains Freezer as AddFreezer`; the verb defaults to `Add<Type>`.
    fn parse_slot(&mut self) -> Result<SlotDecl, CompileError> {
        let target = self.expect_ident("a struct name after 'contains'")?;

        let verb = if let Some((Token::KeywordAs, _)) = self.peek()? {
            self.advance("'as'")?;
            self.expect_ident("a verb name after 'as'")?
        } else {
            (format!("Add{}", target.0), target.1.clone())
        };

        Ok(SlotDecl { target, verb })
    }
}
