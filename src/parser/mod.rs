pub mod constants;
pub mod struct_;
pub mod template;

#[cfg(test)]
pub mod test;

use crate::ast::{Decl, Literal, NamespaceDecl, Span, TypeName};
use crate::error::{CompileError, ErrorKind};
use crate::lexer::Token;

use logos::SpannedIter;

use std::iter::Peekable;

type TokenIter<'a> = Peekable<SpannedIter<'a, Token>>;

/// Recursive-descent parser over the lexer's spanned token stream. Syntax
/// errors are fatal: the first one aborts the compile unit and no partial
/// tree is returned.
pub struct Parser<'a> {
    tokens: TokenIter<'a>,
    file: String,
    last_span: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: TokenIter<'a>, file: String) -> Self {
        Parser {
            tokens,
            file,
            last_span: 0..0,
        }
    }

    pub fn parse_program(&mut self) -> Result<Vec<(Decl, Span)>, CompileError> {
        let mut tree = vec![];
        while let Some((token, span)) = self.peek()? {
            match token {
                Token::KeywordNamespace => tree.push(self.parse_namespace()?),
                Token::KeywordStruct => tree.push(self.parse_struct()?),
                Token::KeywordConstants => tree.push(self.parse_constants()?),
                Token::KeywordTemplate => tree.push(self.parse_template()?),
                Token::KeywordUse => tree.push(self.parse_use()?),
                other => {
                    return Err(self.syntax_error(
                        format!("expected a top-level declaration, got {other:?}"),
                        span,
                    ));
                }
            }
        }
        Ok(tree)
    }

    fn parse_namespace(&mut self) -> Result<(Decl, Span), CompileError> {
        let start = self.expect(&Token::KeywordNamespace, "namespace")?;
        let name = self.expect_ident("a namespace name")?;
        let span = start.start..name.1.end;
        Ok((Decl::Namespace(NamespaceDecl { name }), span))
    }

    pub(crate) fn syntax_error(&self, message: String, span: Span) -> CompileError {
        CompileError::new(ErrorKind::Syntax, message, &self.file, span)
    }

    /// Peeks the next token without consuming it. A lexing failure surfaces
    /// here as a syntax error rather than an ignored token.
    pub(crate) fn peek(&mut self) -> Result<Option<(Token, Span)>, CompileError> {
        match self.tokens.peek() {
            None => Ok(None),
            Some((Err(()), span)) => Err(CompileError::new(
                ErrorKind::Syntax,
                "unrecognized token".to_string(),
                &self.file,
                span.clone(),
            )),
            Some((Ok(token), span)) => Ok(Some((token.clone(), span.clone()))),
        }
    }

    /// Consumes the next token, failing with an expected-vs-found message on
    /// end of input or a lexing failure.
    pub(crate) fn advance(&mut self, expected: &str) -> Result<(Token, Span), CompileError> {
        match self.tokens.next() {
            None => Err(self.syntax_error(
                format!("expected {expected} but reached end of file"),
                self.last_span.clone(),
            )),
            Some((Err(()), span)) => Err(CompileError::new(
                ErrorKind::Syntax,
                "unrecognized token".to_string(),
                &self.file,
                span,
            )),
            Some((Ok(token), span)) => {
                self.last_span = span.clone();
                Ok((token, span))
            }
        }
    }

    pub(crate) fn expect(&mut self, token: &Token, expected: &str) -> Result<Span, CompileError> {
        let (found, span) = self.advance(expected)?;
        if &found == token {
            Ok(span)
        } else {
            Err(self.syntax_error(format!("expected {expected}, got {found:?}"), span))
        }
    }

    pub(crate) fn expect_ident(&mut self, expected: &str) -> Result<(String, Span), CompileError> {
        let (found, span) = self.advance(expected)?;
        if let Token::Ident(name) = found {
            Ok((name, span))
        } else {
            Err(self.syntax_error(format!("expected {expected}, got {found:?}"), span))
        }
    }

    pub(crate) fn parse_type_name(&mut self) -> Result<(TypeName, Span), CompileError> {
        let (name, span) = self.expect_ident("a type name")?;
        Ok((TypeName::from_ident(&name), span))
    }

    /// Parses a literal value: integer (optionally negative), float, bool,
    /// string, a bare identifier (an enumerated tag), or `Group.MEMBER`.
    pub(crate) fn parse_literal(&mut self) -> Result<(Literal, Span), CompileError> {
        let (token, span) = self.advance("a literal value")?;
        match token {
            Token::Int(value) => Ok((Literal::Int(value), span)),
            Token::Float(value) => Ok((Literal::Float(value), span)),
            Token::Bool(value) => Ok((Literal::Bool(value), span)),
            Token::String(value) => Ok((Literal::Str(value), span)),
            Token::Minus => {
                let (token, end) = self.advance("a number after '-'")?;
                let full = span.start..end.end;
                match token {
                    Token::Int(value) => Ok((Literal::Int(-value), full)),
                    Token::Float(value) => Ok((Literal::Float(-value), full)),
                    other => {
                        Err(self.syntax_error(format!("expected a number after '-', got {other:?}"), end))
                    }
                }
            }
            Token::Ident(group) => {
                if let Some((Token::Dot, _)) = self.peek()? {
                    self.advance("'.'")?;
                    let (member, end) = self.expect_ident("a constant name after '.'")?;
                    Ok((Literal::ConstRef(group, member), span.start..end.end))
                } else {
                    Ok((Literal::Tag(group), span))
                }
            }
            other => Err(self.syntax_error(format!("expected a literal value, got {other:?}"), span)),
        }
    }
}
