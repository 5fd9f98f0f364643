//! Declaration parsing implementation
//!
//! A top-level declaration is either a typed variable declaration or a
//! statement:
//!
//! ```text
//! declaration     ::= var_declaration | statement
//! var_declaration ::= decl_type IDENTIFIER ( '=' expression )? ';'
//! decl_type       ::= 'int' | 'float' | 'char' | 'string'
//! ```
//!
//! `bool` is a reserved type keyword but is rejected here until the language
//! grows a boolean type.

use crate::parser::ast::{Expr, Stmt};
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::{Token, TokenKind};

impl Parser {
    /// Parse one top-level declaration. `Ok(None)` means an empty statement
    /// or a declaration that was diagnosed and dropped.
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Option<Stmt>> {
        if self.check(TokenKind::TypeBool) {
            return self.reject_bool_declaration();
        }

        if self.peek().kind.is_declaration_type() {
            self.advance();
            return self.parse_var_declaration().map(Some);
        }

        self.parse_statement()
    }

    /// Parse the rest of a variable declaration; the type keyword has
    /// already been consumed.
    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        let type_token = self.previous().clone();
        let (name, initializer) = self.parse_declarator()?;
        Ok(Stmt::var_declaration(type_token, name, initializer)?)
    }

    /// `IDENTIFIER ( '=' expression )? ';'`
    fn parse_declarator(&mut self) -> ParseResult<(Token, Option<Expr>)> {
        let name = self.consume(TokenKind::Identifier, "Expected variable name after type")?;

        let initializer = if self.match_token(TokenKind::EqualsSign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration",
        )?;

        Ok((name, initializer))
    }

    /// `bool name = value;` is parsed in full and reported as one error.
    /// A malformed declarator falls back to ordinary recovery.
    fn reject_bool_declaration(&mut self) -> ParseResult<Option<Stmt>> {
        let err = self.error_at_current("'bool' is not a supported declaration type");
        self.advance();

        if self.parse_declarator().is_ok() {
            self.report(err);
            return Ok(None);
        }
        Err(err)
    }
}
