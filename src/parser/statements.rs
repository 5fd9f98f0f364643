//! Statement parsing implementation
//!
//! ```text
//! statement ::= ';' | expression ';'
//! ```
//!
//! Control-flow keywords (`if`, `for`, `return`, ...) are reserved by the
//! lexer but have no statement forms yet; they fail as "Expected expression".

use crate::parser::ast::{Expr, Stmt};
use crate::parser::parse::{ParseResult, Parser};
use crate::parser::token::{TokenKind, DECLARATION_TYPES};
use crate::suggest;

/// Largest edit distance at which an identifier is taken for a misspelled type.
const TYPE_SUGGESTION_DISTANCE: usize = 2;

impl Parser {
    /// Parse a statement. A lone `;` yields `Ok(None)`.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Option<Stmt>> {
        if self.is_at_end() || self.match_token(TokenKind::Semicolon) {
            return Ok(None);
        }

        let expr = self.parse_expression()?;
        if self.match_token(TokenKind::Semicolon) {
            return Ok(Some(Stmt::expression(expr)));
        }

        let err = self.error_at_current("Expected ';' after expression");
        match self.misspelled_type_hint(&expr) {
            Some(hint) => Err(err.with_hint(hint)),
            None => Err(err),
        }
    }

    /// `itn x = 1;` parses as the expression `itn` followed by a stray
    /// identifier. Suggest the type keyword the user probably meant.
    fn misspelled_type_hint(&self, expr: &Expr) -> Option<String> {
        let Expr::Identifier { token } = expr else {
            return None;
        };
        if self.peek().kind != TokenKind::Identifier {
            return None;
        }

        suggest::closest(&token.text, &DECLARATION_TYPES, TYPE_SUGGESTION_DISTANCE)
            .map(|keyword| format!("did you mean '{}'?", keyword))
    }
}
