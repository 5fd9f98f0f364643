//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the top-level parse loop.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, recovery, and coordination
//! - `declarations`: Parsing top-level declarations and variable declarations
//! - `statements`: Parsing expression statements
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Error recovery
//!
//! A grammar rule that cannot complete returns a [`ParseError`]. The parse
//! loop records it as a [`Diagnostic`], drops the partial declaration and
//! calls [`Parser::synchronize`] to skip to the next plausible statement
//! start, so one bad statement never swallows the next good one.

use crate::parser::ast::{AstError, Stmt};
use crate::parser::diagnostic::{Diagnostic, Severity};
use crate::parser::printer;
use crate::parser::token::{Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {}", .token.line, .token.start_column, .message)]
pub struct ParseError {
    pub message: String,
    /// The token the parser was looking at when the rule failed.
    pub token: Token,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, token: Token) -> Self {
        Self {
            message: message.into(),
            token,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

}

impl From<AstError> for ParseError {
    fn from(err: AstError) -> Self {
        ParseError::new(err.to_string(), err.token)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// How many parentheses and prefix operators may enclose one another
/// before the parser gives up on an expression.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive descent parser for basl
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    nesting_depth: usize,
    diagnostics: Vec<Diagnostic>,
    file: Option<String>,
}

impl Parser {
    /// Create a parser over a token stream.
    ///
    /// A stream that does not end in [`TokenKind::Eof`] gets one appended so
    /// the cursor always has something to look at.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let eof = match tokens.last() {
                Some(last) => Token::eof(last.line, last.end_column + 1),
                None => Token::eof(1, 1),
            };
            tokens.push(eof);
        }

        Self {
            tokens,
            position: 0,
            nesting_depth: 0,
            diagnostics: Vec::new(),
            file: None,
        }
    }

    /// Label diagnostics with the originating file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse(&mut self) -> Vec<Stmt> {
        debug!(tokens = self.tokens.len(), "starting parse");
        let mut statements = Vec::new();

        while !self.is_at_end() {
            let before = self.position;

            match self.parse_declaration() {
                Ok(Some(stmt)) => statements.push(stmt),
                Ok(None) => {}
                Err(err) => {
                    debug!(
                        line = err.token.line,
                        token = %err.token.text,
                        message = %err.message,
                        "recovering from parse error"
                    );
                    self.report(err);
                    self.synchronize();
                }
            }

            if self.position == before && !self.is_at_end() {
                let stuck = self.peek().clone();
                warn!(
                    position = before,
                    token = %stuck.text,
                    "parser made no progress; stopping"
                );
                let diag = Diagnostic::at_token(
                    Severity::Internal,
                    format!("parser made no progress at token #{}", before),
                    &stuck,
                );
                self.push_diagnostic(diag);
                break;
            }
        }

        debug!(
            statements = statements.len(),
            diagnostics = self.diagnostics.len(),
            "finished parse"
        );
        statements
    }

    /// Diagnostics recorded by [`Parser::parse`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Render statements for diagnostics. See [`printer::print_ast`].
    pub fn print_ast(&self, statements: &[Stmt]) -> String {
        printer::print_ast(statements)
    }

    pub(crate) fn report(&mut self, err: ParseError) {
        let mut diag = Diagnostic::at_token(Severity::Error, err.message, &err.token);
        if let Some(hint) = err.hint {
            diag = diag.with_hint(hint);
        }
        self.push_diagnostic(diag);
    }

    fn push_diagnostic(&mut self, diag: Diagnostic) {
        let diag = match &self.file {
            Some(file) => diag.with_file(file.as_str()),
            None => diag,
        };
        self.diagnostics.push(diag);
    }

    /// Skip ahead to a plausible statement boundary: just past a `;`, or at
    /// a type keyword or identifier. Always consumes at least one
    /// token unless already at the end.
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            let kind = self.peek().kind;
            if kind.is_type_keyword() || kind == TokenKind::Identifier {
                return;
            }

            self.advance();
        }
    }

    /// Enter one level of `(` or prefix-operator nesting. Pair every `Ok`
    /// with [`Parser::leave_nesting`].
    pub(crate) fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                "Expression nested too deeply",
                self.previous().clone(),
            )
            .with_hint(format!("at most {} levels are allowed", MAX_NESTING_DEPTH)));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            trace!(position = self.position, token = %self.peek().text, "advance");
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Match an operator token whose text is one of `spellings`. A token of
    /// the right kind but another spelling is left in place.
    pub(crate) fn match_operator(&mut self, kind: TokenKind, spellings: &[&str]) -> bool {
        if self.check(kind) && spellings.contains(&self.peek().text.as_str()) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `message` at the current token.
    pub(crate) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    pub(crate) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError::new(message, self.peek().clone())
    }
}

/// Statements and diagnostics from one parse
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse a token stream in one call.
pub fn parse(tokens: Vec<Token>) -> Parsed {
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    Parsed {
        statements,
        diagnostics: parser.into_diagnostics(),
    }
}
