//! Lexer (tokenizer) for basl source code
//!
//! Converts decoded source text into a flat [`Token`] stream consumed by the
//! parser. The lexer never fails: unknown characters are skipped and
//! malformed literals become best-effort tokens. Each of those cases is
//! recorded as a warning [`Diagnostic`] so a driver can report it.
//!
//! The stream always ends with exactly one [`TokenKind::Eof`] token.

use crate::parser::diagnostic::Diagnostic;
use crate::parser::token::{self, SourceLocation, Token, TokenKind};
use tracing::debug;

/// Single-pass scanner over a source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Column of the most recently consumed character.
    last_column: usize,
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a lexer for `input`. `file` labels diagnostics only.
    pub fn new(input: &str, file: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            last_column: 1,
            file: file.to_string(),
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the remaining input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
                continue;
            }

            if let Some(token) = self.next_token(ch) {
                tokens.push(token);
            }
        }

        tokens.push(Token::eof(self.line, self.column));

        debug!(
            file = %self.file,
            tokens = tokens.len(),
            warnings = self.diagnostics.len(),
            "lexed source"
        );
        tokens
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Scan one token starting at `ch`. Returns `None` when the character
    /// was skipped.
    fn next_token(&mut self, ch: char) -> Option<Token> {
        match ch {
            'a'..='z' | 'A'..='Z' | '_' => Some(self.identifier_or_keyword()),
            '0'..='9' => Some(self.number_literal()),
            '-' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                Some(self.number_literal())
            }
            '"' => Some(self.string_literal()),
            '\'' => Some(self.char_literal()),
            _ => self.operator_or_skip(ch),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let start = self.mark();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.slice_from(start.position);
        let kind = token::keyword(&text).unwrap_or(TokenKind::Identifier);
        self.finish(kind, text, start)
    }

    /// Parse numeric literal. A leading `-` belongs to the literal; the
    /// first `.` makes it a float and a second `.` ends it.
    fn number_literal(&mut self) -> Token {
        let start = self.mark();

        if self.peek() == Some('-') {
            self.advance();
        }

        let mut is_float = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        let text = self.slice_from(start.position);
        self.finish(kind, text, start)
    }

    /// Parse string literal. Escapes are skipped, not decoded; the token text
    /// keeps the quotes.
    fn string_literal(&mut self) -> Token {
        let start = self.mark();
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None => {
                    self.warn("unterminated string literal", start);
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        let text = self.slice_from(start.position);
        self.finish(TokenKind::String, text, start)
    }

    /// Parse character literal: `'`, optional `\`, one character, `'`.
    ///
    /// Character literals share the string literal kind.
    fn char_literal(&mut self) -> Token {
        let start = self.mark();
        self.advance(); // opening quote

        if self.peek() == Some('\\') {
            self.advance();
        }

        let body = self.advance();
        match (body, self.peek()) {
            (None, _) | (Some(_), None) => self.warn("unterminated character literal", start),
            (Some(_), Some('\'')) => {
                self.advance();
            }
            (Some(_), Some(_)) => self.warn("expected closing quote in character literal", start),
        }

        let text = self.slice_from(start.position);
        self.finish(TokenKind::String, text, start)
    }

    /// Two-character operators win over one-character ones. Anything that is
    /// neither is skipped with a warning.
    fn operator_or_skip(&mut self, ch: char) -> Option<Token> {
        let start = self.mark();

        if let Some(next) = self.peek_ahead(1) {
            let pair: String = [ch, next].iter().collect();
            if let Some(kind) = token::operator(&pair) {
                self.advance();
                self.advance();
                return Some(self.finish(kind, pair, start));
            }
        }

        let single = ch.to_string();
        if let Some(kind) = token::operator(&single) {
            self.advance();
            return Some(self.finish(kind, single, start));
        }

        self.advance();
        let diag = Diagnostic::warning(
            format!("unknown character '{}'", ch.escape_debug()),
            start.location(),
        )
        .with_lexeme(single)
        .with_file(self.file.as_str());
        self.diagnostics.push(diag);
        None
    }

    fn warn(&mut self, message: &str, start: Mark) {
        let mut diag = Diagnostic::warning(message, start.location())
            .with_lexeme(self.slice_from(start.position))
            .with_file(self.file.as_str());
        if self.line == start.line {
            diag = diag.with_end_column(self.last_column);
        }
        self.diagnostics.push(diag);
    }

    fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn finish(&self, kind: TokenKind, text: String, start: Mark) -> Token {
        Token::new(kind, text, start.line, start.column, self.last_column)
    }

    fn slice_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        self.last_column = self.column;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }
}

/// Where a token started.
#[derive(Debug, Clone, Copy)]
struct Mark {
    position: usize,
    line: usize,
    column: usize,
}

impl Mark {
    fn location(self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source`, dropping lexer warnings.
pub fn lex(source: &str, file: &str) -> Vec<Token> {
    Lexer::new(source, file).tokenize()
}

/// Tokenize `source` and return the warnings recorded along the way.
pub fn lex_with_diagnostics(source: &str, file: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new(source, file);
    let tokens = lexer.tokenize();
    (tokens, lexer.into_diagnostics())
}
