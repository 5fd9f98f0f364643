//! Diagnostics shared by the lexer and the parser
//!
//! Neither stage aborts on bad input. Problems are collected as
//! [`Diagnostic`]s next to whatever output could still be produced.

use crate::parser::token::{SourceLocation, Token};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Malformed input the user has to fix.
    Error,
    /// Input that was accepted on a best-effort basis.
    Warning,
    /// A bug in the front end itself, not in the user's program.
    Internal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Internal => write!(f, "internal error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Where the offending text starts.
    pub location: SourceLocation,
    /// Inclusive column of the last offending character, on the line of
    /// `location`.
    pub end_column: usize,
    /// Source text the diagnostic points at; empty at end of file.
    pub lexeme: String,
    pub hint: Option<String>,
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            severity,
            message: message.into(),
            location,
            end_column: location.column,
            lexeme: String::new(),
            hint: None,
            file: None,
        }
    }

    pub fn error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Severity::Error, message, location)
    }

    pub fn warning(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Severity::Warning, message, location)
    }

    pub fn internal(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(Severity::Internal, message, location)
    }

    /// Error pointing at a token.
    pub fn at_token(severity: Severity, message: impl Into<String>, token: &Token) -> Self {
        Self::new(severity, message, token.location())
            .with_end_column(token.end_column)
            .with_lexeme(token.text.clone())
    }

    /// Extend the span to `end_column`. Columns before the start are ignored.
    #[must_use]
    pub fn with_end_column(mut self, end_column: usize) -> Self {
        self.end_column = end_column.max(self.location.column);
        self
    }

    #[must_use]
    pub fn with_lexeme(mut self, lexeme: impl Into<String>) -> Self {
        self.lexeme = lexeme.into();
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Anything but a warning fails the run.
    pub fn is_error(&self) -> bool {
        self.severity != Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(
                f,
                "{}:{}:{}: {}",
                file, self.location.line, self.location.column, self.severity
            )?,
            None => write!(
                f,
                "[line {}, column {}] {}",
                self.location.line, self.location.column, self.severity
            )?,
        }

        if self.lexeme.is_empty() {
            write!(f, " at end: {}", self.message)?;
        } else {
            write!(f, " at '{}': {}", self.lexeme, self.message)?;
        }

        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}
