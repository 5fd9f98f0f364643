//! basl front end
//!
//! This module transforms basl source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with panic-mode recovery
//! - [`ast`]: AST node definitions
//! - [`printer`]: Indented text rendering of the AST
//! - [`persist`]: JSON form of a token stream
//!
//! # Language
//!
//! A program is a sequence of statements:
//! - Declarations: `int`, `float`, `char` or `string`, a name, an optional
//!   `= expression` initializer and a terminating `;`
//! - Expression statements: `expression ;`
//! - Expressions: comparisons, `+ - * / %`, prefix `! && ||`, literals,
//!   identifiers and parentheses
//!
//! Control-flow keywords are recognized by the lexer but have no grammar.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one grammar rule per method.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod diagnostic;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod persist;
pub mod printer;
mod statements;
pub mod token;

pub use ast::{AstError, Expr, Stmt};
pub use diagnostic::{Diagnostic, Severity};
pub use lexer::{lex, lex_with_diagnostics, Lexer};
pub use parse::{parse, ParseError, Parsed, Parser};
pub use persist::{tokens_from_json, tokens_to_json, write_tokens, PersistError};
pub use printer::print_ast;
pub use token::{SourceLocation, Token, TokenKind};
