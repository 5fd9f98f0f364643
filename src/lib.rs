//! # Introduction
//!
//! basl is the front end of a small statically-typed teaching language. It
//! turns source text into tokens, parses them into an abstract syntax tree
//! while collecting every syntax error in one pass, and renders the tree as
//! indented text.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Printer
//! ```
//!
//! 1. [`parser::lexer`] scans decoded text into [`parser::Token`]s. It never
//!    fails; oddities become warning [`parser::Diagnostic`]s.
//! 2. [`parser::Parser`] builds [`parser::Stmt`]s by recursive descent and
//!    resynchronizes after each error.
//! 3. [`parser::printer`] renders the statements for people and tests.
//! 4. [`parser::persist`] stores a token stream as JSON.
//! 5. [`suggest`] provides edit distance for "did you mean" hints.
//!
//! ```
//! use basl::parser::{lex, parse, print_ast};
//!
//! let parsed = parse(lex("int x = 1 + 2;", "demo.basl"));
//! assert!(!parsed.has_errors());
//! assert!(print_ast(&parsed.statements).contains("(+ (literal 1) (literal 2))"));
//! ```

pub mod parser;
pub mod suggest;
