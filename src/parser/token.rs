//! Token model for basl source code
//!
//! A [`Token`] is an immutable record of its [`TokenKind`], the exact source
//! text it was scanned from, and where it sits in the source. The keyword and
//! operator tables used by the lexer live here as process-wide statics.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Line/column position used for error reporting (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Every category of token the lexer can produce.
///
/// Operators are grouped by category rather than by symbol; the parser looks
/// at [`Token::text`] when it needs to tell `+` from `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Identifier,
    Integer,
    Float,
    String,

    // Type keywords
    TypeInt,
    TypeFloat,
    TypeChar,
    TypeString,
    TypeBool,

    // Control keywords (reserved, no grammar yet)
    If,
    Else,
    For,
    Function,
    Return,
    Print,

    // Operators
    MathOperator,       // + - * / %
    ComparisonOperator, // == != < > <= >=
    LogicalOperator,    // && || !
    EqualsSign,         // =

    // Punctuation
    Semicolon,  // ;
    OpenParen,  // (
    CloseParen, // )
    OpenBrace,  // {
    CloseBrace, // }
    Comma,      // ,

    Unknown,
    Eof,
}

impl TokenKind {
    /// Stable integer code used by the persisted token format.
    ///
    /// Code 1 is reserved and never produced.
    pub fn code(self) -> u8 {
        match self {
            TokenKind::Identifier => 0,
            TokenKind::Integer => 2,
            TokenKind::Float => 3,
            TokenKind::String => 4,
            TokenKind::TypeInt => 5,
            TokenKind::TypeFloat => 6,
            TokenKind::TypeChar => 7,
            TokenKind::TypeString => 8,
            TokenKind::MathOperator => 9,
            TokenKind::ComparisonOperator => 10,
            TokenKind::LogicalOperator => 11,
            TokenKind::EqualsSign => 12,
            TokenKind::Semicolon => 13,
            TokenKind::OpenParen => 14,
            TokenKind::CloseParen => 15,
            TokenKind::OpenBrace => 16,
            TokenKind::CloseBrace => 17,
            TokenKind::Comma => 18,
            TokenKind::Unknown => 19,
            TokenKind::Eof => 20,
            TokenKind::TypeBool => 21,
            TokenKind::If => 22,
            TokenKind::Else => 23,
            TokenKind::For => 24,
            TokenKind::Function => 25,
            TokenKind::Return => 26,
            TokenKind::Print => 27,
        }
    }

    /// Inverse of [`TokenKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        let kind = match code {
            0 => TokenKind::Identifier,
            2 => TokenKind::Integer,
            3 => TokenKind::Float,
            4 => TokenKind::String,
            5 => TokenKind::TypeInt,
            6 => TokenKind::TypeFloat,
            7 => TokenKind::TypeChar,
            8 => TokenKind::TypeString,
            9 => TokenKind::MathOperator,
            10 => TokenKind::ComparisonOperator,
            11 => TokenKind::LogicalOperator,
            12 => TokenKind::EqualsSign,
            13 => TokenKind::Semicolon,
            14 => TokenKind::OpenParen,
            15 => TokenKind::CloseParen,
            16 => TokenKind::OpenBrace,
            17 => TokenKind::CloseBrace,
            18 => TokenKind::Comma,
            19 => TokenKind::Unknown,
            20 => TokenKind::Eof,
            21 => TokenKind::TypeBool,
            22 => TokenKind::If,
            23 => TokenKind::Else,
            24 => TokenKind::For,
            25 => TokenKind::Function,
            26 => TokenKind::Return,
            27 => TokenKind::Print,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::TypeInt
                | TokenKind::TypeFloat
                | TokenKind::TypeChar
                | TokenKind::TypeString
                | TokenKind::TypeBool
        )
    }

    /// Type keywords that may start a variable declaration. `bool` is lexed
    /// but not accepted here.
    pub fn is_declaration_type(self) -> bool {
        matches!(
            self,
            TokenKind::TypeInt | TokenKind::TypeFloat | TokenKind::TypeChar | TokenKind::TypeString
        )
    }

    pub fn is_control_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Print
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::MathOperator | TokenKind::ComparisonOperator | TokenKind::LogicalOperator
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float | TokenKind::String)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::String => "string literal",
            TokenKind::TypeInt => "'int'",
            TokenKind::TypeFloat => "'float'",
            TokenKind::TypeChar => "'char'",
            TokenKind::TypeString => "'string'",
            TokenKind::TypeBool => "'bool'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Function => "'function'",
            TokenKind::Return => "'return'",
            TokenKind::Print => "'print'",
            TokenKind::MathOperator => "math operator",
            TokenKind::ComparisonOperator => "comparison operator",
            TokenKind::LogicalOperator => "logical operator",
            TokenKind::EqualsSign => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Unknown => "unknown token",
            TokenKind::Eof => "end of file",
        };
        f.write_str(name)
    }
}

/// A scanned token.
///
/// `line` is the line the token starts on; `end_column` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        line: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            start_column,
            end_column,
        }
    }

    /// End-of-stream marker at the given position.
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, column, column)
    }

    /// Where this token starts.
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.start_column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                write!(f, "{} {}", self.kind, self.text)
            }
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Reserved words. Matching is on the whole identifier, never a prefix.
pub(crate) static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    table.insert("int", TokenKind::TypeInt);
    table.insert("float", TokenKind::TypeFloat);
    table.insert("char", TokenKind::TypeChar);
    table.insert("string", TokenKind::TypeString);
    table.insert("bool", TokenKind::TypeBool);
    table.insert("if", TokenKind::If);
    table.insert("else", TokenKind::Else);
    table.insert("for", TokenKind::For);
    table.insert("function", TokenKind::Function);
    table.insert("return", TokenKind::Return);
    table.insert("print", TokenKind::Print);
    table
});

/// Operator and punctuation spellings, one and two characters long.
pub(crate) static OPERATORS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    for op in ["+", "-", "*", "/", "%"] {
        table.insert(op, TokenKind::MathOperator);
    }
    for op in ["==", "!=", "<", ">", "<=", ">="] {
        table.insert(op, TokenKind::ComparisonOperator);
    }
    for op in ["&&", "||", "!"] {
        table.insert(op, TokenKind::LogicalOperator);
    }
    table.insert("=", TokenKind::EqualsSign);
    table.insert(";", TokenKind::Semicolon);
    table.insert("(", TokenKind::OpenParen);
    table.insert(")", TokenKind::CloseParen);
    table.insert("{", TokenKind::OpenBrace);
    table.insert("}", TokenKind::CloseBrace);
    table.insert(",", TokenKind::Comma);
    table
});

/// Look up a reserved word.
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).copied()
}

/// Look up an operator or punctuation spelling.
pub fn operator(symbol: &str) -> Option<TokenKind> {
    OPERATORS.get(symbol).copied()
}

/// Spellings of the declaration type keywords, for suggestions.
pub const DECLARATION_TYPES: [&str; 4] = ["int", "float", "char", "string"];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [TokenKind; 27] = [
        TokenKind::Identifier,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::TypeInt,
        TokenKind::TypeFloat,
        TokenKind::TypeChar,
        TokenKind::TypeString,
        TokenKind::TypeBool,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::Function,
        TokenKind::Return,
        TokenKind::Print,
        TokenKind::MathOperator,
        TokenKind::ComparisonOperator,
        TokenKind::LogicalOperator,
        TokenKind::EqualsSign,
        TokenKind::Semicolon,
        TokenKind::OpenParen,
        TokenKind::CloseParen,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::Comma,
        TokenKind::Unknown,
        TokenKind::Eof,
    ];

    #[test]
    fn test_codes_are_unique_and_reversible() {
        let mut seen = std::collections::HashSet::new();
        for kind in ALL_KINDS {
            assert!(seen.insert(kind.code()), "duplicate code for {:?}", kind);
            assert_eq!(TokenKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TokenKind::from_code(1), None);
        assert_eq!(TokenKind::from_code(200), None);
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(TokenKind::Identifier.code(), 0);
        assert_eq!(TokenKind::MathOperator.code(), 9);
        assert_eq!(TokenKind::Eof.code(), 20);
    }

    #[test]
    fn test_keyword_table() {
        assert_eq!(keyword("int"), Some(TokenKind::TypeInt));
        assert_eq!(keyword("bool"), Some(TokenKind::TypeBool));
        assert_eq!(keyword("function"), Some(TokenKind::Function));
        assert_eq!(keyword("integer"), None);
        assert_eq!(keyword("Int"), None);
    }

    #[test]
    fn test_operator_table() {
        assert_eq!(operator("<="), Some(TokenKind::ComparisonOperator));
        assert_eq!(operator("!"), Some(TokenKind::LogicalOperator));
        assert_eq!(operator("="), Some(TokenKind::EqualsSign));
        assert_eq!(operator(";"), Some(TokenKind::Semicolon));
        assert_eq!(operator("=>"), None);
    }

    #[test]
    fn test_declaration_types_exclude_bool() {
        assert!(TokenKind::TypeBool.is_type_keyword());
        assert!(!TokenKind::TypeBool.is_declaration_type());
        for word in DECLARATION_TYPES {
            assert!(keyword(word).is_some_and(TokenKind::is_declaration_type));
        }
    }
}
