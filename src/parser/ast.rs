// AST (Abstract Syntax Tree) definitions for basl

use crate::parser::token::{Token, TokenKind};
use thiserror::Error;

/// A node was built from a token of the wrong kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{role} must be {expected}, found {found}")]
pub struct AstError {
    pub role: &'static str,
    pub expected: &'static str,
    pub found: TokenKind,
    pub token: Token,
}

impl AstError {
    fn new(role: &'static str, expected: &'static str, token: Token) -> Self {
        Self {
            role,
            expected,
            found: token.kind,
            token,
        }
    }
}

/// Expression nodes. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        token: Token,
    },
    Identifier {
        token: Token,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        operator: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Integer, float or string literal.
    pub fn literal(token: Token) -> Result<Self, AstError> {
        if !token.kind.is_literal() {
            return Err(AstError::new("literal", "a literal token", token));
        }
        Ok(Expr::Literal { token })
    }

    pub fn identifier(token: Token) -> Result<Self, AstError> {
        if token.kind != TokenKind::Identifier {
            return Err(AstError::new("identifier", "an identifier token", token));
        }
        Ok(Expr::Identifier { token })
    }

    pub fn unary(operator: Token, operand: Expr) -> Result<Self, AstError> {
        if !operator.kind.is_operator() {
            return Err(AstError::new("unary operator", "an operator token", operator));
        }
        Ok(Expr::Unary {
            operator,
            operand: Box::new(operand),
        })
    }

    pub fn binary(operator: Token, left: Expr, right: Expr) -> Result<Self, AstError> {
        if !operator.kind.is_operator() {
            return Err(AstError::new("binary operator", "an operator token", operator));
        }
        Ok(Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDeclaration {
        type_token: Token,
        name: Token,
        initializer: Option<Expr>,
    },
    Expression {
        expr: Expr,
    },
}

impl Stmt {
    /// `type name [= initializer];`. Only `int`, `float`, `char` and
    /// `string` are accepted as the type.
    pub fn var_declaration(
        type_token: Token,
        name: Token,
        initializer: Option<Expr>,
    ) -> Result<Self, AstError> {
        if !type_token.kind.is_declaration_type() {
            return Err(AstError::new(
                "declaration type",
                "one of int, float, char or string",
                type_token,
            ));
        }
        if name.kind != TokenKind::Identifier {
            return Err(AstError::new("variable name", "an identifier token", name));
        }
        Ok(Stmt::VarDeclaration {
            type_token,
            name,
            initializer,
        })
    }

    pub fn expression(expr: Expr) -> Self {
        Stmt::Expression { expr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 1, 1, text.len().max(1))
    }

    #[test]
    fn test_binary_requires_operator() {
        let one = Expr::literal(tok(TokenKind::Integer, "1")).unwrap();
        let two = Expr::literal(tok(TokenKind::Integer, "2")).unwrap();

        let err = Expr::binary(tok(TokenKind::Integer, "3"), one.clone(), two.clone()).unwrap_err();
        assert_eq!(err.found, TokenKind::Integer);
        assert_eq!(
            err.to_string(),
            "binary operator must be an operator token, found integer literal"
        );

        let ok = Expr::binary(tok(TokenKind::MathOperator, "+"), one, two).unwrap();
        assert!(matches!(ok, Expr::Binary { ref operator, .. } if operator.text == "+"));
    }

    #[test]
    fn test_unary_requires_operator() {
        let x = Expr::identifier(tok(TokenKind::Identifier, "x")).unwrap();
        assert!(Expr::unary(tok(TokenKind::Semicolon, ";"), x.clone()).is_err());
        assert!(Expr::unary(tok(TokenKind::LogicalOperator, "!"), x).is_ok());
    }

    #[test]
    fn test_leaf_kinds_are_checked() {
        assert!(Expr::literal(tok(TokenKind::Identifier, "x")).is_err());
        assert!(Expr::identifier(tok(TokenKind::Integer, "1")).is_err());
        assert!(Expr::literal(tok(TokenKind::String, "\"s\"")).is_ok());
    }

    #[test]
    fn test_var_declaration_rejects_bool() {
        let name = tok(TokenKind::Identifier, "flag");
        let err = Stmt::var_declaration(tok(TokenKind::TypeBool, "bool"), name.clone(), None)
            .unwrap_err();
        assert_eq!(err.role, "declaration type");

        assert!(Stmt::var_declaration(tok(TokenKind::TypeChar, "char"), name, None).is_ok());
    }

    #[test]
    fn test_var_declaration_requires_identifier_name() {
        let err = Stmt::var_declaration(
            tok(TokenKind::TypeInt, "int"),
            tok(TokenKind::Integer, "5"),
            None,
        )
        .unwrap_err();
        assert_eq!(err.role, "variable name");
    }
}
