//! Expression parsing implementation
//!
//! Precedence is expressed as a chain of grammar rules, lowest first:
//!
//! ```text
//! expression ::= equality
//! equality   ::= comparison ( COMPARISON_OP comparison )*
//! comparison ::= term ( COMPARISON_OP term )*
//! term       ::= factor ( ('+' | '-') factor )*
//! factor     ::= unary ( ('*' | '/' | '%') unary )*
//! unary      ::= LOGICAL_OP unary | primary
//! primary    ::= INTEGER | FLOAT | STRING | IDENTIFIER | '(' expression ')'
//! ```
//!
//! The lexer gives `==` and `<` the same kind, so `equality` and
//! `comparison` accept the same operators and a chain like `a == b < c`
//! folds left-associatively at the `comparison` level.
//!
//! `+ - * / %` also share one kind. `term` and `factor` check the operator
//! text and leave an operator of the other level in place for the caller.

use crate::parser::ast::Expr;
use crate::parser::parse::{ParseError, ParseResult, Parser};
use crate::parser::token::{Token, TokenKind};

const ADDITIVE: [&str; 2] = ["+", "-"];
const MULTIPLICATIVE: [&str; 3] = ["*", "/", "%"];

/// Tallest expression tree the parser builds. Long left-associative chains
/// such as `a + b + c + ...` grow the tree without recursing in the parser.
pub const MAX_EXPRESSION_HEIGHT: usize = 1024;

/// An expression and the height of its tree
struct Subtree {
    expr: Expr,
    height: usize,
}

impl Subtree {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        Ok(self.parse_equality()?.expr)
    }

    fn parse_equality(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_comparison()?;

        while self.match_token(TokenKind::ComparisonOperator) {
            let operator = self.previous().clone();
            let right = self.parse_comparison()?;
            left = fold_binary(operator, left, right)?;
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_term()?;

        while self.match_token(TokenKind::ComparisonOperator) {
            let operator = self.previous().clone();
            let right = self.parse_term()?;
            left = fold_binary(operator, left, right)?;
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_term(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_factor()?;

        while self.match_operator(TokenKind::MathOperator, &ADDITIVE) {
            let operator = self.previous().clone();
            let right = self.parse_factor()?;
            left = fold_binary(operator, left, right)?;
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_factor(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_unary()?;

        while self.match_operator(TokenKind::MathOperator, &MULTIPLICATIVE) {
            let operator = self.previous().clone();
            let right = self.parse_unary()?;
            left = fold_binary(operator, left, right)?;
        }

        Ok(left)
    }

    /// Parse prefix logical operators
    fn parse_unary(&mut self) -> ParseResult<Subtree> {
        if self.match_token(TokenKind::LogicalOperator) {
            let operator = self.previous().clone();
            self.enter_nesting()?;
            let operand = self.parse_unary();
            self.leave_nesting();
            let operand = operand?;
            return Ok(Subtree {
                height: operand.height + 1,
                expr: Expr::unary(operator, operand.expr)?,
            });
        }

        self.parse_primary()
    }

    /// Parse primary (literals, identifiers, parenthesized expressions)
    fn parse_primary(&mut self) -> ParseResult<Subtree> {
        if self.peek().kind.is_literal() {
            let token = self.advance().clone();
            return Ok(Subtree::leaf(Expr::literal(token)?));
        }

        if self.match_token(TokenKind::Identifier) {
            return Ok(Subtree::leaf(Expr::identifier(self.previous().clone())?));
        }

        if self.match_token(TokenKind::OpenParen) {
            self.enter_nesting()?;
            let inner = self.parse_equality();
            self.leave_nesting();
            let inner = inner?;
            self.consume(TokenKind::CloseParen, "Expected ')' after expression")?;
            return Ok(inner);
        }

        let err = self.error_at_current("Expected expression");
        let current = self.peek();
        if current.kind.is_control_keyword() {
            let hint = format!("'{}' is reserved but not supported yet", current.text);
            return Err(err.with_hint(hint));
        }
        Err(err)
    }
}

fn fold_binary(operator: Token, left: Subtree, right: Subtree) -> ParseResult<Subtree> {
    let height = left.height.max(right.height) + 1;
    if height > MAX_EXPRESSION_HEIGHT {
        return Err(ParseError::new("Expression nested too deeply", operator).with_hint(format!(
            "split it up; at most {} levels are allowed",
            MAX_EXPRESSION_HEIGHT
        )));
    }
    Ok(Subtree {
        expr: Expr::binary(operator, left.expr, right.expr)?,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::MAX_EXPRESSION_HEIGHT;
    use crate::parser::ast::{Expr, Stmt};
    use crate::parser::lexer::lex;
    use crate::parser::parse::{parse, MAX_NESTING_DEPTH};
    use crate::parser::printer::print_ast;

    /// Parse a single expression statement and return its expression.
    fn expr(source: &str) -> Expr {
        let parsed = parse(lex(source, "test.basl"));
        assert!(
            parsed.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            parsed.diagnostics
        );
        match parsed.statements.into_iter().next() {
            Some(Stmt::Expression { expr }) => expr,
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    fn op(expr: &Expr) -> &str {
        match expr {
            Expr::Binary { operator, .. } | Expr::Unary { operator, .. } => &operator.text,
            Expr::Literal { token } | Expr::Identifier { token } => &token.text,
        }
    }

    fn children(expr: &Expr) -> (&Expr, &Expr) {
        match expr {
            Expr::Binary { left, right, .. } => (left.as_ref(), right.as_ref()),
            other => panic!("Expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let e = expr("1 + 2 * 3;");
        assert_eq!(op(&e), "+");
        let (left, right) = children(&e);
        assert_eq!(op(left), "1");
        assert_eq!(op(right), "*");
    }

    #[test]
    fn test_product_followed_by_sum() {
        // `+` after a product must be left for the term level.
        let e = expr("1 * 2 + 3;");
        assert_eq!(op(&e), "+");
        let (left, right) = children(&e);
        assert_eq!(op(left), "*");
        assert_eq!(op(right), "3");
    }

    #[test]
    fn test_left_associative_subtraction() {
        let e = expr("a - b - c;");
        assert_eq!(op(&e), "-");
        let (left, right) = children(&e);
        assert_eq!(op(left), "-");
        assert_eq!(op(right), "c");
    }

    #[test]
    fn test_modulo_and_division_share_level() {
        let e = expr("a % b / c;");
        assert_eq!(op(&e), "/");
        assert_eq!(op(children(&e).0), "%");
    }

    #[test]
    fn test_comparison_chain_folds_left() {
        let e = expr("a == b < c;");
        assert_eq!(op(&e), "<");
        let (left, right) = children(&e);
        assert_eq!(op(left), "==");
        assert_eq!(op(right), "c");
    }

    #[test]
    fn test_comparison_below_arithmetic() {
        let e = expr("a + 1 >= b * 2;");
        assert_eq!(op(&e), ">=");
        let (left, right) = children(&e);
        assert_eq!(op(left), "+");
        assert_eq!(op(right), "*");
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let e = expr("(1 + 2) * 3;");
        assert_eq!(op(&e), "*");
        assert_eq!(op(children(&e).0), "+");
    }

    #[test]
    fn test_nested_unary() {
        let e = expr("!!x;");
        match e {
            Expr::Unary { operator, operand } => {
                assert_eq!(operator.text, "!");
                assert!(matches!(*operand, Expr::Unary { .. }));
            }
            other => panic!("Expected unary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_kinds() {
        assert!(matches!(expr("1.5;"), Expr::Literal { .. }));
        assert!(matches!(expr("\"s\";"), Expr::Literal { .. }));
        assert!(matches!(expr("name;"), Expr::Identifier { .. }));
    }

    #[test]
    fn test_unclosed_paren() {
        let parsed = parse(lex("(1 + 2;", "test.basl"));
        assert!(parsed.statements.is_empty());
        assert_eq!(parsed.diagnostics[0].message, "Expected ')' after expression");
    }

    #[test]
    fn test_binary_logical_operator_is_not_grammar() {
        let parsed = parse(lex("a && b;", "test.basl"));
        // Recovery resumes at `b`, which is a statement of its own.
        assert_eq!(parsed.statements.len(), 1);
        assert_eq!(parsed.diagnostics[0].message, "Expected ';' after expression");
        assert_eq!(parsed.diagnostics[0].lexeme, "&&");
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let source = format!("{}1{}; int ok;", "(".repeat(10_000), ")".repeat(10_000));
        let parsed = parse(lex(&source, "test.basl"));

        assert_eq!(parsed.diagnostics.len(), 1);
        let diag = &parsed.diagnostics[0];
        assert_eq!(diag.message, "Expression nested too deeply");
        assert_eq!(diag.location.column, MAX_NESTING_DEPTH + 1);
        assert_eq!(parsed.statements.len(), 1);
        assert!(matches!(
            &parsed.statements[0],
            Stmt::VarDeclaration { name, .. } if name.text == "ok"
        ));
    }

    #[test]
    fn test_deep_prefix_operators_are_rejected() {
        let source = format!("{}x;", "!".repeat(10_000));
        let parsed = parse(lex(&source, "test.basl"));

        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].message, "Expression nested too deeply");
        // Recovery resumes at `x`.
        assert_eq!(parsed.statements.len(), 1);
    }

    #[test]
    fn test_nesting_at_the_limit_is_accepted() {
        let depth = MAX_NESTING_DEPTH;
        let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
        let parsed = parse(lex(&source, "test.basl"));
        assert!(parsed.diagnostics.is_empty());
        assert!(matches!(parsed.statements[0], Stmt::Expression { .. }));
    }

    #[test]
    fn test_long_operator_chain_is_bounded() {
        let terms = vec!["1"; MAX_EXPRESSION_HEIGHT + 10];
        let source = format!("{}; x;", terms.join(" + "));
        let parsed = parse(lex(&source, "test.basl"));

        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].message, "Expression nested too deeply");
        assert_eq!(parsed.statements.len(), 1);
    }

    #[test]
    fn test_long_chain_below_limit_prints() {
        let terms = vec!["a"; 500];
        let source = format!("{};", terms.join(" * "));
        let parsed = parse(lex(&source, "test.basl"));
        assert!(parsed.diagnostics.is_empty());
        assert!(print_ast(&parsed.statements).starts_with("Abstract Syntax Tree:\nExpressionStatement:\n  (* (* "));
    }
}
