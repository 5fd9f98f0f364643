//! Indented text rendering of a parsed program
//!
//! Statements go one per line with their parts nested below them;
//! expressions render inline in prefix form:
//!
//! ```text
//! Abstract Syntax Tree:
//! VarDeclaration: int x
//!   Initializer: (+ (literal 1) (* (literal 2) (literal 3)))
//! ExpressionStatement:
//!   (! (id done))
//! ```
//!
//! The output is meant for people and tests, not for machines.

use crate::parser::ast::{Expr, Stmt};

const HEADER: &str = "Abstract Syntax Tree:";
const INDENT_WIDTH: usize = 2;

/// Render a statement sequence.
pub fn print_ast(statements: &[Stmt]) -> String {
    AstPrinter::default().print(statements)
}

/// Tree walker that tracks the current nesting level
#[derive(Debug, Default)]
pub struct AstPrinter {
    indent_level: usize,
}

impl AstPrinter {
    pub fn print(&mut self, statements: &[Stmt]) -> String {
        let mut output = String::from(HEADER);
        output.push('\n');
        for stmt in statements {
            output.push_str(&self.print_stmt(stmt));
            output.push('\n');
        }
        output
    }

    fn print_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::VarDeclaration {
                type_token,
                name,
                initializer,
            } => {
                let mut output = format!(
                    "{}VarDeclaration: {} {}",
                    self.indent(),
                    type_token.text,
                    name.text
                );
                if let Some(init) = initializer {
                    self.indent_level += 1;
                    output.push('\n');
                    output.push_str(&self.indent());
                    output.push_str("Initializer: ");
                    output.push_str(&self.print_expr(init));
                    self.indent_level -= 1;
                }
                output
            }
            Stmt::Expression { expr } => {
                let mut output = format!("{}ExpressionStatement:", self.indent());
                self.indent_level += 1;
                output.push('\n');
                output.push_str(&self.indent());
                output.push_str(&self.print_expr(expr));
                self.indent_level -= 1;
                output
            }
        }
    }

    fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal { token } => format!("(literal {})", token.text),
            Expr::Identifier { token } => format!("(id {})", token.text),
            Expr::Unary { operator, operand } => {
                self.parenthesize(&operator.text, &[operand.as_ref()])
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => self.parenthesize(&operator.text, &[left.as_ref(), right.as_ref()]),
        }
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut output = format!("({}", name);
        for expr in exprs {
            output.push(' ');
            output.push_str(&self.print_expr(expr));
        }
        output.push(')');
        output
    }

    fn indent(&self) -> String {
        " ".repeat(self.indent_level * INDENT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::lex;
    use crate::parser::parse::parse;

    fn render(source: &str) -> String {
        print_ast(&parse(lex(source, "test.basl")).statements)
    }

    #[test]
    fn test_declaration_rendering() {
        let output = render("int x = 1 + 2;");
        assert!(output.contains("VarDeclaration: int x"));
        assert!(output.contains("(+ (literal 1) (literal 2))"));
        assert_eq!(
            output,
            "Abstract Syntax Tree:\nVarDeclaration: int x\n  Initializer: (+ (literal 1) (literal 2))\n"
        );
    }

    #[test]
    fn test_precedence_rendering() {
        let output = render("1 + 2 * 3;");
        assert!(output.contains("(+ (literal 1) (* (literal 2) (literal 3)))"));
    }

    #[test]
    fn test_expression_statement_rendering() {
        assert_eq!(
            render("!done;"),
            "Abstract Syntax Tree:\nExpressionStatement:\n  (! (id done))\n"
        );
    }

    #[test]
    fn test_declaration_without_initializer() {
        assert_eq!(
            render("char c;"),
            "Abstract Syntax Tree:\nVarDeclaration: char c\n"
        );
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(print_ast(&[]), "Abstract Syntax Tree:\n");
    }

    #[test]
    fn test_printing_is_idempotent() {
        let statements = parse(lex("int a = (1 + 2) * 3; a == 9;", "test.basl")).statements;
        let mut printer = AstPrinter::default();
        let first = printer.print(&statements);
        let second = printer.print(&statements);
        assert_eq!(first, second);
        assert_eq!(first, print_ast(&statements));
    }
}
