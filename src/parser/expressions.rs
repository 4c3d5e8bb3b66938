//! Expression parsing implementation
//!
//! Precedence levels, lowest to highest:
//!
//! ```text
//! condition      ::= and ("||" and)*
//! and            ::= equality ("&&" equality)*
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | ">" | "<=" | ">=") additive)?
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= primary (("*" | "/" | "%") primary)*
//! primary        ::= int | float | identifier | "(" additive ")"
//! ```
//!
//! Relational operators do not chain and parentheses group arithmetic only.
//! `**` and `!` are lexed but never consumed here.
//!
//! Macro keywords expand in place to a binary node using the operator and
//! constant from the macro table.

use crate::parser::ast::*;
use crate::parser::errors::SyntaxError;
use crate::parser::keywords::{lookup_macro, MacroArity};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;
use tracing::trace;

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

impl<'a> Parser<'a> {
    /// Boolean condition of `if`, `elseif`, `while`, `do-while` and `for`.
    pub(crate) fn parse_condition(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;

        while self.match_token(TokenKind::OpOr) {
            let right = self.parse_and()?;
            left = binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_equality()?;

        while self.match_token(TokenKind::OpAnd) {
            let right = self.parse_equality()?;
            left = binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::OpEq) => BinOp::Eq,
                Some(TokenKind::OpNeq) => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_additive()?;

        let op = match self.peek_kind() {
            Some(TokenKind::OpLt) => BinOp::Lt,
            Some(TokenKind::OpGt) => BinOp::Gt,
            Some(TokenKind::OpLte) => BinOp::Le,
            Some(TokenKind::OpGte) => BinOp::Ge,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;

        Ok(binary(op, left, right))
    }

    pub(crate) fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::OpAdd) => BinOp::Add,
                Some(TokenKind::OpSub) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_primary()?;

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::OpMul) => BinOp::Mul,
                Some(TokenKind::OpDiv) => BinOp::Div,
                Some(TokenKind::OpMod) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::LitInt | TokenKind::LitFloat) => {
                self.advance();
                Ok(Expr::Literal(Literal::number(token.text())))
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier(token.text().to_string()))
            }
            Some(token) if token.kind == TokenKind::LParen => {
                self.advance();
                let expr = self.parse_additive()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            _ => Err(self.error("number, identifier or '('")),
        }
    }

    /// Expand `NAME(a, b)` or `NAME(a)`; the cursor is on the macro keyword.
    pub(crate) fn parse_macro(&mut self) -> Result<MacroExpr, SyntaxError> {
        let spec = match self.peek().and_then(|token| lookup_macro(token.text())) {
            Some(spec) => spec,
            None => return Err(self.error("macro keyword")),
        };
        self.advance();

        self.expect_lparen()?;
        let lhs = self.parse_macro_operand()?;
        let rhs = match spec.arity {
            MacroArity::Two => {
                self.expect_token(TokenKind::Comma)?;
                self.parse_macro_operand()?
            }
            MacroArity::One { constant } => Expr::Literal(Literal::number(constant)),
        };
        self.expect_rparen()?;

        let expansion = MacroExpr {
            keyword: spec.name.to_string(),
            lhs: Box::new(lhs),
            op: spec.op,
            rhs: Box::new(rhs),
            square_root: spec.square_root,
        };
        trace!(keyword = spec.name, expansion = %expansion, "expanded macro");
        Ok(expansion)
    }

    fn parse_macro_operand(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            Some(token) if matches!(token.kind, TokenKind::LitInt | TokenKind::LitFloat) => {
                self.advance();
                Ok(Expr::Literal(Literal::number(token.text())))
            }
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier(token.text().to_string()))
            }
            _ => Err(self.error("number or identifier")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::Parser;
    use crate::parser::SyntaxError;

    fn condition(source: &str) -> Result<Expr, SyntaxError> {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_condition()
    }

    fn additive(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_additive().unwrap().to_string()
    }

    fn expand(source: &str) -> Result<MacroExpr, SyntaxError> {
        let tokens = tokenize(source).unwrap();
        Parser::new(&tokens).parse_macro()
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(additive("1 + 2 * 3"), "(1, +, (2, *, 3))");
        assert_eq!(additive("a - b - c"), "((a, -, b), -, c)");
        assert_eq!(additive("(1 + 2) * 3 % n"), "(((1, +, 2), *, 3), %, n)");
    }

    #[test]
    fn test_boolean_precedence() {
        let expr = condition("a < 1 || b >= 2 && c != 3").unwrap();
        assert_eq!(
            expr.to_string(),
            "((a, <, 1), ||, ((b, >=, 2), &&, (c, !=, 3)))"
        );
    }

    #[test]
    fn test_equality_chains_left() {
        let expr = condition("a == b != c").unwrap();
        assert_eq!(expr.to_string(), "((a, ==, b), !=, c)");
    }

    #[test]
    fn test_relational_does_not_chain() {
        let tokens = tokenize("a < b < c").unwrap();
        let mut parser = Parser::new(&tokens);
        let expr = parser.parse_condition().unwrap();
        assert_eq!(expr.to_string(), "(a, <, b)");
        // The second '<' is left for the caller to reject.
        assert_eq!(parser.position, 3);
    }

    #[test]
    fn test_unsupported_operators_are_not_consumed() {
        let err = condition("!a").unwrap_err();
        assert_eq!(err.expected, "number, identifier or '('");
        assert_eq!(err.found, "'!'");

        let tokens = tokenize("2 ** 3").unwrap();
        let mut parser = Parser::new(&tokens);
        assert_eq!(parser.parse_additive().unwrap().to_string(), "2");
    }

    #[test]
    fn test_parentheses_group_arithmetic_only() {
        let err = condition("(a < b)").unwrap_err();
        assert_eq!(err.expected, "')'");
        assert_eq!(err.found, "'<'");
    }

    #[test]
    fn test_one_operand_macro() {
        let expansion = expand("CVK(5000)").unwrap();
        assert_eq!(expansion.keyword, "CVK");
        assert_eq!(expansion.to_string(), "(5000, /, 1000)");

        let expansion = expand("CKH(kw)").unwrap();
        assert_eq!(expansion.to_string(), "(kw, *, 1.341)");
        assert_eq!(
            *expansion.rhs,
            Expr::Literal(Literal::new(LiteralKind::Float, "1.341"))
        );
    }

    #[test]
    fn test_two_operand_macro() {
        assert_eq!(expand("CO1(v, i)").unwrap().to_string(), "(v, /, i)");
        assert_eq!(expand("CV1(10, 2)").unwrap().to_string(), "SquareRoot((10, *, 2))");
        assert_eq!(expand("CA3(p, 4.7)").unwrap().to_string(), "SquareRoot((p, /, 4.7))");
    }

    #[test]
    fn test_macro_arity_errors() {
        let err = expand("CV2(5)").unwrap_err();
        assert_eq!(err.expected, "','");
        assert_eq!(err.found, "')'");

        let err = expand("CVK(5, 6)").unwrap_err();
        assert_eq!(err.expected, "')'");
        assert_eq!(err.found, "','");

        let err = expand("CVK(x + 1)").unwrap_err();
        assert_eq!(err.expected, "')'");
    }

    #[test]
    fn test_macro_operand_must_be_simple() {
        let err = expand("CWK(\"watts\")").unwrap_err();
        assert_eq!(err.expected, "number or identifier");
        assert_eq!(err.found, "string literal \"watts\"");
    }
}
