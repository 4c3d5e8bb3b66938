//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its cursor helpers, and the
//! [`parse`] entry point.
//!
//! # Parser Architecture
//!
//! Recursive descent with one token of lookahead plus an explicit peek at the
//! token after next, which identifier-led statements need to pick between
//! assignment, input and increment forms. Methods are split across files
//! using `impl Parser` blocks:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: the statement forms and brace-delimited bodies
//! - `declarations`: typed declaration lists and their initializer rules
//! - `expressions`: boolean/arithmetic precedence levels and macro expansion

use crate::parser::ast::*;
use crate::parser::errors::{FrontendError, SyntaxError};
use crate::parser::keywords::ReservedWord;
use crate::parser::lexer::{tokenize, Token, TokenKind};
use tracing::debug;

/// Parse a token sequence into a [`Program`].
pub fn parse(tokens: &[Token]) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse_program()
}

/// Tokenize and parse in one step.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

/// Recursive descent parser over a borrowed token slice
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    /// Reported for errors found after the last token.
    eof_location: SourceLocation,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let eof_location = tokens
            .last()
            .map(|token| token.location)
            .unwrap_or(SourceLocation::new(1, 1));
        Self {
            tokens,
            position: 0,
            eof_location,
        }
    }

    /// Parse `Main { ... }`; nothing may follow the closing brace.
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::Main)?;
        self.expect_lbrace()?;
        let body = self.parse_body()?;
        self.expect_rbrace()?;

        if let Some(token) = self.peek() {
            return Err(SyntaxError::new(
                "end of input",
                token.describe(),
                token.location,
            ));
        }

        debug!(statements = body.len(), "parsed program");
        Ok(Program { body, location })
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// The reserved word under the cursor, if any.
    pub(crate) fn peek_reserved(&self) -> Option<ReservedWord> {
        reserved_word(self.peek()?)
    }

    pub(crate) fn check_reserved(&self, word: ReservedWord) -> bool {
        self.peek_reserved() == Some(word)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek()
            .map(|token| token.location)
            .unwrap_or(self.eof_location)
    }

    /// Description of the token under the cursor for error messages.
    pub(crate) fn found(&self) -> String {
        match self.peek() {
            Some(token) => token.describe(),
            None => "end of input".to_string(),
        }
    }

    /// Syntax error at the cursor.
    pub(crate) fn error(&self, expected: impl Into<String>) -> SyntaxError {
        SyntaxError::new(expected, self.found(), self.current_location())
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<&'a Token, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            }
            _ => {
                let expected = match kind.symbol() {
                    Some(symbol) => format!("'{}'", symbol),
                    None => kind.name().to_string(),
                };
                Err(self.error(expected))
            }
        }
    }

    pub(crate) fn expect_lparen(&mut self) -> Result<(), SyntaxError> {
        self.expect_token(TokenKind::LParen).map(|_| ())
    }

    pub(crate) fn expect_rparen(&mut self) -> Result<(), SyntaxError> {
        self.expect_token(TokenKind::RParen).map(|_| ())
    }

    pub(crate) fn expect_lbrace(&mut self) -> Result<(), SyntaxError> {
        self.expect_token(TokenKind::LBrace).map(|_| ())
    }

    pub(crate) fn expect_rbrace(&mut self) -> Result<(), SyntaxError> {
        self.expect_token(TokenKind::RBrace).map(|_| ())
    }

    pub(crate) fn expect_semicolon(&mut self) -> Result<(), SyntaxError> {
        self.expect_token(TokenKind::Semicolon).map(|_| ())
    }

    pub(crate) fn expect_reserved(&mut self, word: ReservedWord) -> Result<(), SyntaxError> {
        if self.check_reserved(word) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("'{}'", word)))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.advance();
                Ok(token.text().to_string())
            }
            _ => Err(self.error("identifier")),
        }
    }

    /// `Scan ( )`
    pub(crate) fn parse_scan_call(&mut self) -> Result<(), SyntaxError> {
        self.expect_reserved(ReservedWord::Scan)?;
        self.expect_lparen()?;
        self.expect_rparen()
    }
}

pub(crate) fn reserved_word(token: &Token) -> Option<ReservedWord> {
    if token.kind == TokenKind::ReservedWord {
        ReservedWord::from_word(token.text())
    } else {
        None
    }
}

pub(crate) fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    match kind {
        TokenKind::OpAss => Some(AssignOp::Assign),
        TokenKind::OpAddAss => Some(AssignOp::AddAssign),
        TokenKind::OpSubAss => Some(AssignOp::SubAssign),
        TokenKind::OpMulAss => Some(AssignOp::MulAssign),
        TokenKind::OpDivAss => Some(AssignOp::DivAssign),
        TokenKind::OpModAss => Some(AssignOp::ModAssign),
        _ => None,
    }
}

pub(crate) fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::OpInc => Some(UnaryOp::Increment),
        TokenKind::OpDec => Some(UnaryOp::Decrement),
        _ => None,
    }
}

/// Literal value of a literal token.
pub(crate) fn literal_of(token: &Token) -> Option<Literal> {
    let kind = match token.kind {
        TokenKind::LitInt => LiteralKind::Int,
        TokenKind::LitFloat => LiteralKind::Float,
        TokenKind::LitStr => LiteralKind::Str,
        TokenKind::LitChar => LiteralKind::Char,
        TokenKind::LitTrue | TokenKind::LitFalse => LiteralKind::Bool,
        _ => return None,
    };
    Some(Literal::new(kind, token.text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<Program, SyntaxError> {
        let tokens = tokenize(source).unwrap();
        parse(&tokens)
    }

    #[test]
    fn test_parse_empty_main() {
        let program = parse_str("Main { }").unwrap();
        assert!(program.body.is_empty());
        assert_eq!(program.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_parse_simple_declaration() {
        let program = parse_str("Main {\n    int x = 42;\n}").unwrap();

        assert_eq!(program.body.len(), 1);
        match &program.body.statements[0] {
            Stmt::Declaration {
                data_type,
                declarators,
                location,
            } => {
                assert_eq!(*data_type, DataType::Int);
                assert_eq!(declarators.len(), 1);
                assert_eq!(declarators[0].name, "x");
                let init = declarators[0].init.as_ref().unwrap();
                assert_eq!(init.op, AssignOp::Assign);
                assert_eq!(init.value, Expr::Literal(Literal::number("42")));
                assert_eq!(*location, SourceLocation::new(2, 5));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_main() {
        let err = parse_str("{ }").unwrap_err();
        assert_eq!(err.expected, "'Main'");
        assert_eq!(err.found, "'{'");
    }

    #[test]
    fn test_empty_token_list() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.expected, "'Main'");
        assert_eq!(err.found, "end of input");
    }

    #[test]
    fn test_unclosed_main_reports_end_of_input() {
        let err = parse_str("Main { int x;").unwrap_err();
        assert_eq!(err.expected, "'}'");
        assert_eq!(err.found, "end of input");
        assert_eq!(err.location, SourceLocation::new(1, 13));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_str("Main { } int").unwrap_err();
        assert_eq!(err.expected, "end of input");
        assert_eq!(err.found, "data type 'int'");
    }

    #[test]
    fn test_parse_source_wraps_both_stages() {
        assert!(matches!(
            parse_source("Main { x = @; }"),
            Err(FrontendError::Lex(_))
        ));
        assert!(matches!(
            parse_source("Main { x = ; }"),
            Err(FrontendError::Syntax(_))
        ));
        assert!(parse_source("Main { x = 1; }").is_ok());
    }
}
