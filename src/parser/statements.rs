//! Statement parsing implementation
//!
//! This module handles parsing of all electriC statement types:
//!
//! - Declarations: `int x = 42, y;`
//! - Identifier-led statements: `x += 1;`, `x = Scan();`, `x++;`
//! - Output and return: `PrintLine("v = " + v);`, `return 0;`
//! - Control flow: `if`/`elseif`/`else`, `while`, `do ... while`, `for`
//!
//! # Grammar
//!
//! ```text
//! body      ::= statement*            (until '}')
//! statement ::= declaration ';' | assign_or_unary ';' | output ';'
//!             | return ';' | do_while ';' | while | for | if
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::errors::SyntaxError;
use crate::parser::keywords::{self, ReservedWord};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{assign_op, literal_of, reserved_word, unary_op, Parser};

impl<'a> Parser<'a> {
    /// Parse statements up to (not including) the closing brace.
    pub(crate) fn parse_body(&mut self) -> Result<Body, SyntaxError> {
        let mut statements = Vec::new();

        loop {
            match self.peek_kind() {
                Some(TokenKind::RBrace) => break,
                Some(_) => statements.push(self.parse_statement()?),
                None => return Err(self.error("'}'")),
            }
        }

        Ok(Body::new(statements))
    }

    /// `{ body }`
    pub(crate) fn parse_block(&mut self) -> Result<Body, SyntaxError> {
        self.expect_lbrace()?;
        let body = self.parse_body()?;
        self.expect_rbrace()?;
        Ok(body)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let kind = match self.peek_kind() {
            Some(kind) => kind,
            None => return Err(self.error("statement")),
        };

        if kind.is_data_type() {
            let stmt = self.parse_declaration()?;
            self.expect_semicolon()?;
            return Ok(stmt);
        }

        if kind == TokenKind::Identifier {
            let stmt = self.parse_assign_or_unary()?;
            self.expect_semicolon()?;
            return Ok(stmt);
        }

        match self.peek_reserved() {
            Some(ReservedWord::Print) | Some(ReservedWord::PrintLine) => {
                let stmt = self.parse_output()?;
                self.expect_semicolon()?;
                Ok(stmt)
            }
            Some(ReservedWord::Return) => {
                let stmt = self.parse_return()?;
                self.expect_semicolon()?;
                Ok(stmt)
            }
            Some(ReservedWord::Do) => {
                let stmt = self.parse_do_while()?;
                self.expect_semicolon()?;
                Ok(stmt)
            }
            Some(ReservedWord::While) => self.parse_while(),
            Some(ReservedWord::For) => self.parse_for(),
            Some(ReservedWord::If) => self.parse_if(),
            _ => Err(self.error("statement")),
        }
    }

    /// Identifier-led statement, decided by the operator and the token after it.
    pub(crate) fn parse_assign_or_unary(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        let target = self.expect_identifier()?;

        let op_token = match self.peek() {
            Some(token) => token,
            None => return Err(self.error("assignment or unary operator")),
        };
        let next = self.peek_ahead(1);
        let next_kind = next.map(|token| token.kind);

        if let Some(op) = assign_op(op_token.kind) {
            if next_kind == Some(TokenKind::Keyword) {
                self.advance();
                let value = Expr::Macro(self.parse_macro()?);
                return Ok(Stmt::Assignment {
                    target,
                    op,
                    value,
                    location,
                });
            }

            let next_is_scan = next.and_then(reserved_word) == Some(ReservedWord::Scan);
            if op == AssignOp::Assign && next_is_scan {
                self.advance();
                self.parse_scan_call()?;
                return Ok(Stmt::Input { target, location });
            }

            let text_literal = match next_kind {
                Some(TokenKind::LitStr | TokenKind::LitChar) => next.and_then(literal_of),
                _ => None,
            };
            let literal = match text_literal {
                Some(literal) => literal,
                None => {
                    self.advance();
                    let value = self.parse_additive()?;
                    return Ok(Stmt::Assignment {
                        target,
                        op,
                        value,
                        location,
                    });
                }
            };

            if op != AssignOp::Assign {
                return Err(self.error("'='"));
            }

            self.advance();
            self.advance();
            return Ok(Stmt::Assignment {
                target,
                op,
                value: Expr::Literal(literal),
                location,
            });
        }

        if next_kind == Some(TokenKind::Keyword) {
            return Err(self.error("assignment operator"));
        }

        match unary_op(op_token.kind) {
            Some(op) => {
                self.advance();
                Ok(Stmt::Unary {
                    target,
                    op,
                    location,
                })
            }
            None => Err(self.error("assignment or unary operator")),
        }
    }

    /// `Print ( value { + value } )` or the same with `PrintLine`
    pub(crate) fn parse_output(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        let kind = match self.peek_reserved() {
            Some(ReservedWord::PrintLine) => OutputKind::PrintLine,
            Some(ReservedWord::Print) => OutputKind::Print,
            _ => return Err(self.error("'Print' or 'PrintLine'")),
        };
        self.advance();

        self.expect_lparen()?;
        let mut values = vec![self.parse_value()?];
        while self.match_token(TokenKind::OpAdd) {
            values.push(self.parse_value()?);
        }
        self.expect_rparen()?;

        Ok(Stmt::Output {
            kind,
            values,
            location,
        })
    }

    /// `return value`
    pub(crate) fn parse_return(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::Return)?;
        let value = self.parse_value()?;
        Ok(Stmt::Return { value, location })
    }

    /// A single literal of any kind, an identifier, or a macro expansion.
    pub(crate) fn parse_value(&mut self) -> Result<Expr, SyntaxError> {
        let token = match self.peek() {
            Some(token) => token,
            None => return Err(self.error("literal, identifier or macro keyword")),
        };

        if token.kind == TokenKind::Keyword {
            return Ok(Expr::Macro(self.parse_macro()?));
        }

        if token.kind == TokenKind::Identifier {
            self.advance();
            return Ok(Expr::Identifier(token.text().to_string()));
        }

        match literal_of(token) {
            Some(literal) => {
                self.advance();
                Ok(Expr::Literal(literal))
            }
            None => Err(self.error("literal, identifier or macro keyword")),
        }
    }

    /// `while ( condition ) { body }`
    pub(crate) fn parse_while(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::While)?;

        self.expect_lparen()?;
        let condition = self.parse_condition()?;
        self.expect_rparen()?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// `do { body } while ( condition )`
    pub(crate) fn parse_do_while(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::Do)?;

        let body = self.parse_block()?;
        self.expect_reserved(ReservedWord::While)?;
        self.expect_lparen()?;
        let condition = self.parse_condition()?;
        self.expect_rparen()?;

        Ok(Stmt::DoWhile {
            body,
            condition,
            location,
        })
    }

    /// `for ( init ; condition ; name++ ) { body }`
    pub(crate) fn parse_for(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::For)?;
        self.expect_lparen()?;

        let init = self.parse_for_init()?;
        self.expect_semicolon()?;

        let condition = self.parse_condition()?;
        self.expect_semicolon()?;

        let target = self.expect_identifier()?;
        let op = match self.peek_kind().and_then(unary_op) {
            Some(op) => op,
            None => return Err(self.error("'++' or '--'")),
        };
        self.advance();
        self.expect_rparen()?;

        let body = self.parse_block()?;

        Ok(Stmt::For {
            init,
            condition,
            step: ForStep { target, op },
            body,
            location,
        })
    }

    fn parse_for_init(&mut self) -> Result<ForInit, SyntaxError> {
        let token = match self.peek() {
            Some(token) => token,
            None => return Err(self.error("loop initializer")),
        };

        if token.kind.is_data_type() {
            let data_type = match keywords::data_type(token.text()) {
                Some(data_type) if data_type.is_numeric() => data_type,
                _ => return Err(self.error("'int' or 'float'")),
            };
            self.advance();
            let declarators = self.parse_declarators(data_type)?;
            return Ok(ForInit::Declaration {
                data_type,
                declarators,
            });
        }

        if token.kind == TokenKind::Identifier {
            let declarators = self.parse_declarators(DataType::Int)?;
            return Ok(ForInit::Identifiers(declarators));
        }

        Err(self.error("loop initializer"))
    }

    /// `if (c) {..}` then any number of `elseif (c) {..}` and an optional `else {..}`
    pub(crate) fn parse_if(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        self.expect_reserved(ReservedWord::If)?;

        self.expect_lparen()?;
        let condition = self.parse_condition()?;
        self.expect_rparen()?;
        let then_body = self.parse_block()?;

        let mut elifs = Vec::new();
        let mut else_body = None;

        loop {
            match self.peek_reserved() {
                Some(ReservedWord::Elseif) => {
                    self.advance();
                    self.expect_lparen()?;
                    let condition = self.parse_condition()?;
                    self.expect_rparen()?;
                    let body = self.parse_block()?;
                    elifs.push(ElseIf { condition, body });
                }
                Some(ReservedWord::Else) => {
                    self.advance();
                    else_body = Some(self.parse_block()?);
                    break;
                }
                _ => break,
            }
        }

        Ok(Stmt::If {
            condition,
            then_body,
            elifs,
            else_body,
            location,
        })
    }
}
