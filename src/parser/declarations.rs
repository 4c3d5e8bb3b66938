//! Declaration parsing implementation
//!
//! A declaration is a data type followed by comma-separated declarators,
//! each optionally initialized:
//!
//! ```text
//! declaration ::= data_type declarator ("," declarator)*
//! declarator  ::= identifier (assign_op initializer)?
//! ```
//!
//! `int` and `float` accept every assignment operator and an arithmetic
//! initializer. `string`, `char` and `bool` accept only `=` followed by one
//! literal of the matching kind. Any type may be initialized from `Scan()`.

use crate::parser::ast::*;
use crate::parser::errors::SyntaxError;
use crate::parser::keywords::{self, ReservedWord};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{assign_op, literal_of, Parser};

impl<'a> Parser<'a> {
    /// Parse `type declarator, ...` (without the trailing semicolon)
    pub(crate) fn parse_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        let location = self.current_location();
        let data_type = match self.peek().and_then(|token| keywords::data_type(token.text())) {
            Some(data_type) => data_type,
            None => return Err(self.error("data type")),
        };
        self.advance();

        let declarators = self.parse_declarators(data_type)?;

        Ok(Stmt::Declaration {
            data_type,
            declarators,
            location,
        })
    }

    pub(crate) fn parse_declarators(
        &mut self,
        data_type: DataType,
    ) -> Result<Vec<Declarator>, SyntaxError> {
        let mut declarators = Vec::new();

        loop {
            let name = self.expect_identifier()?;
            let init = match self.peek_kind().and_then(assign_op) {
                Some(op) => Some(self.parse_initializer(data_type, op)?),
                None => None,
            };
            declarators.push(Declarator { name, init });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(declarators)
    }

    /// Parse the operator and value of an initializer; the cursor is on the operator.
    fn parse_initializer(
        &mut self,
        data_type: DataType,
        op: AssignOp,
    ) -> Result<Initializer, SyntaxError> {
        if !data_type.is_numeric() && op != AssignOp::Assign {
            return Err(self.error("'='"));
        }
        self.advance();

        if self.check_reserved(ReservedWord::Scan) {
            self.parse_scan_call()?;
            return Ok(Initializer {
                op,
                value: Expr::Scan,
            });
        }

        let value = if data_type.is_numeric() {
            self.parse_numeric_initializer(data_type)?
        } else {
            self.parse_text_initializer(data_type)?
        };

        Ok(Initializer { op, value })
    }

    fn parse_numeric_initializer(&mut self, data_type: DataType) -> Result<Expr, SyntaxError> {
        let literal_kind = match data_type {
            DataType::Float => TokenKind::LitFloat,
            _ => TokenKind::LitInt,
        };

        match self.peek_kind() {
            Some(TokenKind::Keyword) => Ok(Expr::Macro(self.parse_macro()?)),
            Some(TokenKind::Identifier | TokenKind::LParen) => self.parse_additive(),
            Some(kind) if kind == literal_kind => self.parse_additive(),
            _ => Err(self.error(format!("{} literal", data_type))),
        }
    }

    /// A one-character string lexes as a char literal, so `string` takes both.
    /// `bool` also takes an identifier.
    fn parse_text_initializer(&mut self, data_type: DataType) -> Result<Expr, SyntaxError> {
        let accepted = match (data_type, self.peek_kind()) {
            (DataType::String, Some(TokenKind::LitStr | TokenKind::LitChar)) => true,
            (DataType::Char, Some(TokenKind::LitChar)) => true,
            (DataType::Bool, Some(TokenKind::LitTrue | TokenKind::LitFalse)) => true,
            (DataType::Bool, Some(TokenKind::Identifier)) => {
                return Ok(Expr::Identifier(self.expect_identifier()?));
            }
            _ => false,
        };

        match self.peek().and_then(literal_of) {
            Some(literal) if accepted => {
                self.advance();
                Ok(Expr::Literal(literal))
            }
            _ => Err(self.error(format!("{} literal", data_type))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::{parse_source, FrontendError, SyntaxError};

    fn declaration(source: &str) -> (DataType, Vec<Declarator>) {
        let program = parse_source(&format!("Main {{ {} }}", source)).unwrap();
        match program.body.statements.into_iter().next() {
            Some(Stmt::Declaration {
                data_type,
                declarators,
                ..
            }) => (data_type, declarators),
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    fn syntax_error(source: &str) -> SyntaxError {
        match parse_source(&format!("Main {{ {} }}", source)) {
            Err(FrontendError::Syntax(err)) => err,
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    fn init_text(declarator: &Declarator) -> String {
        declarator
            .init
            .as_ref()
            .map(|init| format!("{} {}", init.op.symbol(), init.value))
            .unwrap_or_default()
    }

    #[test]
    fn test_multiple_declarators() {
        let (data_type, declarators) = declaration("int a, b = 2, c *= a + b;");
        assert_eq!(data_type, DataType::Int);
        assert_eq!(declarators.len(), 3);
        assert!(declarators[0].init.is_none());
        assert_eq!(init_text(&declarators[1]), "= 2");
        assert_eq!(init_text(&declarators[2]), "*= (a, +, b)");
    }

    #[test]
    fn test_float_initializers() {
        let (_, declarators) = declaration("float p = CV3(v, i), q = (p - 1.5) * 2;");
        assert_eq!(init_text(&declarators[0]), "= (v, *, i)");
        assert_eq!(init_text(&declarators[1]), "= ((p, -, 1.5), *, 2)");
    }

    #[test]
    fn test_numeric_literal_must_match_type() {
        let err = syntax_error("int x = 2.5;");
        assert_eq!(err.expected, "int literal");
        assert_eq!(err.found, "float literal 2.5");

        let err = syntax_error("float y = \"text\";");
        assert_eq!(err.expected, "float literal");
    }

    #[test]
    fn test_scan_initializer() {
        let (_, declarators) = declaration("string name = Scan();");
        assert_eq!(declarators[0].init.as_ref().unwrap().value, Expr::Scan);

        let (_, declarators) = declaration("int n = Scan(), m;");
        assert_eq!(init_text(&declarators[0]), "= Scan()");
        assert_eq!(declarators[1].name, "m");
    }

    #[test]
    fn test_text_initializers() {
        let (_, declarators) = declaration("string unit = \"ohm\", one = \"V\";");
        assert_eq!(init_text(&declarators[0]), "= \"ohm\"");
        assert_eq!(init_text(&declarators[1]), "= 'V'");

        let (_, declarators) = declaration("char c = 'x';");
        assert_eq!(init_text(&declarators[0]), "= 'x'");

        let (_, declarators) = declaration("bool on = true, off = false;");
        assert_eq!(init_text(&declarators[0]), "= true");
        assert_eq!(init_text(&declarators[1]), "= false");
    }

    #[test]
    fn test_text_initializer_rules() {
        let err = syntax_error("string s += \"a\";");
        assert_eq!(err.expected, "'='");
        assert_eq!(err.found, "'+='");

        let err = syntax_error("char c = \"long\";");
        assert_eq!(err.expected, "char literal");

        let err = syntax_error("string s = name;");
        assert_eq!(err.expected, "string literal");
        assert_eq!(err.found, "identifier 'name'");

        let err = syntax_error("bool b = 1;");
        assert_eq!(err.expected, "bool literal");
    }

    #[test]
    fn test_bool_initializer_from_identifier() {
        let (data_type, declarators) = declaration("bool b = flag, c = true;");
        assert_eq!(data_type, DataType::Bool);
        assert_eq!(init_text(&declarators[0]), "= flag");
        assert_eq!(init_text(&declarators[1]), "= true");
    }

    #[test]
    fn test_missing_declarator_name() {
        let err = syntax_error("int = 4;");
        assert_eq!(err.expected, "identifier");
        assert_eq!(err.found, "'='");
    }
}
