//! Lexer (tokenizer) for electriC source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace and comments are skipped. Literal regions are tracked by the
//! running parity of quote characters: an odd-numbered quote opens a region
//! and the region ends at the next quote of the same kind.
//!
//! Operators are checked for glued-on symbols, so `x +@ 1` fails with the
//! whole run `+@` instead of lexing `+` and then failing on `@`. The first
//! violation aborts the pass; no partial token list is returned.

use super::ast::{DataType, SourceLocation};
use super::errors::{LexError, Quote};
use super::keywords;
use std::fmt;
use tracing::debug;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Data types
    DtChar,
    DtInt,
    DtFloat,
    DtString,
    DtBool,

    // Literals
    LitTrue,
    LitFalse,
    LitInt,
    LitFloat,
    LitStr,
    LitChar,

    // Assignment
    OpAss,    // =
    OpAddAss, // +=
    OpSubAss, // -=
    OpMulAss, // *=
    OpDivAss, // /=
    OpModAss, // %=

    // Arithmetic
    OpAdd, // +
    OpSub, // -
    OpMul, // *
    OpDiv, // /
    OpMod, // %
    OpExp, // **

    // Increment/Decrement
    OpInc, // ++
    OpDec, // --

    // Comparison
    OpEq,  // ==
    OpNeq, // !=
    OpGt,  // >
    OpLt,  // <
    OpGte, // >=
    OpLte, // <=

    // Logical
    OpAnd, // &&
    OpOr,  // ||
    OpNot, // !

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    // Words
    Identifier,
    Keyword,
    ReservedWord,
}

impl TokenKind {
    /// Name shown in the token table.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::DtChar => "DT_CHAR",
            TokenKind::DtInt => "DT_INT",
            TokenKind::DtFloat => "DT_FLOAT",
            TokenKind::DtString => "DT_STR",
            TokenKind::DtBool => "DT_BOOL",
            TokenKind::LitTrue => "LIT_BOOLTRUE",
            TokenKind::LitFalse => "LIT_BOOLFALSE",
            TokenKind::LitInt => "LIT_INT",
            TokenKind::LitFloat => "LIT_FLT",
            TokenKind::LitStr => "LIT_STR",
            TokenKind::LitChar => "LIT_CHAR",
            TokenKind::OpAss => "OP_ASS",
            TokenKind::OpAddAss => "OP_ADDASS",
            TokenKind::OpSubAss => "OP_SUBASS",
            TokenKind::OpMulAss => "OP_MULASS",
            TokenKind::OpDivAss => "OP_DIVASS",
            TokenKind::OpModAss => "OP_MODASS",
            TokenKind::OpAdd => "OP_ADD",
            TokenKind::OpSub => "OP_SUB",
            TokenKind::OpMul => "OP_MUL",
            TokenKind::OpDiv => "OP_DIV",
            TokenKind::OpMod => "OP_MOD",
            TokenKind::OpExp => "OP_EXP",
            TokenKind::OpInc => "OP_INC",
            TokenKind::OpDec => "OP_DEC",
            TokenKind::OpEq => "OP_EQT",
            TokenKind::OpNeq => "OP_NEQT",
            TokenKind::OpGt => "OP_GRT",
            TokenKind::OpLt => "OP_LST",
            TokenKind::OpGte => "OP_GRTEQ",
            TokenKind::OpLte => "OP_LSTEQ",
            TokenKind::OpAnd => "OP_LOGAND",
            TokenKind::OpOr => "OP_LOGOR",
            TokenKind::OpNot => "OP_LOGNOT",
            TokenKind::LParen => "DEL_LPAREN",
            TokenKind::RParen => "DEL_RPAREN",
            TokenKind::LBracket => "DEL_LBRACKET",
            TokenKind::RBracket => "DEL_RBRACKET",
            TokenKind::LBrace => "DEL_LBRACE",
            TokenKind::RBrace => "DEL_RBRACE",
            TokenKind::Comma => "DEL_COMMA",
            TokenKind::Semicolon => "DEL_SEMICOLON",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::ReservedWord => "RESERVED_WORD",
        }
    }

    /// Fixed spelling of operator and delimiter kinds.
    pub fn symbol(self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::OpAss => "=",
            TokenKind::OpAddAss => "+=",
            TokenKind::OpSubAss => "-=",
            TokenKind::OpMulAss => "*=",
            TokenKind::OpDivAss => "/=",
            TokenKind::OpModAss => "%=",
            TokenKind::OpAdd => "+",
            TokenKind::OpSub => "-",
            TokenKind::OpMul => "*",
            TokenKind::OpDiv => "/",
            TokenKind::OpMod => "%",
            TokenKind::OpExp => "**",
            TokenKind::OpInc => "++",
            TokenKind::OpDec => "--",
            TokenKind::OpEq => "==",
            TokenKind::OpNeq => "!=",
            TokenKind::OpGt => ">",
            TokenKind::OpLt => "<",
            TokenKind::OpGte => ">=",
            TokenKind::OpLte => "<=",
            TokenKind::OpAnd => "&&",
            TokenKind::OpOr => "||",
            TokenKind::OpNot => "!",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::DtChar
            | TokenKind::DtInt
            | TokenKind::DtFloat
            | TokenKind::DtString
            | TokenKind::DtBool
            | TokenKind::LitTrue
            | TokenKind::LitFalse
            | TokenKind::LitInt
            | TokenKind::LitFloat
            | TokenKind::LitStr
            | TokenKind::LitChar
            | TokenKind::Identifier
            | TokenKind::Keyword
            | TokenKind::ReservedWord => return None,
        };
        Some(symbol)
    }

    pub fn is_data_type(self) -> bool {
        matches!(
            self,
            TokenKind::DtChar
                | TokenKind::DtInt
                | TokenKind::DtFloat
                | TokenKind::DtString
                | TokenKind::DtBool
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit.
///
/// `value` carries the source text for words and literals (the text between
/// the quotes for string and char literals) and is `None` for operators and
/// delimiters, whose spelling is fixed by their kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Token {
            kind,
            value: None,
            location,
        }
    }

    pub fn with_value(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            value: Some(value.into()),
            location,
        }
    }

    /// The token's value, or its fixed spelling when it has none.
    pub fn text(&self) -> &str {
        match &self.value {
            Some(value) => value,
            None => self.kind.symbol().unwrap_or(""),
        }
    }

    /// Human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        let text = self.text();
        match self.kind {
            TokenKind::DtChar
            | TokenKind::DtInt
            | TokenKind::DtFloat
            | TokenKind::DtString
            | TokenKind::DtBool => format!("data type '{}'", text),
            TokenKind::LitTrue | TokenKind::LitFalse => format!("boolean literal {}", text),
            TokenKind::LitInt => format!("int literal {}", text),
            TokenKind::LitFloat => format!("float literal {}", text),
            TokenKind::LitStr => format!("string literal \"{}\"", text),
            TokenKind::LitChar => format!("char literal '{}'", text),
            TokenKind::Identifier => format!("identifier '{}'", text),
            TokenKind::Keyword => format!("macro keyword '{}'", text),
            TokenKind::ReservedWord => format!("reserved word '{}'", text),
            _ => format!("'{}'", text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Tokenize a complete source text.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Characters that may directly follow an operator.
fn is_separator(ch: char) -> bool {
    is_whitespace(ch)
        || ch.is_ascii_alphanumeric()
        || matches!(ch, '_' | '"' | '\'' | '(' | ')' | ';')
}

/// Characters that end an illegal symbol run.
fn ends_illegal_run(ch: char) -> bool {
    is_whitespace(ch) || ch.is_ascii_alphanumeric() || matches!(ch, '_' | '"' | '\'' | '(' | ')')
}

/// Lexer for electriC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    quote_count: usize,
    /// Quote that opened the current literal region, and where it was.
    open_quote: Option<(Quote, SourceLocation)>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            quote_count: 0,
            open_quote: None,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if is_whitespace(ch) {
                self.advance();
                continue;
            }

            if let Some((quote, _)) = self.open_quote {
                if let Some(token) = self.literal_region(quote)? {
                    tokens.push(token);
                }
                continue;
            }

            if let Some(token) = self.next_token(ch)? {
                tokens.push(token);
            }
        }

        if let Some((quote, location)) = self.open_quote {
            return Err(LexError::UnterminatedString {
                expected: quote,
                location,
            });
        }

        debug!(tokens = tokens.len(), lines = self.line, "tokenized source");
        Ok(tokens)
    }

    /// Scan the construct starting at `ch`. Quotes and comments yield no token.
    fn next_token(&mut self, ch: char) -> Result<Option<Token>, LexError> {
        let loc = self.current_location();

        let token = match ch {
            '"' | '\'' => {
                if let Some(quote) = Quote::from_char(ch) {
                    self.quote(quote, loc);
                }
                return Ok(None);
            }

            '0'..='9' => self.number_literal(),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),

            '+' => self.operator(
                &[('+', TokenKind::OpInc), ('=', TokenKind::OpAddAss)],
                TokenKind::OpAdd,
            )?,
            '-' => self.operator(
                &[('-', TokenKind::OpDec), ('=', TokenKind::OpSubAss)],
                TokenKind::OpSub,
            )?,
            '*' => self.operator(
                &[('*', TokenKind::OpExp), ('=', TokenKind::OpMulAss)],
                TokenKind::OpMul,
            )?,
            '/' => match self.peek_ahead(1) {
                Some('/') => {
                    self.skip_line_comment();
                    return Ok(None);
                }
                Some('*') => {
                    self.skip_block_comment()?;
                    return Ok(None);
                }
                _ => self.operator(&[('=', TokenKind::OpDivAss)], TokenKind::OpDiv)?,
            },
            '%' => self.operator(&[('=', TokenKind::OpModAss)], TokenKind::OpMod)?,
            '=' => self.operator(&[('=', TokenKind::OpEq)], TokenKind::OpAss)?,
            '!' => self.operator(&[('=', TokenKind::OpNeq)], TokenKind::OpNot)?,
            '>' => self.operator(&[('=', TokenKind::OpGte)], TokenKind::OpGt)?,
            '<' => self.operator(&[('=', TokenKind::OpLte)], TokenKind::OpLt)?,
            '&' => self.doubled('&', TokenKind::OpAnd)?,
            '|' => self.doubled('|', TokenKind::OpOr)?,
            ',' => self.operator(&[], TokenKind::Comma)?,
            ';' => self.semicolon()?,

            '(' => self.delimiter(TokenKind::LParen),
            ')' => self.delimiter(TokenKind::RParen),
            '[' => self.delimiter(TokenKind::LBracket),
            ']' => self.delimiter(TokenKind::RBracket),
            '{' => self.delimiter(TokenKind::LBrace),
            '}' => self.delimiter(TokenKind::RBrace),

            _ => {
                return Err(LexError::IllegalCharacter {
                    run: ch.to_string(),
                    location: loc,
                })
            }
        };

        Ok(Some(token))
    }

    /// Count a quote character; odd-numbered quotes open a literal region.
    fn quote(&mut self, quote: Quote, loc: SourceLocation) {
        self.quote_count += 1;
        if self.quote_count % 2 == 1 {
            self.open_quote = Some((quote, loc));
        }
        self.advance();
    }

    /// Read the inside of a literal region up to (not including) the closing quote.
    ///
    /// One character makes a char literal, more make a string literal, and an
    /// empty region produces no token at all.
    fn literal_region(&mut self, quote: Quote) -> Result<Option<Token>, LexError> {
        let opened_at = self
            .open_quote
            .map(|(_, location)| location)
            .unwrap_or_else(|| self.current_location());
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == quote.as_char() {
                break;
            }

            text.push(ch);
            self.advance();

            match self.peek() {
                Some(next) if next == quote.other().as_char() => {
                    return Err(LexError::MismatchedDelimiter {
                        expected: quote,
                        location: self.current_location(),
                    });
                }
                None => {
                    return Err(LexError::UnterminatedString {
                        expected: quote,
                        location: opened_at,
                    });
                }
                _ => {}
            }
        }

        self.open_quote = None;

        let token = match text.chars().count() {
            0 => None,
            1 => Some(Token::with_value(TokenKind::LitChar, text, opened_at)),
            _ => Some(Token::with_value(TokenKind::LitStr, text, opened_at)),
        };
        Ok(token)
    }

    /// Parse numeric literal. A second '.' ends the number.
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let mut num_str = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if seen_dot {
            TokenKind::LitFloat
        } else {
            TokenKind::LitInt
        };
        Token::with_value(kind, num_str, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if let Some(data_type) = keywords::data_type(&ident) {
            match data_type {
                DataType::Char => TokenKind::DtChar,
                DataType::Int => TokenKind::DtInt,
                DataType::Float => TokenKind::DtFloat,
                DataType::String => TokenKind::DtString,
                DataType::Bool => TokenKind::DtBool,
            }
        } else if keywords::is_bool_literal(&ident) {
            if ident == "true" {
                TokenKind::LitTrue
            } else {
                TokenKind::LitFalse
            }
        } else if keywords::is_macro_keyword(&ident) {
            TokenKind::Keyword
        } else if keywords::ReservedWord::from_word(&ident).is_some() {
            TokenKind::ReservedWord
        } else {
            TokenKind::Identifier
        };

        Token::with_value(kind, ident, loc)
    }

    /// Scan an operator with optional two-character forms.
    ///
    /// `doubles` maps the second character to the two-character kind. The
    /// character after the chosen form must be a separator.
    fn operator(
        &mut self,
        doubles: &[(char, TokenKind)],
        single: TokenKind,
    ) -> Result<Token, LexError> {
        let loc = self.current_location();
        let double = self
            .peek_ahead(1)
            .and_then(|next| doubles.iter().find(|(second, _)| *second == next));

        let (kind, width) = match double {
            Some((_, kind)) => (*kind, 2),
            None => (single, 1),
        };

        self.check_glued(width, loc)?;
        for _ in 0..width {
            self.advance();
        }

        Ok(Token::new(kind, loc))
    }

    /// `&&` and `||`; a lone `&` or `|` is illegal.
    fn doubled(&mut self, ch: char, kind: TokenKind) -> Result<Token, LexError> {
        let loc = self.current_location();
        if self.peek_ahead(1) != Some(ch) {
            return Err(LexError::IllegalCharacter {
                run: ch.to_string(),
                location: loc,
            });
        }

        self.check_glued(2, loc)?;
        self.advance();
        self.advance();
        Ok(Token::new(kind, loc))
    }

    /// A semicolon must be followed by whitespace or end of input.
    fn semicolon(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        if let Some(next) = self.peek_ahead(1) {
            if !is_whitespace(next) {
                let mut run = String::new();
                while let Some(ch) = self.peek() {
                    if is_whitespace(ch) {
                        break;
                    }
                    run.push(ch);
                    self.advance();
                }
                return Err(LexError::IllegalCharacter { run, location: loc });
            }
        }

        self.advance();
        Ok(Token::new(TokenKind::Semicolon, loc))
    }

    fn delimiter(&mut self, kind: TokenKind) -> Token {
        let loc = self.current_location();
        self.advance();
        Token::new(kind, loc)
    }

    /// Fail with the whole symbol run if the character `width` places ahead
    /// is glued onto the operator.
    fn check_glued(&mut self, width: usize, loc: SourceLocation) -> Result<(), LexError> {
        match self.peek_ahead(width) {
            Some(next) if !is_separator(next) => {
                let mut run = String::new();
                while let Some(ch) = self.peek() {
                    if ends_illegal_run(ch) {
                        break;
                    }
                    run.push(ch);
                    self.advance();
                }
                Err(LexError::IllegalCharacter { run, location: loc })
            }
            _ => Ok(()),
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'

        // The closer may reuse the opening '*', so "/*/" is a whole comment
        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
