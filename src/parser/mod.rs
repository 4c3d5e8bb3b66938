//! electriC front end
//!
//! This module transforms electriC source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with `statements`, `declarations`
//!   and `expressions` extending the [`Parser`]
//! - [`ast`]: AST node definitions
//! - [`keywords`]: the fixed lexicon, including the unit-conversion macro table
//! - [`errors`]: lexical and syntax error types
//!
//! # Language
//!
//! A program is a single `Main { ... }` block:
//! - Types: `int`, `float`, `string`, `char`, `bool`
//! - Statements: declarations, assignments, `x = Scan()`, `x++`/`x--`,
//!   `Print`/`PrintLine`, `return`, `if`/`elseif`/`else`, `while`,
//!   `do ... while`, `for`
//! - Expressions: arithmetic, comparison, `&&`/`||`
//! - 37 macro keywords (`CVK`, `CV1`, ...) that expand to arithmetic
//!
//! # Parser Implementation
//!
//! Hand-written lexer and recursive descent parser. Both stages stop at the
//! first error. No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod errors;
pub mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
pub mod statements;

pub use errors::{FrontendError, LexError, Quote, SyntaxError};
pub use lexer::{tokenize, Token, TokenKind};
pub use parse::{parse, parse_source, Parser};
