//! # Introduction
//!
//! electriC is a small teaching language for electrical-engineering
//! students. This crate is its front end: it turns source text into a token
//! stream and then into an abstract syntax tree, and shows both in a
//! terminal viewer built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! .ec file → Loader → Lexer → Tokens → Parser → AST → Report → TUI / dump
//! ```
//!
//! 1. [`source`] — reads `.ec` files from disk.
//! 2. [`parser`] — the lexer, the recursive descent parser, the AST and the
//!    fixed lexicon, including the 37 unit-conversion macro keywords that
//!    expand to arithmetic while parsing.
//! 3. [`report`] — runs both stages and renders the token table and the
//!    AST outline.
//! 4. [`ui`] — ratatui-based viewer; not part of the stable library API.
//!
//! Both stages are pure and fail fast: the first error ends the pass and is
//! returned unchanged.
//!
//! ```
//! let program = electric::parse_source("Main { float kv = CVK(230); }").unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod parser;
pub mod report;
pub mod source;
pub mod ui;

pub use parser::{parse, parse_source, tokenize, FrontendError, LexError, SyntaxError};
