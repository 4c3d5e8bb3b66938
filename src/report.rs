//! Result of running both front-end stages over one source text
//!
//! A [`Report`] keeps whatever each stage produced so that callers can show
//! the token stream even when parsing failed. It renders the plain-text views
//! used by `--dump` and backs the terminal viewer.

use crate::parser::ast::Program;
use crate::parser::{parse, tokenize, FrontendError, Token};

const TYPE_HEADER: &str = "Token type";
const VALUE_HEADER: &str = "Token value";

pub struct Report {
    pub source: String,
    /// Empty when lexing failed.
    pub tokens: Vec<Token>,
    pub program: Option<Program>,
    pub error: Option<FrontendError>,
}

impl Report {
    /// Tokenize and parse `source`, stopping at the first failing stage.
    pub fn build(source: impl Into<String>) -> Self {
        let source = source.into();

        let (tokens, program, error) = match tokenize(&source) {
            Ok(tokens) => match parse(&tokens) {
                Ok(program) => (tokens, Some(program), None),
                Err(err) => (tokens, None, Some(FrontendError::from(err))),
            },
            Err(err) => (Vec::new(), None, Some(FrontendError::from(err))),
        };

        Report {
            source,
            tokens,
            program,
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Number of top-level statements in `Main`.
    pub fn statement_count(&self) -> usize {
        self.program
            .as_ref()
            .map(|program| program.body.len())
            .unwrap_or(0)
    }

    /// Two-column table of every token in source order.
    pub fn token_table(&self) -> String {
        let width = self
            .tokens
            .iter()
            .map(|token| token.kind.name().len())
            .chain(std::iter::once(TYPE_HEADER.len()))
            .max()
            .unwrap_or(TYPE_HEADER.len());

        let mut table = format!("{:<width$} | {}\n", TYPE_HEADER, VALUE_HEADER);
        table.push_str(&format!(
            "{}-+-{}\n",
            "-".repeat(width),
            "-".repeat(VALUE_HEADER.len())
        ));
        for token in &self.tokens {
            table.push_str(&format!("{:<width$} | {}\n", token.kind.name(), token.text()));
        }
        table
    }

    /// The AST outline, or the error message if a stage failed.
    pub fn tree(&self) -> String {
        match (&self.program, &self.error) {
            (Some(program), _) => program.to_string(),
            (None, Some(err)) => format!("{}\n", err),
            (None, None) => String::new(),
        }
    }
}
