//! Fixed lexicon of the electriC language
//!
//! Word classification is a pure table lookup. The lexer consults these
//! tables in a fixed order (data type, boolean literal, macro keyword,
//! reserved word) and the parser uses [`lookup_macro`] to expand macro
//! keywords into arithmetic.

use super::ast::{BinOp, DataType};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;

pub const DATA_TYPES: &[(&str, DataType)] = &[
    ("char", DataType::Char),
    ("int", DataType::Int),
    ("float", DataType::Float),
    ("string", DataType::String),
    ("bool", DataType::Bool),
];

pub const BOOL_LITERALS: &[&str] = &["true", "false"];

/// Control and built-in words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedWord {
    If,
    Else,
    Elseif,
    Break,
    Print,
    PrintLine,
    Scan,
    Return,
    For,
    While,
    Do,
    Continue,
    Main,
}

pub const RESERVED_WORDS: &[(&str, ReservedWord)] = &[
    ("if", ReservedWord::If),
    ("else", ReservedWord::Else),
    ("elseif", ReservedWord::Elseif),
    ("break", ReservedWord::Break),
    ("Print", ReservedWord::Print),
    ("PrintLine", ReservedWord::PrintLine),
    ("Scan", ReservedWord::Scan),
    ("return", ReservedWord::Return),
    ("for", ReservedWord::For),
    ("while", ReservedWord::While),
    ("do", ReservedWord::Do),
    ("continue", ReservedWord::Continue),
    ("Main", ReservedWord::Main),
];

impl ReservedWord {
    pub fn from_word(word: &str) -> Option<Self> {
        RESERVED_WORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, reserved)| *reserved)
    }

    pub fn as_str(self) -> &'static str {
        RESERVED_WORDS
            .iter()
            .find(|(_, reserved)| *reserved == self)
            .map(|(spelling, _)| *spelling)
            .unwrap_or("?")
    }
}

impl fmt::Display for ReservedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn data_type(word: &str) -> Option<DataType> {
    DATA_TYPES
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, data_type)| *data_type)
}

pub fn is_bool_literal(word: &str) -> bool {
    BOOL_LITERALS.contains(&word)
}

pub fn is_macro_keyword(word: &str) -> bool {
    lookup_macro(word).is_some()
}

/// Operand shape of a macro keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroArity {
    /// `NAME(a, b)` expands to `a op b`
    Two,
    /// `NAME(a)` expands to `a op constant`
    One { constant: &'static str },
}

/// One row of the unit-conversion macro table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSpec {
    pub name: &'static str,
    pub arity: MacroArity,
    pub op: BinOp,
    pub square_root: bool,
}

const fn two(name: &'static str, op: BinOp) -> MacroSpec {
    MacroSpec {
        name,
        arity: MacroArity::Two,
        op,
        square_root: false,
    }
}

const fn root(name: &'static str, op: BinOp) -> MacroSpec {
    MacroSpec {
        name,
        arity: MacroArity::Two,
        op,
        square_root: true,
    }
}

const fn one(name: &'static str, op: BinOp, constant: &'static str) -> MacroSpec {
    MacroSpec {
        name,
        arity: MacroArity::One { constant },
        op,
        square_root: false,
    }
}

// Voltage, resistance, power, current, charge and time conversions.
pub const MACRO_TABLE: &[MacroSpec] = &[
    root("CV1", BinOp::Mul),
    two("CV2", BinOp::Div),
    two("CV3", BinOp::Mul),
    one("CVK", BinOp::Div, "1000"),
    one("CKV", BinOp::Mul, "1000"),
    one("CVM", BinOp::Mul, "1000"),
    one("CMV", BinOp::Div, "1000"),
    one("CMK", BinOp::Div, "1000000"),
    two("CO1", BinOp::Div),
    two("CO2", BinOp::Div),
    two("CO3", BinOp::Div),
    two("CW1", BinOp::Div),
    two("CW2", BinOp::Mul),
    two("CW3", BinOp::Mul),
    one("CWK", BinOp::Div, "1000"),
    one("CKM", BinOp::Mul, "1000"),
    one("CMW", BinOp::Mul, "1000000"),
    one("CWM", BinOp::Div, "1000000"),
    one("CWH", BinOp::Div, "745.7"),
    one("CKH", BinOp::Mul, "1.341"),
    one("CMH", BinOp::Mul, "1341"),
    one("CHW", BinOp::Mul, "745.7"),
    one("CHK", BinOp::Div, "1.341"),
    one("CHM", BinOp::Div, "1341"),
    two("CA1", BinOp::Div),
    two("CA2", BinOp::Div),
    root("CA3", BinOp::Div),
    one("CMA", BinOp::Div, "1000"),
    one("CAM", BinOp::Mul, "1000"),
    two("CCH", BinOp::Mul),
    two("CCA", BinOp::Div),
    one("CHTM", BinOp::Mul, "60"),
    one("CMTS", BinOp::Mul, "60"),
    one("CHTS", BinOp::Mul, "3600"),
    one("CMTH", BinOp::Div, "60"),
    one("CSTM", BinOp::Div, "60"),
    one("CSTH", BinOp::Div, "3600"),
];

static MACRO_INDEX: LazyLock<FxHashMap<&'static str, &'static MacroSpec>> =
    LazyLock::new(|| MACRO_TABLE.iter().map(|spec| (spec.name, spec)).collect());

/// Look up a macro keyword by its exact (case-sensitive) name.
pub fn lookup_macro(name: &str) -> Option<&'static MacroSpec> {
    MACRO_INDEX.get(name).copied()
}
