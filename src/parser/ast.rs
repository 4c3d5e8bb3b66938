//! AST (Abstract Syntax Tree) definitions for electriC programs
//!
//! The tree is a passive value: the parser builds it bottom-up and nothing
//! mutates it afterwards. Statements remember where they started in the
//! source; expressions do not.
//!
//! Every node implements [`fmt::Display`]. Expressions render compactly as
//! `(left, op, right)`, and a [`Program`] renders as an indented outline with
//! one node per line.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declarable data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Char,
    Int,
    Float,
    String,
    Bool,
}

impl DataType {
    /// The keyword spelling of this type.
    pub fn keyword(self) -> &'static str {
        match self {
            DataType::Char => "char",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Bool => "bool",
        }
    }

    /// `int` and `float` take arithmetic initializers; the rest take a
    /// single literal.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

/// Increment/decrement statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Increment, // ++
    Decrement, // --
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// `Print` keeps the cursor on the line, `PrintLine` ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Print,
    PrintLine,
}

impl OutputKind {
    pub fn keyword(self) -> &'static str {
        match self {
            OutputKind::Print => "Print",
            OutputKind::PrintLine => "PrintLine",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Str,
    Char,
    Bool,
}

/// A literal exactly as it was written (quotes stripped for text literals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub raw: String,
}

impl Literal {
    pub fn new(kind: LiteralKind, raw: impl Into<String>) -> Self {
        Literal {
            kind,
            raw: raw.into(),
        }
    }

    /// Integer literal, or float literal when the text has a decimal point.
    pub fn number(raw: &str) -> Self {
        let kind = if raw.contains('.') {
            LiteralKind::Float
        } else {
            LiteralKind::Int
        };
        Literal::new(kind, raw)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LiteralKind::Str => write!(f, "\"{}\"", self.raw),
            LiteralKind::Char => write!(f, "'{}'", self.raw),
            LiteralKind::Int | LiteralKind::Float | LiteralKind::Bool => {
                f.write_str(&self.raw)
            }
        }
    }
}

/// Expanded macro keyword such as `CVK(x)` or `CV1(p, r)`.
///
/// `rhs` is either the second operand or the fixed constant from the macro
/// table. When `square_root` is set the expansion is the square root of
/// `lhs op rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroExpr {
    pub keyword: String,
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub square_root: bool,
}

impl fmt::Display for MacroExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.square_root {
            write!(f, "SquareRoot(({}, {}, {}))", self.lhs, self.op.symbol(), self.rhs)
        } else {
            write!(f, "({}, {}, {})", self.lhs, self.op.symbol(), self.rhs)
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Identifier(String),
    Literal(Literal),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Macro(MacroExpr),
    /// `Scan()` used as a declaration initializer
    Scan,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Binary { op, left, right } => {
                write!(f, "({}, {}, {})", left, op.symbol(), right)
            }
            Expr::Macro(m) => write!(f, "{}", m),
            Expr::Scan => f.write_str("Scan()"),
        }
    }
}

/// A single `name [op value]` entry of a declaration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub op: AssignOp,
    pub value: Expr,
}

impl fmt::Display for Declarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "{} {} {}", self.name, init.op.symbol(), init.value),
            None => f.write_str(&self.name),
        }
    }
}

/// `elseif (condition) { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseIf {
    pub condition: Expr,
    pub body: Body,
}

/// First clause of a `for` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForInit {
    Declaration {
        data_type: DataType,
        declarators: Vec<Declarator>,
    },
    Identifiers(Vec<Declarator>),
}

/// Third clause of a `for` header, always `name++` or `name--`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStep {
    pub target: String,
    pub op: UnaryOp,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Declaration {
        data_type: DataType,
        declarators: Vec<Declarator>,
        location: SourceLocation,
    },
    Assignment {
        target: String,
        op: AssignOp,
        value: Expr,
        location: SourceLocation,
    },
    Unary {
        target: String,
        op: UnaryOp,
        location: SourceLocation,
    },
    Input {
        target: String,
        location: SourceLocation,
    },
    Output {
        kind: OutputKind,
        values: Vec<Expr>,
        location: SourceLocation,
    },
    Return {
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_body: Body,
        elifs: Vec<ElseIf>,
        else_body: Option<Body>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Body,
        location: SourceLocation,
    },
    DoWhile {
        body: Body,
        condition: Expr,
        location: SourceLocation,
    },
    For {
        init: ForInit,
        condition: Expr,
        step: ForStep,
        body: Body,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Declaration { location, .. } => location,
            Stmt::Assignment { location, .. } => location,
            Stmt::Unary { location, .. } => location,
            Stmt::Input { location, .. } => location,
            Stmt::Output { location, .. } => location,
            Stmt::Return { location, .. } => location,
            Stmt::If { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::DoWhile { location, .. } => location,
            Stmt::For { location, .. } => location,
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = indent(depth);
        match self {
            Stmt::Declaration {
                data_type,
                declarators,
                ..
            } => {
                writeln!(f, "{pad}Declaration({data_type})")?;
                for declarator in declarators {
                    writeln!(f, "{}{}", indent(depth + 1), declarator)?;
                }
                Ok(())
            }
            Stmt::Assignment {
                target, op, value, ..
            } => writeln!(f, "{pad}Assignment({target}, {}, {value})", op.symbol()),
            Stmt::Unary { target, op, .. } => {
                writeln!(f, "{pad}Unary({target}, {})", op.symbol())
            }
            Stmt::Input { target, .. } => writeln!(f, "{pad}Input({target}, Scan())"),
            Stmt::Output { kind, values, .. } => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "{pad}Output({}, [{joined}])", kind.keyword())
            }
            Stmt::Return { value, .. } => writeln!(f, "{pad}Return({value})"),
            Stmt::If {
                condition,
                then_body,
                elifs,
                else_body,
                ..
            } => {
                writeln!(f, "{pad}Conditional")?;
                writeln!(f, "{}if {condition}", indent(depth + 1))?;
                then_body.write_outline(f, depth + 2)?;
                for elif in elifs {
                    writeln!(f, "{}elseif {}", indent(depth + 1), elif.condition)?;
                    elif.body.write_outline(f, depth + 2)?;
                }
                if let Some(body) = else_body {
                    writeln!(f, "{}else", indent(depth + 1))?;
                    body.write_outline(f, depth + 2)?;
                }
                Ok(())
            }
            Stmt::While {
                condition, body, ..
            } => {
                writeln!(f, "{pad}IterativeWhile({condition})")?;
                body.write_outline(f, depth + 1)
            }
            Stmt::DoWhile {
                body, condition, ..
            } => {
                writeln!(f, "{pad}IterativeDoWhile({condition})")?;
                body.write_outline(f, depth + 1)
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
                ..
            } => {
                let init_text = match init {
                    ForInit::Declaration {
                        data_type,
                        declarators,
                    } => format!("{} {}", data_type, join_declarators(declarators)),
                    ForInit::Identifiers(declarators) => join_declarators(declarators),
                };
                writeln!(
                    f,
                    "{pad}IterativeFor({init_text}; {condition}; {}{})",
                    step.target,
                    step.op.symbol()
                )?;
                body.write_outline(f, depth + 1)
            }
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn join_declarators(declarators: &[Declarator]) -> String {
    declarators
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered statements between a pair of braces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub statements: Vec<Stmt>,
}

impl Body {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Body { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}Body", indent(depth))?;
        for stmt in &self.statements {
            stmt.write_outline(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Root of the tree: the `Main { ... }` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub body: Body,
    pub location: SourceLocation,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        self.body.write_outline(f, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(raw: &str) -> Box<Expr> {
        Box::new(Expr::Literal(Literal::number(raw)))
    }

    #[test]
    fn test_binary_display() {
        let expr = Expr::Binary {
            op: BinOp::Add,
            left: Box::new(Expr::Identifier("x".to_string())),
            right: Box::new(Expr::Binary {
                op: BinOp::Mul,
                left: int("2"),
                right: int("3.5"),
            }),
        };
        assert_eq!(expr.to_string(), "(x, +, (2, *, 3.5))");
    }

    #[test]
    fn test_macro_display() {
        let scaled = MacroExpr {
            keyword: "CVK".to_string(),
            lhs: int("5000"),
            op: BinOp::Div,
            rhs: int("1000"),
            square_root: false,
        };
        assert_eq!(scaled.to_string(), "(5000, /, 1000)");

        let rooted = MacroExpr {
            keyword: "CV1".to_string(),
            lhs: int("10"),
            op: BinOp::Mul,
            rhs: int("2"),
            square_root: true,
        };
        assert_eq!(rooted.to_string(), "SquareRoot((10, *, 2))");
    }

    #[test]
    fn test_text_literals_keep_their_quotes() {
        assert_eq!(Literal::new(LiteralKind::Str, "volts").to_string(), "\"volts\"");
        assert_eq!(Literal::new(LiteralKind::Char, "v").to_string(), "'v'");
        assert_eq!(Literal::number("7").kind, LiteralKind::Int);
        assert_eq!(Literal::number("7.").kind, LiteralKind::Float);
    }

    #[test]
    fn test_program_outline() {
        let program = Program {
            body: Body::new(vec![
                Stmt::Declaration {
                    data_type: DataType::Int,
                    declarators: vec![
                        Declarator {
                            name: "x".to_string(),
                            init: Some(Initializer {
                                op: AssignOp::Assign,
                                value: Expr::Literal(Literal::number("42")),
                            }),
                        },
                        Declarator {
                            name: "y".to_string(),
                            init: None,
                        },
                    ],
                    location: SourceLocation::new(2, 5),
                },
                Stmt::While {
                    condition: Expr::Binary {
                        op: BinOp::Lt,
                        left: Box::new(Expr::Identifier("x".to_string())),
                        right: int("10"),
                    },
                    body: Body::new(vec![Stmt::Unary {
                        target: "x".to_string(),
                        op: UnaryOp::Increment,
                        location: SourceLocation::new(3, 9),
                    }]),
                    location: SourceLocation::new(3, 5),
                },
            ]),
            location: SourceLocation::new(1, 1),
        };

        let expected = "\
Program
  Body
    Declaration(int)
      x = 42
      y
    IterativeWhile((x, <, 10))
      Body
        Unary(x, ++)
";
        assert_eq!(program.to_string(), expected);
    }
}
