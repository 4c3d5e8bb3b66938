// Integration tests for the electriC parser

use electric::parser::ast::*;
use electric::parser::{parse, parse_source, tokenize, FrontendError, SyntaxError};
use electric::report::Report;
use electric::source;

fn parse_ok(source: &str) -> Program {
    parse_source(source).expect("Parsing failed")
}

fn syntax_error(source: &str) -> SyntaxError {
    match parse_source(source) {
        Err(FrontendError::Syntax(err)) => err,
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_declaration_program() {
    let tokens = tokenize("Main { int x = 42; }").expect("Lexing failed");
    let program = parse(&tokens).expect("Parsing failed");

    assert_eq!(
        program.body.statements,
        vec![Stmt::Declaration {
            data_type: DataType::Int,
            declarators: vec![Declarator {
                name: "x".to_string(),
                init: Some(Initializer {
                    op: AssignOp::Assign,
                    value: Expr::Literal(Literal::new(LiteralKind::Int, "42")),
                }),
            }],
            location: SourceLocation::new(1, 8),
        }]
    );
}

#[test]
fn test_macro_expansions_in_program() {
    let program = parse_ok(
        r#"
        Main {
            float kv = CVK(5000);
            float v = CV1(10, 2);
            PrintLine(CHTS(hours));
        }
    "#,
    );

    let outline = program.to_string();
    assert!(outline.contains("kv = (5000, /, 1000)"));
    assert!(outline.contains("v = SquareRoot((10, *, 2))"));
    assert!(outline.contains("Output(PrintLine, [(hours, *, 3600)])"));
}

#[test]
fn test_nested_control_flow() {
    let program = parse_ok(
        r#"
        Main {
            int i = 0;
            while (i < 3) {
                if (i == 1) {
                    PrintLine("one");
                } else {
                    for (int j = 0; j < i; j++) {
                        Print(j);
                    }
                }
                i++;
            }
        }
    "#,
    );

    assert_eq!(program.body.len(), 2);
    match &program.body.statements[1] {
        Stmt::While { body, .. } => {
            assert_eq!(body.len(), 2);
            match &body.statements[0] {
                Stmt::If {
                    else_body: Some(else_body),
                    elifs,
                    ..
                } => {
                    assert!(elifs.is_empty());
                    assert!(matches!(else_body.statements[0], Stmt::For { .. }));
                }
                other => panic!("Expected if/else, got {:?}", other),
            }
        }
        other => panic!("Expected while, got {:?}", other),
    }
}

#[test]
fn test_outline_rendering() {
    let program = parse_ok("Main {\n  do {\n    n--;\n  } while (n > 0 || x != 1);\n  n = Scan();\n}");
    let expected = "\
Program
  Body
    IterativeDoWhile(((n, >, 0), ||, (x, !=, 1)))
      Body
        Unary(n, --)
    Input(n, Scan())
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_for_outline() {
    let program = parse_ok("Main { for (int i = 0, k = 2; i < k; i++) { } }");
    assert_eq!(
        program.to_string(),
        "Program\n  Body\n    IterativeFor(int i = 0, k = 2; (i, <, k); i++)\n      Body\n"
    );
}

#[test]
fn test_missing_semicolon() {
    let err = syntax_error("Main {\n  int x = 1\n  x++;\n}");
    assert_eq!(err.expected, "';'");
    assert_eq!(err.found, "identifier 'x'");
    assert_eq!(err.location, SourceLocation::new(3, 3));
    assert_eq!(
        err.to_string(),
        "Syntax error at line 3, column 3: expected ';', but found identifier 'x'"
    );
}

#[test]
fn test_missing_closing_brace() {
    let err = syntax_error("Main {\n  while (x < 1) {\n    x++;\n}");
    assert_eq!(err.expected, "'}'");
    assert_eq!(err.found, "end of input");
}

#[test]
fn test_bool_literal_not_allowed_in_assignment() {
    let err = syntax_error("Main { done = true; }");
    assert_eq!(err.expected, "number, identifier or '('");
    assert_eq!(err.found, "boolean literal true");
}

#[test]
fn test_lex_errors_pass_through_unchanged() {
    match parse_source("Main { x = 1;}") {
        Err(FrontendError::Lex(err)) => {
            assert_eq!(err.to_string(), "Illegal character error at line 1, column 13: ';}'");
        }
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_demo_program() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/power.ec");
    let source = source::load(path).expect("Failed to load demo");
    let report = Report::build(source);

    assert!(report.is_ok(), "demo failed: {:?}", report.error);
    assert_eq!(report.statement_count(), 16);

    let program = report.program.as_ref().expect("no program");
    let macros: Vec<&str> = program
        .body
        .statements
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Assignment {
                value: Expr::Macro(m),
                ..
            } => Some(m.keyword.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(macros, vec!["CO1", "CW2", "CWK"]);

    let table = report.token_table();
    assert!(table.starts_with("Token type"));
    assert!(table.contains("KEYWORD       | CWK"));
}
