// Integration tests for the electriC lexer

use electric::parser::ast::SourceLocation;
use electric::parser::{tokenize, LexError, Quote, Token, TokenKind};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_declaration_token_stream() {
    let tokens = tokenize("int x = 42;").expect("Lexing failed");
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["DT_INT(int)", "IDENTIFIER(x)", "OP_ASS", "LIT_INT(42)", "DEL_SEMICOLON"]
    );
}

#[test]
fn test_every_data_type_and_literal() {
    let source = "char c = 'a'; int i = 1; float f = 1.5; string s = \"abc\"; bool b = false;";
    let tokens = tokenize(source).expect("Lexing failed");
    let literal_kinds: Vec<TokenKind> = tokens
        .iter()
        .map(|t| t.kind)
        .filter(|k| {
            matches!(
                k,
                TokenKind::LitChar
                    | TokenKind::LitInt
                    | TokenKind::LitFloat
                    | TokenKind::LitStr
                    | TokenKind::LitFalse
            )
        })
        .collect();
    assert_eq!(
        literal_kinds,
        vec![
            TokenKind::LitChar,
            TokenKind::LitInt,
            TokenKind::LitFloat,
            TokenKind::LitStr,
            TokenKind::LitFalse,
        ]
    );
    assert_eq!(tokens[0].kind, TokenKind::DtChar);
    assert_eq!(tokens[15].kind, TokenKind::DtString);
}

#[test]
fn test_reserved_words() {
    let source = "if else elseif break Print PrintLine Scan return for while do continue Main";
    let tokens = tokenize(source).expect("Lexing failed");
    assert_eq!(tokens.len(), 13);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::ReservedWord));
    assert_eq!(tokens[5].value.as_deref(), Some("PrintLine"));
}

#[test]
fn test_every_macro_keyword_is_a_keyword_token() {
    let names = [
        "CV1", "CV2", "CV3", "CVK", "CKV", "CVM", "CMV", "CMK", "CO1", "CO2", "CO3", "CW1",
        "CW2", "CW3", "CWK", "CKM", "CMW", "CWM", "CWH", "CKH", "CMH", "CHW", "CHK", "CHM",
        "CA1", "CA2", "CA3", "CMA", "CAM", "CCH", "CCA", "CHTM", "CMTS", "CHTS", "CMTH",
        "CSTM", "CSTH",
    ];
    let tokens = tokenize(&names.join(" ")).expect("Lexing failed");
    assert_eq!(tokens.len(), 37);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Keyword));

    // Near misses stay identifiers
    let tokens = tokenize("CV4 cvk CVKX").expect("Lexing failed");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_locations_track_lines() {
    let tokens = tokenize("Main {\n    x++;\n}").expect("Lexing failed");
    let locations: Vec<SourceLocation> = tokens.iter().map(|t| t.location).collect();
    assert_eq!(
        locations,
        vec![
            SourceLocation::new(1, 1),
            SourceLocation::new(1, 6),
            SourceLocation::new(2, 5),
            SourceLocation::new(2, 6),
            SourceLocation::new(2, 8),
            SourceLocation::new(3, 1),
        ]
    );
}

#[test]
fn test_string_literal_location_is_opening_quote() {
    let tokens = tokenize("x = \"volts\";").expect("Lexing failed");
    assert_eq!(tokens[2].kind, TokenKind::LitStr);
    assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
}

#[test]
fn test_adjacent_literals() {
    let tokens = tokenize("\"a\"'b'\"cd\"").expect("Lexing failed");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::LitChar, TokenKind::LitChar, TokenKind::LitStr]
    );
}

#[test]
fn test_unterminated_string_reports_expected_quote() {
    let err = tokenize("PrintLine(\"ab);").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            expected: Quote::Double,
            location: SourceLocation::new(1, 11),
        }
    );
    assert_eq!(
        err.to_string(),
        "Unterminated string error at line 1, column 11: expected closing double quote ('\"')"
    );
}

#[test]
fn test_mismatched_delimiter_message() {
    let err = tokenize("c = 'a\";").unwrap_err();
    assert!(matches!(
        err,
        LexError::MismatchedDelimiter {
            expected: Quote::Single,
            ..
        }
    ));
    assert!(err.to_string().contains("single quote (\"'\")"));
}

#[test]
fn test_illegal_run_message() {
    let err = tokenize("x +@ 1;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Illegal character error at line 1, column 3: '+@'"
    );
}

#[test]
fn test_unterminated_comment_message() {
    let err = tokenize("/* unterminated").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedComment {
            location: SourceLocation::new(1, 1),
        }
    );
}

#[test]
fn test_empty_string_yields_no_tokens() {
    assert!(tokenize("\"\"").expect("Lexing failed").is_empty());
    assert!(tokenize("").expect("Lexing failed").is_empty());
    assert!(tokenize("  \n\t // only a comment").expect("Lexing failed").is_empty());
}

#[test]
fn test_brackets_are_lexed() {
    let tokens = tokenize("[x]").expect("Lexing failed");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::LBracket, TokenKind::Identifier, TokenKind::RBracket]
    );
}
