#![allow(clippy::unwrap_used, clippy::expect_used)]

use kiwi_ir::{BuiltinTable, FileId, FileRegistry, Token, TokenName, TokenSpan, TokenType};
use kiwi_value::Value;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::BuiltinRegistry;

fn lex(source: &str) -> Vec<Token> {
    Lexer::from_source(FileId::new(0), source, &BuiltinRegistry::new()).tokens()
}

/// Category and text of every token before EOF.
fn shapes(source: &str) -> Vec<(TokenType, String)> {
    let mut tokens = lex(source);
    assert!(tokens.pop().is_some_and(|t| t.is_eof()));
    tokens.into_iter().map(|t| (t.token_type, t.text)).collect()
}

fn single(source: &str) -> Token {
    let tokens = lex(source);
    assert_eq!(tokens.len(), 2, "expected one token in {source:?}: {tokens:?}");
    tokens[0].clone()
}

#[test]
fn empty_source_is_just_eof() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].span, TokenSpan::new(FileId::new(0), 1, 1));
}

#[test]
fn plain_string() {
    let token = single("\"abc\"");
    assert_eq!(token.token_type, TokenType::String);
    assert_eq!(token.text, "abc");
    assert_eq!(token.value, Value::string("abc"));
}

#[test]
fn interpolation_becomes_a_sum() {
    use TokenType::{LParen, Literal, Operator, RParen, String};
    assert_eq!(
        shapes("\"a${1+1}b\""),
        vec![
            (String, "a".to_string()),
            (Operator, "+".to_string()),
            (LParen, "(".to_string()),
            (Literal, "1".to_string()),
            (Operator, "+".to_string()),
            (Literal, "1".to_string()),
            (RParen, ")".to_string()),
            (Operator, "+".to_string()),
            (String, "b".to_string()),
        ]
    );
}

#[test]
fn leading_interpolation_gets_an_empty_string() {
    use TokenType::{Identifier, LParen, Operator, RParen, String};
    assert_eq!(
        shapes("\"${name}\""),
        vec![
            (String, "".to_string()),
            (Operator, "+".to_string()),
            (LParen, "(".to_string()),
            (Identifier, "name".to_string()),
            (RParen, ")".to_string()),
        ]
    );
}

#[test]
fn empty_interpolation_is_dropped() {
    assert_eq!(shapes("\"a${}b\""), vec![(TokenType::String, "ab".to_string())]);
}

#[test]
fn nested_interpolation() {
    let texts: Vec<String> = shapes(r#""x${\"y${z}\"}""#).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, ["x", "+", "(", "y", "+", "(", "z", ")", ")"]);
}

#[test]
fn raw_strings_do_not_interpolate_or_escape() {
    let token = single(r"'a\n${b}\'c'");
    assert_eq!(token.token_type, TokenType::String);
    assert_eq!(token.text, r"a\n${b}'c");
}

#[test]
fn string_escapes() {
    assert_eq!(single(r#""\n\t\r\\\"\b\f""#).text, "\n\t\r\\\"\u{08}\u{0C}");
    assert_eq!(single(r#""é\U0001F600""#).text, "é😀");
    assert_eq!(single(r#""😀""#).text, "😀");
}

#[test]
fn unknown_escapes_are_kept() {
    assert_eq!(single(r#""\q\uZZ""#).text, r"\q\uZZ");
}

#[test]
fn unterminated_string_is_an_error_token() {
    let token = single("\"abc");
    assert_eq!(token.token_type, TokenType::Error);
}

#[test]
fn byte_strings() {
    let token = single(r#"b"A\x42\n""#);
    assert_eq!(token.token_type, TokenType::Literal);
    assert_eq!(
        token.value,
        Value::list(vec![Value::Integer(65), Value::Integer(66), Value::Integer(10)])
    );
    assert_eq!(single("b'hi'").value, Value::bytes(b"hi"));
}

#[test]
fn bad_byte_strings_are_error_tokens() {
    assert_eq!(single("b\"é\"").token_type, TokenType::Error);
    assert_eq!(single(r#"b"\xZZ""#).token_type, TokenType::Error);
}

#[test]
fn radix_literals() {
    assert_eq!(single("0x1F").value, Value::Integer(31));
    assert_eq!(single("0b101").value, Value::Integer(5));
    assert_eq!(single("0o17").value, Value::Integer(15));
    assert_eq!(single("0XfF").value, Value::Integer(255));
    assert_eq!(single("0x").token_type, TokenType::Error);
    assert_eq!(single("0b102").token_type, TokenType::Error);
}

#[test]
fn decimal_literals() {
    assert_eq!(single("42").value, Value::Integer(42));
    assert_eq!(single("2.5").value, Value::Float(2.5));
    assert_eq!(single("1e3").value, Value::Float(1000.0));
    assert_eq!(single("15e-1").value, Value::Float(1.5));
}

#[test]
fn malformed_decimals_are_error_tokens() {
    let token = single("1.2.3");
    assert_eq!(token.token_type, TokenType::Error);
    assert_eq!(token.text, "1.2.3");
    assert_eq!(single("1e2e3").token_type, TokenType::Error);
}

#[test]
fn double_dot_ends_a_number() {
    use TokenType::{Literal, Range};
    assert_eq!(
        shapes("1..10"),
        vec![
            (Literal, "1".to_string()),
            (Range, "..".to_string()),
            (Literal, "10".to_string()),
        ]
    );
}

#[test]
fn method_call_on_a_number() {
    let names: Vec<TokenType> = shapes("3.to_string()").into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        names,
        [
            TokenType::Literal,
            TokenType::Dot,
            TokenType::Identifier,
            TokenType::LParen,
            TokenType::RParen,
        ]
    );
}

#[test]
fn operators_are_greedy() {
    let token = single(">>>=");
    assert_eq!(token.name, TokenName::UnsignedRightShiftAssign);
    assert_eq!(single(">>>").name, TokenName::UnsignedRightShift);
    assert_eq!(single("=<").name, TokenName::Unpack);
    assert_eq!(single("**=").name, TokenName::ExponentAssign);
}

#[test]
fn null_coalesce_never_extends() {
    let tokens = lex("???");
    assert_eq!(tokens[0].name, TokenName::NullCoalesce);
    assert_eq!(tokens[1].name, TokenName::Question);
    assert!(tokens[2].is_eof());
}

#[test]
fn unknown_operator_spelling_is_an_error() {
    let token = single("=>");
    assert_eq!(token.token_type, TokenType::Error);
    assert_eq!(token.text, "=>");
}

#[test]
fn punctuation() {
    use TokenType::{Colon, Comma, Dot, Identifier, Qualifier};
    assert_eq!(
        shapes("a::b.c:d,"),
        vec![
            (Identifier, "a".to_string()),
            (Qualifier, "::".to_string()),
            (Identifier, "b".to_string()),
            (Dot, ".".to_string()),
            (Identifier, "c".to_string()),
            (Colon, ":".to_string()),
            (Identifier, "d".to_string()),
            (Comma, ",".to_string()),
        ]
    );
}

#[test]
fn keywords_and_words() {
    let tokens = lex("fn var Integer and if with true null @ foo");
    let summary: Vec<(TokenType, TokenName)> =
        tokens.iter().map(|t| (t.token_type, t.name)).collect();
    assert_eq!(
        summary,
        vec![
            (TokenType::Keyword, TokenName::Method),
            (TokenType::Keyword, TokenName::Var),
            (TokenType::Typename, TokenName::TypeInteger),
            (TokenType::Operator, TokenName::And),
            (TokenType::Conditional, TokenName::If),
            (TokenType::Lambda, TokenName::With),
            (TokenType::Literal, TokenName::Default),
            (TokenType::Literal, TokenName::Default),
            (TokenType::Keyword, TokenName::This),
            (TokenType::Identifier, TokenName::Default),
            (TokenType::Eof, TokenName::Default),
        ]
    );
    assert_eq!(tokens[6].value, Value::Boolean(true));
    assert_eq!(tokens[7].value, Value::None);
}

#[test]
fn builtin_names_use_the_lookup() {
    let mut builtins = BuiltinRegistry::new();
    builtins.add_function(BuiltinTable::Math, "sqrt");
    builtins.add_method(BuiltinTable::Core, "size");
    builtins.add_method(BuiltinTable::Core, "print");
    let tokens = Lexer::from_source(FileId::new(0), "sqrt size print", &builtins).tokens();
    assert_eq!(tokens[0].name, TokenName::BuiltinFunction(BuiltinTable::Math));
    assert_eq!(tokens[1].name, TokenName::BuiltinMethod(BuiltinTable::Core));
    // Keywords win over builtin tables.
    assert_eq!(tokens[2].name, TokenName::Print);
}

#[test]
fn comments_are_tokens() {
    use TokenType::{Comment, Identifier};
    assert_eq!(
        shapes("a # note\n/# multi\nline #/ b"),
        vec![
            (Identifier, "a".to_string()),
            (Comment, " note".to_string()),
            (Comment, " multi\nline ".to_string()),
            (Identifier, "b".to_string()),
        ]
    );
}

#[test]
fn unterminated_block_comment_is_an_error() {
    assert_eq!(single("/# open").token_type, TokenType::Error);
}

#[test]
fn spans_track_lines_and_columns() {
    let tokens = lex("a\r\n  bb\rc\n\nd");
    let spans: Vec<(u32, u32)> = tokens.iter().map(|t| (t.span.line, t.span.column)).collect();
    assert_eq!(spans, vec![(1, 1), (2, 3), (3, 1), (5, 1), (5, 2)]);
}

#[test]
fn invalid_utf8_degrades_to_error_token() {
    let tokens = Lexer::from_reader(FileId::STDIN, &[b'x', b' ', 0x80][..], &BuiltinRegistry::new())
        .map(|lexer| lexer.tokens())
        .unwrap_or_default();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].token_type, TokenType::Error);
    assert_eq!(tokens[1].span.file, FileId::STDIN);
}

#[test]
fn from_path_registers_the_file() {
    let dir = std::env::temp_dir().join(format!("kiwi_lexer_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("main.kiwi");
    std::fs::write(&path, "println \"hi\"\n").unwrap();

    let files = FileRegistry::new();
    let builtins = BuiltinRegistry::new();
    let lexer = Lexer::from_path(&files, &path, &builtins).unwrap();
    let stream = lexer.tokenize();
    let id = files.id_of(&path.to_string_lossy()).unwrap();
    assert_eq!(lexer.file(), id);
    assert_eq!(stream.current().name, TokenName::PrintLn);
    assert_eq!(files.line(id, 1).as_deref(), Some("println \"hi\""));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn from_path_reports_missing_files() {
    let files = FileRegistry::new();
    let builtins = BuiltinRegistry::new();
    let result = Lexer::from_path(&files, "/definitely/not/here.kiwi", &builtins);
    assert!(result.is_err());
    assert!(files.is_empty());
}

#[test]
fn tokenize_wraps_a_stream() {
    let stream = tokenize(FileId::new(0), "# c\nx", &BuiltinRegistry::new());
    assert_eq!(stream.current().text, "x");
    assert_eq!(stream.tokens().len(), 3);
}

proptest! {
    #[test]
    fn never_panics_and_ends_in_one_eof(bytes in prop::collection::vec(any::<u8>(), 0..200)) {
        let builtins = BuiltinRegistry::new();
        let lexer = Lexer::from_reader(FileId::STDIN, &bytes[..], &builtins).unwrap();
        let tokens = lexer.tokens();
        prop_assert!(tokens.last().is_some_and(Token::is_eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn interpolation_text_never_panics(body in "[a-z0-9${}+\" ]{0,40}") {
        let source = format!("\"{body}\"");
        let tokens = lex(&source);
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }
}
