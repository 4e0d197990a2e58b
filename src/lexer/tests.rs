//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - Operators and punctuation, including two-character operators
//! - Illegal characters
//! - End-of-input behaviour and lexer reuse

use pretty_assertions::assert_eq;

use super::{
    lexer::{tokenize, Lexer, TokenBuffer, TokenSource},
    pool::LexerPool,
    tokens::{lookup_identifier, Token, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_single_char_tokens() {
    let tokens = tokenize("=+-*/^<>!,;(){}");

    let expected = vec![
        Token::new(TokenKind::Assign, "="),
        Token::new(TokenKind::Plus, "+"),
        Token::new(TokenKind::Minus, "-"),
        Token::new(TokenKind::Star, "*"),
        Token::new(TokenKind::Slash, "/"),
        Token::new(TokenKind::Caret, "^"),
        Token::new(TokenKind::Less, "<"),
        Token::new(TokenKind::Greater, ">"),
        Token::new(TokenKind::Not, "!"),
        Token::new(TokenKind::Comma, ","),
        Token::new(TokenKind::Semicolon, ";"),
        Token::new(TokenKind::OpenParen, "("),
        Token::new(TokenKind::CloseParen, ")"),
        Token::new(TokenKind::OpenCurly, "{"),
        Token::new(TokenKind::CloseCurly, "}"),
        Token::eof(),
    ];

    assert_eq!(tokens, expected);
}

#[test]
fn test_tokenize_two_char_operators() {
    let tokens = tokenize("== != = !");

    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Equals, "=="),
            Token::new(TokenKind::NotEquals, "!="),
            Token::new(TokenKind::Assign, "="),
            Token::new(TokenKind::Not, "!"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_not_followed_by_identifier() {
    let tokens = tokenize("!a");

    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Not, "!"),
            Token::new(TokenKind::Identifier, "a"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_trailing_operator_at_end_of_input() {
    assert_eq!(kinds("="), vec![TokenKind::Assign, TokenKind::EOF]);
    assert_eq!(kinds("a !"), vec![TokenKind::Identifier, TokenKind::Not, TokenKind::EOF]);
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("var fn return if else true false");

    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[1].kind, TokenKind::Fn);
    assert_eq!(tokens[2].kind, TokenKind::Return);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Else);
    assert_eq!(tokens[5].kind, TokenKind::True);
    assert_eq!(tokens[6].kind, TokenKind::False);
    assert_eq!(tokens[7].kind, TokenKind::EOF);

    assert_eq!(tokens[1].literal, "fn");
    assert_eq!(tokens[2].literal, "return");
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(lookup_identifier("fn"), TokenKind::Fn);
    assert_eq!(lookup_identifier("Fn"), TokenKind::Identifier);
    assert_eq!(lookup_identifier("VAR"), TokenKind::Identifier);
    assert_eq!(lookup_identifier("hello"), TokenKind::Identifier);

    let tokens = tokenize("Fn");
    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "Fn"));
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar_baz _underscore CamelCase");

    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "foo"));
    assert_eq!(tokens[1], Token::new(TokenKind::Identifier, "bar_baz"));
    assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "_underscore"));
    assert_eq!(tokens[3], Token::new(TokenKind::Identifier, "CamelCase"));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_digits_end_an_identifier() {
    assert_eq!(
        tokenize("foo1"),
        vec![
            Token::new(TokenKind::Identifier, "foo"),
            Token::new(TokenKind::Integer, "1"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_tokenize_integers() {
    let tokens = tokenize("42 0 838383 007");

    assert_eq!(tokens[0], Token::new(TokenKind::Integer, "42"));
    assert_eq!(tokens[1], Token::new(TokenKind::Integer, "0"));
    assert_eq!(tokens[2], Token::new(TokenKind::Integer, "838383"));
    // Kept as raw text, conversion is the parser's job.
    assert_eq!(tokens[3], Token::new(TokenKind::Integer, "007"));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_no_sign_or_fraction_in_integers() {
    assert_eq!(
        kinds("-5 3.14"),
        vec![
            TokenKind::Minus,
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::Illegal,
            TokenKind::Integer,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_illegal_characters() {
    let tokens = tokenize("a @ b $");

    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Illegal, "@"),
            Token::new(TokenKind::Identifier, "b"),
            Token::new(TokenKind::Illegal, "$"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_illegal_character_does_not_desynchronize() {
    assert_eq!(
        kinds("var#x=5;"),
        vec![
            TokenKind::Var,
            TokenKind::Illegal,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_non_ascii_characters_are_illegal_one_at_a_time() {
    // 'é' is two bytes and '€' three in UTF-8
    assert_eq!(
        tokenize("é a€;"),
        vec![
            Token::new(TokenKind::Illegal, "é"),
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Illegal, "€"),
            Token::new(TokenKind::Semicolon, ";"),
            Token::eof(),
        ]
    );
}

#[test]
fn test_illegal_literals_are_source_text() {
    let source = "x © y";
    for token in tokenize(source) {
        if token.is(TokenKind::Illegal) {
            assert!(source.contains(token.literal.as_str()));
            assert_eq!(token.literal, "©");
        }
    }
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        kinds(" \t\r\nvar\n\n  x\t=\r\n5 ;  "),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token(), Token::new(TokenKind::Identifier, "x"));
    for _ in 0..5 {
        assert_eq!(lexer.next_token(), Token::eof());
    }
    assert!(lexer.is_exhausted());
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize(""), vec![Token::eof()]);
    assert_eq!(tokenize("   \n\t"), vec![Token::eof()]);
}

#[test]
fn test_tokenize_program() {
    let source = "var five = 5;\nvar add = fn(x, y) {\n  x + y;\n};\nvar result = add(five, 10);\n!-/*5;\n5 < 10 > 5;\nif (5 < 10) { return true; } else { return false; }\n10 == 10; 10 != 9;";

    let expected = vec![
        (TokenKind::Var, "var"),
        (TokenKind::Identifier, "five"),
        (TokenKind::Assign, "="),
        (TokenKind::Integer, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Var, "var"),
        (TokenKind::Identifier, "add"),
        (TokenKind::Assign, "="),
        (TokenKind::Fn, "fn"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "x"),
        (TokenKind::Comma, ","),
        (TokenKind::Identifier, "y"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Plus, "+"),
        (TokenKind::Identifier, "y"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Var, "var"),
        (TokenKind::Identifier, "result"),
        (TokenKind::Assign, "="),
        (TokenKind::Identifier, "add"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Identifier, "five"),
        (TokenKind::Comma, ","),
        (TokenKind::Integer, "10"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Not, "!"),
        (TokenKind::Minus, "-"),
        (TokenKind::Slash, "/"),
        (TokenKind::Star, "*"),
        (TokenKind::Integer, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Integer, "5"),
        (TokenKind::Less, "<"),
        (TokenKind::Integer, "10"),
        (TokenKind::Greater, ">"),
        (TokenKind::Integer, "5"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::If, "if"),
        (TokenKind::OpenParen, "("),
        (TokenKind::Integer, "5"),
        (TokenKind::Less, "<"),
        (TokenKind::Integer, "10"),
        (TokenKind::CloseParen, ")"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::True, "true"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Else, "else"),
        (TokenKind::OpenCurly, "{"),
        (TokenKind::Return, "return"),
        (TokenKind::False, "false"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::CloseCurly, "}"),
        (TokenKind::Integer, "10"),
        (TokenKind::Equals, "=="),
        (TokenKind::Integer, "10"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::Integer, "10"),
        (TokenKind::NotEquals, "!="),
        (TokenKind::Integer, "9"),
        (TokenKind::Semicolon, ";"),
        (TokenKind::EOF, ""),
    ];

    let expected: Vec<Token> = expected
        .into_iter()
        .map(|(kind, literal)| Token::new(kind, literal))
        .collect();

    assert_eq!(tokenize(source), expected);
}

#[test]
fn test_reset_and_load() {
    let mut lexer = Lexer::new("var x");
    assert_eq!(lexer.next_token().kind, TokenKind::Var);

    lexer.reset();
    assert_eq!(lexer.next_token(), Token::eof());

    lexer.load("fn y");
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Fn, "fn"));
    assert_eq!(lexer.next_token(), Token::new(TokenKind::Identifier, "y"));
    assert_eq!(lexer.next_token(), Token::eof());
}

#[test]
fn test_token_buffer_repeats_eof() {
    let mut buffer = TokenBuffer::from(vec![Token::new(TokenKind::Integer, "1")]);

    assert_eq!(buffer.next_token(), Token::new(TokenKind::Integer, "1"));
    assert_eq!(buffer.next_token(), Token::eof());
    assert_eq!(buffer.next_token(), Token::eof());
}

#[test]
fn test_pool_reuses_lexers() {
    let pool = LexerPool::new();
    assert_eq!(pool.idle_count(), 0);

    {
        let mut lexer = pool.acquire("a");
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Identifier, "a"));
        assert_eq!(pool.idle_count(), 0);
    }
    assert_eq!(pool.idle_count(), 1);

    {
        // The leftover input of the previous owner must not leak through.
        let mut lexer = pool.acquire("b c");
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Identifier, "b"));
    }

    {
        let first = pool.acquire("1");
        let second = pool.acquire("2");
        assert!(!first.is_exhausted());
        assert!(!second.is_exhausted());
    }
    assert_eq!(pool.idle_count(), 2);
}
