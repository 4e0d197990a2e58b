//! Integration tests for the scanner, parser and interactive shell.
//!
//! These tests drive the crate through its public API only: whole programs
//! go in as text and come out as trees, diagnostics or shell transcripts.

use frontend::{
    ast::{ast::Node, expressions::Expr, statements::Stmt},
    lexer::{
        lexer::{tokenize, Lexer, TokenBuffer},
        pool::LexerPool,
        tokens::TokenKind,
    },
    parser::parser::{parse, parse_source, Parser},
    repl::{self, Mode},
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "
var five = 5;
var ten = 10;

var add = fn(x, y) {
    x + y;
};

var result = add(five, ten);
!-/*5;
5 < 10 > 5;

if (5 < 10) {
    return true;
} else {
    return false;
}

10 == 10;
10 != 9;
";

fn run_shell(input: &str, mode: Mode) -> String {
    let mut output = Vec::new();
    repl::start(input.as_bytes(), &mut output, mode).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_tokenize_program() {
    let kinds: Vec<TokenKind> = tokenize(PROGRAM).iter().map(|t| t.kind).collect();

    assert_eq!(kinds.len(), 74);
    assert_eq!(kinds.first(), Some(&TokenKind::Var));
    assert_eq!(kinds.last(), Some(&TokenKind::EOF));
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::EOF).count(), 1);
    assert!(!kinds.contains(&TokenKind::Illegal));
}

#[test]
fn test_parse_program_reports_one_error() {
    let (program, errors) = parse_source(PROGRAM);

    // `!-/*5;` is the only statement that cannot start with a prefix rule
    assert_eq!(
        errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        vec!["no prefix parse rule for Slash found"]
    );
    assert_eq!(
        program.to_string(),
        "var five = 5;\n\
         var ten = 10;\n\
         var add = fn(x, y) { (x + y) };\n\
         var result = add(five, ten);\n\
         ((5 < 10) > 5)\n\
         if ((5 < 10)) { return true; } else { return false; }\n\
         (10 == 10)\n\
         (10 != 9)"
    );
}

#[test]
fn test_statement_kinds_in_order() {
    let (program, errors) = parse_source("var a = 1; return a; a + 1;");
    assert!(errors.is_empty());

    let literals: Vec<&str> = program.iter().map(|stmt| stmt.token_literal()).collect();
    assert_eq!(literals, vec!["var", "return", "a"]);
    assert!(matches!(program.statements[2], Stmt::Expression(_)));
    assert_eq!(program.token_literal(), "var");
}

#[test]
fn test_parse_is_source_agnostic() {
    let source = "var apply = fn(f, x) { f(x); }; apply(fn(n) { n * 2; }, 21);";

    let from_lexer = parse(Lexer::new(source));
    let from_buffer = parse(TokenBuffer::from(tokenize(source)));

    assert!(from_lexer.1.is_empty());
    assert_eq!(from_lexer, from_buffer);
}

#[test]
fn test_parser_accumulates_errors_across_statements() {
    let mut parser = Parser::from_source("var = 1; var ok = 2; return ; var also_ok = ok;");
    let program = parser.parse_program();

    assert_eq!(program.to_string(), "var ok = 2;\nvar also_ok = ok;");
    assert_eq!(parser.errors().len(), 2);
    assert_eq!(parser.errors()[0].get_token().kind, TokenKind::Assign);
    assert_eq!(parser.errors()[1].get_token().kind, TokenKind::Semicolon);
}

#[test]
fn test_nested_function_calls() {
    let (program, errors) = parse_source("fn(x) { fn(y) { x + y; }; }(1)(2);");
    assert!(errors.is_empty());

    let Stmt::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expr::Call(outer) = &stmt.expression else {
        panic!("expected call");
    };
    assert!(matches!(outer.callee.as_ref(), Expr::Call(_)));
    assert_eq!(stmt.to_string(), "fn(x) { fn(y) { (x + y) } }(1)(2)");
}

#[test]
fn test_pooled_lexer_feeds_parser() {
    let pool = LexerPool::new();

    let (program, errors) = parse(pool.acquire("var x = 1;"));
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "var x = 1;");
    assert_eq!(pool.idle_count(), 1);

    let (program, _) = parse(pool.acquire("y;"));
    assert_eq!(program.to_string(), "y");
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn test_shell_prints_tokens() {
    let output = run_shell("var x = 5;\n", Mode::Tokens);

    assert_eq!(
        output,
        ">> Var \"var\"\n\
         Identifier \"x\"\n\
         Assign \"=\"\n\
         Integer \"5\"\n\
         Semicolon \";\"\n\
         >> "
    );
}

#[test]
fn test_shell_prints_program() {
    let output = run_shell("-a * b;\nvar f = fn(a) { a; };\n", Mode::Ast);

    assert_eq!(output, ">> ((-a) * b)\n>> var f = fn(a) { a };\n>> ");
}

#[test]
fn test_shell_prints_diagnostics() {
    let output = run_shell("var = 5;\n", Mode::Ast);

    assert_eq!(
        output,
        ">> Error: UnexpectedToken\n \
         | expected next token to be Identifier, got Assign instead\n \
         | at Assign \"=\"\n\
         >> "
    );
}

#[test]
fn test_shell_stops_at_quit() {
    let output = run_shell("a;\nQUIT\nb;\n", Mode::Tokens);

    assert_eq!(output, ">> Identifier \"a\"\nSemicolon \";\"\n>> ");
}

#[test]
fn test_shell_handles_blank_lines_and_crlf() {
    let output = run_shell("\r\n\nQUIT\r\n", Mode::Ast);

    assert_eq!(output, ">> >> >> ");
}
