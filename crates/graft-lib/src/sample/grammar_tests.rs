use indoc::indoc;
use rowan::{TextRange, TextSize};

use super::{SampleGrammar, builder, language, parse, rules};
use crate::bridge::ParseDriver;
use crate::host::ErrorElement;
use crate::runtime::CancellationToken;
use crate::Error;

/// Recognizer tree of a whole script plus the number of syntax errors.
fn sexpr(src: &str) -> (String, usize) {
    let mut cursor = builder(src);
    let (tree, errors) = ParseDriver::new(SampleGrammar)
        .recognize(rules::SCRIPT, &mut cursor)
        .unwrap();
    (tree.to_sexpr(&language()), errors.len())
}

fn error(start: u32, end: u32, message: &str) -> ErrorElement {
    ErrorElement {
        range: TextRange::new(TextSize::from(start), TextSize::from(end)),
        message: message.to_owned(),
    }
}

#[test]
fn function_with_params() {
    let (tree, errors) = sexpr("func add(a, b) { return a + b * 2; }");

    insta::assert_snapshot!(tree, @"(script (function func add ( (params a , b) ) (block { (statement return (expr (term (primary a)) + (term (primary b) * (primary 2))) ;) })) <EOF>)");
    assert_eq!(errors, 0);
}

#[test]
fn var_with_call() {
    let (tree, errors) = sexpr(r#"var x = f(1, "s");"#);

    insta::assert_snapshot!(tree, @r#"(script (statement var x = (expr (term (primary f ( (args (expr (term (primary 1))) , (expr (term (primary "s")))) )))) ;) <EOF>)"#);
    assert_eq!(errors, 0);
}

#[test]
fn assignment_and_call_statements() {
    let (tree, errors) = sexpr("x = 1; print(x);");

    insta::assert_snapshot!(tree, @"(script (statement x = (expr (term (primary 1))) ;) (statement (expr (term (primary print ( (args (expr (term (primary x)))) )))) ;) <EOF>)");
    assert_eq!(errors, 0);
}

#[test]
fn clean_script_has_no_errors() {
    let src = indoc! {r#"
        // entry point
        func main() {
            var greeting = "hi";
            {
                say(greeting, (1 + 2) / 3);
            }
            return;
        }
        main();
    "#};

    let tree = parse(src).unwrap();

    assert!(!tree.has_errors(), "{:?}", tree.errors);
    assert_eq!(tree.syntax().text().to_string(), src);
}

#[test]
fn missing_semicolon_is_zero_width() {
    let src = "var a = 1\nvar b = 2;";

    let tree = parse(src).unwrap();

    assert_eq!(tree.errors, vec![error(10, 10, "<missing ';'>")]);
    assert_eq!(tree.syntax().text().to_string(), src);
}

#[test]
fn bad_char_is_one_error_region() {
    let tree = parse("# var a = 1;").unwrap();

    assert_eq!(
        tree.errors,
        vec![error(
            0,
            1,
            "extraneous input '#' expecting {<EOF>, 'func', 'var', 'return', '{', ID}"
        )]
    );
}

#[test]
fn bad_statement_recovers_at_next_one() {
    let src = "foo;\nvar a = 1;";

    let (_, reported) = sexpr(src);
    let tree = parse(src).unwrap();

    assert_eq!(reported, 1);
    assert_eq!(
        tree.errors[0],
        error(0, 0, "no viable alternative at input 'foo;'")
    );
    assert!(
        tree.errors.iter().all(|e| e.range.end() <= TextSize::from(4)),
        "{:?}",
        tree.errors
    );
    assert_eq!(tree.syntax().text().to_string(), src);
}

#[test]
fn unclosed_block_reaches_eof() {
    let src = "func f() { var a = 1;";

    let tree = parse(src).unwrap();

    assert_eq!(
        tree.errors,
        vec![
            error(
                21,
                21,
                "extraneous input '<EOF>' expecting {'var', 'return', '{', '}', ID}"
            ),
            error(21, 21, "<missing '}'>"),
        ]
    );
}

#[test]
fn cancelled_parse() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert_eq!(
        super::parse_with("var a = 1;", cancel).unwrap_err(),
        Error::Cancelled
    );
}
