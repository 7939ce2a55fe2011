use rowan::TextSize;

use super::{language, lex};

fn dump(src: &str) -> String {
    let language = language();
    lex(src)
        .iter()
        .map(|t| {
            let text = &src[t.range];
            format!("{} {:?}", language.element_name(t.kind.0), text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn tokens_and_trivia() {
    insta::assert_snapshot!(dump("var x = \"s\"; // c\n/ 1"), @r#"
    VAR "var"
    WS " "
    ID "x"
    WS " "
    ASSIGN "="
    WS " "
    STRING "\"s\""
    SEMI ";"
    WS " "
    COMMENT "// c"
    WS "\n"
    SLASH "/"
    WS " "
    INT "1"
    "#);
}

#[test]
fn keyword_prefix_is_identifier() {
    insta::assert_snapshot!(dump("funcs var_1 return"), @r#"
    ID "funcs"
    WS " "
    ID "var_1"
    WS " "
    RETURN "return"
    "#);
}

#[test]
fn garbage_run_is_one_token() {
    insta::assert_snapshot!(dump("a $$ b@"), @r#"
    ID "a"
    WS " "
    ERROR "$$"
    WS " "
    ID "b"
    ERROR "@"
    "#);
}

#[test]
fn tokens_cover_source() {
    let src = "func f(a) {\n  return a * 2; // twice\n}\n";
    let tokens = lex(src);

    let mut end = TextSize::from(0);
    for token in &tokens {
        assert_eq!(token.range.start(), end);
        end = token.range.end();
    }
    assert_eq!(end, TextSize::of(src));
}

#[test]
fn empty_source() {
    assert!(lex("").is_empty());
}
