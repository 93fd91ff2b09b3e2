use expect_test::{expect, Expect};

use crate::{assemble, assemble_source, clean::clean, Cause, LabelError, LineInfo, SyntaxError};

fn check(src: &str, expect: Expect) {
    let output = match assemble_source(src) {
        Ok(out) => out,
        Err(e) => format!("error: {}", e.report()),
    };
    expect.assert_eq(&output);
}

#[test]
fn empty() {
    check("", expect![[""]]);
    check("// nothing here\n\n", expect![[""]]);
}

#[test]
fn add() {
    check(
        "// Computes R0 = 2 + 3\n@2\nD=A\n@3\nD=D+A\n@0\nM=D\n",
        expect![[r#"
            0000000000000010
            1110110000010000
            0000000000000011
            1110000010010000
            0000000000000000
            1110001100001000
        "#]],
    );
}

#[test]
fn max() {
    let out = assemble_source(include_str!("../../test-sample/max.asm")).unwrap();
    assert_eq!(out, include_str!("../../test-sample/max.hack"));
}

#[test]
fn rect() {
    let out = assemble_source(include_str!("../../test-sample/rect.asm")).unwrap();
    assert_eq!(out, include_str!("../../test-sample/rect.hack"));
}

#[test]
fn variables_then_labels() {
    check(
        "@foo\nM=0\n@bar\nM=1\n(LOOP)\n@foo\nD=M\n@LOOP\nD;JNE",
        expect![[r#"
            0000000000010000
            1110101010001000
            0000000000010001
            1110111111001000
            0000000000010000
            1111110000010000
            0000000000000100
            1110001100000101
        "#]],
    );
}

#[test]
fn errors_carry_line() {
    check(
        "@1\n// comment\n  (SP)\n",
        expect!["error: line 3: `(SP)`: label error: symbol 'SP' conflicts with a built-in symbol"],
    );
    check(
        "@x\nD=M;JMP;JMP",
        expect!["error: line 2: `D=M;JMP;JMP`: syntax error: unexpected semicolon"],
    );
    check(
        "@x\n\nM = D = A",
        expect!["error: line 3: `M=D=A`: syntax error: unexpected equals"],
    );
    check(
        "@100000",
        expect!["error: line 1: `@100000`: encoding error: invalid address '100000'"],
    );
}

#[test]
fn no_partial_output() {
    let lines = clean("@1\nD=A\nD=Q\n@2");
    let err = assemble(&lines).unwrap_err();
    assert_eq!(
        err.line,
        Some(LineInfo {
            line: 3,
            text: "D=Q".to_owned()
        })
    );
}

#[test]
fn rejects_identically() {
    let lines = clean("(R3)\n@1");
    let first = assemble(&lines).unwrap_err();
    let second = assemble(&lines).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(first.cause, Cause::Label(LabelError::Reserved("R3".to_owned())));

    let lines = clean("0;JMP;JMP");
    assert_eq!(
        assemble(&lines).unwrap_err().cause,
        Cause::Syntax(SyntaxError::UnexpectedSemicolon)
    );
}

#[test]
fn omitted_jump_and_destination() {
    check(
        "D;\nD=\n=D\n0;JMP",
        expect![[r#"
            1110001100000000
            1110001100000000
            1110001100000000
            1110101010000111
        "#]],
    );
}

#[test]
fn cause_is_error_source() {
    use std::error::Error;

    let err = assemble(&clean("@1\n(SP)")).unwrap_err();
    assert_eq!(err.to_string(), "line 2: `(SP)`");
    assert_eq!(
        err.source().map(|s| s.to_string()).as_deref(),
        Some("label error: symbol 'SP' conflicts with a built-in symbol")
    );

    let bare = crate::AsmError::new(SyntaxError::UnexpectedEquals);
    assert_eq!(bare.to_string(), "syntax error: unexpected equals");
    assert!(bare.source().is_none());
    assert_eq!(bare.report(), bare.to_string());
}
