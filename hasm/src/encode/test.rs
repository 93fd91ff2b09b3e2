use expect_test::{expect, Expect};

use crate::error::{Cause, EncodingError, SyntaxError};
use crate::table::{Computation, Dest, Jump};
use crate::CleanLine;

use super::{encode_all, encode_line, Instruction, MachineWord};

fn check(src: &str, expect: Expect) {
    let output = src
        .lines()
        .map(|line| match encode_line(line) {
            Ok(word) => format!("{line:<12}{word}"),
            Err(e) => format!("{line:<12}{e}"),
        })
        .collect::<Vec<_>>()
        .join("\n");
    expect.assert_eq(&output);
}

#[test]
fn address_bounds() {
    assert_eq!(encode_line("@0").unwrap().to_string(), "0000000000000000");
    assert_eq!(encode_line("@32767").unwrap().to_string(), "0111111111111111");
    assert_eq!(encode_line("@-1").unwrap().to_string(), "1111111111111111");
    assert_eq!(encode_line("@-32768").unwrap().to_string(), "1000000000000000");
}

#[test]
fn address_is_zero_padded_binary() {
    for n in (0..=32767u16).step_by(97).chain([1, 2, 16, 16384, 24576]) {
        let word = encode_line(&format!("@{n}")).unwrap().to_string();
        assert_eq!(word.len(), 16);
        assert!(word.starts_with('0'));
        assert_eq!(u16::from_str_radix(&word, 2), Ok(n));
    }
}

#[test]
fn address_errors() {
    check(
        "@32768\n@-32769\n@\n@12a\n@ 1",
        expect![[r#"
            @32768      encoding error: invalid address '32768'
            @-32769     encoding error: invalid address '-32769'
            @           encoding error: invalid address ''
            @12a        encoding error: invalid address '12a'
            @ 1         encoding error: invalid address ' 1'"#]],
    );
}

#[test]
fn known_words() {
    check(
        "D=A\n0;JMP\nM=M+1\nAM=M-1\nD;JGT\nAMD=D|M;JLE\nMD=!A;JNE\nD=D-M\nM=-1",
        expect![[r#"
            D=A         1110110000010000
            0;JMP       1110101010000111
            M=M+1       1111110111001000
            AM=M-1      1111110010101000
            D;JGT       1110001100000001
            AMD=D|M;JLE 1111010101111110
            MD=!A;JNE   1110110001011101
            D=D-M       1111010011010000
            M=-1        1110111010001000"#]],
    );
}

#[test]
fn every_computation() {
    for comp in Computation::all() {
        let word = encode_line(&comp.to_string()).unwrap();
        assert_eq!(word, MachineWord(0b111 << 13 | (comp.code() as u16) << 6));
    }
}

#[test]
fn every_destination() {
    for dest in Dest::ALL {
        let word = encode_line(&format!("{}=0", dest.mnemonic())).unwrap();
        assert_eq!(word.0 >> 3 & 0b111, dest.code() as u16);
        assert_eq!(word.0 & 0b111, 0);
    }
}

#[test]
fn every_jump() {
    for jump in Jump::ALL {
        let word = encode_line(&format!("0;{}", jump.mnemonic())).unwrap();
        assert_eq!(word.0 & 0b111, jump.code() as u16);
        assert_eq!(word.0 >> 3 & 0b111, 0);
    }
}

#[test]
fn compute_errors() {
    check(
        "D;JGT;JMP\nA=D=M\nA=M=D;J;J\nD=;;\nD=X\nQ=D\nD;JUMP\n;JMP\n;\n=",
        expect![[r#"
            D;JGT;JMP   syntax error: unexpected semicolon
            A=D=M       syntax error: unexpected equals
            A=M=D;J;J   syntax error: unexpected semicolon
            D=;;        syntax error: unexpected semicolon
            D=X         encoding error: invalid computation 'X'
            Q=D         encoding error: invalid destination 'Q'
            D;JUMP      encoding error: invalid jump 'JUMP'
            ;JMP        encoding error: invalid computation 'JMP'
            ;           encoding error: invalid computation ''
            =           encoding error: invalid computation ''"#]],
    );
}

#[test]
fn empty_sides_are_omitted_fields() {
    check(
        "D;\nD=\n=D\nM=;JMP\n=M;\nAM=D+1;",
        expect![[r#"
            D;          1110001100000000
            D=          1110001100000000
            =D          1110001100000000
            M=;JMP      1111110000000111
            =M;         1111110000000000
            AM=D+1;     1110011111101000"#]],
    );
}

#[test]
fn computation_is_checked_first() {
    assert_eq!(
        encode_line("X=Y;Z"),
        Err(Cause::Encoding(EncodingError::InvalidComputation(
            "Y".to_owned()
        )))
    );
    assert_eq!(
        encode_line(";;"),
        Err(Cause::Syntax(SyntaxError::UnexpectedSemicolon))
    );
}

#[test]
fn parse_instruction() {
    assert_eq!(Instruction::parse("@7"), Ok(Instruction::Address(7)));
    assert_eq!(
        Instruction::parse("AD=D+1;JEQ"),
        Ok(Instruction::Compute {
            comp: "D+1".parse().unwrap(),
            dest: Some(Dest::AD),
            jump: Some(Jump::JEQ),
        })
    );
    assert_eq!(
        Instruction::parse("M"),
        Ok(Instruction::Compute {
            comp: "M".parse().unwrap(),
            dest: None,
            jump: None,
        })
    );
}

#[test]
fn encode_all_keeps_order_and_reports_line() {
    let lines = vec![
        CleanLine::new(3, "@5"),
        CleanLine::new(4, "D=A"),
        CleanLine::new(9, "0;JMP"),
    ];
    let words: Vec<_> = encode_all(&lines)
        .unwrap()
        .into_iter()
        .map(|w| w.to_string())
        .collect();
    assert_eq!(
        words,
        ["0000000000000101", "1110110000010000", "1110101010000111"]
    );

    let lines = vec![CleanLine::new(1, "@5"), CleanLine::new(7, "D=D*A")];
    let err = encode_all(&lines).unwrap_err();
    assert_eq!(err.line_number(), Some(7));
    assert_eq!(
        err.report(),
        "line 7: `D=D*A`: encoding error: invalid computation 'D*A'"
    );
}
