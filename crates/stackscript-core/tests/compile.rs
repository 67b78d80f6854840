//! Integration tests for the token stream compiler

mod common;

use std::thread;

use num_bigint::BigInt;
use stackscript_core::bytecode::{
    disassemble_script, number, CompileErrorKind, Instruction, PushPrefix,
};
use stackscript_core::testutil::{compile_hex, compile_tokens, instruction_count, pushes};
use stackscript_core::{compile, Compiler, Script, Token, TokenKind};

use common::{init_test_logging, CountingSource};

#[test]
fn test_empty_stream() {
    init_test_logging();
    assert_eq!(compile_tokens([Token::EndOfScript]).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_single_operation() {
    assert_eq!(
        compile_tokens([Token::op(0x93), Token::EndOfScript]).unwrap(),
        vec![0x93]
    );
}

#[test]
fn test_conditional_script() {
    let bytes = compile_tokens([
        Token::data([0x01, 0x02, 0x03]),
        Token::If,
        Token::op(0x87),
        Token::EndIf,
        Token::EndOfScript,
    ])
    .unwrap();
    assert_eq!(bytes, vec![0x03, 0x01, 0x02, 0x03, 0x63, 0x87, 0x68]);
}

#[test]
fn test_pay_to_pubkey_hash_shape() {
    // OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
    let hash = [0x5a; 20];
    let hex = compile_hex([
        Token::op(0x76),
        Token::op(0xa9),
        Token::data(hash),
        Token::op(0x88),
        Token::op(0xac),
    ])
    .unwrap();
    assert_eq!(hex, format!("76a914{}88ac", "5a".repeat(20)));
}

#[test]
fn test_number_encodings() {
    let cases: [(i64, &[u8]); 8] = [
        (0, &[0x00]),
        (-1, &[0x4f]),
        (1, &[0x51]),
        (16, &[0x60]),
        (17, &[0x01, 0x11]),
        (-17, &[0x01, 0x91]),
        (128, &[0x02, 0x80, 0x00]),
        (-128, &[0x02, 0x80, 0x80]),
    ];
    for (n, expected) in cases {
        assert_eq!(
            compile_tokens([Token::number(n)]).unwrap(),
            expected,
            "encoding of {n}"
        );
    }
}

#[test]
fn test_pushed_numbers_decode_back() {
    let values = [17i64, -2, 1000, -1000, 1 << 40, -(1 << 40)];
    let bytes = compile_tokens(values.iter().map(|&n| Token::number(n))).unwrap();

    let decoded: Vec<BigInt> = pushes(&bytes)
        .unwrap()
        .iter()
        .map(|payload| number::decode(payload))
        .collect();
    let expected: Vec<BigInt> = values.iter().map(|&n| BigInt::from(n)).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_push_prefix_widths() {
    for (len, prefix_len) in [
        (0usize, 1usize),
        (75, 1),
        (76, 2),
        (255, 2),
        (256, 3),
        (65535, 3),
        (65536, 5),
    ] {
        let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let bytes = compile_tokens([Token::Data(payload.clone())]).unwrap();
        assert_eq!(bytes.len(), prefix_len + len, "prefix width for {len} bytes");
        assert_eq!(&bytes[prefix_len..], payload.as_slice());
        assert_eq!(pushes(&bytes).unwrap(), vec![payload]);
    }
}

#[test]
fn test_output_is_well_formed() {
    let bytes = compile_tokens([
        Token::number(-5000),
        Token::data(vec![0xee; 300]),
        Token::NotIf,
        Token::number(3),
        Token::Else,
        Token::data(vec![0x01; 80]),
        Token::EndIf,
        Token::CodeSeparator,
        Token::op(0xac),
    ])
    .unwrap();
    assert_eq!(instruction_count(&bytes).unwrap(), 9);
}

#[test]
fn test_invalid_token_aborts_without_reading_further() {
    let mut source = CountingSource::new(vec![
        Token::op(0x76),
        Token::number(20),
        Token::Invalid,
        Token::op(0x93),
        Token::op(0x94),
    ]);
    let err = compile(&mut source).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::InvalidToken);
    assert_eq!(err.index, 2);
    assert_eq!(source.reads, 3);
}

#[test]
fn test_unknown_token_aborts_without_reading_further() {
    let mut source = CountingSource::new(vec![
        Token::If,
        Token::Other(40),
        Token::EndIf,
        Token::op(0x93),
    ]);
    let err = compile(&mut source).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::UnknownToken(TokenKind::Other(40)));
    assert_eq!(err.index, 1);
    assert_eq!(source.reads, 2);
}

#[test]
fn test_unknown_token_kind_is_reported() {
    let err = compile([Token::If, Token::Other(12), Token::EndIf].into_iter()).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::UnknownToken(TokenKind::Other(12)));
    assert!(err.to_string().starts_with("unknown token TOKEN(12)"));
}

#[test]
fn test_push_limit() {
    let compiler = Compiler::new().with_push_limit(520);
    assert_eq!(compiler.push_limit(), 520);
    assert!(compiler
        .compile([Token::data(vec![0; 520])].into_iter())
        .is_ok());

    let err = compiler
        .compile([Token::data(vec![0; 521])].into_iter())
        .unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::PushTooLarge { len: 521, limit: 520 });
}

#[test]
fn test_shared_compiler_across_threads() {
    let compiler = Compiler::new();
    let results: Vec<Script> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4i64)
            .map(|i| {
                let compiler = &compiler;
                scope.spawn(move || {
                    compiler
                        .compile([Token::number(i * 100), Token::op(0x93)].into_iter())
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results[0].code(), &[0x00, 0x93]);
    assert_eq!(results[1].code(), &[0x01, 0x64, 0x93]);
    assert_eq!(results[2].code(), &[0x02, 0xc8, 0x00, 0x93]);
    assert_eq!(results[3].code(), &[0x02, 0x2c, 0x01, 0x93]);
}

#[test]
fn test_disassembly_of_compiled_script() {
    let script = Compiler::new()
        .compile(
            [
                Token::data(vec![0x42; 100]),
                Token::If,
                Token::number(-1),
                Token::EndIf,
            ]
            .into_iter(),
        )
        .unwrap();

    let mut instructions = script.instructions();
    let Some(Ok((0, Instruction::Push { prefix, data }))) = instructions.next() else {
        panic!("expected a push at offset 0");
    };
    assert_eq!(prefix, PushPrefix::PushData1(100));
    assert_eq!(data.len(), 100);

    let listing = disassemble_script(&script, "branch");
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "== branch ==");
    assert!(lines[1].starts_with("0000 OP_PUSHDATA1     4242"));
    assert_eq!(lines[2], "0102 OP_IF");
    assert_eq!(lines[3], "0103 OP_1NEGATE");
    assert_eq!(lines[4], "0104 OP_ENDIF");
}
