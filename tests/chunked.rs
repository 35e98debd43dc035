//! Chunked-decode coverage: decoding split across multiple buffers must
//! produce exactly the same result as decoding the concatenation in one
//! shot, with reported positions offset by bytes already consumed.

use jscore::{decode_chunks_strict, decode_strict, ErrorKind};

/// Surfaces the crate's `log::trace!`/`debug!` continuation-engine output
/// (feed/resume/finish) when a test is run with `RUST_LOG` set; harmless,
/// idempotent no-op otherwise.
fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn worked_example_list_one_two_three() {
    init_logging();
    let got = decode_chunks_strict(["[1, 2,", " 3]"]).unwrap();
    let arr = got.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0].as_i64(), Some(1));
    assert_eq!(arr[1].as_i64(), Some(2));
    assert_eq!(arr[2].as_i64(), Some(3));
}

#[test]
fn byte_at_a_time_matches_single_buffer_decode() {
    init_logging();
    let whole = br#"{"moderation":{"decision":"allow","score":0.125},"tags":["ok","fast"]}"#;
    let single = decode_strict(whole).unwrap();

    let chunks: Vec<[u8; 1]> = whole.iter().map(|&b| [b]).collect();
    let chunked = decode_chunks_strict(chunks.iter().map(|c| c.as_slice())).unwrap();

    assert_eq!(single, chunked);
}

#[test]
fn split_inside_a_string_escape_still_decodes() {
    init_logging();
    // Split right in the middle of a `\u` escape.
    let chunks = [r#"{"a":"\u004"#, r#"1"}"#];
    let got = decode_chunks_strict(chunks).unwrap();
    assert_eq!(got.as_object().unwrap()["a"].as_str(), Some("A"));
}

#[test]
fn split_inside_a_number_literal_still_decodes() {
    init_logging();
    let chunks = ["12", "34.5", "e1"];
    let got = decode_chunks_strict(chunks).unwrap();
    // "12" + "34.5" + "e1" == "1234.5e1" == 12345.0
    assert_eq!(got.as_f64(), Some(12345.0));
}

#[test]
fn error_position_accounts_for_bytes_already_consumed() {
    init_logging();
    // Second chunk introduces the malformed byte; its absolute position
    // must include the length of the first chunk.
    let chunks = ["[1, 2,", " ]"];
    let err = decode_chunks_strict(chunks).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnexpectedByte(b']'));
    // The `]` is the second byte of the second chunk, offset by all of the
    // first chunk's length.
    assert_eq!(err.position, chunks[0].len() + 1);
}

#[test]
fn exhausted_iterable_without_a_terminal_outcome_is_eof_under_strict_decoding() {
    init_logging();
    let err = decode_chunks_strict(["[1, 2"]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Eof);
}

#[test]
fn multibyte_utf8_sequence_split_across_chunks_decodes_correctly() {
    init_logging();
    // U+2603 SNOWMAN (E2 98 83) split right after the lead byte.
    let whole = "\"a\u{2603}b\"".to_string().into_bytes();
    let single = decode_strict(&whole).unwrap();

    let mut first = br#""a"#.to_vec();
    first.push(0xE2);
    let second = [0x98, 0x83, b'b', b'"'];
    let chunked = decode_chunks_strict([first.as_slice(), second.as_slice()]).unwrap();

    assert_eq!(single, chunked);
    assert_eq!(chunked.as_str(), Some("a\u{2603}b"));
}
