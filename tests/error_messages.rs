//! Exact `Display` wire-format coverage for every [`ErrorKind`]: these
//! strings are part of the external interface, not an implementation detail,
//! so they are pinned here independently of the `ErrorKind`/position checks
//! in `decode_bad.rs`.

use jscore::decode_strict;

#[test]
fn eof_message_reports_absolute_position() {
    let err = decode_strict(b"-").unwrap_err();
    assert_eq!(err.to_string(), "unexpected end of input at position 1");
}

#[test]
fn unexpected_printable_byte_message_shows_the_byte_as_a_char() {
    let err = decode_strict(b"--1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected byte at position 1: 0x2D ('-')"
    );
}

#[test]
fn unexpected_non_printable_byte_message_omits_the_char() {
    let err = decode_strict(b"\x01").unwrap_err();
    assert_eq!(err.to_string(), "unexpected byte at position 0: 0x01");
}

#[test]
fn invalid_token_message_quotes_the_source_text() {
    let err = decode_strict(b"1e999").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected sequence at position 0: \"1e999\""
    );
}

#[test]
fn trailing_input_message_quotes_the_leftover_bytes() {
    let err = decode_strict(b"01").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected extra input after valid json: \"1\""
    );
}

#[test]
fn malformed_unicode_escape_message_echoes_the_literal_text() {
    // The token itself is the six characters `\udcxx`; `quote()` escapes the
    // leading backslash the same way it would inside a JSON string literal,
    // so the rendered message doubles it.
    let err = decode_strict(br#""\uD8aa\uDcxx""#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected sequence at position 7: \"\\\\udcxx\""
    );
}
