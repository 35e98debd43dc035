//! Property-based coverage: determinism, whitespace-irrelevance,
//! chunk-boundary independence, and integer round-tripping, checked against
//! generated inputs rather than a fixed table.

use jscore::{decode_chunks_strict, decode_strict};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Builds a JSON array literal of integers from arbitrary `i32`s, using only
/// values representable in `i64` so the result always round-trips exactly.
fn int_array_text(xs: &[i32]) -> String {
    let mut s = String::from("[");
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&x.to_string());
    }
    s.push(']');
    s
}

#[quickcheck]
fn integer_array_round_trips(xs: Vec<i32>) -> bool {
    let text = int_array_text(&xs);
    let Ok(value) = decode_strict(text.as_bytes()) else {
        return false;
    };
    let Some(arr) = value.as_array() else {
        return false;
    };
    arr.len() == xs.len() && arr.iter().zip(&xs).all(|(v, x)| v.as_i64() == Some(i64::from(*x)))
}

#[quickcheck]
fn decode_is_deterministic(xs: Vec<i32>) -> bool {
    let text = int_array_text(&xs);
    let a = decode_strict(text.as_bytes());
    let b = decode_strict(text.as_bytes());
    a == b
}

#[quickcheck]
fn whitespace_padding_between_elements_is_irrelevant(xs: Vec<i32>, paddings: Vec<u8>) -> bool {
    let tight = int_array_text(&xs);
    let mut padded = String::from("[");
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            padded.push(',');
        }
        let pad_count = paddings.get(i % paddings.len().max(1)).copied().unwrap_or(0) % 4;
        for _ in 0..pad_count {
            padded.push(' ');
        }
        padded.push_str(&x.to_string());
    }
    padded.push(']');

    let a = decode_strict(tight.as_bytes());
    let b = decode_strict(padded.as_bytes());
    a == b
}

#[quickcheck]
fn chunked_decode_matches_single_buffer_decode_at_every_split(xs: Vec<i32>, split: usize) -> TestResult {
    let text = int_array_text(&xs);
    if text.is_empty() {
        return TestResult::discard();
    }
    let split = split % text.len();
    let (left, right) = text.split_at(split);

    let single = decode_strict(text.as_bytes());
    let chunked = decode_chunks_strict([left, right]);
    TestResult::from_bool(single == chunked)
}

#[quickcheck]
fn reported_error_position_never_exceeds_input_length(bytes: Vec<u8>) -> bool {
    match decode_strict(&bytes) {
        Ok(_) => true,
        Err(e) => e.position <= bytes.len(),
    }
}

#[quickcheck]
fn duplicate_object_keys_collapse_to_the_last_written_value(a: i32, b: i32) -> bool {
    let text = format!(r#"{{"k":{a},"k":{b}}}"#);
    let Ok(value) = decode_strict(text.as_bytes()) else {
        return false;
    };
    value.as_object().and_then(|o| o["k"].as_i64()) == Some(i64::from(b))
}
