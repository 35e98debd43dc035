//! Valid-input decode coverage: a table of JSON texts alongside the
//! `Value` they must produce.

use std::collections::HashMap;

use jscore::{decode_strict, Value};
use rstest::rstest;

fn obj(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    let mut map = HashMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

#[rstest]
#[case::null("null", Value::Null)]
#[case::bool_true("true", Value::Bool(true))]
#[case::bool_false("false", Value::Bool(false))]
#[case::zero("0", Value::Integer(0))]
#[case::negative("-5", Value::Integer(-5))]
#[case::float("1.5", Value::Float(1.5))]
#[case::exponent("1e3", Value::Float(1000.0))]
#[case::empty_array("[]", Value::Array(vec![]))]
#[case::empty_object("{}", obj([]))]
#[case::plain_string(r#""hello""#, Value::String("hello".to_string()))]
#[case::escaped_string(r#""a\n\tb""#, Value::String("a\n\tb".to_string()))]
fn decodes_scalars_and_empties(#[case] input: &str, #[case] expected: Value) {
    let got = decode_strict(input.as_bytes()).unwrap();
    assert_eq!(got, expected);
}

#[test]
fn nested_array_and_object() {
    let got = decode_strict(br#"{"foo": [1, 2, 3]}"#).unwrap();
    let obj = got.as_object().unwrap();
    let arr = obj["foo"].as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0].as_i64(), Some(1));
    assert_eq!(arr[2].as_i64(), Some(3));
}

#[test]
fn whitespace_between_tokens_is_irrelevant() {
    let tight = decode_strict(br#"{"a":1,"b":[2,3]}"#).unwrap();
    let spaced = decode_strict(b" { \"a\" : 1 , \"b\" : [ 2 , 3 ] } ").unwrap();
    assert_eq!(tight, spaced);
}

#[test]
fn duplicate_object_keys_collapse_to_last_value() {
    let got = decode_strict(br#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(got.as_object().unwrap()["a"].as_i64(), Some(2));
}

#[test]
fn unicode_escape_decodes_to_snowman() {
    let got = decode_strict(br#""☃""#).unwrap();
    assert_eq!(got.as_str(), Some("\u{2603}"));
}

#[test]
fn surrogate_pair_decodes_to_supplementary_plane_char() {
    // U+1D11E MUSICAL SYMBOL G CLEF, split as a high/low surrogate pair.
    let got = decode_strict(br#""𝄞""#).unwrap();
    assert_eq!(got.as_str(), Some("\u{1D11E}"));
}

#[test]
fn large_float_round_trips_through_f64() {
    let got = decode_strict(b"1.2345678912345679e131").unwrap();
    let f = got.as_f64().unwrap();
    assert!((f - 1.2345678912345679e131).abs() / f < 1e-12);
}

#[test]
fn integer_wider_than_i64_is_demoted_to_float() {
    // i64::MAX is 9223372036854775807; one past it no longer fits.
    let got = decode_strict(b"9223372036854775808").unwrap();
    assert!(got.as_i64().is_none());
    assert_eq!(got.as_f64(), Some(9223372036854775808.0));
}

#[test]
fn deeply_nested_document_decodes() {
    const DEPTH: usize = 64;
    let input = "[".repeat(DEPTH) + &"]".repeat(DEPTH);
    let got = decode_strict(input.as_bytes()).unwrap();

    fn depth(v: &Value) -> usize {
        match v.as_array() {
            Some([inner]) => 1 + depth(inner),
            Some([]) => 1,
            _ => 0,
        }
    }
    assert_eq!(depth(&got), DEPTH);
}
