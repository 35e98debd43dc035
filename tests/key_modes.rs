//! Coverage for picking a key-decoding policy at runtime via `KeyMode`.

use jscore::{decode_chunks_with_mode, decode_with_mode, KeyMode, KeyedOutcome};

fn done_object_len(outcome: KeyedOutcome) -> usize {
    match outcome {
        KeyedOutcome::Strings(o) => match o {
            jscore::DecodeOutcome::Done(v) => v.as_object().unwrap().len(),
            _ => panic!("expected Done"),
        },
        KeyedOutcome::Atoms(o) => match o {
            jscore::DecodeOutcome::Done(v) => v.as_object().unwrap().len(),
            _ => panic!("expected Done"),
        },
        KeyedOutcome::AtomsExisting(o) => match o {
            jscore::DecodeOutcome::Done(v) => v.as_object().unwrap().len(),
            _ => panic!("expected Done"),
        },
    }
}

#[test]
fn strings_mode_decodes_with_plain_string_keys() {
    let outcome = decode_with_mode(br#"{"a":1,"b":2}"#, KeyMode::Strings);
    match outcome {
        KeyedOutcome::Strings(jscore::DecodeOutcome::Done(v)) => {
            assert_eq!(v.as_object().unwrap()["a"].as_i64(), Some(1));
        }
        _ => panic!("expected KeyedOutcome::Strings(Done)"),
    }
}

#[test]
fn atoms_mode_decodes_with_interned_keys() {
    let outcome = decode_with_mode(br#"{"x":1,"y":2}"#, KeyMode::Atoms);
    match outcome {
        KeyedOutcome::Atoms(jscore::DecodeOutcome::Done(v)) => {
            let obj = v.as_object().unwrap();
            assert_eq!(obj.len(), 2);
        }
        _ => panic!("expected KeyedOutcome::Atoms(Done)"),
    }
}

#[test]
fn atoms_existing_mode_rejects_a_never_interned_key() {
    let outcome = decode_with_mode(br#"{"never_interned_key_xyz":1}"#, KeyMode::AtomsExisting);
    match outcome {
        KeyedOutcome::AtomsExisting(jscore::DecodeOutcome::Error(e)) => {
            assert!(matches!(e.kind, jscore::ErrorKind::InvalidToken(_)));
        }
        _ => panic!("expected KeyedOutcome::AtomsExisting(Error)"),
    }
}

#[test]
fn default_key_mode_is_strings() {
    assert!(matches!(KeyMode::default(), KeyMode::Strings));
}

#[test]
fn chunked_decode_with_mode_matches_single_buffer() {
    let chunks = [r#"{"a":1,"#, r#""b":2}"#];
    let outcome = decode_chunks_with_mode(chunks, KeyMode::Strings);
    assert_eq!(done_object_len(outcome), 2);
}
