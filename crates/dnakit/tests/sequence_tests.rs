//! Integration tests for validation and the sequence type.

use dnakit::sequence::*;

#[test]
fn test_dna_validation() {
    assert!(validate("ATGC").is_ok());
    assert!(matches!(validate("_"), Err(ValidationError::InvalidSymbol { .. })));
    assert!(matches!(validate(" "), Err(ValidationError::InvalidSymbol { .. })));
}

#[test]
fn test_validation_of_empty_string() {
    assert!(validate("").is_ok());
}

#[test]
fn test_validation_rejects_rna_and_ambiguity_codes() {
    for raw in ["AUGC", "ATGN", "ATG-C", "ATGC\t"] {
        assert!(validate(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn test_invalid_symbol_position() {
    match validate("GATTXCA") {
        Err(ValidationError::InvalidSymbol { position, symbol }) => {
            assert_eq!(position, 4);
            assert_eq!(symbol, 'X');
        }
        other => panic!("Expected InvalidSymbol error, got {other:?}"),
    }
}

#[test]
fn test_sequence_creation_basic() {
    let seq = Sequence::new("ATGC").unwrap();
    assert_eq!(seq.len(), 4);
    assert_eq!(seq.bases(), "ATGC");
    assert_eq!(seq.as_bytes(), b"ATGC");
}

#[test]
fn test_sequence_creation_lowercase_is_rejected() {
    assert_eq!(
        Sequence::new("atgc"),
        Err(ValidationError::InvalidSymbol { position: 0, symbol: 'a' })
    );
}

#[test]
fn test_sequence_keeps_input_unchanged() {
    let raw = String::from("GGGCCCAAATTT");
    let seq = Sequence::new(raw.clone()).unwrap();
    assert_eq!(seq.to_string(), raw);
    assert_eq!(seq.into_inner(), raw);
}

#[test]
fn test_sequence_as_ref() {
    fn length(s: impl AsRef<str>) -> usize {
        s.as_ref().len()
    }
    assert_eq!(length(Sequence::new("ATG").unwrap()), 3);
}

#[test]
fn test_sequence_equality_and_hash() {
    use std::collections::HashSet;

    let set: HashSet<Sequence> = ["ATG", "ATG", "TAA"]
        .into_iter()
        .map(|s| Sequence::new(s).unwrap())
        .collect();
    assert_eq!(set.len(), 2);
}
