#![cfg(feature = "serde")]

//! Integration tests for serde support in duckfp.
//!
//! Contracts and descriptors serialize as their descriptor string.

use duckfp::contract::{Contract, Descriptor, FUNCTOR, MONAD};
use rstest::rstest;

// =============================================================================
// Descriptor
// =============================================================================

#[rstest]
fn test_descriptor_serializes_as_string() {
    let descriptor = Descriptor::parse("of/1 bind/1").unwrap();
    assert_eq!(serde_json::to_string(&descriptor).unwrap(), "\"of/1 bind/1\"");
}

#[rstest]
#[case("")]
#[case("size")]
#[case("fmap/1 of/1 bind/1")]
fn test_descriptor_json_roundtrip(#[case] spec: &str) {
    let descriptor = Descriptor::parse(spec).unwrap();
    let json = serde_json::to_string(&descriptor).unwrap();
    let restored: Descriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(descriptor, restored);
}

#[rstest]
#[case("\"foo/11\"")]
#[case("\"foo/x\"")]
#[case("\"/1\"")]
#[case("42")]
fn test_descriptor_rejects_invalid_input(#[case] json: &str) {
    assert!(serde_json::from_str::<Descriptor>(json).is_err());
}

// =============================================================================
// Contract
// =============================================================================

#[rstest]
fn test_contract_json_roundtrip() {
    for contract in [FUNCTOR.clone(), MONAD.clone(), Contract::default()] {
        let json = serde_json::to_string(&contract).unwrap();
        let restored: Contract = serde_json::from_str(&json).unwrap();
        assert_eq!(contract, restored);
    }
}

#[rstest]
fn test_contract_inside_a_document() {
    #[derive(serde::Deserialize)]
    struct Registry {
        contracts: Vec<Contract>,
    }

    let registry: Registry =
        serde_json::from_str(r#"{"contracts": ["fmap/1", "of/1 bind/1"]}"#).unwrap();
    assert_eq!(registry.contracts, vec![FUNCTOR.clone(), MONAD.clone()]);
}
