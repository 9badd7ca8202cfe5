//! Duck-typed contracts.
//!
//! A [`Contract`] names a set of required capabilities: callable members
//! with an exact arity. It can check whether an arbitrary [`Value`]
//! satisfies it, and gate construction of values that claim to:
//!
//! - [`Contract::check`]: `true` if every capability is an own callable
//!   member with exactly the required arity
//! - [`Contract::instance`]: the candidate itself, or a
//!   [`ContractViolation`] naming what is missing
//!
//! The empty contract is satisfied by every value, which makes it the
//! universal supertype.
//!
//! # Examples
//!
//! ```rust
//! use duckfp::contract::Contract;
//! use duckfp::value::{Function, Object, Value};
//!
//! let greeter = Contract::parse("greet/1").unwrap();
//!
//! assert!(greeter.instance(Value::from(Object::new())).is_err());
//!
//! let candidate = Value::from(
//!     Object::builder()
//!         .member("greet", Function::unary(|name| Ok(name)))
//!         .build(),
//! );
//! let accepted = greeter.instance(candidate.clone()).unwrap();
//! assert!(accepted.same(&candidate));
//! ```

mod builtin;
mod capabilities;
mod descriptor;

pub use builtin::{BIND, FMAP, FUNCTOR, MONAD, OF};
pub use capabilities::{Capabilities, capabilities_of};
pub use descriptor::{ARITY_SEPARATOR, Descriptor, MAX_ARITY};

use std::fmt;
use std::sync::LazyLock;

use tracing::debug;

use crate::error::{CapabilityFailure, ContractViolation, ParseError, Result};
use crate::value::Value;

static EMPTY: LazyLock<Contract> = LazyLock::new(Contract::default);

/// A named set of required capabilities.
///
/// Contracts are immutable and compare by descriptor content. They hold no
/// values, so a single contract can be shared freely across threads.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Contract {
    descriptor: Descriptor,
}

impl Contract {
    /// Wraps a descriptor.
    pub const fn new(descriptor: Descriptor) -> Self {
        Self { descriptor }
    }

    /// The contract with no requirements.
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// Parses a descriptor string into a contract.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for a malformed token.
    pub fn parse(spec: &str) -> std::result::Result<Self, ParseError> {
        Descriptor::parse(spec).map(Self::new)
    }

    /// Parses and merges several descriptor strings into a contract.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_all<I, S>(specs: I) -> std::result::Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Descriptor::parse_all(specs).map(Self::new)
    }

    /// Builds a contract from a descriptor literal.
    ///
    /// # Errors
    ///
    /// See [`Descriptor::from_value`].
    pub fn from_value(literal: &Value) -> Result<Self> {
        Descriptor::from_value(literal).map(Self::new)
    }

    /// The contract that `value` satisfies by its own callable members.
    ///
    /// # Errors
    ///
    /// See [`Descriptor::from_capabilities`].
    pub fn of(value: &Value) -> std::result::Result<Self, ParseError> {
        Descriptor::from_capabilities(value).map(Self::new)
    }

    /// A contract requiring everything `self` and `other` require.
    ///
    /// Where both name the same capability, `other` wins.
    #[must_use]
    pub fn extend(&self, other: &Self) -> Self {
        Self::new(self.descriptor.merge(&other.descriptor))
    }

    /// The wrapped descriptor.
    pub const fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Returns `true` if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.descriptor.is_empty()
    }

    /// Returns `true` if `value` satisfies this contract.
    pub fn check(&self, value: &Value) -> bool {
        self.is_empty() || self.failures(value).next().is_none()
    }

    /// Checks `value` and reports every failing capability.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] if any capability is missing or has a
    /// different arity.
    pub fn verify(&self, value: &Value) -> std::result::Result<(), ContractViolation> {
        if self.is_empty() {
            return Ok(());
        }
        let failures: Vec<CapabilityFailure> = self.failures(value).collect();
        if failures.is_empty() {
            return Ok(());
        }
        debug!(
            contract = %self,
            kind = value.type_name(),
            failures = failures.len(),
            "contract not satisfied"
        );
        Err(ContractViolation {
            contract: self.to_string(),
            failures,
        })
    }

    /// Returns `candidate` unchanged if it satisfies this contract.
    ///
    /// The candidate is never adapted or coerced.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] for an incomplete implementation.
    pub fn instance(&self, candidate: Value) -> std::result::Result<Value, ContractViolation> {
        self.verify(&candidate).map(|()| candidate)
    }

    fn failures<'a>(&'a self, value: &Value) -> impl Iterator<Item = CapabilityFailure> + use<'a> {
        let capabilities = capabilities_of(value);
        self.descriptor.iter().filter_map(move |(name, arity)| {
            match capabilities.as_ref().and_then(|found| found.arity_of(name)) {
                None => Some(CapabilityFailure::Missing {
                    name: name.to_string(),
                    arity,
                }),
                Some(found) if found != arity => Some(CapabilityFailure::ArityMismatch {
                    name: name.to_string(),
                    expected: arity,
                    found,
                }),
                Some(_) => None,
            }
        })
    }
}

impl From<Descriptor> for Contract {
    fn from(descriptor: Descriptor) -> Self {
        Self::new(descriptor)
    }
}

impl std::str::FromStr for Contract {
    type Err = ParseError;

    fn from_str(spec: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.descriptor)
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Contract({self})")
    }
}

// =============================================================================
// Gate Functions
// =============================================================================

/// Returns `true` if `value` satisfies `contract`.
#[inline]
pub fn check(contract: &Contract, value: &Value) -> bool {
    contract.check(value)
}

/// Returns `candidate` if it satisfies `contract`.
///
/// # Errors
///
/// Returns a [`ContractViolation`] for an incomplete implementation.
#[inline]
pub fn instance(
    contract: &Contract,
    candidate: Value,
) -> std::result::Result<Value, ContractViolation> {
    contract.instance(candidate)
}

/// Predicate form of [`check`], suited to filtering.
///
/// # Examples
///
/// ```rust
/// use duckfp::contract::{FUNCTOR, is_a};
/// use duckfp::value::{Function, Object, Value};
///
/// let values = [
///     Value::from(Object::builder().member("fmap", Function::unary(Ok)).build()),
///     Value::from(3),
/// ];
/// let functors: Vec<&Value> = values.iter().filter(|value| is_a(&FUNCTOR, value)).collect();
/// assert_eq!(functors.len(), 1);
/// ```
#[inline]
pub fn is_a(contract: &Contract, value: &Value) -> bool {
    contract.check(value)
}

/// Negation of [`is_a`].
#[inline]
pub fn is_not_a(contract: &Contract, value: &Value) -> bool {
    !contract.check(value)
}

static_assertions::assert_impl_all!(Contract: Send, Sync, Clone);
static_assertions::assert_impl_all!(Descriptor: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::{Function, Object};
    use rstest::rstest;

    fn function(arity: usize) -> Function {
        Function::new(arity, |_| Ok(Value::Null))
    }

    fn with_member(name: &str, arity: usize) -> Value {
        Value::from(Object::builder().member(name, function(arity)).build())
    }

    #[rstest]
    #[case(Value::Undefined)]
    #[case(Value::Null)]
    #[case(Value::from(0))]
    #[case(Value::from("text"))]
    #[case(Value::from(Object::new()))]
    #[case(Value::from(vec![Value::from(1)]))]
    #[case(Value::from(function(4)))]
    fn empty_contract_accepts_everything(#[case] value: Value) {
        assert!(Contract::parse("").unwrap().check(&value));
        assert!(Contract::empty().check(&value));
        assert!(Contract::empty().instance(value).is_ok());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(2, false)]
    fn arity_must_match_exactly(#[case] arity: usize, #[case] accepted: bool) {
        let contract = Contract::parse("foo/1").unwrap();
        assert_eq!(contract.check(&with_member("foo", arity)), accepted);
    }

    #[rstest]
    fn scalars_fail_non_empty_contracts() {
        let contract = Contract::parse("foo").unwrap();
        assert!(!contract.check(&Value::from(1)));
        assert_eq!(
            contract.verify(&Value::Null).unwrap_err().failures,
            vec![CapabilityFailure::Missing {
                name: "foo".to_string(),
                arity: 0
            }]
        );
    }

    #[rstest]
    fn inherited_capabilities_do_not_count() {
        let prototype = Object::builder().member("greet", function(1)).build();
        let value = Value::from(Object::builder().prototype(prototype).build());
        assert!(!Contract::parse("greet/1").unwrap().check(&value));
    }

    #[rstest]
    fn non_callable_members_do_not_count() {
        let value = Value::from(Object::from_iter([("greet", 1)]));
        assert!(!Contract::parse("greet/0").unwrap().check(&value));
    }

    #[rstest]
    fn verify_reports_every_failure() {
        let contract = Contract::parse("of/1 bind/1 fmap/1").unwrap();
        let value = Value::from(
            Object::builder()
                .member("bind", function(2))
                .member("fmap", function(1))
                .build(),
        );
        let violation = contract.verify(&value).unwrap_err();

        assert_eq!(violation.contract, "of/1 bind/1 fmap/1");
        assert_eq!(
            violation.failures,
            vec![
                CapabilityFailure::Missing {
                    name: "of".to_string(),
                    arity: 1
                },
                CapabilityFailure::ArityMismatch {
                    name: "bind".to_string(),
                    expected: 1,
                    found: 2
                },
            ]
        );
    }

    #[rstest]
    fn instance_returns_the_identical_candidate() {
        let contract = Contract::parse("greet/1").unwrap();
        let candidate = with_member("greet", 1);
        let accepted = contract.instance(candidate.clone()).unwrap();
        assert!(accepted.same(&candidate));

        assert!(contract.instance(Value::from(Object::new())).is_err());
    }

    #[rstest]
    fn functions_can_satisfy_contracts_through_properties() {
        let constructor = Value::from(function(1).with_property("of", function(1)));
        assert!(Contract::parse("of/1").unwrap().check(&constructor));
    }

    #[rstest]
    fn sequences_satisfy_index_named_contracts() {
        let value = Value::from(vec![Value::from("skip"), Value::from(function(2))]);
        assert!(Contract::parse("0/2").unwrap().check(&value));
        assert!(!Contract::parse("1/2").unwrap().check(&value));
    }

    #[rstest]
    fn of_round_trips_through_check() {
        let value = Value::from(
            Object::builder()
                .member("fmap", function(1))
                .member("zip", function(2))
                .build(),
        );
        let contract = Contract::of(&value).unwrap();
        assert_eq!(contract.to_string(), "fmap/1 zip/2");
        assert!(contract.check(&value));
    }

    #[rstest]
    fn extend_merges_requirements() {
        let functor = Contract::parse("fmap/1").unwrap();
        let monad = Contract::parse("of/1 bind/1").unwrap();
        let both = functor.extend(&monad);
        assert_eq!(both, Contract::parse("bind/1 of/1 fmap/1").unwrap());
    }

    #[rstest]
    fn from_value_rejects_non_objects() {
        assert_eq!(
            Contract::from_value(&Value::from("fmap/1")).unwrap_err(),
            Error::type_error("object", "string")
        );
    }

    #[rstest]
    fn gate_functions_agree_with_methods() {
        let contract = Contract::parse("greet/1").unwrap();
        let good = with_member("greet", 1);
        let bad = with_member("greet", 3);

        assert!(check(&contract, &good) && is_a(&contract, &good));
        assert!(!is_not_a(&contract, &good));
        assert!(is_not_a(&contract, &bad));
        assert!(instance(&contract, bad).is_err());
    }

    #[rstest]
    fn display_and_debug() {
        let contract: Contract = "of/1 bind".parse().unwrap();
        assert_eq!(contract.to_string(), "of/1 bind/0");
        assert_eq!(format!("{contract:?}"), "Contract(of/1 bind/0)");
    }
}
