//! The ordered-pair type.
//!
//! Pairs expose `fst/0` and `snd/0` accessors rather than a shared
//! capability, so they are recognised by constructor identity instead of a
//! contract: a keyed structure that merely looks like a pair is not one.

use crate::error::{Error, Result};
use crate::value::{Constructor, Function, Object, Value};

/// The accessor for the first slot.
pub const FST: &str = "fst";

/// The accessor for the second slot.
pub const SND: &str = "snd";

struct PairTag;

fn pair_constructor() -> Constructor {
    Constructor::of::<PairTag>("Pair")
}

/// Builds a pair.
///
/// # Examples
///
/// ```rust
/// use duckfp::adt::pair::{fst, is_pair, pair, snd};
/// use duckfp::value::{Object, Value};
///
/// let point = pair(Value::from(1), Value::from(2));
/// assert!(is_pair(&point));
/// assert_eq!(fst(&point).unwrap(), Value::from(1));
/// assert_eq!(snd(&point).unwrap(), Value::from(2));
///
/// let look_alike = Value::from(Object::from_iter([("x", 1), ("y", 2)]));
/// assert!(!is_pair(&look_alike));
/// ```
pub fn pair(first: Value, second: Value) -> Value {
    Value::from(
        Object::builder()
            .constructor(pair_constructor())
            .member(FST, Function::nullary(move || Ok(first.clone())).named(FST))
            .member(SND, Function::nullary(move || Ok(second.clone())).named(SND))
            .build(),
    )
}

/// Returns `true` if `value` was built by [`pair`].
pub fn is_pair(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.is_instance_of(pair_constructor()))
}

/// The first slot.
///
/// # Errors
///
/// Returns [`Error::Type`] if `value` is not a pair.
pub fn fst(value: &Value) -> Result<Value> {
    require_pair(value)?.call_method(FST, &[])
}

/// The second slot.
///
/// # Errors
///
/// Returns [`Error::Type`] if `value` is not a pair.
pub fn snd(value: &Value) -> Result<Value> {
    require_pair(value)?.call_method(SND, &[])
}

/// A new pair with the slots exchanged.
///
/// # Errors
///
/// Returns [`Error::Type`] if `value` is not a pair.
pub fn swap(value: &Value) -> Result<Value> {
    Ok(pair(snd(value)?, fst(value)?))
}

fn require_pair(value: &Value) -> Result<&Value> {
    if is_pair(value) {
        Ok(value)
    } else {
        Err(Error::type_error("Pair", value.type_name()))
    }
}
