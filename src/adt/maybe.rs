//! The optional-value type.
//!
//! A Maybe is either `just(value)` or the process-wide `nothing()`.
//! Mapping over nothing yields nothing; binding over nothing yields nothing
//! without calling the function.
//!
//! `bind` on a just applies the function directly. The function is expected
//! to return a Maybe itself, but the result is neither re-wrapped nor
//! checked.

use std::sync::LazyLock;

use super::validated;
use crate::contract::{BIND, FMAP, OF};
use crate::error::{Error, Result};
use crate::value::{Constructor, Function, Object, Value};

const VALUE: &str = "value";

struct JustTag;
struct NothingTag;

fn just_constructor() -> Constructor {
    Constructor::of::<JustTag>("Just")
}

fn nothing_constructor() -> Constructor {
    Constructor::of::<NothingTag>("Nothing")
}

static NOTHING: LazyLock<Value> = LazyLock::new(|| {
    Value::from(
        Object::builder()
            .constructor(nothing_constructor())
            .member(FMAP, Function::unary(|_| Ok(nothing())).named(FMAP))
            .member(OF, Function::unary(just).named(OF))
            .member(BIND, Function::unary(|_| Ok(nothing())).named(BIND))
            .build(),
    )
});

/// The empty Maybe. Every call returns the same shared instance.
pub fn nothing() -> Value {
    NOTHING.clone()
}

/// Wraps `value` in a present Maybe.
///
/// # Errors
///
/// Returns a violation if the built instance does not satisfy the
/// built-in contracts, or the error raised by a mapped function when
/// called through `fmap`.
///
/// # Examples
///
/// ```rust
/// use duckfp::adt::maybe::{just, unwrap};
/// use duckfp::contract::{FUNCTOR, MONAD};
/// use duckfp::value::Value;
///
/// let present = just(Value::from("duck")).unwrap();
/// assert!(FUNCTOR.check(&present) && MONAD.check(&present));
/// assert_eq!(unwrap(Value::Null, &present).unwrap(), Value::from("duck"));
/// ```
pub fn just(value: Value) -> Result<Value> {
    let mapped = value.clone();
    let bound = value.clone();
    validated(Value::from(
        Object::builder()
            .constructor(just_constructor())
            .member(VALUE, value)
            .member(
                FMAP,
                Function::unary(move |function| just(function.call(&[mapped.clone()])?))
                    .named(FMAP),
            )
            .member(OF, Function::unary(just).named(OF))
            .member(
                BIND,
                Function::unary(move |function| function.call(&[bound.clone()])).named(BIND),
            )
            .build(),
    ))
}

/// `just(value)` for `Some`, `nothing()` for `None`.
///
/// # Errors
///
/// See [`just`].
pub fn from_option(option: Option<Value>) -> Result<Value> {
    option.map_or_else(|| Ok(nothing()), just)
}

/// Returns `true` if `value` was built by [`just`].
pub fn is_just(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.is_instance_of(just_constructor()))
}

/// Returns `true` if `value` is the empty Maybe.
pub fn is_nothing(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.is_instance_of(nothing_constructor()))
}

/// The contents of a just, or `default` for nothing.
///
/// # Errors
///
/// Returns [`Error::Type`] if `maybe` is not a Maybe.
pub fn unwrap(default: Value, maybe: &Value) -> Result<Value> {
    if is_nothing(maybe) {
        Ok(default)
    } else if is_just(maybe) {
        Ok(maybe.own(VALUE).cloned().unwrap_or_default())
    } else {
        Err(Error::type_error("Maybe", maybe.type_name()))
    }
}
