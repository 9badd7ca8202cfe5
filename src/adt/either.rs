//! The disjoint-sum type.
//!
//! An Either is `left(value)` or `right(value)`. By convention `left` holds
//! an error and `right` a success:
//!
//! - `left` short-circuits: its `fmap` and `bind` return the very same
//!   instance without calling the function
//! - `right` maps to a new `right`, and binds by applying the function
//!   directly
//!
//! [`either`] eliminates a sum by calling exactly one of two functions.
//!
//! # Examples
//!
//! ```rust
//! use duckfp::adt::either::{either, left, right};
//! use duckfp::value::{Function, Value};
//!
//! let describe_error = Function::unary(|error| Ok(Value::from(format!("failed: {error:?}"))));
//! let describe_value = Function::unary(|value| Ok(Value::from(format!("got {value:?}"))));
//!
//! let failure = left(Value::from("timeout")).unwrap();
//! let success = right(Value::from(42)).unwrap();
//!
//! assert_eq!(
//!     either(&describe_error, &describe_value, &failure).unwrap(),
//!     Value::from("failed: \"timeout\"")
//! );
//! assert_eq!(
//!     either(&describe_error, &describe_value, &success).unwrap(),
//!     Value::from("got 42")
//! );
//! ```

use super::validated;
use crate::contract::{BIND, FMAP, OF};
use crate::error::{Error, Result};
use crate::value::{Constructor, Function, Object, Value, WeakObject};

const VALUE: &str = "value";

struct LeftTag;
struct RightTag;

fn left_constructor() -> Constructor {
    Constructor::of::<LeftTag>("Left")
}

fn right_constructor() -> Constructor {
    Constructor::of::<RightTag>("Right")
}

/// Builds the failure side.
///
/// The `fmap` and `bind` members hold only a weak handle to the instance
/// they return.
///
/// # Errors
///
/// Returns a violation if the built instance does not satisfy the
/// built-in contracts.
///
/// A `fmap` or `bind` member taken out of a left and called after every
/// handle to that left has been dropped fails with [`Error::Type`]
/// (`expected: "Either"`, `found: "undefined"`) instead of returning it.
pub fn left(value: Value) -> Result<Value> {
    validated(Value::from(
        Object::builder()
            .constructor(left_constructor())
            .member(VALUE, value)
            .build_cyclic(|this| {
                [
                    (FMAP, Value::from(returning(this).named(FMAP))),
                    (OF, Value::from(Function::unary(right).named(OF))),
                    (BIND, Value::from(returning(this).named(BIND))),
                ]
            }),
    ))
}

/// Builds the success side.
///
/// # Errors
///
/// Returns a violation if the built instance does not satisfy the
/// built-in contracts.
pub fn right(value: Value) -> Result<Value> {
    let mapped = value.clone();
    let bound = value.clone();
    validated(Value::from(
        Object::builder()
            .constructor(right_constructor())
            .member(VALUE, value)
            .member(
                FMAP,
                Function::unary(move |function| right(function.call(&[mapped.clone()])?))
                    .named(FMAP),
            )
            .member(OF, Function::unary(right).named(OF))
            .member(
                BIND,
                Function::unary(move |function| function.call(&[bound.clone()])).named(BIND),
            )
            .build(),
    ))
}

/// A unary function that ignores its argument and returns `this`.
fn returning(this: &WeakObject) -> Function {
    let this = this.clone();
    Function::unary(move |_| {
        this.upgrade()
            .map(Value::from)
            .ok_or(Error::type_error("Either", "undefined"))
    })
}

/// Returns `true` if `value` was built by [`left`].
pub fn is_left(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.is_instance_of(left_constructor()))
}

/// Returns `true` if `value` was built by [`right`].
pub fn is_right(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.is_instance_of(right_constructor()))
}

/// Calls `on_left` with the contents of a left, or `on_right` with the
/// contents of a right. Never both.
///
/// # Errors
///
/// Returns [`Error::Type`] if `sum` is not an Either, or the error raised
/// by the chosen function.
pub fn either(on_left: &Function, on_right: &Function, sum: &Value) -> Result<Value> {
    let contents = || sum.own(VALUE).cloned().unwrap_or_default();
    if is_left(sum) {
        on_left.call(&[contents()])
    } else if is_right(sum) {
        on_right.call(&[contents()])
    } else {
        Err(Error::type_error("Either", sum.type_name()))
    }
}
