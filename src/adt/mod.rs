//! Algebraic data types guarded by the built-in contracts.
//!
//! Every instance is a plain [`Value::Object`] tagged with a private
//! constructor. Maybe and Either instances expose own `fmap/1`, `of/1` and
//! `bind/1` members and are validated against [`FUNCTOR`] and [`MONAD`]
//! when they are built:
//!
//! - [`maybe`]: `just(value)` or the shared `nothing()`
//! - [`either`]: `left(error)` or `right(value)`
//! - [`pair`]: two positional slots with `fst`/`snd` accessors, recognised
//!   by constructor identity
//!
//! The generic [`fmap`], [`bind`] and [`of`] work on any value satisfying
//! the corresponding contract, not only on the types defined here.
//!
//! # Examples
//!
//! ```rust
//! use duckfp::adt::{fmap, maybe};
//! use duckfp::value::{Function, Value};
//!
//! let increment = Function::unary(|value| {
//!     Ok(Value::from(value.as_number().unwrap_or(0.0) + 1.0))
//! });
//!
//! let six = fmap(&increment, &maybe::just(Value::from(5)).unwrap()).unwrap();
//! assert_eq!(maybe::unwrap(Value::Null, &six).unwrap(), Value::from(6));
//!
//! let still_nothing = fmap(&increment, &maybe::nothing()).unwrap();
//! assert!(maybe::is_nothing(&still_nothing));
//! ```

pub mod either;
pub mod maybe;
pub mod pair;

use crate::contract::{BIND, FMAP, FUNCTOR, MONAD, OF};
use crate::error::Result;
use crate::value::{Function, Value};

/// Applies `function` to the contents of `functor` through its `fmap`.
///
/// # Errors
///
/// Returns a violation if `functor` does not satisfy [`FUNCTOR`], or the
/// error raised by `function`.
pub fn fmap(function: &Function, functor: &Value) -> Result<Value> {
    FUNCTOR.verify(functor)?;
    functor.call_method(FMAP, &[Value::from(function.clone())])
}

/// Chains `function` through the `bind` of `monad`.
///
/// The result is whatever `function` returns; it is not checked to be of
/// the same kind as `monad`.
///
/// # Errors
///
/// Returns a violation if `monad` does not satisfy [`MONAD`], or the error
/// raised by `function`.
pub fn bind(function: &Function, monad: &Value) -> Result<Value> {
    MONAD.verify(monad)?;
    monad.call_method(BIND, &[Value::from(function.clone())])
}

/// Wraps `value` using the `of` of `monad`.
///
/// # Errors
///
/// Returns a violation if `monad` does not satisfy [`MONAD`].
pub fn of(monad: &Value, value: Value) -> Result<Value> {
    MONAD.verify(monad)?;
    monad.call_method(OF, &[value])
}

/// Gates a freshly built instance through both built-in contracts.
fn validated(candidate: Value) -> Result<Value> {
    Ok(MONAD.instance(FUNCTOR.instance(candidate)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Object;
    use rstest::rstest;

    #[rstest]
    fn fmap_rejects_non_functors() {
        let error = fmap(&Function::unary(Ok), &Value::from(3)).unwrap_err();
        assert!(matches!(error, Error::Violation(violation) if violation.contract == "fmap/1"));
    }

    #[rstest]
    fn dispatchers_accept_user_defined_instances() {
        // Feeds a fixed 21 to whatever function it is mapped with.
        let functor = Value::from(
            Object::builder()
                .member(
                    FMAP,
                    Function::unary(|function| function.call(&[Value::from(21)])),
                )
                .build(),
        );
        let identity = Function::unary(Ok);
        assert_eq!(fmap(&identity, &functor).unwrap(), Value::from(21));
    }

    #[rstest]
    fn of_uses_the_instance_constructor() {
        let wrapped = of(&maybe::nothing(), Value::from("x")).unwrap();
        assert!(maybe::is_just(&wrapped));
        assert!(bind(&Function::unary(Ok), &Value::Null).is_err());
    }
}
