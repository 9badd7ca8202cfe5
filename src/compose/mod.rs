//! Function composition utilities over [`Function`](crate::value::Function)
//! values.
//!
//! # Overview
//!
//! - [`curry`]: arity-aware currying
//! - [`partial`]: fix leading arguments
//! - [`compose`]: compose functions right-to-left (mathematical composition)
//! - [`pipe`]: compose functions left-to-right (data flow style)
//!
//! # Helper Functions
//!
//! - [`identity`]: The identity function - returns its argument unchanged
//! - [`constant`]: Creates a function that always returns the same value
//! - [`flip`]: Swaps the first two arguments of a function
//!
//! # Examples
//!
//! ```
//! use duckfp::compose::{compose, curry};
//! use duckfp::value::{Function, Value};
//!
//! let add = Function::binary(|x, y| {
//!     Ok(Value::from(x.as_number().unwrap_or(0.0) + y.as_number().unwrap_or(0.0)))
//! });
//! let double = Function::unary(|x| Ok(Value::from(x.as_number().unwrap_or(0.0) * 2.0)));
//!
//! let add_five = curry(&add).call(&[Value::from(5)]).unwrap();
//! let add_five = add_five.as_function().unwrap();
//!
//! // compose(&[f, g])(x) = f(g(x))
//! let composed = compose(&[double, add_five.clone()]);
//! assert_eq!(composed.call(&[Value::from(1)]).unwrap(), Value::from(12));
//! ```
//!
//! # Laws
//!
//! ## Composition Laws
//!
//! - **Associativity**: `compose(&[f, compose(&[g, h])]) == compose(&[compose(&[f, g]), h])`
//! - **Left Identity**: `compose(&[identity(), f]) == f`
//! - **Right Identity**: `compose(&[f, identity()]) == f` for unary `f`
//!
//! ## Flip Laws
//!
//! - **Double Flip Identity**: `flip(flip(f)) == f`
//! - **Flip Definition**: `flip(f)(a, b) == f(b, a)`

mod curry;
mod utils;

pub use curry::{curry, partial};
pub use utils::{compose, constant, flip, identity, pipe};
