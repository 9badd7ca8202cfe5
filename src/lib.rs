//! # duckfp
//!
//! Duck-typed contracts and Haskell-style idioms over dynamic values.
//!
//! ## Overview
//!
//! - **Values**: a small dynamic value model ([`value::Value`]) with objects,
//!   prototypes and callables that declare their arity
//! - **Contracts**: named sets of required capabilities (member name and
//!   exact arity), parsed from a compact string form such as `"of/1 bind/1"`,
//!   that check values and gate their construction
//! - **ADTs**: Maybe, Either and Pair, validated against the built-in
//!   `FUNCTOR` and `MONAD` contracts
//! - **Composition**: arity-aware `curry`, `compose`, `pipe`, `flip`
//!
//! ## Feature Flags
//!
//! - `adt`: Maybe, Either, Pair and the generic `fmap`/`bind`/`of`
//! - `compose`: Function composition utilities
//! - `serde`: Serialize contracts and descriptors as their string form
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use duckfp::prelude::*;
//!
//! let comparable = Contract::parse("compare/2").unwrap();
//!
//! let candidate = Value::from(
//!     Object::builder()
//!         .member("compare", Function::binary(|left, right| Ok(Value::from(left == right))))
//!         .build(),
//! );
//! assert!(comparable.check(&candidate));
//! assert!(!comparable.check(&Value::from("compare")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use duckfp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::contract::{
        Capabilities, Contract, Descriptor, FUNCTOR, MONAD, capabilities_of, is_a, is_not_a,
    };
    pub use crate::error::{ContractViolation, Error, ParseError, Result};
    pub use crate::value::{Constructor, Function, Object, Value};

    #[cfg(feature = "adt")]
    pub use crate::adt::either::{either, left, right};
    #[cfg(feature = "adt")]
    pub use crate::adt::maybe::{just, nothing, unwrap};
    #[cfg(feature = "adt")]
    pub use crate::adt::pair::{fst, is_pair, pair, snd};
    #[cfg(feature = "adt")]
    pub use crate::adt::{bind, fmap, of};

    #[cfg(feature = "compose")]
    pub use crate::compose::*;
}

pub mod contract;
pub mod error;
pub mod predicate;
pub mod value;

#[cfg(feature = "adt")]
pub mod adt;

#[cfg(feature = "compose")]
pub mod compose;

pub use error::{Error, Result};

static_assertions::assert_impl_all!(value::Value: Send, Sync, Clone);
