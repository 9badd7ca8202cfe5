//! The built-in contracts.

use std::sync::LazyLock;

use super::{Contract, Descriptor};

/// The member that transforms a contained value.
pub const FMAP: &str = "fmap";

/// The member that wraps a bare value.
pub const OF: &str = "of";

/// The member that chains a function returning the same kind of value.
pub const BIND: &str = "bind";

/// The mapping capability: `fmap/1`.
///
/// Marks a value whose contents can be transformed by a function,
/// producing a new value of the same kind.
pub static FUNCTOR: LazyLock<Contract> =
    LazyLock::new(|| Contract::new(Descriptor::from_static(&[(FMAP, 1)])));

/// The sequencing capability: `of/1 bind/1`.
///
/// Marks a value that can wrap a bare value and chain functions that
/// themselves return such values.
pub static MONAD: LazyLock<Contract> =
    LazyLock::new(|| Contract::new(Descriptor::from_static(&[(OF, 1), (BIND, 1)])));
