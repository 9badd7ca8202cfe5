//! Capability introspection.
//!
//! This is the only place that inspects the shape of arbitrary values on
//! behalf of contracts. Everything above it works on [`Capabilities`].

use std::sync::Arc;

use tracing::trace;

use crate::predicate::{is_callable, is_keyed, is_sequence};
use crate::value::{Function, Value};

/// The callable members a value exposes.
///
/// The two variants mirror the two shapes a value can have:
///
/// - sequences yield [`Capabilities::Callables`], the callable elements in
///   order. This is a filter, not a name-to-arity mapping; names are read as
///   decimal indices into the filtered list by [`Capabilities::arity_of`].
/// - keyed structures and functions yield [`Capabilities::Members`], every
///   own callable member mapped to its declared arity.
#[derive(Clone, Debug)]
pub enum Capabilities {
    /// The callable elements of a sequence.
    Callables(Vec<Function>),
    /// Own callable members of a keyed structure or function.
    Members(Vec<(Arc<str>, usize)>),
}

impl Capabilities {
    /// The declared arity of the capability named `name`.
    ///
    /// Sequence entries are named by their index in canonical decimal form
    /// only: `"0"` names the first callable, `"00"` and `"+0"` name nothing.
    pub fn arity_of(&self, name: &str) -> Option<usize> {
        match self {
            Self::Callables(functions) => name
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == name)
                .and_then(|index| functions.get(index))
                .map(Function::arity),
            Self::Members(members) => members
                .iter()
                .find(|(member, _)| &**member == name)
                .map(|(_, arity)| *arity),
        }
    }

    /// Every capability as a `(name, arity)` pair; sequence entries are
    /// named by index.
    pub fn entries(&self) -> Vec<(Arc<str>, usize)> {
        match self {
            Self::Callables(functions) => functions
                .iter()
                .enumerate()
                .map(|(index, function)| (Arc::from(index.to_string()), function.arity()))
                .collect(),
            Self::Members(members) => members.clone(),
        }
    }

    /// Number of capabilities.
    pub fn len(&self) -> usize {
        match self {
            Self::Callables(functions) => functions.len(),
            Self::Members(members) => members.len(),
        }
    }

    /// Returns `true` if no capability is exposed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts the capabilities of `value`.
///
/// Only own members count: anything reachable solely through an object's
/// prototype is ignored. Scalars have no capabilities and yield `None`.
///
/// # Examples
///
/// ```rust
/// use duckfp::contract::capabilities_of;
/// use duckfp::value::{Function, Object, Value};
///
/// let value = Value::from(
///     Object::builder()
///         .member("push", Function::unary(|_| Ok(Value::Null)))
///         .member("size", 0)
///         .build(),
/// );
/// let capabilities = capabilities_of(&value).unwrap();
/// assert_eq!(capabilities.arity_of("push"), Some(1));
/// assert_eq!(capabilities.arity_of("size"), None);
///
/// assert!(capabilities_of(&Value::from(7)).is_none());
/// ```
pub fn capabilities_of(value: &Value) -> Option<Capabilities> {
    let capabilities = if is_sequence(value) {
        Capabilities::Callables(
            value
                .as_array()?
                .iter()
                .filter_map(Value::as_function)
                .cloned()
                .collect(),
        )
    } else if is_keyed(value) || is_callable(value) {
        Capabilities::Members(
            value
                .members()?
                .own_entries()
                .filter_map(|(name, member)| {
                    member
                        .as_function()
                        .map(|function| (Arc::from(name), function.arity()))
                })
                .collect(),
        )
    } else {
        return None;
    };
    trace!(
        kind = value.type_name(),
        count = capabilities.len(),
        "introspected capabilities"
    );
    Some(capabilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;
    use rstest::rstest;

    fn function(arity: usize) -> Function {
        Function::new(arity, |_| Ok(Value::Null))
    }

    #[rstest]
    #[case(Value::Undefined)]
    #[case(Value::Null)]
    #[case(Value::from(false))]
    #[case(Value::from(3))]
    #[case(Value::from("fmap"))]
    fn scalars_have_no_capabilities(#[case] value: Value) {
        assert!(capabilities_of(&value).is_none());
    }

    #[rstest]
    fn sequences_filter_callables() {
        let value = Value::from(vec![
            Value::from(1),
            Value::from(function(2)),
            Value::from("x"),
            Value::from(function(0)),
        ]);
        let capabilities = capabilities_of(&value).unwrap();

        assert!(matches!(
            capabilities,
            Capabilities::Callables(ref functions) if functions.len() == 2
        ));
        assert_eq!(capabilities.arity_of("0"), Some(2));
        assert_eq!(capabilities.arity_of("1"), Some(0));
        assert_eq!(capabilities.arity_of("2"), None);
        assert_eq!(capabilities.arity_of("map"), None);
    }

    #[rstest]
    #[case("+0")]
    #[case("00")]
    #[case("000")]
    #[case("01")]
    #[case(" 0")]
    fn sequence_names_must_be_canonical_indices(#[case] name: &str) {
        let value = Value::from(vec![Value::from(function(2)), Value::from(function(1))]);
        let capabilities = capabilities_of(&value).unwrap();

        assert_eq!(capabilities.arity_of(name), None);
    }

    #[rstest]
    fn inherited_members_are_ignored() {
        let prototype = Object::builder().member("greet", function(1)).build();
        let value = Value::from(Object::builder().prototype(prototype).build());
        let capabilities = capabilities_of(&value).unwrap();

        assert!(capabilities.is_empty());
        assert_eq!(capabilities.arity_of("greet"), None);
    }

    #[rstest]
    fn functions_expose_their_callable_properties() {
        let value = Value::from(
            function(3)
                .with_property("of", function(1))
                .with_property("label", "constructor"),
        );
        let capabilities = capabilities_of(&value).unwrap();

        assert_eq!(capabilities.entries(), vec![(Arc::<str>::from("of"), 1_usize)]);
    }
}
