//! Type predicates and keyed-structure helpers.
//!
//! These are the small collaborators the contract system consumes:
//!
//! - `is_*` predicates for every [`Value`] kind, plus [`is_keyed`] and
//!   [`is_nil`]
//! - [`merge`]: combine two keyed structures, right side winning
//! - [`own_keys`] / [`own_values`]: own-member extraction that never
//!   consults the prototype chain
//!
//! # Examples
//!
//! ```rust
//! use duckfp::predicate::{is_callable, is_sequence, own_keys};
//! use duckfp::value::{Function, Object, Value};
//!
//! let object = Value::from(
//!     Object::builder()
//!         .member("size", 3)
//!         .member("fold", Function::binary(|_, accumulator| Ok(accumulator)))
//!         .build(),
//! );
//! assert!(!is_callable(&object));
//! assert!(is_callable(object.own("fold").unwrap()));
//! assert!(!is_sequence(&object));
//! assert_eq!(own_keys(&object), vec!["size", "fold"]);
//! ```

use crate::error::{Error, Result};
use crate::value::{Object, Value};

macro_rules! kind_predicates {
    ($($kind:ident => $pattern:pat),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Returns `true` if the value is a `" $kind "` value."]
                #[inline]
                pub const fn [<is_ $kind>](value: &Value) -> bool {
                    matches!(value, $pattern)
                }
            )*
        }
    };
}

kind_predicates! {
    undefined => Value::Undefined,
    null => Value::Null,
    bool => Value::Bool(_),
    number => Value::Number(_),
    string => Value::String(_),
    callable => Value::Function(_),
    sequence => Value::Array(_),
}

/// Returns `true` for keyed structures ([`Value::Object`]).
///
/// Functions carry members too but are reported by [`is_callable`].
#[inline]
pub const fn is_keyed(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Returns `true` for [`Value::Undefined`] and [`Value::Null`].
#[inline]
pub const fn is_nil(value: &Value) -> bool {
    matches!(value, Value::Undefined | Value::Null)
}

/// Combines two keyed structures into a new object.
///
/// Own members of `left` come first; members of `right` override them in
/// place or are appended. Prototypes and constructor tags are dropped.
///
/// # Errors
///
/// Returns [`Error::Type`] if either side has no keyed members.
pub fn merge(left: &Value, right: &Value) -> Result<Value> {
    let left_members = keyed_members(left)?;
    let right_members = keyed_members(right)?;
    Ok(Value::from(
        left_members
            .own_entries()
            .chain(right_members.own_entries())
            .map(|(key, value)| (key, value.clone()))
            .collect::<Object>(),
    ))
}

fn keyed_members(value: &Value) -> Result<&Object> {
    value
        .members()
        .ok_or_else(|| Error::type_error("object", value.type_name()))
}

/// The own member names of an object or function, in insertion order.
///
/// Every other kind yields an empty list.
pub fn own_keys(value: &Value) -> Vec<&str> {
    value
        .members()
        .map(|members| members.own_entries().map(|(key, _)| key).collect())
        .unwrap_or_default()
}

/// The own member values of an object or function, in insertion order.
pub fn own_values(value: &Value) -> Vec<&Value> {
    value
        .members()
        .map(|members| members.own_entries().map(|(_, member)| member).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Function;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Undefined, true, false)]
    #[case(Value::Null, false, true)]
    #[case(Value::from(0), false, false)]
    fn nil_predicates(#[case] value: Value, #[case] undefined: bool, #[case] null: bool) {
        assert_eq!(is_undefined(&value), undefined);
        assert_eq!(is_null(&value), null);
        assert_eq!(is_nil(&value), undefined || null);
    }

    #[rstest]
    fn kind_predicates_are_exclusive() {
        let values = [
            Value::from(true),
            Value::from(1),
            Value::from("s"),
            Value::from(Vec::<Value>::new()),
            Value::from(Object::new()),
            Value::from(Function::nullary(|| Ok(Value::Null))),
        ];
        let predicates: [fn(&Value) -> bool; 6] =
            [is_bool, is_number, is_string, is_sequence, is_keyed, is_callable];

        for (row, value) in values.iter().enumerate() {
            for (column, predicate) in predicates.iter().enumerate() {
                assert_eq!(predicate(value), row == column, "{value:?} / {column}");
            }
        }
    }

    #[rstest]
    fn merge_is_last_write_wins() {
        let left = Value::from(Object::from_iter([("a", 1), ("b", 2)]));
        let right = Value::from(Object::from_iter([("b", 3), ("c", 4)]));
        let merged = merge(&left, &right).unwrap();

        assert_eq!(own_keys(&merged), vec!["a", "b", "c"]);
        assert_eq!(merged.own("b"), Some(&Value::from(3)));
    }

    #[rstest]
    fn merge_rejects_scalars() {
        let error = merge(&Value::from(1), &Value::from(Object::new())).unwrap_err();
        assert_eq!(error, Error::type_error("object", "number"));
    }

    #[rstest]
    fn own_helpers_skip_prototype() {
        let prototype = Object::from_iter([("inherited", 1)]);
        let value = Value::from(Object::builder().prototype(prototype).member("own", 2).build());

        assert_eq!(own_keys(&value), vec!["own"]);
        assert_eq!(own_values(&value), vec![&Value::from(2)]);
        assert!(own_keys(&Value::from("text")).is_empty());
    }
}
