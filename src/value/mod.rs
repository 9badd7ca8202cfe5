//! The dynamic value model.
//!
//! Contracts describe runtime shapes, so they need runtime values to check.
//! [`Value`] is a small closed set of kinds:
//!
//! - scalars: [`Value::Undefined`], [`Value::Null`], [`Value::Bool`],
//!   [`Value::Number`], [`Value::String`]
//! - [`Value::Array`]: an ordered sequence
//! - [`Value::Object`]: a keyed structure with optional prototype and
//!   constructor tag ([`Object`])
//! - [`Value::Function`]: a callable with a declared arity and its own
//!   members ([`Function`])
//!
//! All reference kinds are `Arc`-shared, so cloning a value is cheap and
//! keeps identity. Values are `Send + Sync`.
//!
//! # Examples
//!
//! ```rust
//! use duckfp::value::{Function, Object, Value};
//!
//! let greeter = Value::from(
//!     Object::builder()
//!         .member("name", "duck")
//!         .member("greet", Function::unary(|greeting| Ok(greeting)))
//!         .build(),
//! );
//!
//! let reply = greeter.call_method("greet", &[Value::from("quack")]).unwrap();
//! assert_eq!(reply, Value::from("quack"));
//! ```

mod function;
mod object;

pub use function::{Body, Function, argument};
pub use object::{Constructor, Object, ObjectBuilder, WeakObject};

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Undefined,
    /// An explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Arc<str>),
    /// An ordered sequence.
    Array(Arc<[Value]>),
    /// A keyed structure.
    Object(Object),
    /// A callable.
    Function(Function),
}

impl Value {
    /// The kind of this value as a lowercase name.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns the number if this is a [`Value::Number`].
    #[inline]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the object if this is a [`Value::Object`].
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the function if this is a [`Value::Function`].
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// The own keyed members of an object or function.
    pub fn members(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            Self::Function(function) => Some(function.properties()),
            _ => None,
        }
    }

    /// Looks up an own member of an object or function.
    pub fn own(&self, name: &str) -> Option<&Self> {
        self.members().and_then(|members| members.own(name))
    }

    /// Looks up a member, following the prototype chain of objects.
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.members().and_then(|members| members.get(name))
    }

    /// Calls this value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if the value is not a function, otherwise
    /// whatever the function returns.
    pub fn call(&self, arguments: &[Self]) -> Result<Self> {
        match self {
            Self::Function(function) => function.call(arguments),
            other => Err(Error::type_error("function", other.type_name())),
        }
    }

    /// Calls the member `name`, found through the prototype chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if the member is absent or not callable.
    pub fn call_method(&self, name: &str, arguments: &[Self]) -> Result<Self> {
        self.get(name)
            .map_or(Err(Error::type_error("function", "undefined")), |member| {
                member.call(arguments)
            })
    }

    /// Returns `true` if both values are the same value.
    ///
    /// Scalars compare by value; arrays, objects and functions by identity.
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(left), Self::Array(right)) => Arc::ptr_eq(left, right),
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => self == other,
        }
    }
}

/// Scalars and arrays compare structurally; objects and functions by
/// identity. Numbers follow IEEE-754 (`NaN != NaN`).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left.ptr_eq(right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("undefined"),
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => write!(formatter, "{number}"),
            Self::String(text) => write!(formatter, "{text:?}"),
            Self::Array(elements) => formatter.debug_list().entries(elements.iter()).finish(),
            Self::Object(object) => write!(formatter, "{object:?}"),
            Self::Function(function) => write!(formatter, "{function:?}"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Array(Arc::from(elements))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    /// `None` becomes [`Value::Null`].
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterator: I) -> Self {
        Self::Array(iterator.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Undefined, "undefined")]
    #[case(Value::Null, "null")]
    #[case(Value::from(true), "boolean")]
    #[case(Value::from(1.5), "number")]
    #[case(Value::from("text"), "string")]
    #[case(Value::from(vec![Value::Null]), "array")]
    #[case(Value::from(Object::new()), "object")]
    #[case(Value::from(Function::nullary(|| Ok(Value::Null))), "function")]
    fn type_name_matches_kind(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.type_name(), expected);
    }

    #[rstest]
    fn objects_compare_by_identity() {
        let object = Object::builder().member("x", 1).build();
        let twin = Object::builder().member("x", 1).build();
        assert_eq!(Value::from(object.clone()), Value::from(object.clone()));
        assert_ne!(Value::from(object), Value::from(twin));
    }

    #[rstest]
    fn arrays_compare_structurally_but_same_is_identity() {
        let first = Value::from(vec![Value::from(1), Value::from(2)]);
        let second = Value::from(vec![Value::from(1), Value::from(2)]);
        assert_eq!(first, second);
        assert!(!first.same(&second));
        assert!(first.same(&first.clone()));
    }

    #[rstest]
    fn calling_a_non_function_is_a_type_error() {
        let error = Value::from(3).call(&[]).unwrap_err();
        assert_eq!(error, Error::type_error("function", "number"));
    }

    #[rstest]
    fn call_method_follows_prototype() {
        let prototype = Object::builder()
            .member("answer", Function::nullary(|| Ok(Value::from(42))))
            .build();
        let object = Value::from(Object::builder().prototype(prototype).build());
        assert_eq!(object.call_method("answer", &[]).unwrap(), Value::from(42));
        assert!(object.call_method("missing", &[]).is_err());
    }

    #[rstest]
    fn function_members_are_visible() {
        let function =
            Value::from(Function::nullary(|| Ok(Value::Null)).with_property("kind", "thunk"));
        assert_eq!(function.own("kind"), Some(&Value::from("thunk")));
    }
}
