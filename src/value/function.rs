//! Callable values with a declared arity.

use std::fmt;
use std::sync::Arc;

use super::{Object, Value};
use crate::error::Result;

/// The body of a [`Function`].
///
/// Receives every argument passed at the call site, regardless of the
/// declared arity.
pub type Body = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A callable value.
///
/// A function carries its declared parameter count (its arity), an optional
/// name, and its own keyed members, so it can itself satisfy a contract.
/// The declared arity is metadata only: calls may pass more or fewer
/// arguments, and missing arguments are seen as [`Value::Undefined`] by the
/// helpers [`Function::unary`] and [`Function::binary`].
///
/// Cloning is cheap and preserves identity (see [`Function::ptr_eq`]).
///
/// # Examples
///
/// ```rust
/// use duckfp::value::{Function, Value};
///
/// let increment = Function::unary(|value| {
///     Ok(Value::from(value.as_number().unwrap_or(0.0) + 1.0))
/// });
/// assert_eq!(increment.arity(), 1);
/// assert_eq!(increment.call(&[Value::from(41)]).unwrap(), Value::from(42));
/// ```
#[derive(Clone)]
pub struct Function(Arc<FunctionData>);

struct FunctionData {
    name: Option<Arc<str>>,
    arity: usize,
    body: Arc<Body>,
    properties: Object,
}

impl Function {
    /// Creates a function from a body that sees the raw argument slice.
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionData {
            name: None,
            arity,
            body: Arc::new(body),
            properties: Object::new(),
        }))
    }

    /// Creates a function of arity 0.
    pub fn nullary<F>(body: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(0, move |_| body())
    }

    /// Creates a function of arity 1.
    pub fn unary<F>(body: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(1, move |arguments| body(argument(arguments, 0)))
    }

    /// Creates a function of arity 2.
    pub fn binary<F>(body: F) -> Self
    where
        F: Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(2, move |arguments| {
            body(argument(arguments, 0), argument(arguments, 1))
        })
    }

    /// Returns a copy of this function carrying `name`.
    ///
    /// The copy shares the body but is a distinct value.
    #[must_use]
    pub fn named(&self, name: impl Into<Arc<str>>) -> Self {
        Self(Arc::new(FunctionData {
            name: Some(name.into()),
            arity: self.0.arity,
            body: Arc::clone(&self.0.body),
            properties: self.0.properties.clone(),
        }))
    }

    /// Returns a copy of this function with an additional own member.
    ///
    /// Assigning an existing name replaces it.
    #[must_use]
    pub fn with_property(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self(Arc::new(FunctionData {
            name: self.0.name.clone(),
            arity: self.0.arity,
            body: Arc::clone(&self.0.body),
            properties: self.0.properties.with(name, value),
        }))
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the body produces.
    #[inline]
    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        (self.0.body)(arguments)
    }

    /// The declared parameter count.
    #[inline]
    pub fn arity(&self) -> usize {
        self.0.arity
    }

    /// The function's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// The function's own keyed members.
    #[inline]
    pub fn properties(&self) -> &Object {
        &self.0.properties
    }

    /// Returns `true` if both handles refer to the same function.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Returns the argument at `index`, or [`Value::Undefined`] when absent.
#[inline]
pub fn argument(arguments: &[Value], index: usize) -> Value {
    arguments.get(index).cloned().unwrap_or_default()
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Function({}/{})",
            self.name().unwrap_or("<anonymous>"),
            self.arity()
        )
    }
}
