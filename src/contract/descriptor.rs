//! Contract descriptors and their compact string form.
//!
//! A descriptor maps capability names to arities. Its string form is a list
//! of tokens separated by single spaces:
//!
//! | Token      | Meaning                         |
//! |------------|---------------------------------|
//! | `name`     | `name` with arity 0             |
//! | `name/n`   | `name` with arity `n` (`n <= 10`) |
//!
//! Parsing and rendering are inverses: `Descriptor::parse(&d.to_string())`
//! reproduces `d`.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::trace;

use super::capabilities::capabilities_of;
use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::predicate::{is_keyed, own_keys, own_values};
use crate::value::Value;

/// The largest arity a descriptor accepts.
pub const MAX_ARITY: usize = 10;

/// Separates a name from its arity in a descriptor token.
pub const ARITY_SEPARATOR: char = '/';

const TOKEN_SEPARATOR: char = ' ';

type Entries = SmallVec<[(Arc<str>, usize); 4]>;

/// A mapping from capability name to expected arity.
///
/// Entries keep insertion order for rendering; equality ignores order.
/// Descriptors are immutable; every combinator returns a new descriptor.
///
/// # Examples
///
/// ```rust
/// use duckfp::contract::Descriptor;
///
/// let descriptor = Descriptor::parse("of/1 bind/1 done").unwrap();
/// assert_eq!(descriptor.get("bind"), Some(1));
/// assert_eq!(descriptor.get("done"), Some(0));
/// assert_eq!(descriptor.to_string(), "of/1 bind/1 done/0");
///
/// let reparsed = Descriptor::parse(&descriptor.to_string()).unwrap();
/// assert_eq!(reparsed, descriptor);
/// ```
#[derive(Clone, Default)]
pub struct Descriptor {
    entries: Entries,
}

impl Descriptor {
    /// Creates the empty descriptor, which every value satisfies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one descriptor string.
    ///
    /// Empty tokens are skipped, so `""` is the empty descriptor. A name that
    /// appears twice keeps its first position and its last arity.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the first malformed token.
    pub fn parse(spec: &str) -> std::result::Result<Self, ParseError> {
        let mut descriptor = Self::new();
        for token in spec.split(TOKEN_SEPARATOR).filter(|token| !token.is_empty()) {
            let (name, arity) = parse_token(token)?;
            descriptor.assign(Arc::from(name), arity);
        }
        trace!(spec, entries = descriptor.len(), "parsed contract descriptor");
        Ok(descriptor)
    }

    /// Parses several descriptor strings and merges them left to right.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered.
    pub fn parse_all<I, S>(specs: I) -> std::result::Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs.into_iter().try_fold(Self::new(), |descriptor, spec| {
            Ok(descriptor.merge(&Self::parse(spec.as_ref())?))
        })
    }

    /// Parses descriptor strings held in dynamic values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if an argument is not a string and
    /// [`Error::Parse`] if a string is malformed.
    pub fn parse_values(specs: &[Value]) -> Result<Self> {
        specs.iter().try_fold(Self::new(), |descriptor, spec| {
            let text = spec
                .as_str()
                .ok_or_else(|| Error::type_error("string", spec.type_name()))?;
            Ok(descriptor.merge(&Self::parse(text)?))
        })
    }

    /// Builds a descriptor from a literal object mapping names to arities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if `literal` is not an object or an arity is
    /// not a non-negative integral number, and [`Error::Parse`] for invalid
    /// names or arities above [`MAX_ARITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use duckfp::contract::Descriptor;
    /// use duckfp::value::{Object, Value};
    ///
    /// let literal = Value::from(Object::from_iter([("fmap", 1)]));
    /// assert_eq!(Descriptor::from_value(&literal).unwrap(), Descriptor::parse("fmap/1").unwrap());
    /// assert!(Descriptor::from_value(&Value::from("fmap/1")).is_err());
    /// ```
    pub fn from_value(literal: &Value) -> Result<Self> {
        if !is_keyed(literal) {
            return Err(Error::type_error("object", literal.type_name()));
        }
        own_keys(literal)
            .into_iter()
            .zip(own_values(literal))
            .try_fold(Self::new(), |descriptor, (name, arity)| {
                let arity = arity_from_value(name, arity)?;
                Ok(descriptor.with(name, arity)?)
            })
    }

    /// Describes the own callable members of `value`.
    ///
    /// Sequences contribute their callable elements named by index. Scalars
    /// yield the empty descriptor.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if a member cannot be expressed in the
    /// descriptor grammar (a name with whitespace or `/`, or an arity above
    /// [`MAX_ARITY`]).
    pub fn from_capabilities(value: &Value) -> std::result::Result<Self, ParseError> {
        capabilities_of(value)
            .map(|capabilities| capabilities.entries())
            .unwrap_or_default()
            .into_iter()
            .try_fold(Self::new(), |descriptor, (name, arity)| {
                descriptor.with(&name, arity)
            })
    }

    /// Builds a descriptor from `(name, arity)` pairs; later pairs win.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of the first pair that [`Descriptor::with`]
    /// rejects.
    pub fn from_entries<I, S>(entries: I) -> std::result::Result<Self, ParseError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(Self::new(), |descriptor, (name, arity)| {
                descriptor.with(name.as_ref(), arity)
            })
    }

    /// Returns a copy with `name` set to `arity`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for an invalid name or an arity above
    /// [`MAX_ARITY`].
    pub fn with(&self, name: &str, arity: usize) -> std::result::Result<Self, ParseError> {
        let token = || format!("{name}{ARITY_SEPARATOR}{arity}");
        validate_name(name, token)?;
        if arity > MAX_ARITY {
            return Err(ParseError::new(token(), ParseErrorKind::ArityTooLarge));
        }
        let mut descriptor = self.clone();
        descriptor.assign(Arc::from(name), arity);
        Ok(descriptor)
    }

    /// Combines two descriptors; entries of `other` win.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (name, arity) in &other.entries {
            merged.assign(Arc::clone(name), *arity);
        }
        merged
    }

    /// The arity required for `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(entry, _)| &**entry == name)
            .map(|(_, arity)| *arity)
    }

    /// Returns `true` if `name` is required.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, arity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, arity)| (&**name, *arity))
    }

    /// Number of required capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a descriptor from entries known to satisfy the grammar.
    pub(crate) fn from_static(entries: &[(&'static str, usize)]) -> Self {
        entries
            .iter()
            .fold(Self::new(), |mut descriptor, (name, arity)| {
                descriptor.assign(Arc::from(*name), *arity);
                descriptor
            })
    }

    fn assign(&mut self, name: Arc<str>, arity: usize) {
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some((_, slot)) => *slot = arity,
            None => self.entries.push((name, arity)),
        }
    }
}

fn parse_token(token: &str) -> std::result::Result<(&str, usize), ParseError> {
    let Some((name, digits)) = token.split_once(ARITY_SEPARATOR) else {
        validate_name(token, || token.to_string())?;
        return Ok((token, 0));
    };
    if name.is_empty() {
        return Err(ParseError::new(token, ParseErrorKind::EmptyName));
    }
    validate_name(name, || token.to_string())?;
    Ok((name, parse_arity(token, digits)?))
}

fn parse_arity(token: &str, digits: &str) -> std::result::Result<usize, ParseError> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseError::new(token, ParseErrorKind::InvalidArity));
    }
    // All digits, so the only possible failure is overflow.
    match digits.parse::<usize>() {
        Ok(arity) if arity <= MAX_ARITY => Ok(arity),
        _ => Err(ParseError::new(token, ParseErrorKind::ArityTooLarge)),
    }
}

fn validate_name(
    name: &str,
    token: impl FnOnce() -> String,
) -> std::result::Result<(), ParseError> {
    if name.is_empty() {
        return Err(ParseError::new(token(), ParseErrorKind::EmptyName));
    }
    if name
        .chars()
        .any(|character| character.is_whitespace() || character == ARITY_SEPARATOR)
    {
        return Err(ParseError::new(token(), ParseErrorKind::InvalidName));
    }
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn arity_from_value(name: &str, arity: &Value) -> Result<usize> {
    let number = arity
        .as_number()
        .filter(|number| *number >= 0.0 && number.fract() == 0.0)
        .ok_or_else(|| Error::type_error("non-negative integer arity", arity.type_name()))?;
    if number > MAX_ARITY as f64 {
        return Err(ParseError::new(
            format!("{name}{ARITY_SEPARATOR}{number}"),
            ParseErrorKind::ArityTooLarge,
        )
        .into());
    }
    Ok(number as usize)
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, arity)| other.get(name) == Some(arity))
    }
}

impl Eq for Descriptor {}

impl fmt::Display for Descriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, arity)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, "{TOKEN_SEPARATOR}")?;
            }
            write!(formatter, "{name}{ARITY_SEPARATOR}{arity}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl std::str::FromStr for Descriptor {
    type Err = ParseError;

    fn from_str(spec: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Descriptor {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
struct DescriptorVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for DescriptorVisitor {
    type Value = Descriptor;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a contract descriptor string such as \"of/1 bind/1\"")
    }

    fn visit_str<E>(self, spec: &str) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Descriptor::parse(spec).map_err(E::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Descriptor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DescriptorVisitor)
    }
}
