//! Error types for contracts and the values they guard.
//!
//! Three families of failure exist, all of them programmer errors that are
//! returned synchronously and never retried:
//!
//! - [`ParseError`]: a malformed contract descriptor token.
//! - [`Error::Type`]: an argument of the wrong kind (for example calling a
//!   value that is not a function).
//! - [`ContractViolation`]: a candidate that does not satisfy a contract.
//!
//! [`Error`] unifies them for APIs that can fail in more than one way.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The reason a descriptor token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// The arity segment exceeds [`MAX_ARITY`](crate::contract::MAX_ARITY).
    #[error("arity too large")]
    ArityTooLarge,
    /// The arity segment is not a base-10 non-negative integer.
    #[error("could not parse arity")]
    InvalidArity,
    /// The token has an arity segment but nothing before the separator.
    #[error("empty function name not supported")]
    EmptyName,
    /// The name contains whitespace or the arity separator.
    #[error("invalid function name")]
    InvalidName,
}

/// A malformed contract descriptor token.
///
/// # Examples
///
/// ```rust
/// use duckfp::contract::Descriptor;
/// use duckfp::error::ParseErrorKind;
///
/// let error = Descriptor::parse("map/1 fold/11").unwrap_err();
/// assert_eq!(error.kind, ParseErrorKind::ArityTooLarge);
/// assert_eq!(error.token, "fold/11");
/// assert_eq!(error.to_string(), "arity too large: `fold/11`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: `{token}`")]
pub struct ParseError {
    /// The offending token, verbatim.
    pub token: String,
    /// Why the token was rejected.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(token: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            token: token.into(),
            kind,
        }
    }
}

/// A single capability a candidate failed to provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityFailure {
    /// No own callable member with this name exists.
    #[error("missing `{name}/{arity}`")]
    Missing {
        /// The required member name.
        name: String,
        /// The required arity.
        arity: usize,
    },
    /// The member exists but declares a different arity.
    #[error("`{name}` has arity {found}, expected {expected}")]
    ArityMismatch {
        /// The required member name.
        name: String,
        /// The arity the contract requires.
        expected: usize,
        /// The arity the candidate declares.
        found: usize,
    },
}

impl CapabilityFailure {
    /// The name of the capability that failed.
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name, .. } | Self::ArityMismatch { name, .. } => name,
        }
    }
}

/// A candidate was rejected by [`Contract::instance`](crate::contract::Contract::instance).
///
/// Carries the contract in its string form together with every capability
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("incomplete implementation of `{contract}`: {}", render_failures(.failures))]
pub struct ContractViolation {
    /// The violated contract, rendered as a descriptor string.
    pub contract: String,
    /// The failing capabilities, in descriptor order.
    pub failures: Vec<CapabilityFailure>,
}

fn render_failures(failures: &[CapabilityFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unified error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A contract descriptor could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An argument had the wrong shape.
    #[error("type error: expected {expected}, found {found}")]
    Type {
        /// What the callee required.
        expected: &'static str,
        /// The kind of value that was supplied.
        found: &'static str,
    },
    /// A candidate failed a contract.
    #[error(transparent)]
    Violation(#[from] ContractViolation),
    /// An error raised by a user-supplied function body.
    #[error("{0}")]
    Raised(String),
}

impl Error {
    /// Creates an [`Error::Type`].
    pub const fn type_error(expected: &'static str, found: &'static str) -> Self {
        Self::Type { expected, found }
    }

    /// Creates an [`Error::Raised`] from any message.
    pub fn raised(message: impl Into<String>) -> Self {
        Self::Raised(message.into())
    }
}
