//! Type-safe UUID identifiers.
//!
//! Larger systems tend to juggle many kinds of identifier (users, orders, invoices, ...) that are
//! all UUIDs underneath. Passing them around as bare [`uuid::Uuid`] values makes it easy to hand
//! an order ID to a function expecting a user ID. This crate provides:
//!
//! - [`Id`], a small value type over a UUID with generation, parsing, canonical rendering and a
//!   nil check.
//! - [`Initializers`], a generic factory that, given a constructor `fn(Id) -> T`, yields
//!   generation and parsing functions returning `T` instead of a raw [`Id`].
//! - [`typed_id!`], a macro that declares a newtype over [`Id`] and wires it through
//!   [`Initializers`].
//! - Adapters for JSON (feature `serde`) and SQLite via `rusqlite` (feature `sqlite`), so
//!   identifiers can be stored and exchanged without those layers knowing about the type.
//!
//! ## Canonical text form
//! - Rendering is always lowercase and hyphenated: `123e4567-e89b-12d3-a456-426614174000`.
//! - Parsing is case-insensitive and also accepts the simple (no hyphens), braced and
//!   `urn:uuid:` forms.
//!
//! ## Example
//!
//! ```
//! use typed_uuid::{typed_id, Id};
//!
//! typed_id! {
//!     /// Identifies a user account.
//!     pub struct UserId;
//! }
//!
//! # fn main() -> Result<(), typed_uuid::IdError> {
//! let user = UserId::new()?;
//! let parsed = UserId::parse(&user.to_string())?;
//! assert_eq!(user, parsed);
//!
//! let raw: Id = user.into();
//! assert!(!raw.is_nil());
//! # Ok(())
//! # }
//! ```

mod id;
mod initializers;
#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "sqlite")]
mod sql;

// Re-export public types
pub use id::{Id, Uuid};
pub use initializers::Initializers;

/// Broad classification of an [`IdError`].
///
/// Callers that only care about the failure class (for example, to decide between a 400 and a
/// 500 response) can match on this instead of on individual variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The random source could not supply entropy.
    Generation,
    /// Text was not a valid UUID encoding.
    Parse,
    /// A value read from storage was not a recognisable UUID scalar.
    Adapter,
    /// A structured-serialization payload was not a UUID string.
    Serialization,
}

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The operating system random source failed.
    #[error("could not generate a UUID: {0}")]
    Generation(#[source] rand::Error),

    /// Input text is not a UUID.
    #[error("could not parse UUID from {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: uuid::Error,
    },

    /// Storage returned something other than a 16-byte blob or UUID text.
    #[error("could not read UUID from database value: {reason}")]
    Adapter { reason: String },

    /// JSON payload is well-formed but not a string.
    #[cfg(feature = "serde")]
    #[error("could not unmarshal JSON uuid into a string: found {found}")]
    JsonNotString { found: &'static str },

    /// JSON payload is a string but not a UUID.
    #[cfg(feature = "serde")]
    #[error("could not parse uuid string {input:?}: {source}")]
    JsonInvalidUuid {
        input: String,
        #[source]
        source: uuid::Error,
    },

    /// JSON text could not be read or written at all.
    #[cfg(feature = "serde")]
    #[error("invalid JSON uuid: {0}")]
    Json(#[source] serde_json::Error),

    /// A failure raised while producing a wrapped identifier type.
    #[error("could not {action} a {type_name}: {source}")]
    Wrapped {
        action: &'static str,
        type_name: &'static str,
        #[source]
        source: Box<IdError>,
    },
}

impl IdError {
    /// Returns the failure class, looking through [`IdError::Wrapped`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdError::Generation(_) => ErrorKind::Generation,
            IdError::Parse { .. } => ErrorKind::Parse,
            IdError::Adapter { .. } => ErrorKind::Adapter,
            #[cfg(feature = "serde")]
            IdError::JsonNotString { .. }
            | IdError::JsonInvalidUuid { .. }
            | IdError::Json(_) => ErrorKind::Serialization,
            IdError::Wrapped { source, .. } => source.kind(),
        }
    }
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
