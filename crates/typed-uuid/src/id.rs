//! The [`Id`] value type.
//!
//! An [`Id`] owns a single 128-bit UUID and is meant to be embedded in more specific identifier
//! types (see [`crate::Initializers`] and [`crate::typed_id!`]). It gives callers a level of
//! indirection over the `uuid` crate so that entity code does not need to depend on it directly.

use crate::{IdError, IdResult};
use rand::rngs::OsRng;
use rand::RngCore;
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A UUID-backed identifier.
///
/// Two identifiers are equal iff their 128 bits are equal. The all-zero value is the nil
/// identifier; it is also what [`Default`] returns, so a nil `Id` usually means "not assigned".
///
/// # Construction
/// - [`Id::new`] generates a random version 4 identifier.
/// - [`Id::must_new`] does the same but panics if the random source fails.
/// - [`Id::parse`] validates an externally supplied string.
///
/// # Display format
/// Always the lowercase hyphenated form, regardless of how the value was parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(Uuid);

impl Id {
    /// Generates a new random identifier.
    ///
    /// Randomness comes from the operating system via [`OsRng`], which is safe to use from any
    /// number of threads at once. The version 4 and RFC 4122 variant bits are set on the result.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Generation`] if the operating system cannot supply entropy. This is an
    /// environment problem rather than bad input; callers typically retry or fail at startup.
    pub fn new() -> IdResult<Self> {
        let mut bytes = [0u8; 16];
        if let Err(err) = OsRng.try_fill_bytes(&mut bytes) {
            tracing::error!("random source failed while generating a UUID: {}", err);
            return Err(IdError::Generation(err));
        }
        Ok(Self(uuid::Builder::from_random_bytes(bytes).into_uuid()))
    }

    /// Generates a new random identifier, panicking if the random source fails.
    ///
    /// Intended for places where propagating an error is impractical, such as building fixtures
    /// or one-off initialisation. Prefer [`Id::new`] everywhere else.
    ///
    /// # Panics
    ///
    /// Panics when [`Id::new`] would return [`IdError::Generation`].
    pub fn must_new() -> Self {
        match Self::new() {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Parses a UUID string.
    ///
    /// Accepted forms (any letter case):
    /// - hyphenated: `123e4567-e89b-12d3-a456-426614174000`
    /// - simple: `123e4567e89b12d3a456426614174000`
    /// - braced: `{123e4567-e89b-12d3-a456-426614174000}`
    /// - URN: `urn:uuid:123e4567-e89b-12d3-a456-426614174000`
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Parse`] carrying the offending input if `input` is none of the above.
    pub fn parse(input: &str) -> IdResult<Self> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|source| IdError::Parse {
                input: input.to_owned(),
                source,
            })
    }

    /// The nil (all-zero) identifier.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if every bit of the identifier is zero.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Wraps an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Builds an identifier from 16 big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Returns the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Consumes the identifier, returning the underlying UUID.
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }

    /// Returns the 16 bytes of the identifier in big-endian (network) order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s)
    }
}

impl From<Uuid> for Id {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Id> for Uuid {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl AsRef<Uuid> for Id {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}
