//! Generation and parsing for identifier types that wrap an [`Id`].

use crate::{Id, IdError, IdResult};
use std::any::type_name;
use std::fmt;

/// Generation and parsing functions specialised to a wrapper type `T`.
///
/// Built once per wrapper type from a constructor `fn(Id) -> T` (a tuple-struct constructor
/// works directly). Because [`Initializers::new`] is `const`, the factory can live in a `const`
/// item next to the type it serves:
///
/// ```
/// use typed_uuid::{Id, Initializers};
///
/// #[derive(Debug, PartialEq)]
/// struct OrderId(Id);
///
/// const ORDER_IDS: Initializers<OrderId> = Initializers::new(OrderId);
///
/// # fn main() -> Result<(), typed_uuid::IdError> {
/// let order = ORDER_IDS.new_id()?;
/// assert_eq!(ORDER_IDS.parse_id(&order.0.to_string())?, order);
/// # Ok(())
/// # }
/// ```
pub struct Initializers<T> {
    wrap: fn(Id) -> T,
}

impl<T> Initializers<T> {
    /// Creates the factory from the wrapper type's constructor.
    pub const fn new(wrap: fn(Id) -> T) -> Self {
        Self { wrap }
    }

    /// Applies the constructor to an existing identifier.
    pub fn wrap(&self, id: Id) -> T {
        (self.wrap)(id)
    }

    /// The wrapper around the nil identifier.
    pub fn nil(&self) -> T {
        self.wrap(Id::nil())
    }

    /// Generates a fresh random `T`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Wrapped`] around [`IdError::Generation`] if the random source fails.
    pub fn new_id(&self) -> IdResult<T> {
        Id::new()
            .map(self.wrap)
            .map_err(|err| wrapped::<T>("generate", err))
    }

    /// Generates a fresh random `T`, panicking if the random source fails.
    ///
    /// # Panics
    ///
    /// Panics when [`Initializers::new_id`] would return an error.
    pub fn must_new_id(&self) -> T {
        self.wrap(Id::must_new())
    }

    /// Parses `input` into a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Wrapped`] around [`IdError::Parse`] if `input` is not a UUID.
    pub fn parse_id(&self, input: &str) -> IdResult<T> {
        Id::parse(input)
            .map(self.wrap)
            .map_err(|err| wrapped::<T>("parse", err))
    }
}

// Manual impls: derives would needlessly require `T: Clone` etc.
impl<T> Clone for Initializers<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Initializers<T> {}

impl<T> fmt::Debug for Initializers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initializers")
            .field("type", &type_name::<T>())
            .finish()
    }
}

fn wrapped<T>(action: &'static str, source: IdError) -> IdError {
    IdError::Wrapped {
        action,
        type_name: type_name::<T>(),
        source: Box::new(source),
    }
}

/// Declares a newtype identifier over [`Id`].
///
/// The generated type gets `new`, `must_new` and `parse` routed through a per-type
/// [`Initializers`], along with `Display`, `FromStr`, `Default` (nil), ordering, hashing and
/// conversions to and from [`Id`]. Attributes on the declaration are passed through, so serde
/// support is a matter of adding the derives:
///
/// ```
/// use typed_uuid::typed_id;
///
/// typed_id! {
///     #[derive(serde::Serialize, serde::Deserialize)]
///     #[serde(transparent)]
///     pub struct InvoiceId;
/// }
///
/// let invoice = InvoiceId::must_new();
/// assert!(!invoice.is_nil());
/// ```
#[macro_export]
macro_rules! typed_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($crate::Id);

        impl $name {
            const INITIALIZERS: $crate::Initializers<$name> = $crate::Initializers::new($name);

            /// Generates a new random identifier.
            ///
            /// # Errors
            ///
            /// Fails if the operating system random source fails.
            #[allow(dead_code)]
            pub fn new() -> $crate::IdResult<Self> {
                Self::INITIALIZERS.new_id()
            }

            /// Generates a new random identifier.
            ///
            /// # Panics
            ///
            /// Panics if the operating system random source fails.
            #[allow(dead_code)]
            pub fn must_new() -> Self {
                Self::INITIALIZERS.must_new_id()
            }

            /// Parses a UUID string.
            ///
            /// # Errors
            ///
            /// Fails if `input` is not a UUID.
            #[allow(dead_code)]
            pub fn parse(input: &str) -> $crate::IdResult<Self> {
                Self::INITIALIZERS.parse_id(input)
            }

            #[allow(dead_code)]
            pub const fn id(&self) -> $crate::Id {
                self.0
            }

            #[allow(dead_code)]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::std::convert::From<$crate::Id> for $name {
            fn from(id: $crate::Id) -> Self {
                Self(id)
            }
        }

        impl ::std::convert::From<$name> for $crate::Id {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Clone, PartialEq)]
    struct UserId {
        id: Id,
    }

    fn user_id(id: Id) -> UserId {
        UserId { id }
    }

    const USER_IDS: Initializers<UserId> = Initializers::new(user_id);

    #[test]
    fn test_new_id_wraps_generated_value() {
        let user = USER_IDS.new_id().unwrap();

        assert!(!user.id.is_nil());
    }

    #[test]
    fn test_parse_id_round_trips_new_id() {
        let user = USER_IDS.new_id().unwrap();
        let parsed = USER_IDS.parse_id(&user.id.to_string()).unwrap();

        assert_eq!(user, parsed);
    }

    #[test]
    fn test_must_new_id_is_not_nil() {
        assert!(!USER_IDS.must_new_id().id.is_nil());
    }

    #[test]
    fn test_parse_id_error_names_wrapper_type() {
        let err = USER_IDS.parse_id("not-a-uuid").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        match &err {
            IdError::Wrapped {
                action, type_name, ..
            } => {
                assert_eq!(*action, "parse");
                assert!(type_name.ends_with("UserId"));
            }
            other => panic!("expected Wrapped error, got {other:?}"),
        }
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[test]
    fn test_nil_and_wrap() {
        assert!(USER_IDS.nil().id.is_nil());

        let id = Id::must_new();
        assert_eq!(USER_IDS.wrap(id), UserId { id });
    }

    #[test]
    fn test_closures_without_captures_are_accepted() {
        let ids = Initializers::new(|id: Id| (id, "order"));
        let (id, tag) = ids.must_new_id();

        assert!(!id.is_nil());
        assert_eq!(tag, "order");
    }

    #[test]
    fn test_debug_shows_wrapper_type() {
        let debug = format!("{USER_IDS:?}");

        assert!(debug.contains("UserId"));
    }

    crate::typed_id! {
        struct AccountId;
    }

    #[test]
    fn test_typed_id_macro_inside_crate() {
        let account = AccountId::new().unwrap();
        let parsed: AccountId = account.to_string().parse().unwrap();

        assert_eq!(account, parsed);
        assert!(AccountId::default().is_nil());
        assert_eq!(Id::from(account), account.id());
    }
}
