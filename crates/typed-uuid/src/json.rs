//! JSON support for [`Id`].
//!
//! An identifier is always exchanged as a bare string holding the canonical text form, never as
//! a structure or a byte array, regardless of the serializer.

use crate::{Id, IdError, IdResult};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = Uuid::encode_buffer();
        serializer.serialize_str(self.as_uuid().hyphenated().encode_lower(&mut buf))
    }
}

struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a UUID string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Id, E>
    where
        E: de::Error,
    {
        Uuid::parse_str(v).map(Id::from).map_err(|source| {
            E::custom(IdError::JsonInvalidUuid {
                input: v.to_owned(),
                source,
            })
        })
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(IdVisitor)
    }
}

impl Id {
    /// Renders the identifier as a JSON string literal, e.g. `"123e4567-..."`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Json`] if the serializer fails, which does not happen for a plain
    /// string but is not ruled out by `serde_json`'s signature.
    pub fn to_json(&self) -> IdResult<String> {
        serde_json::to_string(self).map_err(IdError::Json)
    }

    /// Reads an identifier from a JSON document consisting of a single string.
    ///
    /// # Errors
    ///
    /// - [`IdError::Json`] if `json` is not valid JSON.
    /// - [`IdError::JsonNotString`] if it is valid JSON but not a string.
    /// - [`IdError::JsonInvalidUuid`] if it is a string but not a UUID.
    pub fn from_json(json: &str) -> IdResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(IdError::Json)?;
        let text = match value {
            Value::String(text) => text,
            other => {
                return Err(IdError::JsonNotString {
                    found: json_kind(&other),
                })
            }
        };

        match Uuid::parse_str(&text) {
            Ok(uuid) => Ok(Id::from(uuid)),
            Err(source) => Err(IdError::JsonInvalidUuid {
                input: text,
                source,
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use proptest::prelude::*;

    const EXAMPLE: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: Id,
        customer: Option<Id>,
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let id = Id::parse(EXAMPLE).unwrap();
        let json = serde_json::to_value(id).unwrap();

        assert_eq!(json, Value::String(EXAMPLE.into()));
    }

    #[test]
    fn test_json_round_trip() {
        let id = Id::must_new();
        let json = id.to_json().unwrap();

        assert!(json.starts_with('"') && json.ends_with('"'));
        assert_eq!(Id::from_json(&json).unwrap(), id);
    }

    #[test]
    fn test_round_trip_inside_struct() {
        let order = Order {
            id: Id::must_new(),
            customer: None,
        };
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, parsed);
        assert!(json.contains(&format!("\"id\":\"{}\"", order.id)));
    }

    #[test]
    fn test_deserialize_normalises_uppercase() {
        let id: Id = serde_json::from_str("\"123E4567-E89B-12D3-A456-426614174000\"").unwrap();

        assert_eq!(id.to_json().unwrap(), format!("\"{EXAMPLE}\""));
    }

    #[test]
    fn test_deserialize_rejects_non_string() {
        let err = serde_json::from_str::<Id>("42").unwrap_err();
        assert!(err.to_string().contains("expected a UUID string"));

        let err = serde_json::from_str::<Id>(&format!("{{\"id\":\"{EXAMPLE}\"}}")).unwrap_err();
        assert!(err.to_string().contains("expected a UUID string"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_uuid_string() {
        let err = serde_json::from_str::<Id>("\"not-a-uuid\"").unwrap_err();

        assert!(err.to_string().contains("could not parse uuid string \"not-a-uuid\""));
    }

    #[test]
    fn test_from_json_not_a_string() {
        let err = Id::from_json("[1, 2]").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Serialization);
        assert!(matches!(err, IdError::JsonNotString { found: "array" }));
    }

    #[test]
    fn test_from_json_invalid_uuid() {
        let err = Id::from_json("\"nope\"").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Serialization);
        match err {
            IdError::JsonInvalidUuid { input, .. } => assert_eq!(input, "nope"),
            other => panic!("expected JsonInvalidUuid, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Id::from_json("\"unterminated").unwrap_err();

        assert!(matches!(err, IdError::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    proptest! {
        #[test]
        fn prop_json_round_trip(value in any::<u128>()) {
            let id = Id::from_uuid(Uuid::from_u128(value));
            let json = id.to_json().unwrap();

            let value: Value = serde_json::from_str(&json).unwrap();

            prop_assert_eq!(value, Value::String(id.to_string()));
            prop_assert_eq!(Id::from_json(&json).unwrap(), id);
        }
    }
}
