//! SQLite storage for [`Id`] via `rusqlite`.
//!
//! Identifiers are written as 16-byte BLOBs. Reading accepts either a 16-byte BLOB or UUID text
//! in any form [`Id::parse`] understands, stored as TEXT or as a BLOB, so tables that
//! historically stored identifiers as strings keep working.

use crate::{Id, IdError, IdResult};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

impl Id {
    /// Converts a raw SQLite value into an identifier.
    ///
    /// A 16-byte BLOB holds the raw identifier. A BLOB of any other length, like a TEXT value, is
    /// read as UUID text.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Adapter`] if the value is neither 16 raw bytes nor a UTF-8 UUID string.
    pub fn from_sql_value(value: ValueRef<'_>) -> IdResult<Self> {
        match value {
            ValueRef::Blob(bytes) => match <[u8; 16]>::try_from(bytes) {
                Ok(raw) => Ok(Id::from_bytes(raw)),
                // Some drivers hand text UUIDs over as BLOBs.
                Err(_) => parse_text(bytes).map_err(|_| IdError::Adapter {
                    reason: format!(
                        "expected a 16-byte BLOB or UUID text, found {} bytes",
                        bytes.len()
                    ),
                }),
            },
            ValueRef::Text(text) => parse_text(text),
            other => Err(IdError::Adapter {
                reason: format!("expected BLOB or TEXT, found {}", other.data_type()),
            }),
        }
    }
}

fn parse_text(text: &[u8]) -> IdResult<Id> {
    let text = std::str::from_utf8(text).map_err(|err| IdError::Adapter {
        reason: format!("TEXT value is not UTF-8: {err}"),
    })?;
    Id::parse(text).map_err(|err| IdError::Adapter {
        reason: err.to_string(),
    })
}

impl ToSql for Id {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Blob(self.as_bytes())))
    }
}

impl FromSql for Id {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Id::from_sql_value(value).map_err(|err| {
            tracing::warn!("rejected database value for UUID column: {}", err);
            FromSqlError::Other(Box::new(err))
        })
    }
}
