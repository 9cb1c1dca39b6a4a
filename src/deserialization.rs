use crate::error::RecordError;
use crate::record::Record;
use serde::de::{Deserialize, DeserializeOwned, Deserializer, MapAccess, Visitor};
use smol_str::SmolStr;
use std::fmt;
use std::marker::PhantomData;

// ─── JSON form ──────────────────────────────────────────────────────────────

/// A record deserializes from any map with string keys, keeping the entries
/// in document order.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Record<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for RecordVisitor<T> {
            type Value = Record<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<SmolStr, T>()? {
                    record.put(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor(PhantomData))
    }
}

// ─── Byte form ──────────────────────────────────────────────────────────────

/// Decode a record from the CBOR byte form produced by
/// [`to_bytes`](crate::serialization::to_bytes).
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<Record<T>, RecordError> {
    cbor4ii::serde::from_slice(bytes).map_err(|e| RecordError::CborError(e.to_string()))
}

// ─── Object-shaped constructors ─────────────────────────────────────────────

impl Record<serde_json::Value> {
    /// Build a record from a JSON object, keeping field order. A JSON `null`
    /// member becomes the stored-null state for its key.
    ///
    /// Every other JSON kind fails with [`RecordError::NotAnObject`]: only an
    /// object carries the string-keyed field set a record represents.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        match value {
            serde_json::Value::Object(fields) => {
                let mut record = Record::with_capacity(fields.len());
                for (key, value) in fields {
                    match value {
                        serde_json::Value::Null => {
                            record.put(key, None::<serde_json::Value>);
                        }
                        other => {
                            record.put(key, other);
                        }
                    }
                }
                Ok(record)
            }
            other => Err(RecordError::NotAnObject(json_kind(&other))),
        }
    }

    /// Build a record from an arbitrary value's own fields, via its
    /// `Serialize` impl. The value must serialize to an object.
    pub fn from_object(value: &impl serde::Serialize) -> Result<Self, RecordError> {
        Self::from_json(serde_json::to_value(value)?)
    }
}

impl TryFrom<serde_json::Value> for Record<serde_json::Value> {
    type Error = RecordError;

    fn try_from(value: serde_json::Value) -> Result<Self, RecordError> {
        Record::from_json(value)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
