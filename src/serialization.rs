use crate::error::RecordError;
use crate::record::Record;
use serde::ser::{Serialize, SerializeMap, Serializer};

// ─── JSON form ──────────────────────────────────────────────────────────────

/// A record serializes as an object holding exactly its non-null entries,
/// in insertion order. An empty record is `{}`, never `[]`. Nested records
/// render recursively the same way.
impl<T: Serialize> Serialize for Record<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.iter().count()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<T: Serialize> Record<T> {
    /// The record's plain form as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, RecordError> {
        Ok(serde_json::to_value(self)?)
    }
}

// ─── Byte form ──────────────────────────────────────────────────────────────

/// Encode the record's plain form as CBOR bytes.
///
/// The byte form carries exactly the `get_all()` entries; keys holding the
/// stored-null state at serialization time are lost.
pub fn to_bytes<T: Serialize>(record: &Record<T>) -> Result<Vec<u8>, RecordError> {
    cbor4ii::serde::to_vec(Vec::new(), record).map_err(|e| RecordError::CborError(e.to_string()))
}
