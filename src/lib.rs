//! Ordered string-keyed records with rule-based field mapping.
//!
//! The crate has two pieces:
//!
//! - [`Record<T>`]: an insertion-ordered map from string keys to nullable
//!   values of one element type, with presence-sensitive conditional
//!   operations and JSON/CBOR serialization. A key can be present while
//!   holding *no* value (the stored-null state), which containment checks
//!   see but iteration and serialization do not.
//! - [`mapper::map`]: a single-pass algorithm that copies a record's
//!   entries into the setter capabilities of an arbitrary destination,
//!   renaming and transforming fields through a [`Rule`] table.
//!
//! ```
//! use recmap::{record, Record};
//!
//! let mut rec: Record<i64> = record! { "id" => 1, "count" => 2 };
//! rec.put("count", 20);
//! assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["id", "count"]);
//! assert_eq!(serde_json::to_string(&rec).unwrap(), r#"{"id":1,"count":20}"#);
//! ```

pub mod deserialization;
pub mod error;
pub mod mapper;
pub mod record;
pub mod serialization;

pub use deserialization::from_bytes;
pub use error::RecordError;
pub use mapper::rule::{Row, Rule};
pub use mapper::{FieldSetter, RuleEntry, Rules};
pub use record::Record;
pub use serialization::to_bytes;
