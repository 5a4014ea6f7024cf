//! Field-presence codec for JSON.
//!
//! Decides, per field, how an unset, empty or populated value is written to a
//! JSON object and what an absent key, an explicit `null` or an empty literal
//! reads back as. Behaviour depends on the field's [`ValueTypeCategory`] and
//! its [`NamingPolicy`]:
//!
//! | category         | unset    | empty  | absent / `null` decodes to |
//! |------------------|----------|--------|----------------------------|
//! | byte sequence    | `null`   | `""`   | unset                      |
//! | opaque document  | `null`   | `""`   | unset                      |
//! | keyed mapping    | `null`   | `{}`   | unset                      |
//! | text string      | n/a      | `""`   | `""`                       |
//!
//! Under [`NamingPolicy::ExplicitOmitOnEmpty`] unset and empty fields are left
//! out of the document entirely.
//!
//! ```
//! use std::sync::Arc;
//! use json_presence::{FieldDescriptor, Record, RecordShape, ValueTypeCategory};
//!
//! let shape = Arc::new(RecordShape::single(
//!     FieldDescriptor::new("Field", ValueTypeCategory::ByteSequence).with_name("field"),
//! ));
//! let record = Record::new(shape.clone());
//! assert_eq!(json_presence::encode(&record), r#"{"field":null}"#);
//! let back = json_presence::decode(r#"{"field":""}"#, &shape).unwrap();
//! assert_eq!(back.get("Field"), Some(&json_presence::FieldValue::bytes(Vec::<u8>::new())));
//! ```

mod category;
mod codec;
mod descriptor;
mod record;
mod value;

pub mod json;

use std::sync::Arc;

pub use category::{Presence, PresenceState, ValueTypeCategory};
pub use codec::PresenceCodec;
pub use descriptor::{FieldDescriptor, NamingPolicy, RecordShape, ShapeError};
pub use json::{DecodeError, DecodeOptions, EncodeOptions, JsonKind, PresenceDecoder, PresenceEncoder};
pub use record::{Record, RecordError};
pub use value::{FieldValue, Mapping, Payload, RawFragment, Slot};

/// Encodes `record` with default options.
pub fn encode(record: &Record) -> String {
    PresenceEncoder::new().encode(record)
}

/// Decodes `document` against `shape` with default options.
pub fn decode(document: &str, shape: &Arc<RecordShape>) -> Result<Record, DecodeError> {
    PresenceDecoder::new().decode(document, shape)
}
