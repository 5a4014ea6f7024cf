//! `PresenceDecoder` reads a JSON object back into a [`Record`].
//!
//! An absent key and an explicit `null` decode alike: to the unset marker for
//! categories that have one, to `""` for text. Empty literals (`""`, `{}`)
//! decode to empty-but-set values. The naming policy plays no part.
//!
//! Keys match encoded names exactly, with no case-insensitive fallback, so
//! `"NAME"` does not fill a field encoded as `"name"`. The root must be an
//! object; a `null` root is a [`DecodeError::TypeMismatch`], not an empty
//! record.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;
use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::category::ValueTypeCategory;
use crate::descriptor::{FieldDescriptor, RecordShape};
use crate::record::Record;
use crate::value::{FieldValue, Mapping, RawFragment, Slot};

use super::error::DecodeError;
use super::options::DecodeOptions;
use super::util::JsonKind;

#[derive(Debug, Clone, Default)]
pub struct PresenceDecoder {
    options: DecodeOptions,
}

impl PresenceDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn decode(&self, document: &str, shape: &Arc<RecordShape>) -> Result<Record, DecodeError> {
        let root: &RawValue = serde_json::from_str(document)?;
        self.decode_root(root, shape)
    }

    /// Same as [`PresenceDecoder::decode`] for raw bytes. Non-UTF-8 input is
    /// a [`DecodeError::MalformedDocument`].
    pub fn decode_slice(&self, document: &[u8], shape: &Arc<RecordShape>) -> Result<Record, DecodeError> {
        let root: &RawValue = serde_json::from_slice(document)?;
        self.decode_root(root, shape)
    }

    fn decode_root(&self, root: &RawValue, shape: &Arc<RecordShape>) -> Result<Record, DecodeError> {
        let kind = JsonKind::of(root.get());
        if kind != JsonKind::Object {
            debug!(found = %kind, "document root is not an object");
            return Err(DecodeError::TypeMismatch {
                field: None,
                expected: JsonKind::Object.name(),
                found: kind,
            });
        }
        // Repeated keys keep the last value.
        let entries: IndexMap<String, &RawValue> = serde_json::from_str(root.get())?;

        for key in entries.keys() {
            if shape.is_encoded_name(key) {
                continue;
            }
            if self.options.deny_unknown_fields {
                debug!(key = %key, "rejecting unknown key");
                return Err(DecodeError::UnknownField(key.clone()));
            }
            debug!(key = %key, "ignoring unknown key");
        }

        let values = shape
            .fields()
            .iter()
            .map(|field| decode_field(field, entries.get(field.encoded_name()).copied()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Record::from_parts(Arc::clone(shape), values))
    }
}

fn decode_field(field: &FieldDescriptor, raw: Option<&RawValue>) -> Result<FieldValue, DecodeError> {
    let category = field.category();
    let Some(raw) = raw else {
        trace!(field = field.encoded_name(), "key absent");
        return Ok(FieldValue::zero(category));
    };
    let text = raw.get();
    let kind = JsonKind::of(text);
    if kind == JsonKind::Null {
        trace!(field = field.encoded_name(), "explicit null");
        return Ok(FieldValue::zero(category));
    }

    let mismatch = |expected: &'static str| DecodeError::TypeMismatch {
        field: Some(field.encoded_name().to_owned()),
        expected,
        found: kind,
    };

    match category {
        ValueTypeCategory::ByteSequence => {
            if kind != JsonKind::String {
                return Err(mismatch("base64 string"));
            }
            let encoded: String = serde_json::from_str(text)?;
            let bytes = STANDARD
                .decode(encoded.as_bytes())
                .map_err(|source| DecodeError::InvalidBase64 {
                    field: field.encoded_name().to_owned(),
                    source,
                })?;
            Ok(FieldValue::Bytes(Slot::Set(bytes)))
        }
        ValueTypeCategory::OpaqueDocument => Ok(FieldValue::Opaque(Slot::Set(RawFragment::from_raw(raw)))),
        ValueTypeCategory::KeyedMapping => {
            if kind != JsonKind::Object {
                return Err(mismatch("object"));
            }
            let map: Mapping = serde_json::from_str(text)?;
            Ok(FieldValue::Mapping(Slot::Set(map)))
        }
        ValueTypeCategory::TextString => {
            if kind != JsonKind::String {
                return Err(mismatch("string"));
            }
            let text: String = serde_json::from_str(text)?;
            Ok(FieldValue::Text(text))
        }
    }
}
