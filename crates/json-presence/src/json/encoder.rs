//! `PresenceEncoder` writes a [`Record`] as a compact JSON object.
//!
//! Keys follow field declaration order. Per field:
//! - `Default` / `Explicit`: always written; unset as `null`, empty as the
//!   category's empty literal.
//! - `ExplicitOmitOnEmpty`: skipped whenever the value is empty, which
//!   includes unset.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::trace;

use crate::category::Presence;
use crate::record::Record;
use crate::value::{FieldValue, Slot};

use super::options::EncodeOptions;
use super::util::{write_json_compact, write_json_string, write_object_sorted};

pub struct PresenceEncoder {
    options: EncodeOptions,
    out: String,
}

impl Default for PresenceEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceEncoder {
    pub fn new() -> Self {
        Self::with_options(EncodeOptions::default())
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    pub fn options(&self) -> EncodeOptions {
        self.options
    }

    pub fn encode(&mut self, record: &Record) -> String {
        self.out.clear();
        self.out.push('{');
        let mut first = true;
        for (field, value) in record.iter() {
            if field.policy().omits_empty() && value.is_empty() {
                trace!(field = field.encoded_name(), state = ?value.state(), "omitting empty field");
                continue;
            }
            if !first {
                self.out.push(',');
            }
            first = false;
            self.write_str(field.encoded_name());
            self.out.push(':');
            self.write_value(value);
        }
        self.out.push('}');
        std::mem::take(&mut self.out)
    }

    pub fn encode_to_vec(&mut self, record: &Record) -> Vec<u8> {
        self.encode(record).into_bytes()
    }

    fn write_value(&mut self, value: &FieldValue) {
        match value {
            FieldValue::Bytes(Slot::Unset)
            | FieldValue::Opaque(Slot::Unset)
            | FieldValue::Mapping(Slot::Unset) => self.out.push_str("null"),
            FieldValue::Bytes(Slot::Set(bytes)) => {
                let encoded = STANDARD.encode(bytes);
                self.write_str(&encoded);
            }
            FieldValue::Opaque(Slot::Set(fragment)) => {
                if fragment.is_empty() {
                    self.out.push_str(value.category().empty_literal());
                } else {
                    write_json_compact(&mut self.out, fragment.as_str(), self.options.escape_html);
                }
            }
            FieldValue::Mapping(Slot::Set(map)) => {
                write_object_sorted(&mut self.out, map, self.options.escape_html)
            }
            FieldValue::Text(text) => self.write_str(text),
        }
    }

    fn write_str(&mut self, s: &str) {
        write_json_string(&mut self.out, s, self.options.escape_html);
    }
}
