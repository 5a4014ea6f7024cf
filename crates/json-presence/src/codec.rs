//! Encoder/decoder pair.

use std::sync::Arc;

use crate::descriptor::RecordShape;
use crate::json::{DecodeError, DecodeOptions, EncodeOptions, PresenceDecoder, PresenceEncoder};
use crate::record::Record;

pub struct PresenceCodec {
    pub encoder: PresenceEncoder,
    pub decoder: PresenceDecoder,
}

impl Default for PresenceCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceCodec {
    pub fn new() -> Self {
        Self::with_options(EncodeOptions::default(), DecodeOptions::default())
    }

    pub fn with_options(encode: EncodeOptions, decode: DecodeOptions) -> Self {
        Self {
            encoder: PresenceEncoder::with_options(encode),
            decoder: PresenceDecoder::with_options(decode),
        }
    }

    pub fn id(&self) -> &'static str {
        "json"
    }

    pub fn encode(&mut self, record: &Record) -> String {
        self.encoder.encode(record)
    }

    pub fn decode(&self, document: &str, shape: &Arc<RecordShape>) -> Result<Record, DecodeError> {
        self.decoder.decode(document, shape)
    }

    /// Encodes `record` and decodes the result against the same shape.
    pub fn round_trip(&mut self, record: &Record) -> Result<Record, DecodeError> {
        let document = self.encode(record);
        self.decode(&document, record.shape())
    }
}
