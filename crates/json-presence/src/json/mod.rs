//! JSON encoder/decoder for record shapes.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod util;

pub use decoder::PresenceDecoder;
pub use encoder::PresenceEncoder;
pub use error::DecodeError;
pub use options::{DecodeOptions, EncodeOptions};
pub use util::JsonKind;
