//! Decode error type.

use thiserror::Error;

use super::util::JsonKind;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
    #[error("type mismatch at {}: expected {expected}, found {found}", location(.field))]
    TypeMismatch {
        /// `None` when the document root itself has the wrong kind.
        field: Option<String>,
        expected: &'static str,
        found: JsonKind,
    },
    #[error("field `{field}` is not valid base64: {source}")]
    InvalidBase64 {
        field: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

impl DecodeError {
    /// The encoded name of the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedDocument(_) => None,
            DecodeError::TypeMismatch { field, .. } => field.as_deref(),
            DecodeError::InvalidBase64 { field, .. } | DecodeError::UnknownField(field) => {
                Some(field)
            }
        }
    }
}

fn location(field: &Option<String>) -> String {
    match field {
        Some(name) => format!("field `{name}`"),
        None => "document root".to_owned(),
    }
}
