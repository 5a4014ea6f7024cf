//! Encoder and decoder settings.

/// Settings for [`super::PresenceEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Escape `<`, `>` and `&` inside strings as `\u003c`, `\u003e`, `\u0026`.
    pub escape_html: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

impl EncodeOptions {
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}

/// Settings for [`super::PresenceDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on keys that name no field of the shape instead of ignoring them.
    pub deny_unknown_fields: bool,
}

impl DecodeOptions {
    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}
