//! Value-type categories and the presence capability shared by their payloads.

use std::fmt;

/// The semantic type of a field, which decides how its zero values are
/// written and how `null` / absent keys are read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTypeCategory {
    /// Raw bytes, written as a base64 string.
    ByteSequence,
    /// An already-encoded JSON fragment, re-emitted compactly.
    OpaqueDocument,
    /// Text keys mapped to arbitrary JSON values.
    KeyedMapping,
    /// Plain text. Has no unset state: its zero value is `""`.
    TextString,
}

impl ValueTypeCategory {
    pub const ALL: [ValueTypeCategory; 4] = [
        ValueTypeCategory::ByteSequence,
        ValueTypeCategory::OpaqueDocument,
        ValueTypeCategory::KeyedMapping,
        ValueTypeCategory::TextString,
    ];

    /// Whether the category can hold "no value" distinctly from an empty one.
    pub fn has_unset_state(self) -> bool {
        !matches!(self, ValueTypeCategory::TextString)
    }

    /// The literal an empty-but-set value of this category is written as.
    pub fn empty_literal(self) -> &'static str {
        match self {
            ValueTypeCategory::KeyedMapping => "{}",
            _ => "\"\"",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueTypeCategory::ByteSequence => "byte sequence",
            ValueTypeCategory::OpaqueDocument => "opaque document",
            ValueTypeCategory::KeyedMapping => "keyed mapping",
            ValueTypeCategory::TextString => "text string",
        }
    }
}

impl fmt::Display for ValueTypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three-way presence of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceState {
    Unset,
    Empty,
    Populated,
}

/// Presence predicates, implemented once per category payload.
///
/// `is_empty` is what omission decisions look at. It is true for the unset
/// marker as well, so `unset` and `empty` are omitted alike.
pub trait Presence {
    fn is_unset(&self) -> bool;

    fn is_empty(&self) -> bool;

    fn state(&self) -> PresenceState {
        if self.is_unset() {
            PresenceState::Unset
        } else if self.is_empty() {
            PresenceState::Empty
        } else {
            PresenceState::Populated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_text_lacks_unset_state() {
        let with_unset: Vec<_> = ValueTypeCategory::ALL
            .iter()
            .filter(|c| c.has_unset_state())
            .collect();
        assert_eq!(with_unset.len(), 3);
        assert!(!ValueTypeCategory::TextString.has_unset_state());
    }

    #[test]
    fn empty_literals() {
        assert_eq!(ValueTypeCategory::ByteSequence.empty_literal(), r#""""#);
        assert_eq!(ValueTypeCategory::OpaqueDocument.empty_literal(), r#""""#);
        assert_eq!(ValueTypeCategory::TextString.empty_literal(), r#""""#);
        assert_eq!(ValueTypeCategory::KeyedMapping.empty_literal(), "{}");
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ValueTypeCategory::KeyedMapping.to_string(), "keyed mapping");
    }
}
