//! In-memory field values.
//!
//! Categories that can tell "no value" apart from "zero-length value" hold
//! their payload in a [`Slot`]; text has no such marker and is a bare
//! `String`. [`FieldValue`] ties each payload to its category.

use std::str::FromStr;

use serde_json::value::RawValue;
use serde_json::Value;

use crate::category::{Presence, ValueTypeCategory};

/// Payload of a [`ValueTypeCategory::KeyedMapping`] field.
pub type Mapping = serde_json::Map<String, Value>;

/// The JSON empty string, which is also the opaque category's empty literal.
const EMPTY_STRING_LITERAL: &str = "\"\"";

/// A field slot that is either unset or holds a value, possibly zero-length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    Unset,
    Set(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unset
    }
}

impl<T> Slot<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Slot::Set(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Slot::Unset => None,
            Slot::Set(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Unset => None,
            Slot::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Slot::Unset,
            Some(value) => Slot::Set(value),
        }
    }
}

/// Length test for the payloads a [`Slot`] can carry.
pub trait Payload {
    fn is_zero_length(&self) -> bool;
}

impl Payload for Vec<u8> {
    fn is_zero_length(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for Mapping {
    fn is_zero_length(&self) -> bool {
        self.is_empty()
    }
}

impl Payload for RawFragment {
    fn is_zero_length(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Payload> Presence for Slot<T> {
    fn is_unset(&self) -> bool {
        matches!(self, Slot::Unset)
    }

    fn is_empty(&self) -> bool {
        match self {
            Slot::Unset => true,
            Slot::Set(value) => value.is_zero_length(),
        }
    }
}

impl Presence for String {
    fn is_unset(&self) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

/// An already-encoded JSON fragment, or the empty fragment.
///
/// Non-empty fragments are always syntactically valid JSON with surrounding
/// whitespace removed. The fragment `""` (the JSON empty string) is stored
/// as the empty fragment, because that is what it encodes to and decodes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawFragment(String);

impl RawFragment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates `text` as a single JSON value. An empty `text` yields the
    /// empty fragment.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        if text.is_empty() {
            return Ok(Self::empty());
        }
        let raw: &RawValue = serde_json::from_str(text)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_value(value: &Value) -> Self {
        Self::from_verified(value.to_string())
    }

    pub(crate) fn from_raw(raw: &RawValue) -> Self {
        Self::from_verified(raw.get().to_owned())
    }

    fn from_verified(text: String) -> Self {
        if text == EMPTY_STRING_LITERAL {
            Self::empty()
        } else {
            Self(text)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for RawFragment {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A field value tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bytes(Slot<Vec<u8>>),
    Opaque(Slot<RawFragment>),
    Mapping(Slot<Mapping>),
    Text(String),
}

impl FieldValue {
    /// The value a field of `category` holds before anything is assigned,
    /// and what an absent or `null` key decodes to.
    pub fn zero(category: ValueTypeCategory) -> Self {
        match category {
            ValueTypeCategory::ByteSequence => FieldValue::Bytes(Slot::Unset),
            ValueTypeCategory::OpaqueDocument => FieldValue::Opaque(Slot::Unset),
            ValueTypeCategory::KeyedMapping => FieldValue::Mapping(Slot::Unset),
            ValueTypeCategory::TextString => FieldValue::Text(String::new()),
        }
    }

    /// The empty-but-set value of `category`. Same as [`FieldValue::zero`]
    /// for text.
    pub fn empty(category: ValueTypeCategory) -> Self {
        match category {
            ValueTypeCategory::ByteSequence => FieldValue::Bytes(Slot::Set(Vec::new())),
            ValueTypeCategory::OpaqueDocument => FieldValue::Opaque(Slot::Set(RawFragment::empty())),
            ValueTypeCategory::KeyedMapping => FieldValue::Mapping(Slot::Set(Mapping::new())),
            ValueTypeCategory::TextString => FieldValue::Text(String::new()),
        }
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        FieldValue::Bytes(Slot::Set(value.into()))
    }

    pub fn opaque(value: RawFragment) -> Self {
        FieldValue::Opaque(Slot::Set(value))
    }

    pub fn mapping(value: Mapping) -> Self {
        FieldValue::Mapping(Slot::Set(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn category(&self) -> ValueTypeCategory {
        match self {
            FieldValue::Bytes(_) => ValueTypeCategory::ByteSequence,
            FieldValue::Opaque(_) => ValueTypeCategory::OpaqueDocument,
            FieldValue::Mapping(_) => ValueTypeCategory::KeyedMapping,
            FieldValue::Text(_) => ValueTypeCategory::TextString,
        }
    }

    pub fn as_bytes(&self) -> Option<&Slot<Vec<u8>>> {
        match self {
            FieldValue::Bytes(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Slot<RawFragment>> {
        match self {
            FieldValue::Opaque(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Slot<Mapping>> {
        match self {
            FieldValue::Mapping(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn presence(&self) -> &dyn Presence {
        match self {
            FieldValue::Bytes(slot) => slot,
            FieldValue::Opaque(slot) => slot,
            FieldValue::Mapping(slot) => slot,
            FieldValue::Text(text) => text,
        }
    }
}

impl Presence for FieldValue {
    fn is_unset(&self) -> bool {
        self.presence().is_unset()
    }

    fn is_empty(&self) -> bool {
        self.presence().is_empty()
    }
}

impl From<Slot<Vec<u8>>> for FieldValue {
    fn from(value: Slot<Vec<u8>>) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        FieldValue::bytes(value)
    }
}

impl From<Slot<RawFragment>> for FieldValue {
    fn from(value: Slot<RawFragment>) -> Self {
        FieldValue::Opaque(value)
    }
}

impl From<RawFragment> for FieldValue {
    fn from(value: RawFragment) -> Self {
        FieldValue::opaque(value)
    }
}

impl From<Slot<Mapping>> for FieldValue {
    fn from(value: Slot<Mapping>) -> Self {
        FieldValue::Mapping(value)
    }
}

impl From<Mapping> for FieldValue {
    fn from(value: Mapping) -> Self {
        FieldValue::mapping(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::PresenceState;
    use serde_json::json;

    #[test]
    fn slot_presence_matrix() {
        let unset: Slot<Vec<u8>> = Slot::Unset;
        let empty = Slot::Set(Vec::<u8>::new());
        let populated = Slot::Set(vec![1u8]);

        assert!(unset.is_unset() && unset.is_empty());
        assert!(!empty.is_unset() && empty.is_empty());
        assert!(!populated.is_unset() && !populated.is_empty());

        assert_eq!(unset.state(), PresenceState::Unset);
        assert_eq!(empty.state(), PresenceState::Empty);
        assert_eq!(populated.state(), PresenceState::Populated);
    }

    #[test]
    fn text_is_never_unset() {
        assert_eq!(String::new().state(), PresenceState::Empty);
        assert_eq!("x".to_string().state(), PresenceState::Populated);
    }

    #[test]
    fn zero_and_empty_per_category() {
        for category in ValueTypeCategory::ALL {
            let zero = FieldValue::zero(category);
            let empty = FieldValue::empty(category);
            assert_eq!(zero.category(), category);
            assert_eq!(empty.category(), category);
            assert!(zero.is_empty() && empty.is_empty());
            assert!(!empty.is_unset());
            assert_eq!(zero.is_unset(), category.has_unset_state());
            assert_eq!(zero == empty, !category.has_unset_state());
        }
    }

    #[test]
    fn raw_fragment_trims_and_validates() {
        let fragment = RawFragment::parse("  {\"a\": [1, 2]}  ").unwrap();
        assert_eq!(fragment.as_str(), "{\"a\": [1, 2]}");
        assert!(RawFragment::parse("{\"a\":").is_err());
        assert!(RawFragment::parse("1 2").is_err());
        assert!(RawFragment::parse("").unwrap().is_empty());
    }

    #[test]
    fn raw_fragment_empty_string_literal_is_empty() {
        assert!(RawFragment::parse("\"\"").unwrap().is_empty());
        assert!(RawFragment::from_value(&json!("")).is_empty());
        assert_eq!(RawFragment::from_value(&json!("x")).as_str(), "\"x\"");
    }

    #[test]
    fn raw_fragment_from_str() {
        let fragment: RawFragment = "[true,null]".parse().unwrap();
        assert_eq!(fragment.into_string(), "[true,null]");
    }

    #[test]
    fn conversions_pick_category() {
        assert_eq!(FieldValue::from("a").category(), ValueTypeCategory::TextString);
        assert_eq!(FieldValue::from(vec![1u8]).category(), ValueTypeCategory::ByteSequence);
        assert_eq!(
            FieldValue::from(Slot::<Mapping>::Unset).category(),
            ValueTypeCategory::KeyedMapping
        );
        assert_eq!(
            FieldValue::from(RawFragment::empty()).category(),
            ValueTypeCategory::OpaqueDocument
        );
    }

    #[test]
    fn slot_option_conversions() {
        let slot: Slot<Vec<u8>> = None.into();
        assert!(!slot.is_set());
        let slot: Slot<Vec<u8>> = Some(vec![7]).into();
        assert_eq!(slot.get(), Some(&vec![7]));
        assert_eq!(slot.into_option(), Some(vec![7]));
    }
}
