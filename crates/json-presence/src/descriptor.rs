//! Field descriptors and record shapes.

use std::collections::HashSet;

use thiserror::Error;

use crate::category::ValueTypeCategory;

/// How a field is named in the document and whether empty values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingPolicy {
    /// Written under the declared name, always.
    Default,
    /// Written under an assigned name, always.
    Explicit,
    /// Written under an assigned name, only when the value is not empty.
    ExplicitOmitOnEmpty,
}

impl NamingPolicy {
    pub fn omits_empty(self) -> bool {
        matches!(self, NamingPolicy::ExplicitOmitOnEmpty)
    }
}

/// Static metadata for one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    category: ValueTypeCategory,
    declared_name: String,
    encoded_name: String,
    policy: NamingPolicy,
}

impl FieldDescriptor {
    /// A field written under its declared name ([`NamingPolicy::Default`]).
    pub fn new(declared_name: impl Into<String>, category: ValueTypeCategory) -> Self {
        let declared_name = declared_name.into();
        Self {
            category,
            encoded_name: declared_name.clone(),
            declared_name,
            policy: NamingPolicy::Default,
        }
    }

    /// Assigns an explicit encoded name ([`NamingPolicy::Explicit`]).
    pub fn with_name(self, encoded_name: impl Into<String>) -> Self {
        self.renamed(encoded_name.into(), NamingPolicy::Explicit)
    }

    /// Assigns an explicit encoded name and omits the field when empty
    /// ([`NamingPolicy::ExplicitOmitOnEmpty`]).
    pub fn with_name_omit_empty(self, encoded_name: impl Into<String>) -> Self {
        self.renamed(encoded_name.into(), NamingPolicy::ExplicitOmitOnEmpty)
    }

    fn renamed(mut self, encoded_name: String, policy: NamingPolicy) -> Self {
        self.encoded_name = encoded_name;
        self.policy = policy;
        self
    }

    pub fn category(&self) -> ValueTypeCategory {
        self.category
    }

    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub fn encoded_name(&self) -> &str {
        &self.encoded_name
    }

    pub fn policy(&self) -> NamingPolicy {
        self.policy
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("field `{0}` is declared more than once")]
    DuplicateDeclaredName(String),
    #[error("more than one field is encoded as `{0}`")]
    DuplicateEncodedName(String),
}

/// An ordered set of field descriptors. Declaration order is key order on
/// encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordShape {
    fields: Vec<FieldDescriptor>,
}

impl RecordShape {
    pub fn new(fields: impl IntoIterator<Item = FieldDescriptor>) -> Result<Self, ShapeError> {
        let fields: Vec<FieldDescriptor> = fields.into_iter().collect();
        let mut declared = HashSet::with_capacity(fields.len());
        let mut encoded = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !declared.insert(field.declared_name()) {
                return Err(ShapeError::DuplicateDeclaredName(field.declared_name.clone()));
            }
            if !encoded.insert(field.encoded_name()) {
                return Err(ShapeError::DuplicateEncodedName(field.encoded_name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// A shape with a single field, which can never collide.
    pub fn single(field: FieldDescriptor) -> Self {
        Self {
            fields: vec![field],
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, declared_name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.declared_name == declared_name)
    }

    pub fn field(&self, declared_name: &str) -> Option<&FieldDescriptor> {
        self.index_of(declared_name).map(|i| &self.fields[i])
    }

    pub fn is_encoded_name(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.encoded_name == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_uses_declared_name() {
        let field = FieldDescriptor::new("Field", ValueTypeCategory::TextString);
        assert_eq!(field.encoded_name(), "Field");
        assert_eq!(field.policy(), NamingPolicy::Default);
    }

    #[test]
    fn explicit_policies_rename() {
        let field = FieldDescriptor::new("Field", ValueTypeCategory::ByteSequence).with_name("field");
        assert_eq!(field.declared_name(), "Field");
        assert_eq!(field.encoded_name(), "field");
        assert_eq!(field.policy(), NamingPolicy::Explicit);
        assert!(!field.policy().omits_empty());

        let field = FieldDescriptor::new("Field", ValueTypeCategory::KeyedMapping)
            .with_name_omit_empty("field");
        assert_eq!(field.policy(), NamingPolicy::ExplicitOmitOnEmpty);
        assert!(field.policy().omits_empty());
    }

    #[test]
    fn shape_rejects_collisions() {
        let err = RecordShape::new([
            FieldDescriptor::new("A", ValueTypeCategory::TextString),
            FieldDescriptor::new("A", ValueTypeCategory::ByteSequence).with_name("b"),
        ])
        .unwrap_err();
        assert_eq!(err, ShapeError::DuplicateDeclaredName("A".into()));

        let err = RecordShape::new([
            FieldDescriptor::new("A", ValueTypeCategory::TextString).with_name("x"),
            FieldDescriptor::new("B", ValueTypeCategory::TextString).with_name_omit_empty("x"),
        ])
        .unwrap_err();
        assert_eq!(err, ShapeError::DuplicateEncodedName("x".into()));
    }

    #[test]
    fn shape_lookup() {
        let shape = RecordShape::new([
            FieldDescriptor::new("Name", ValueTypeCategory::TextString),
            FieldDescriptor::new("Data", ValueTypeCategory::ByteSequence).with_name("data"),
        ])
        .unwrap();
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.index_of("Data"), Some(1));
        assert_eq!(shape.field("Name").map(|f| f.category()), Some(ValueTypeCategory::TextString));
        assert!(shape.is_encoded_name("data"));
        assert!(!shape.is_encoded_name("Data"));
        assert!(shape.field("missing").is_none());
    }
}
