//! A record: one value per field of a shared [`RecordShape`].

use std::sync::Arc;

use thiserror::Error;

use crate::category::ValueTypeCategory;
use crate::descriptor::{FieldDescriptor, RecordShape};
use crate::value::FieldValue;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has no field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` holds a {expected}, cannot assign a {found}")]
    CategoryMismatch {
        field: String,
        expected: ValueTypeCategory,
        found: ValueTypeCategory,
    },
}

/// Field values laid out in shape order.
///
/// Every value's category matches its descriptor; assignment goes through
/// [`Record::set`], which checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: Arc<RecordShape>,
    values: Vec<FieldValue>,
}

impl Record {
    /// A record with every field at its zero value.
    pub fn new(shape: Arc<RecordShape>) -> Self {
        let values = shape
            .fields()
            .iter()
            .map(|f| FieldValue::zero(f.category()))
            .collect();
        Self { shape, values }
    }

    pub(crate) fn from_parts(shape: Arc<RecordShape>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(shape.len(), values.len());
        Self { shape, values }
    }

    pub fn shape(&self) -> &Arc<RecordShape> {
        &self.shape
    }

    pub fn get(&self, declared_name: &str) -> Option<&FieldValue> {
        self.shape
            .index_of(declared_name)
            .map(|i| &self.values[i])
    }

    pub fn set(
        &mut self,
        declared_name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), RecordError> {
        let value = value.into();
        let index = self
            .shape
            .index_of(declared_name)
            .ok_or_else(|| RecordError::UnknownField(declared_name.to_owned()))?;
        let expected = self.shape.fields()[index].category();
        if value.category() != expected {
            return Err(RecordError::CategoryMismatch {
                field: declared_name.to_owned(),
                expected,
                found: value.category(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Builder form of [`Record::set`].
    pub fn with(
        mut self,
        declared_name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Self, RecordError> {
        self.set(declared_name, value)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.shape.fields().iter().zip(self.values.iter())
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}
