//! Parse a field list into selection output.

use serde_json::Value;
use urlq_ir::request::StringOrList;

/// Output shapes for the parsed field selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// A boolean-valued mapping, each field to `true`.
    Object,
    /// The raw ordered field list.
    Array,
}

/// An ordered field selection.
#[derive(Debug, Clone)]
pub struct FieldSelector {
    fields: Vec<String>,
}

impl FieldSelector {
    pub fn new(fields: &StringOrList) -> Self {
        match fields {
            StringOrList::One(list) => Self::from_token(list),
            StringOrList::Many(fields) => FieldSelector {
                fields: fields.clone(),
            },
        }
    }

    /// Parse a comma-separated field list.
    pub(crate) fn from_token(list: &str) -> Self {
        FieldSelector {
            fields: list
                .split(',')
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn parse(&self, format: FieldFormat) -> Value {
        match format {
            FieldFormat::Object => Value::Object(
                self.fields
                    .iter()
                    .map(|field| (field.clone(), Value::Bool(true)))
                    .collect(),
            ),
            FieldFormat::Array => Value::Array(
                self.fields
                    .iter()
                    .map(|field| Value::from(field.clone()))
                    .collect(),
            ),
        }
    }
}
