//! The generic, SQL-oriented document shape.

use serde_json::{Map, Value};
use urlq_ir::operators::OperatorTable;

use super::Backend;
use crate::translation::query::fields::FieldFormat;
use crate::translation::query::relationships::RelationFormat;
use crate::translation::query::sorting::SortFormat;
use crate::translation::query::QueryParts;

/// Renders `{order, where, select, join, group, limit, offset}` with the
/// generic operator table, every part in its default format.
#[derive(Debug, Clone)]
pub struct Generic {
    operators: OperatorTable,
}

impl Generic {
    pub fn new() -> Self {
        Generic {
            operators: OperatorTable::generic(),
        }
    }

    /// Use a caller-supplied operator table instead of the generic one.
    pub fn with_operators(operators: OperatorTable) -> Self {
        Generic { operators }
    }
}

impl Default for Generic {
    fn default() -> Self {
        Generic::new()
    }
}

impl Backend for Generic {
    fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    fn render(&self, parts: &QueryParts) -> Value {
        let mut doc = Map::new();
        if let Some(sort) = &parts.sort {
            doc.insert("order".to_string(), sort.parse(SortFormat::Object));
        }
        if let Some(filter) = &parts.filter {
            doc.insert("where".to_string(), filter.parse());
        }
        if let Some(fields) = &parts.fields {
            doc.insert("select".to_string(), fields.parse(FieldFormat::Object));
        }
        if let Some(relations) = &parts.relations {
            doc.insert("join".to_string(), relations.parse(RelationFormat::Object));
        }
        if let Some(group) = &parts.group {
            doc.insert("group".to_string(), group.clone());
        }
        if let Some(pagination) = &parts.pagination {
            let page = pagination.parse();
            if let Some(limit) = page.limit {
                doc.insert("limit".to_string(), Value::from(limit));
            }
            doc.insert("offset".to_string(), Value::from(page.offset));
        }
        Value::Object(doc)
    }
}
