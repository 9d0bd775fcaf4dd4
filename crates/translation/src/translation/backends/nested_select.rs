//! The nested-select document shape.

use serde_json::{Map, Value};
use urlq_ir::operators::OperatorTable;

use super::{into_object, Backend};
use crate::translation::query::fields::FieldFormat;
use crate::translation::query::sorting::SortFormat;
use crate::translation::query::QueryParts;

/// Renders `{select, where, orderBy, group, take, skip, include}` with the
/// generic operator table.
///
/// A relation carrying a field selection folds into the parent `select` as a
/// `{select, where?, orderBy?}` sub-document, provided the parent selected
/// fields itself; every other relation renders under `include` as `{where}`
/// or plain `true`.
#[derive(Debug, Clone)]
pub struct NestedSelect {
    operators: OperatorTable,
}

impl NestedSelect {
    pub fn new() -> Self {
        NestedSelect {
            operators: OperatorTable::generic(),
        }
    }

    /// Use a caller-supplied operator table instead of the generic one.
    pub fn with_operators(operators: OperatorTable) -> Self {
        NestedSelect { operators }
    }
}

impl Default for NestedSelect {
    fn default() -> Self {
        NestedSelect::new()
    }
}

impl Backend for NestedSelect {
    fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    fn render(&self, parts: &QueryParts) -> Value {
        let mut select = parts
            .fields
            .as_ref()
            .map(|fields| into_object(fields.parse(FieldFormat::Object)));

        let include = parts.relations.as_ref().map(|relations| {
            relations.parse_with(|relations| {
                let mut include = Map::new();
                for (association, sub) in relations {
                    match (&sub.fields, select.as_mut()) {
                        (Some(fields), Some(select)) => {
                            let mut nested = Map::new();
                            nested.insert("select".to_string(), fields.parse(FieldFormat::Object));
                            if let Some(filters) = &sub.filters {
                                nested.insert("where".to_string(), filters.parse());
                            }
                            if let Some(order) = &sub.order {
                                nested
                                    .insert("orderBy".to_string(), order.parse(SortFormat::Object));
                            }
                            select.insert(association.clone(), Value::Object(nested));
                        }
                        _ => {
                            let entry = match &sub.filters {
                                Some(filters) => {
                                    let mut nested = Map::new();
                                    nested.insert("where".to_string(), filters.parse());
                                    Value::Object(nested)
                                }
                                None => Value::Bool(true),
                            };
                            include.insert(association.clone(), entry);
                        }
                    }
                }
                Value::Object(include)
            })
        });

        let mut doc = Map::new();
        if let Some(select) = select {
            doc.insert("select".to_string(), Value::Object(select));
        }
        if let Some(filter) = &parts.filter {
            doc.insert("where".to_string(), filter.parse());
        }
        if let Some(sort) = &parts.sort {
            doc.insert("orderBy".to_string(), sort.parse(SortFormat::Object));
        }
        if let Some(group) = &parts.group {
            doc.insert("group".to_string(), group.clone());
        }
        if let Some(pagination) = &parts.pagination {
            let page = pagination.parse();
            if let Some(limit) = page.limit {
                doc.insert("take".to_string(), Value::from(limit));
            }
            doc.insert("skip".to_string(), Value::from(page.offset));
        }
        if let Some(include) = include {
            // every relation may have folded into the parent select
            if include.as_object().is_some_and(|map| !map.is_empty()) {
                doc.insert("include".to_string(), include);
            }
        }
        Value::Object(doc)
    }
}
