//! The flat multi-table document shape.

use serde_json::{Map, Value};
use urlq_ir::operators::{Operator, OperatorEntry, OperatorTable};

use super::Backend;
use crate::translation::query::fields::FieldFormat;
use crate::translation::query::sorting::SortFormat;
use crate::translation::query::QueryParts;

/// Renders `{attributes, where, order, limit, offset, group, includes}`.
/// Relations render via the function hook as a flat list of per-association
/// documents rather than a nested mapping.
#[derive(Debug, Clone)]
pub struct MultiTable {
    operators: OperatorTable,
}

impl MultiTable {
    pub fn new() -> Self {
        MultiTable {
            operators: Self::default_operators(),
        }
    }

    /// Use a caller-supplied operator table instead of the defaults.
    pub fn with_operators(operators: OperatorTable) -> Self {
        MultiTable { operators }
    }

    /// The default table: `$`-prefixed comparison literals, a distinct
    /// `$or` join literal, and `isNull` rendered as `{$is: null}`.
    pub fn default_operators() -> OperatorTable {
        OperatorTable::generic()
            .with(Operator::Or, OperatorEntry::literal("$or"))
            .with(Operator::Lt, OperatorEntry::literal("$lt"))
            .with(Operator::Lte, OperatorEntry::literal("$lte"))
            .with(Operator::Gt, OperatorEntry::literal("$gt"))
            .with(Operator::Gte, OperatorEntry::literal("$gte"))
            .with(Operator::Ne, OperatorEntry::literal("$ne"))
            .with(Operator::Not, OperatorEntry::literal("$not"))
            .with(Operator::Between, OperatorEntry::literal("$between"))
            .with(Operator::NotBetween, OperatorEntry::literal("$notBetween"))
            .with(Operator::In, OperatorEntry::literal("$in"))
            .with(Operator::NotIn, OperatorEntry::literal("$notIn"))
            .with(Operator::Like, OperatorEntry::literal("$like"))
            .with(
                Operator::IsNull,
                OperatorEntry::literal("$is").with_operand(Value::Null),
            )
    }
}

impl Default for MultiTable {
    fn default() -> Self {
        MultiTable::new()
    }
}

impl Backend for MultiTable {
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
            doc.insert("attributes".to_string(), fields.parse(FieldFormat::Array));
        }
        if let Some(relations) = &parts.relations {
            let includes = relations.parse_with(|relations| {
                Value::Array(
                    relations
                        .iter()
                        .map(|(association, sub)| {
                            let mut item = Map::new();
                            item.insert("association".to_string(), Value::from(association.clone()));
                            if let Some(fields) = &sub.fields {
                                item.insert(
                                    "attributes".to_string(),
                                    fields.parse(FieldFormat::Array),
                                );
                            }
                            if let Some(filters) = &sub.filters {
                                item.insert("where".to_string(), filters.parse());
                            }
                            if let Some(order) = &sub.order {
                                item.insert("order".to_string(), order.parse(SortFormat::Object));
                            }
                            if let Some(pagination) = &sub.pagination {
                                let page = pagination.parse();
                                if let Some(limit) = page.limit {
                                    item.insert("limit".to_string(), Value::from(limit));
                                }
                                item.insert("offset".to_string(), Value::from(page.offset));
                            }
                            Value::Object(item)
                        })
                        .collect(),
                )
            });
            doc.insert("includes".to_string(), includes);
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
