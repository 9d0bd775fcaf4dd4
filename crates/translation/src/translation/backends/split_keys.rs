//! The split-keys document shape.

use serde_json::{json, Map, Value};
use urlq_ir::operators::{Operator, OperatorEntry, OperatorTable};

use super::{into_object, Backend};
use crate::translation::query::fields::FieldFormat;
use crate::translation::query::sorting::SortFormat;
use crate::translation::query::QueryParts;

/// Renders `{select, where, order, group, take, skip, relations}`.
///
/// Relation field selections and filters are split into the parent `select`
/// and `where` maps keyed by association, and every included association
/// additionally appears as `true` under `relations`.
#[derive(Debug, Clone)]
pub struct SplitKeys {
    operators: OperatorTable,
}

impl SplitKeys {
    pub fn new() -> Self {
        SplitKeys {
            operators: Self::default_operators(),
        }
    }

    /// Use a caller-supplied operator table instead of the defaults.
    pub fn with_operators(operators: OperatorTable) -> Self {
        SplitKeys { operators }
    }

    /// The default table: spelled-out comparison literals and rendering
    /// functions for the negated and ranged operators.
    pub fn default_operators() -> OperatorTable {
        OperatorTable::generic()
            .with(Operator::Lt, OperatorEntry::literal("lessThan"))
            .with(Operator::Lte, OperatorEntry::literal("lessThanOrEqual"))
            .with(Operator::Gt, OperatorEntry::literal("moreThan"))
            .with(Operator::Gte, OperatorEntry::literal("moreThanOrEqual"))
            .with(
                Operator::Ne,
                OperatorEntry::function(|operand| json!({ "not": { "equal": operand } })),
            )
            .with(Operator::Not, OperatorEntry::literal("not"))
            .with(
                Operator::Between,
                OperatorEntry::function(|operand| json!({ "between": operand })),
            )
            .with(
                Operator::NotBetween,
                OperatorEntry::function(|operand| json!({ "not": { "between": operand } })),
            )
            .with(
                Operator::In,
                OperatorEntry::function(|operand| json!({ "in": operand })),
            )
            .with(
                Operator::NotIn,
                OperatorEntry::function(|operand| json!({ "not": { "in": operand } })),
            )
            .with(Operator::Like, OperatorEntry::literal("like"))
            .with(
                Operator::IsNull,
                OperatorEntry::function(|_| json!({ "isNull": true })),
            )
    }
}

impl Default for SplitKeys {
    fn default() -> Self {
        SplitKeys::new()
    }
}

impl Backend for SplitKeys {
    fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    fn render(&self, parts: &QueryParts) -> Value {
        let mut select = parts
            .fields
            .as_ref()
            .map(|fields| into_object(fields.parse(FieldFormat::Object)));
        let mut where_ = parts.filter.as_ref().map(|filter| into_object(filter.parse()));

        let relations = parts.relations.as_ref().map(|relations| {
            relations.parse_with(|relations| {
                let mut included = Map::new();
                for (association, sub) in relations {
                    if let Some(fields) = &sub.fields {
                        select
                            .get_or_insert_with(Map::new)
                            .insert(association.clone(), fields.parse(FieldFormat::Object));
                    }
                    if let Some(filters) = &sub.filters {
                        where_
                            .get_or_insert_with(Map::new)
                            .insert(association.clone(), filters.parse());
                    }
                    included.insert(association.clone(), Value::Bool(true));
                }
                Value::Object(included)
            })
        });

        let mut doc = Map::new();
        if let Some(select) = select {
            doc.insert("select".to_string(), Value::Object(select));
        }
        if let Some(where_) = where_ {
            doc.insert("where".to_string(), Value::Object(where_));
        }
        if let Some(sort) = &parts.sort {
            doc.insert("order".to_string(), sort.parse(SortFormat::Object));
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
        if let Some(relations) = relations {
            doc.insert("relations".to_string(), relations);
        }
        Value::Object(doc)
    }
}
