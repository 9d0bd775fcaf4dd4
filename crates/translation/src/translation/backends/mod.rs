//! Backend adapters rendering the extracted query parts into target-specific
//! documents. Every adapter shares the same extractor set and lazy
//! construction; they differ only in operator tables and relation rendering.

mod generic;
mod multi_table;
mod nested_select;
mod split_keys;

pub use self::generic::Generic;
pub use self::multi_table::MultiTable;
pub use self::nested_select::NestedSelect;
pub use self::split_keys::SplitKeys;

use serde_json::{Map, Value};
use urlq_ir::operators::OperatorTable;

use crate::translation::query::QueryParts;

/// A backend adapter: the operator table consulted while parsing filter
/// tokens, plus a renderer reassembling the extracted parts into the
/// backend's document shape.
pub trait Backend {
    fn operators(&self) -> &OperatorTable;
    fn render(&self, parts: &QueryParts) -> Value;
}

/// Look up a built-in backend by name.
pub fn for_name(name: &str) -> Option<Box<dyn Backend>> {
    match name {
        "generic" => Some(Box::new(Generic::new())),
        "multi-table" => Some(Box::new(MultiTable::new())),
        "nested-select" => Some(Box::new(NestedSelect::new())),
        "split-keys" => Some(Box::new(SplitKeys::new())),
        _ => None,
    }
}

/// Unwrap a rendered object document into its map.
pub(crate) fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
