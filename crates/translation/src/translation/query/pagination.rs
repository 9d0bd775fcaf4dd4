//! Normalize limit/page/offset into a consistent pagination triple.

use serde_json::{Map, Value};
use urlq_ir::request::NumberOrText;

/// The normalized pagination triple. `page` is always at least 1, and with a
/// limit the offset is always derived from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub limit: Option<i64>,
    pub offset: i64,
    pub page: i64,
}

impl PageSpec {
    /// Render as a document fragment; an absent limit contributes no key.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        if let Some(limit) = self.limit {
            doc.insert("limit".to_string(), Value::from(limit));
        }
        doc.insert("offset".to_string(), Value::from(self.offset));
        doc.insert("page".to_string(), Value::from(self.page));
        Value::Object(doc)
    }
}

/// Normalizes the raw limit/page/offset parameters at construction time.
/// The output shape is fixed regardless of target format.
#[derive(Debug, Clone, Copy)]
pub struct PaginationExtractor {
    spec: PageSpec,
}

impl PaginationExtractor {
    pub fn new(
        limit: Option<&NumberOrText>,
        page: Option<&NumberOrText>,
        offset: Option<&NumberOrText>,
    ) -> Self {
        let limit = parse_int(limit, "limit");
        let explicit_offset = parse_int(offset, "offset");
        let page = parse_int(page, "page").map_or(1, |page| page.max(1));
        let offset = match limit {
            Some(limit) => limit * (page - 1),
            None => explicit_offset.unwrap_or(0),
        };
        PaginationExtractor {
            spec: PageSpec {
                limit,
                offset,
                page,
            },
        }
    }

    pub fn parse(&self) -> PageSpec {
        self.spec
    }
}

fn parse_int(value: Option<&NumberOrText>, name: &str) -> Option<i64> {
    let value = value?;
    let parsed = value.as_i64();
    if parsed.is_none() {
        tracing::warn!("ignoring non-numeric {name} value {value:?}");
    }
    parsed
}
