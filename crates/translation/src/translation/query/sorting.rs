//! Parse the sort key list into field/direction pairs.

use indexmap::IndexMap;
use serde_json::Value;

/// A sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Output shapes for the parsed sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortFormat {
    /// An ordered mapping from field name to direction.
    Object,
    /// A list of `[field, direction]` pairs.
    Array,
}

/// Parses comma-separated sort tokens, each optionally prefixed with `-` for
/// descending. When several tokens name the same base field only the first
/// occurrence is kept.
#[derive(Debug, Clone)]
pub struct SortExtractor {
    sorts: IndexMap<String, Direction>,
}

impl SortExtractor {
    pub fn new(raw: &str) -> Self {
        let mut sorts = IndexMap::new();
        for token in raw.split(',').filter(|token| !token.is_empty()) {
            let (field, direction) = match token.strip_prefix('-') {
                Some(field) => (field, Direction::Desc),
                None => (token, Direction::Asc),
            };
            sorts.entry(field.to_string()).or_insert(direction);
        }
        SortExtractor { sorts }
    }

    pub fn parse(&self, format: SortFormat) -> Value {
        match format {
            SortFormat::Object => Value::Object(
                self.sorts
                    .iter()
                    .map(|(field, direction)| (field.clone(), Value::from(direction.as_str())))
                    .collect(),
            ),
            SortFormat::Array => Value::Array(
                self.sorts
                    .iter()
                    .map(|(field, direction)| {
                        Value::Array(vec![
                            Value::from(field.clone()),
                            Value::from(direction.as_str()),
                        ])
                    })
                    .collect(),
            ),
        }
    }

    /// Caller-supplied reducer over the internal ordered mapping.
    pub fn parse_with<F>(&self, render: F) -> Value
    where
        F: FnOnce(&IndexMap<String, Direction>) -> Value,
    {
        render(&self.sorts)
    }
}
