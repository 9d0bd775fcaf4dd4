//! Parse nested include tokens, composing the other extractors per named
//! association.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use urlq_ir::operators::OperatorTable;
use urlq_ir::request::NumberOrText;

use super::fields::{FieldFormat, FieldSelector};
use super::filtering::FilterExtractor;
use super::pagination::PaginationExtractor;
use super::sorting::{SortExtractor, SortFormat};
use crate::translation::error::Error;

/// Output shapes for parsed relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationFormat {
    /// A mapping from association to its DTO.
    Object,
    /// A list of DTOs.
    Array,
    /// A mapping from association to `true`.
    Boolean,
}

/// The sub-extractors built for one association. Absent sub-sections stay
/// `None` and contribute nothing to rendered documents.
#[derive(Debug, Default)]
pub struct RelationParts {
    pub fields: Option<FieldSelector>,
    pub filters: Option<FilterExtractor>,
    pub pagination: Option<PaginationExtractor>,
    pub order: Option<SortExtractor>,
}

/// Parses `association[:fields[:filters[:limit[:order]]]]` include tokens.
/// Each sub-section uses its own extractor's source grammar; an empty
/// section skips that extractor, and segments past the order section are
/// discarded.
#[derive(Debug, Default)]
pub struct RelationExtractor {
    relations: IndexMap<String, RelationParts>,
}

impl RelationExtractor {
    pub fn new<S: AsRef<str>>(tokens: &[S], operators: &OperatorTable) -> Result<Self, Error> {
        let mut relations = IndexMap::new();
        for token in tokens {
            let (association, parts) = parse_token(token.as_ref(), operators)?;
            relations.insert(association, parts);
        }
        Ok(RelationExtractor { relations })
    }

    pub fn parse(&self, format: RelationFormat) -> Value {
        match format {
            RelationFormat::Boolean => Value::Object(
                self.relations
                    .keys()
                    .map(|association| (association.clone(), Value::Bool(true)))
                    .collect(),
            ),
            RelationFormat::Object => Value::Object(
                self.relations
                    .iter()
                    .map(|(association, parts)| (association.clone(), dto(association, parts)))
                    .collect(),
            ),
            RelationFormat::Array => Value::Array(
                self.relations
                    .iter()
                    .map(|(association, parts)| dto(association, parts))
                    .collect(),
            ),
        }
    }

    /// Backend-controlled rendering over the raw association map.
    pub fn parse_with<F>(&self, render: F) -> Value
    where
        F: FnOnce(&IndexMap<String, RelationParts>) -> Value,
    {
        render(&self.relations)
    }
}

fn parse_token(token: &str, operators: &OperatorTable) -> Result<(String, RelationParts), Error> {
    let mut sections = token.split(':');
    let association = sections.next().unwrap_or_default().to_string();
    let mut section = || sections.next().filter(|section| !section.is_empty());
    let fields = section();
    let filters = section();
    let limit = section();
    let order = section();

    let mut parts = RelationParts::default();
    if let Some(fields) = fields {
        parts.fields = Some(FieldSelector::from_token(fields));
    }
    if let Some(filters) = filters {
        parts.filters = Some(FilterExtractor::new(&[filters], operators)?);
    }
    if let Some(limit) = limit {
        let limit = NumberOrText::from(limit);
        parts.pagination = Some(PaginationExtractor::new(Some(&limit), None, None));
    }
    if let Some(order) = order {
        parts.order = Some(SortExtractor::new(order));
    }
    Ok((association, parts))
}

/// The default per-association DTO, every part rendered in its own default
/// format and the pagination triple spread into the document.
fn dto(association: &str, parts: &RelationParts) -> Value {
    let mut doc = Map::new();
    doc.insert("include".to_string(), Value::from(association));
    if let Some(fields) = &parts.fields {
        doc.insert("fields".to_string(), fields.parse(FieldFormat::Object));
    }
    if let Some(filters) = &parts.filters {
        doc.insert("filters".to_string(), filters.parse());
    }
    if let Some(order) = &parts.order {
        doc.insert("order".to_string(), order.parse(SortFormat::Object));
    }
    if let Some(pagination) = &parts.pagination {
        if let Value::Object(page) = pagination.parse().to_value() {
            doc.extend(page);
        }
    }
    Value::Object(doc)
}
