//! Per-request extraction of the query parts and the translation driver.

pub mod fields;
pub mod filtering;
pub mod pagination;
pub mod relationships;
pub mod sorting;

use serde_json::Value;
use urlq_ir::operators::OperatorTable;
use urlq_ir::request::QueryRequest;

use crate::translation::backends::Backend;
use crate::translation::error::Error;
use self::fields::FieldSelector;
use self::filtering::FilterExtractor;
use self::pagination::PaginationExtractor;
use self::relationships::RelationExtractor;
use self::sorting::SortExtractor;

/// The extractors constructed for one request. Only the parts present in the
/// request are populated; everything is scoped to a single translate call.
#[derive(Debug, Default)]
pub struct QueryParts {
    pub sort: Option<SortExtractor>,
    pub pagination: Option<PaginationExtractor>,
    pub filter: Option<FilterExtractor>,
    pub fields: Option<FieldSelector>,
    pub relations: Option<RelationExtractor>,
    pub group: Option<Value>,
}

impl QueryParts {
    /// Construct extractors for whichever request fields are present.
    pub fn extract(request: &QueryRequest, operators: &OperatorTable) -> Result<Self, Error> {
        let sort = request
            .sort
            .as_deref()
            .filter(|sort| !sort.is_empty())
            .map(SortExtractor::new);

        let pagination = if request.limit.is_some()
            || request.page.is_some()
            || request.offset.is_some()
        {
            Some(PaginationExtractor::new(
                request.limit.as_ref(),
                request.page.as_ref(),
                request.offset.as_ref(),
            ))
        } else {
            None
        };

        let filter = match &request.filter {
            Some(tokens) if !tokens.is_empty() => {
                Some(FilterExtractor::new(tokens.as_slice(), operators)?)
            }
            _ => None,
        };

        let fields = request
            .fields
            .as_ref()
            .filter(|fields| !fields.is_empty())
            .map(FieldSelector::new);

        let relations = match &request.include {
            Some(tokens) if !tokens.is_empty() => {
                Some(RelationExtractor::new(tokens.as_slice(), operators)?)
            }
            _ => None,
        };

        Ok(QueryParts {
            sort,
            pagination,
            filter,
            fields,
            relations,
            group: request.group.clone(),
        })
    }
}

/// Translate a query request into the backend's query document. An empty
/// request renders an empty document.
pub fn translate(request: &QueryRequest, backend: &dyn Backend) -> Result<Value, Error> {
    let parts = QueryParts::extract(request, backend.operators())?;
    let document = backend.render(&parts);
    tracing::info!("translated query document: {document}");
    Ok(document)
}
