//! Parse filter tokens into a nested filter structure.

use serde_json::{Map, Value};
use urlq_ir::operators::{Operator, OperatorEntry, OperatorTable, Rendering};
use urlq_ir::values;

use crate::translation::error::Error;

/// Parses `field,operator[,value]` tokens into the filter document.
///
/// The resulting shape is format-invariant; backends consume it as-is.
/// Tokens sharing a top-level key overwrite each other, last write wins.
#[derive(Debug, Clone)]
pub struct FilterExtractor {
    filters: Map<String, Value>,
}

impl FilterExtractor {
    pub fn new<S: AsRef<str>>(tokens: &[S], operators: &OperatorTable) -> Result<Self, Error> {
        let mut filters = Map::new();
        for token in tokens {
            insert_token(&mut filters, token.as_ref(), operators)?;
        }
        Ok(FilterExtractor { filters })
    }

    /// The accumulated filter document.
    pub fn parse(&self) -> Value {
        Value::Object(self.filters.clone())
    }
}

/// A cross-field OR group or nested-path key detected from a field token's
/// punctuation.
enum Joiner<'a> {
    Or(Vec<&'a str>),
    Nested { parent: &'a str, child: &'a str },
}

fn joiner(field: &str) -> Option<Joiner<'_>> {
    if field.contains(':') {
        return Some(Joiner::Or(field.split(':').collect()));
    }
    if let Some((parent, rest)) = field.split_once('.') {
        // only one nesting level is recognised; deeper segments are dropped
        let child = rest.split('.').next().unwrap_or(rest);
        return Some(Joiner::Nested { parent, child });
    }
    None
}

fn insert_token(
    filters: &mut Map<String, Value>,
    token: &str,
    operators: &OperatorTable,
) -> Result<(), Error> {
    let mut segments = token.split(',');
    let field = segments.next().unwrap_or_default();
    let Some(name) = segments.next() else {
        tracing::warn!("skipping filter token without an operator: {token:?}");
        return Ok(());
    };
    // segments past the value are not part of the grammar
    let raw_value = segments.next();

    let operator =
        Operator::from_name(name).ok_or_else(|| Error::UnknownOperator(name.to_string()))?;
    let entry = operators
        .get(operator)
        .ok_or(Error::MissingOperator(operator))?;

    let Some(rendered) = render_comparison(operator, entry, raw_value) else {
        tracing::warn!("skipping filter token without a value: {token:?}");
        return Ok(());
    };

    match joiner(field) {
        Some(Joiner::Or(group)) => {
            // broadcast the same comparison over every field in the group
            let branches = group
                .into_iter()
                .map(|field| single_entry(field, rendered.clone()))
                .collect();
            filters.insert(operators.or_literal(), Value::Array(branches));
        }
        Some(Joiner::Nested { parent, child }) => {
            filters.insert(parent.to_string(), single_entry(child, rendered));
        }
        None => {
            filters.insert(field.to_string(), rendered);
        }
    }
    Ok(())
}

/// Render one comparison according to the operator's table entry. Returns
/// `None` for a token missing its value segment when the entry has no fixed
/// operand.
fn render_comparison(
    operator: Operator,
    entry: &OperatorEntry,
    raw_value: Option<&str>,
) -> Option<Value> {
    let operand = match &entry.operand {
        Some(fixed) => fixed.clone(),
        None => {
            let raw = raw_value?;
            if operator.is_multi_valued() {
                values::coerce_all(raw.split(':'))
            } else {
                values::coerce(raw)
            }
        }
    };
    Some(match &entry.rendering {
        Rendering::Bare => operand,
        Rendering::Literal(literal) => single_entry(literal, operand),
        Rendering::Function(render) => render(operand),
    })
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
