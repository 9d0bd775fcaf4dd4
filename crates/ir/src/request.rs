//! The flat, string-oriented request shape arriving from URL query
//! parameters.

use serde::Deserialize;
use serde_json::Value;

/// One raw token or a list of raw tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn as_slice(&self) -> &[String] {
        match self {
            StringOrList::One(token) => std::slice::from_ref(token),
            StringOrList::Many(tokens) => tokens.as_slice(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StringOrList::One(token) => token.is_empty(),
            StringOrList::Many(tokens) => tokens.is_empty(),
        }
    }
}

impl From<&str> for StringOrList {
    fn from(token: &str) -> Self {
        StringOrList::One(token.to_string())
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(tokens: Vec<&str>) -> Self {
        StringOrList::Many(tokens.into_iter().map(str::to_string).collect())
    }
}

/// A numeric parameter that may arrive as a number or as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    /// Integer-parse the value; malformed text is treated as absent.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrText::Number(number) => Some(*number),
            NumberOrText::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<i64> for NumberOrText {
    fn from(number: i64) -> Self {
        NumberOrText::Number(number)
    }
}

impl From<&str> for NumberOrText {
    fn from(text: &str) -> Self {
        NumberOrText::Text(text.to_string())
    }
}

/// An incoming query request, as typically decoded from URL query
/// parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filter: Option<StringOrList>,
    pub sort: Option<String>,
    pub limit: Option<NumberOrText>,
    pub page: Option<NumberOrText>,
    pub offset: Option<NumberOrText>,
    pub fields: Option<StringOrList>,
    pub include: Option<StringOrList>,
    /// Passed through unmodified to every output document.
    pub group: Option<Value>,
}
