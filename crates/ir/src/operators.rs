//! Named comparison operators and the per-backend operator table protocol.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use enum_iterator::Sequence;
use serde_json::Value;

/// A comparison or join operator recognised by the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence)]
pub enum Operator {
    And,
    Or,
    Lt,
    Lte,
    Gt,
    Gte,
    Ne,
    Eq,
    Not,
    Between,
    NotBetween,
    In,
    NotIn,
    Like,
    IsNull,
}

impl Operator {
    /// Resolve an operator name as it appears in a filter token.
    pub fn from_name(name: &str) -> Option<Operator> {
        match name {
            "and" => Some(Operator::And),
            "or" => Some(Operator::Or),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "ne" => Some(Operator::Ne),
            "eq" => Some(Operator::Eq),
            "not" => Some(Operator::Not),
            "between" => Some(Operator::Between),
            "notBetween" => Some(Operator::NotBetween),
            "in" => Some(Operator::In),
            "notIn" => Some(Operator::NotIn),
            "like" => Some(Operator::Like),
            "isNull" => Some(Operator::IsNull),
            _ => None,
        }
    }

    /// The operator's name in the filter token grammar.
    pub fn name(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Ne => "ne",
            Operator::Eq => "eq",
            Operator::Not => "not",
            Operator::Between => "between",
            Operator::NotBetween => "notBetween",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Like => "like",
            Operator::IsNull => "isNull",
        }
    }

    /// Operators whose raw operand is a `:`-separated list.
    pub fn is_multi_valued(self) -> bool {
        matches!(
            self,
            Operator::And
                | Operator::Or
                | Operator::Between
                | Operator::NotBetween
                | Operator::In
                | Operator::NotIn
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a backend renders one operator into a filter value.
#[derive(Clone)]
pub enum Rendering {
    /// No wrapper: the coerced operand is the filter value.
    Bare,
    /// Wrap as a single-entry mapping from this literal to the operand.
    Literal(String),
    /// Caller-supplied rendering over the coerced operand.
    Function(Arc<dyn Fn(Value) -> Value + Send + Sync>),
}

impl fmt::Debug for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rendering::Bare => f.write_str("Bare"),
            Rendering::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Rendering::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// One operator's entry in a table: its rendering plus an optional fixed
/// operand replacing the coerced raw value (`isNull` ignores its operand).
#[derive(Debug, Clone)]
pub struct OperatorEntry {
    pub rendering: Rendering,
    pub operand: Option<Value>,
}

impl OperatorEntry {
    pub fn bare() -> Self {
        OperatorEntry {
            rendering: Rendering::Bare,
            operand: None,
        }
    }

    pub fn literal(literal: impl Into<String>) -> Self {
        OperatorEntry {
            rendering: Rendering::Literal(literal.into()),
            operand: None,
        }
    }

    pub fn function(render: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        OperatorEntry {
            rendering: Rendering::Function(Arc::new(render)),
            operand: None,
        }
    }

    /// Fix the operand, ignoring whatever the filter token supplied.
    pub fn with_operand(mut self, operand: Value) -> Self {
        self.operand = Some(operand);
        self
    }
}

/// Mapping from operator kind to its backend rendering.
///
/// Partial tables are accepted; only operators referenced by input tokens are
/// looked up, and a referenced-but-missing entry is a usage error surfaced by
/// the filter extractor.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    entries: BTreeMap<Operator, OperatorEntry>,
}

impl OperatorTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        OperatorTable::default()
    }

    /// The generic, SQL-oriented table: operator names double as wrapper
    /// literals, `eq`, `and` and `isNull` render bare, OR groups join under
    /// `"OR"`.
    pub fn generic() -> Self {
        let mut table = OperatorTable::empty();
        for operator in enum_iterator::all::<Operator>() {
            let entry = match operator {
                Operator::Eq | Operator::And => OperatorEntry::bare(),
                Operator::IsNull => OperatorEntry::bare().with_operand(Value::from("isNull")),
                Operator::Or => OperatorEntry::literal("OR"),
                other => OperatorEntry::literal(other.name()),
            };
            table.entries.insert(operator, entry);
        }
        table
    }

    /// Replace one operator's entry.
    pub fn with(mut self, operator: Operator, entry: OperatorEntry) -> Self {
        self.entries.insert(operator, entry);
        self
    }

    pub fn get(&self, operator: Operator) -> Option<&OperatorEntry> {
        self.entries.get(&operator)
    }

    /// The key under which OR groups are joined. Falls back to `"OR"` when
    /// the `or` entry does not render as a literal.
    pub fn or_literal(&self) -> String {
        match self.get(Operator::Or) {
            Some(OperatorEntry {
                rendering: Rendering::Literal(literal),
                ..
            }) => literal.clone(),
            _ => "OR".to_string(),
        }
    }
}
