//! Errors for query translation.

use thiserror::Error;
use urlq_ir::operators::Operator;

/// A type for translation errors. Lookup failures are fatal to the whole
/// parse call; other malformed input degrades silently into partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operator name in a filter token that the grammar does not know.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// A recognised operator with no entry in the active operator table.
    #[error("operator '{0}' has no entry in the operator table")]
    MissingOperator(Operator),
}
