//! Shared vocabulary for query request translation: the flat request shape,
//! the operator table protocol, and scalar value coercion.

pub mod operators;
pub mod request;
pub mod values;
