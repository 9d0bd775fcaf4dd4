//! Translate the incoming query request to a query document for a chosen
//! backend.

pub mod backends;
pub mod error;
pub mod query;
