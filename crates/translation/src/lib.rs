//! Translate an incoming query request into backend-specific query
//! documents.

pub mod translation;
