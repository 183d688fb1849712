//! HTTP implementation of the explorer's `Backend` port.

pub mod client;
pub mod routes;

pub use client::{decode_documents, HttpBackend};
