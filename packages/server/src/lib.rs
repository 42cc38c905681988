//! Case-law ingestion API server.
//!
//! Exposes REST and GraphQL surfaces over the same domain services:
//! password login issuing JWTs, document import through the extraction
//! pipeline, and case retrieval/deletion.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::Config;
