//! # solace-protocol
//!
//! Knowledge-base normalization and protocol parsing for Solace.
//!
//! The coaching knowledge base ships as markdown/text exports: a combined
//! research-protocol file, a pattern × temperament rewiring matrix, and the
//! daily practice library. This crate turns those into uniform
//! [`KnowledgeChunk`](solace_core::entities::KnowledgeChunk) records:
//!
//! - [`normalize`]: encoding/whitespace normalization, run first
//! - [`sections`]: shared line-offset sectioning machinery
//! - [`research`], [`rewiring`], [`deductible`]: the three parsers
//! - [`infer`]: keyword tables and metadata inference
//! - [`stats`]: aggregate parse statistics
//! - [`fixtures`]: small test-fixture extraction

pub mod deductible;
pub mod error;
pub mod fixtures;
pub mod infer;
pub mod normalize;
pub mod research;
pub mod rewiring;
pub mod sections;
pub mod stats;

pub use error::ProtocolError;
