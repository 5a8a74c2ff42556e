//! # solace-glossary
//!
//! Readability metrics, glossary de-duplication, and tooltip tooling for
//! Solace.
//!
//! Protocol text is rewritten for an 8th-grade reading level and annotated
//! with `{{term||definition}}` tooltips from the plain-language glossary.
//! This crate owns that pipeline's pure parts:
//!
//! - [`readability`]: Flesch-Kincaid metrics, jargon density, validation
//! - [`dedupe`]: case-insensitive glossary de-duplication
//! - [`tooltip`]: tooltip extraction, injection, and density analysis
//! - [`repair`]: degraded-text detection and repair strategies
//! - [`markdown`]: marker balance diagnostics and safe fixes

pub mod dedupe;
pub mod error;
pub mod markdown;
pub mod readability;
pub mod repair;
pub mod tooltip;

pub use error::GlossaryError;
