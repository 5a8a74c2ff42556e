//! # solace-core
//!
//! Core types, id helpers, and error types for Solace.
//!
//! This crate provides the foundational types shared across all Solace crates:
//! - Entity structs for parsed knowledge chunks and glossary terms
//! - Category/difficulty/temperament enums with stable string forms
//! - Id prefix constants and formatting helpers
//! - Cross-cutting error types
//! - The playback registry (the one piece of process-wide mutable state)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod playback;
