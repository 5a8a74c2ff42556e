//! # solace-affect
//!
//! Lexicon-based affect classification for member messages.
//!
//! A pure, stateless classifier: fixed phrase tables assign an emotion
//! label, a bounded intensity score, and a handful of linguistic markers
//! (minimizing, catastrophizing, self-blame, absolutist, withdrawal), then a
//! fixed lookup recommends how deep the coach's next response should go.
//! An optional hosted-function override can replace the local emotion and
//! intensity; failures fall back to the local reading.
//!
//! ```
//! use solace_affect::classifier::classify;
//!
//! let reading = classify("I guess it's fine, just too much this week.");
//! assert!(reading.markers.minimizing);
//! ```

pub mod classifier;
pub mod error;
pub mod escalation;
pub mod lexicon;
pub mod remote;

pub use classifier::{AffectReading, Markers, ResponseDepth, classify};
pub use error::AffectError;
pub use escalation::{Trend, trend};
pub use lexicon::Emotion;
