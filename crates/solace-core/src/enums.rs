//! Category, difficulty, and temperament enums for Solace.
//!
//! All enums use stable string serialization via serde rename attributes.
//! The string forms match the values stored by the hosted knowledge base,
//! so parsed output can be loaded into it without remapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ChunkCategory
// ---------------------------------------------------------------------------

/// Category assigned to a parsed knowledge chunk.
///
/// The first four come from the research knowledge-base exports; the rest are
/// the daily-practice library sections plus the rewiring matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkCategory {
    ResearchProtocol,
    EmergencyProtocol,
    AvatarDefinition,
    CommunicationFramework,
    NeuralRewiring,
    TraditionalFoundation,
    FaithBased,
    HybridPractices,
    MonasticPractices,
    PhilosophicalPractices,
    NeurologicalPractices,
    IntegrationPractices,
}

impl ChunkCategory {
    /// Return the string representation used in stored chunk records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResearchProtocol => "research-protocol",
            Self::EmergencyProtocol => "emergency-protocol",
            Self::AvatarDefinition => "avatar-definition",
            Self::CommunicationFramework => "communication-framework",
            Self::NeuralRewiring => "neural-rewiring",
            Self::TraditionalFoundation => "traditional-foundation",
            Self::FaithBased => "faith-based",
            Self::HybridPractices => "hybrid-practices",
            Self::MonasticPractices => "monastic-practices",
            Self::PhilosophicalPractices => "philosophical-practices",
            Self::NeurologicalPractices => "neurological-practices",
            Self::IntegrationPractices => "integration-practices",
        }
    }
}

impl fmt::Display for ChunkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty level of a practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Temperament
// ---------------------------------------------------------------------------

/// Coaching temperament a practice is matched to.
///
/// `All` is the default when a practice carries no temperament signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Temperament {
    Warrior,
    Sage,
    Connector,
    Builder,
    All,
}

impl Temperament {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Sage => "sage",
            Self::Connector => "connector",
            Self::Builder => "builder",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Temperament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
