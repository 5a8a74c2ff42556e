use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ChunkCategory, Difficulty, Temperament};

/// A parsed practice or protocol chunk, ready for embedding and upload.
///
/// All three knowledge-base parsers emit this shape. Time commitments are in
/// minutes; `None` means the source said "varies" or gave no figure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct KnowledgeChunk {
    pub id: String,
    pub source_file: String,
    pub file_number: u32,
    pub chunk_number: u32,
    pub text: String,
    pub summary: String,
    pub category: ChunkCategory,
    pub patterns: Vec<String>,
    pub temperaments: Vec<Temperament>,
    pub time_min: Option<u32>,
    pub time_max: Option<u32>,
    pub difficulty: Difficulty,
    pub is_emergency: bool,
    pub frequency: String,
    pub clinical_framing: Option<String>,
    pub user_framing: Option<String>,
    pub states_created: Vec<String>,
    pub kb_category: Option<String>,
    pub tokens_approx: u32,
}
