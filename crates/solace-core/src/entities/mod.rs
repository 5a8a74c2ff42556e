//! Entity structs for Solace domain objects.

mod chunk;
mod glossary;

pub use chunk::KnowledgeChunk;
pub use glossary::GlossaryEntry;
