use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A plain-language glossary term used for tooltip injection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GlossaryEntry {
    pub term: String,
    pub category: String,
    pub clinical_definition: Option<String>,
    pub user_friendly: Option<String>,
    pub analogy: Option<String>,
    pub why_it_matters: Option<String>,
    pub example_sentence: Option<String>,
    pub reading_level: Option<f64>,
}

impl GlossaryEntry {
    /// The definition to show in a tooltip: the plain-language form when
    /// present, otherwise the clinical one.
    #[must_use]
    pub fn tooltip_definition(&self) -> Option<&str> {
        self.user_friendly
            .as_deref()
            .or(self.clinical_definition.as_deref())
    }
}
