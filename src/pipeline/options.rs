use crate::text;
use crate::types::config::Settings;

/// Optional cleaning stages run after preamble stripping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Cut at the first turn-delimiter keyword
    pub truncate_turn_keywords: bool,
    /// Collapse whitespace and tidy punctuation
    pub clean_whitespace: bool,
}

impl PipelineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            truncate_turn_keywords: settings.truncate_turn_keywords,
            clean_whitespace: settings.clean_whitespace,
        }
    }

    /// Clean a raw response. The result is trimmed and may be empty.
    pub fn apply(&self, raw: &str) -> String {
        let mut cleaned = text::strip_leading_artifacts(raw);
        if self.truncate_turn_keywords {
            cleaned = text::truncate_at_turn_keyword(&cleaned);
        }
        if self.clean_whitespace {
            cleaned = text::clean_whitespace_and_punctuation(&cleaned);
        }
        cleaned.trim().to_string()
    }
}
