use once_cell::sync::Lazy;
use regex::Regex;

/// Leading-anchor rules for model preambles, applied in order, once each.
///
/// Later rules assume the earlier ones already ran: the `A:` rule only
/// matches once leading whitespace and any `Answer` label are gone.
const ARTIFACT_PATTERNS: &[&str] = &[
    // leading whitespace
    r"^\s+",
    // "Answer", "## Answer (2):", "Answer 3"
    r"^[#\s]*Answer\s*[()\d]*\s*:?\s?",
    // "A:"
    r"^A:\s?",
    // ".", optional "A:", then a newline
    r"^\.\s*(?:A?:?\s?)?\n\s*",
    // "." with optional "A:"
    r"^\.\s*A?:?\s*",
    // newline
    r"^\n\s*",
];

static ARTIFACT_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ARTIFACT_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("artifact pattern must compile"))
        .collect()
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Turn-delimiter keywords, highest priority first
pub const TURN_KEYWORDS: &[&str] = &["[/user]", "|user|", "user", "[/USER]", "USER"];

/// Strip known answer preambles from the start of a model response.
pub fn strip_leading_artifacts(text: &str) -> String {
    let mut working = text.to_string();
    for rule in ARTIFACT_RULES.iter() {
        let stripped = rule.replace(&working, "").into_owned();
        working = stripped;
    }
    working
}

/// Remove wrapping `<`, `|`, `>` delimiters, collapse whitespace runs and drop
/// the space before `.`, `,`, `?` and `!`.
pub fn clean_whitespace_and_punctuation(text: &str) -> String {
    let unwrapped = text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '<' | '|' | '>'));
    let mut cleaned = WHITESPACE_RUN.replace_all(unwrapped, " ").trim().to_string();
    for punct in [".", ",", "?", "!"] {
        cleaned = cleaned.replace(&format!(" {}", punct), punct);
    }
    cleaned
}

/// Cut a response at the first turn-delimiter keyword.
///
/// Keywords are tried in priority order and the first one present anywhere
/// wins, even if a lower-priority keyword occurs earlier in the text.
pub fn truncate_at_turn_keyword(text: &str) -> String {
    for keyword in TURN_KEYWORDS {
        if let Some(index) = text.find(keyword) {
            return text[..index].trim().to_string();
        }
    }
    text.to_string()
}
