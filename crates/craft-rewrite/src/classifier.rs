//! Prompt classification

use craft_core::{Classification, Intent};

const QUESTION_WORDS: &[&str] = &["what", "how", "why", "when", "where", "who", "which"];

const REQUEST_WORDS: &[&str] = &[
    "create", "make", "build", "write", "generate", "help", "explain", "describe",
];

const STOP_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "the", "a", "an", "and", "or", "but",
    "in", "on", "at", "to", "for", "of", "with", "by", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "can", "make", "makes", "good", "better", "best",
];

const VAGUE_TERMS: &[&str] = &[
    "good",
    "better",
    "best",
    "nice",
    "great",
    "awesome",
    "cool",
    "interesting",
    "important",
    "useful",
    "effective",
    "efficient",
];

const VAGUE_PHRASES: &[&str] = &["what about", "tell me about", "anything about"];

/// Ordered intent rules; the first rule with a matching keyword wins
const INTENT_RULES: [(Intent, &[&str]); 6] = [
    (Intent::Explanation, &["explain", "describe"]),
    (Intent::Comparison, &["compare", "difference"]),
    (Intent::Analysis, &["analyze", "analysis"]),
    (Intent::Creation, &["create", "make", "build"]),
    (Intent::Guidance, &["help", "how to"]),
    (Intent::Enumeration, &["list", "examples"]),
];

const TOPIC_WORDS: usize = 3;

/// Classify a draft prompt
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();
    let length = text.chars().count();
    let has_vague_terms = has_vague_terms(&lower);

    let is_question =
        QUESTION_WORDS.iter().any(|word| lower.starts_with(word)) || text.contains('?');
    let is_request = REQUEST_WORDS.iter().any(|word| lower.contains(word));

    Classification {
        is_question,
        is_request,
        topic: extract_topic(text),
        intent: determine_intent(&lower),
        needs_context: length < 30 || has_vague_terms,
        needs_specificity: length < 50 && !text.contains("specific") && !text.contains("detailed"),
        is_vague: VAGUE_PHRASES.iter().any(|phrase| lower.contains(phrase))
            || (length < 30 && has_vague_terms),
    }
}

/// First three meaningful lower-cased words, space separated
pub fn extract_topic(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word) && word.chars().count() > 2)
        .take(TOPIC_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn determine_intent(lower: &str) -> Intent {
    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

fn has_vague_terms(lower: &str) -> bool {
    VAGUE_TERMS.iter().any(|term| lower.contains(term))
}
