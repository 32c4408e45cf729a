//! Template rewriter
//!
//! Dispatch order matters: within each cascade the first matching rule
//! wins, so rules are tested strictly top to bottom.

use regex::Regex;
use std::sync::LazyLock;

use craft_core::{Classification, Intent, Mode};

use crate::classifier::classify;
use crate::templates;

static WHO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^who(?:\s+is\b|'s)\s*").expect("valid who pattern"));
static WHAT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^what(?:\s+is\b|'s)\s*").expect("valid what pattern"));
static HOW_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^how\s+(?:to|does|do|can)\b\s*").expect("valid how pattern")
});
static WHY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^why\b\s*").expect("valid why pattern"));
static WHERE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^where(?:\s+is\b|'s)\s*").expect("valid where pattern"));
static WHEN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^when\b\s*").expect("valid when pattern"));
static WHAT_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)what time").expect("valid what-time pattern"));
static REQUEST_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:please\s+)?(?:create|make|build|write|explain|describe|tell me about|analyze|evaluate|assess|compare|help me with|guide me through)\s+",
    )
    .expect("valid request pattern")
});
static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:a|an|the)\s+").expect("valid article pattern"));

const SUBJECT_WORDS: usize = 5;
const SHORT_STATEMENT: usize = 20;

/// Classify and rewrite `text` in one step
pub fn enhance_locally(text: &str, mode: Mode) -> String {
    let text = text.trim();
    let classification = classify(text);
    rewrite(text, &classification, mode)
}

/// Rewrite `text` into a structured prompt
///
/// `detail`, `professional` and `creative` use their outline directly;
/// `clarity` picks a template from the classification.
pub fn rewrite(text: &str, classification: &Classification, mode: Mode) -> String {
    let text = text.trim();
    let topic = classification.topic.as_str();

    match mode {
        Mode::Detail => templates::detail(text),
        Mode::Professional => templates::professional(text, or(topic, "this matter")),
        Mode::Creative => templates::creative(text, or(topic, "this concept")),
        Mode::Clarity if classification.is_question => rewrite_question(text),
        Mode::Clarity if classification.is_request => rewrite_request(text, classification),
        Mode::Clarity => rewrite_statement(text, classification),
    }
}

fn rewrite_question(text: &str) -> String {
    let lower = text.to_lowercase();

    if lower.starts_with("who is") || lower.starts_with("who's") {
        return templates::person(or(&remainder(&WHO_PREFIX, text), "this person"));
    }

    if lower.starts_with("what is") || lower.starts_with("what's") {
        return templates::definition(or(&remainder(&WHAT_PREFIX, text), "this concept"));
    }

    if lower.starts_with("how to") || lower.starts_with("how do") || lower.starts_with("how can")
    {
        return templates::step_guide(or(&remainder(&HOW_PREFIX, text), "complete this task"));
    }

    if lower.starts_with("why") {
        return templates::causes(or(&remainder(&WHY_PREFIX, text), "this happens"));
    }

    if lower.contains("difference between") || lower.contains("compare") {
        return templates::comparison_question();
    }

    if lower.starts_with("where is") || lower.starts_with("where's") {
        return templates::location(or(&remainder(&WHERE_PREFIX, text), "this place"));
    }

    if lower.starts_with("when") || lower.contains("what time") {
        let without_when = WHEN_PREFIX.replace(text, "");
        let event = WHAT_TIME.replace(&without_when, "");
        return templates::timing(or(&strip_question_mark(&event), "this event"));
    }

    templates::generic_question(text)
}

fn rewrite_request(text: &str, classification: &Classification) -> String {
    let lower = text.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if classification.intent == Intent::Creation || has_any(&["create", "make", "build", "write"]) {
        return templates::creation(&extract_subject_from_request(text));
    }

    if classification.intent == Intent::Explanation
        || has_any(&["explain", "describe", "tell me about"])
    {
        return templates::explanation(&extract_subject_from_request(text));
    }

    if classification.intent == Intent::Analysis || has_any(&["analyze", "evaluate", "assess"]) {
        return templates::analysis(&extract_subject_from_request(text));
    }

    if has_any(&["compare", "versus", "vs", "difference"]) {
        return templates::comparison_request();
    }

    if classification.intent == Intent::Guidance || has_any(&["help", "assist", "guide"]) {
        return templates::guidance(&extract_subject_from_request(text));
    }

    templates::generic_request(text)
}

fn rewrite_statement(text: &str, classification: &Classification) -> String {
    if classification.is_vague || text.chars().count() < SHORT_STATEMENT {
        return templates::vague_topic(or(&classification.topic, "the topic mentioned"));
    }

    let lower = text.to_lowercase();
    if !text.contains('?') && !lower.contains("please") && !lower.contains("help") {
        return templates::statement(text);
    }

    templates::structured(text)
}

/// Main subject of a request: leading request verb and article removed,
/// capped at five words
pub fn extract_subject_from_request(text: &str) -> String {
    let without_verb = REQUEST_PREFIX.replace(text.trim(), "");
    let subject = LEADING_ARTICLE.replace(&without_verb, "");
    let subject = subject.trim();

    let words: Vec<&str> = subject.split_whitespace().collect();
    let subject = if words.len() > SUBJECT_WORDS {
        words[..SUBJECT_WORDS].join(" ")
    } else {
        subject.to_string()
    };

    if subject.is_empty() {
        "the requested item".to_string()
    } else {
        subject
    }
}

/// Text after a leading interrogative, without the trailing question mark
fn remainder(prefix: &Regex, text: &str) -> String {
    strip_question_mark(&prefix.replace(text, ""))
}

fn strip_question_mark(text: &str) -> String {
    let text = text.trim();
    text.strip_suffix('?').unwrap_or(text).trim_end().to_string()
}

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
