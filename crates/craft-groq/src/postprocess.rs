//! Cleanup of model output
//!
//! Models add quoting, chatty prefixes and decorative headers despite the
//! instructions; these are stripped so the text can replace the user's
//! draft as-is.

use regex::Regex;
use std::sync::LazyLock;

/// Boilerplate openers, tested in order; only the first match is removed
const BOILERPLATE_PREFIXES: &[&str] = &[
    "Here is the enhanced prompt:",
    "Enhanced prompt:",
    "Here's the enhanced prompt:",
    "The enhanced prompt is:",
    "Enhanced version:",
    "Improved prompt:",
];

static NOISE_HEADERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^\*\*\s*CRAFT\s*Prompt\s*\*\*",
        r"(?i)^\*\*\s*C\.R\.A\.F\.T\.?\s*Prompt\s*\*\*",
        r"(?i)^\*\*\s*Enhanced\s*C\.R\.A\.F\.T\.?\s*Prompt\s*\*\*",
        r"(?i)^\*\*\s*C\.R\.A\.F\.T\.?\s*\*\*",
        r"(?i)^\*\*\s*Enhanced\s*Prompt\s*\*\*",
        r"(?i)^\*\*\s*Prompt\s*Enhancement\s*\*\*",
    ]
    .into_iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Clean a raw completion into a prompt ready to paste
pub fn clean_response(raw: &str) -> String {
    let text = strip_quotes(raw.trim());
    let text = strip_boilerplate(text);

    text.split('\n')
        .enumerate()
        .filter(|(index, line)| {
            let line = line.trim();
            if *index == 0 && line.is_empty() {
                return false;
            }
            !NOISE_HEADERS.iter().any(|pattern| pattern.is_match(line))
        })
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Remove one layer of matching surrounding quotes
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn strip_boilerplate(text: &str) -> &str {
    for prefix in BOILERPLATE_PREFIXES {
        let matches = text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            return text[prefix.len()..].trim();
        }
    }
    text
}
