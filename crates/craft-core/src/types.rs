//! Common types used across promptcraft

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Rewriting strategy requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Add specificity and remove ambiguity
    #[default]
    Clarity,
    /// Expand with examples and constraints
    Detail,
    /// Format as a structured, formal prompt
    Professional,
    /// Add creative context and inspiration
    Creative,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Clarity, Mode::Detail, Mode::Professional, Mode::Creative];

    /// Wire identifier ("clarity", "detail", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Clarity => "clarity",
            Mode::Detail => "detail",
            Mode::Professional => "professional",
            Mode::Creative => "creative",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Clarity => "Clarity",
            Mode::Detail => "Detail",
            Mode::Professional => "Professional",
            Mode::Creative => "Creative",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Clarity => "Add specificity and remove ambiguity",
            Mode::Detail => "Expand with examples and constraints",
            Mode::Professional => "Format as structured, formal prompt",
            Mode::Creative => "Add creative context and inspiration",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Mode::Clarity => "🔍",
            Mode::Detail => "📝",
            Mode::Professional => "💼",
            Mode::Creative => "🎨",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::InvalidMessage(format!(
                    "unknown mode '{}' (expected clarity, detail, professional or creative)",
                    wanted
                ))
            })
    }
}

/// Coarse intent of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Explanation,
    Comparison,
    Analysis,
    Creation,
    Guidance,
    Enumeration,
    General,
}

/// Features derived from a draft prompt; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_question: bool,
    pub is_request: bool,
    pub topic: String,
    pub intent: Intent,
    pub needs_context: bool,
    pub needs_specificity: bool,
    pub is_vague: bool,
}

/// A request to enhance a draft prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub text: String,
    /// Falls back to the user's default mode when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl EnhancementRequest {
    pub fn new(text: impl Into<String>, mode: Option<Mode>) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}

/// Outcome of one successful enhancement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementResult {
    pub original: String,
    pub enhanced: String,
    pub mode: Mode,
    /// Unix time in milliseconds
    pub timestamp: i64,
}

impl EnhancementResult {
    /// Build a result stamped with the current time
    pub fn new(original: impl Into<String>, enhanced: impl Into<String>, mode: Mode) -> Self {
        Self {
            original: original.into(),
            enhanced: enhanced.into(),
            mode,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// True when enhancement left the text untouched
    pub fn is_unchanged(&self) -> bool {
        self.original == self.enhanced
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub default_mode: Mode,
    pub auto_enhance: bool,
    pub show_preview: bool,
    pub save_history: bool,
    pub max_history_items: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_mode: Mode::Clarity,
            auto_enhance: false,
            show_preview: true,
            save_history: true,
            max_history_items: 50,
        }
    }
}
