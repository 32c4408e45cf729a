//! Typed request/response messages
//!
//! Requests are `{"type": "...", "payload": ...}` objects. Responses are
//! `{"success": true, ...}` or `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use craft_core::{EnhancementRequest, EnhancementResult, Error, Result, UserSettings};

/// Every `type` tag a [`Message`] can carry
pub const MESSAGE_TYPES: [&str; 6] = [
    "ENHANCE_PROMPT",
    "GET_SETTINGS",
    "UPDATE_SETTINGS",
    "GET_HISTORY",
    "GET_API_KEY",
    "SET_API_KEY",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    EnhancePrompt(EnhancementRequest),
    GetSettings,
    UpdateSettings(UserSettings),
    GetHistory,
    GetApiKey,
    /// A blank key removes the stored one
    SetApiKey(String),
}

impl Message {
    /// Parse one JSON message, telling unknown types apart from bad payloads
    pub fn parse(input: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| Error::InvalidMessage(e.to_string()))?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidMessage("missing message type".to_string()))?;

        if !MESSAGE_TYPES.contains(&kind) {
            return Err(Error::UnknownMessageType(kind.to_string()));
        }

        serde_json::from_value(value).map_err(|e| Error::InvalidMessage(e.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Message::EnhancePrompt(_) => "ENHANCE_PROMPT",
            Message::GetSettings => "GET_SETTINGS",
            Message::UpdateSettings(_) => "UPDATE_SETTINGS",
            Message::GetHistory => "GET_HISTORY",
            Message::GetApiKey => "GET_API_KEY",
            Message::SetApiKey(_) => "SET_API_KEY",
        }
    }
}

/// Reply to a [`Message`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub success: bool,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Result {
        result: EnhancementResult,
    },
    Settings {
        settings: UserSettings,
    },
    History {
        history: Vec<EnhancementResult>,
    },
    ApiKey {
        #[serde(rename = "apiKey")]
        api_key: String,
        configured: bool,
    },
    Message {
        message: String,
    },
    Error {
        error: String,
    },
    Empty {},
}

impl Response {
    pub fn ok(body: ResponseBody) -> Self {
        Self {
            success: true,
            body,
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            body: ResponseBody::Error {
                error: error.to_string(),
            },
        }
    }

    /// Serialize as a single JSON line (no trailing newline)
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
