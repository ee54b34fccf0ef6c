use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::conversation::COMPLETION;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// One chatbot turn as the browser sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "stopRecording", skip_serializing_if = "Option::is_none")]
    pub stop_recording: Option<bool>,
}

impl ChatReply {
    pub fn say(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            completed: None,
            stop_recording: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            response: COMPLETION.to_string(),
            completed: Some(true),
            stop_recording: Some(true),
        }
    }

    pub fn retry_commit(reason: &str) -> Self {
        Self {
            response: format!("Error saving your application: {}. Please try again.", reason),
            completed: None,
            stop_recording: Some(true),
        }
    }
}

/// Answer to an upload request. `stop_recording` is always set for videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "stopRecording", skip_serializing_if = "Option::is_none")]
    pub stop_recording: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_replies_omit_flags() {
        let body = serde_json::to_value(ChatReply::say("What is your last name?")).unwrap();
        assert_eq!(body, json!({ "response": "What is your last name?" }));
    }

    #[test]
    fn completion_sets_both_flags() {
        let body = serde_json::to_value(ChatReply::completed()).unwrap();
        assert_eq!(body["completed"], json!(true));
        assert_eq!(body["stopRecording"], json!(true));
    }
}
