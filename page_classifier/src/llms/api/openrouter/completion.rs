use crate::requests::classification::ClassificationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// A single-turn request carrying one user message.
    pub fn new<S: Into<String>>(model: &str, prompt: S) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// A unique identifier for the chat completion.
    pub id: Option<String>,
    /// The model that actually served the request.
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ResponseMessage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice.
    ///
    /// No choices, or a first choice without a message, is a malformed response.
    /// A message whose content is null or absent yields `Ok(None)`.
    pub fn first_content(&self) -> Result<Option<&str>, ClassificationError> {
        let choice = self.choices.first().ok_or_else(|| {
            ClassificationError::MalformedResponse("response has no choices".to_string())
        })?;
        let message = choice.message.as_ref().ok_or_else(|| {
            ClassificationError::MalformedResponse("first choice has no message".to_string())
        })?;
        Ok(message.content.as_deref())
    }
}
