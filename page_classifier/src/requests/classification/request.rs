use super::{ClassificationError, ClassificationKind};
use secrecy::{ExposeSecret, Secret};

/// Character budget for the page text embedded in a prompt.
pub const MAX_TEXT_CHARS: usize = 5000;

/// One classification call: what to classify, as which kind, and with whose key.
#[derive(Clone, Debug)]
pub struct ClassificationRequest {
    pub kind: ClassificationKind,
    text: String,
    credential: Secret<String>,
}

impl ClassificationRequest {
    pub fn new<S: AsRef<str>>(kind: ClassificationKind, text: S, credential: Secret<String>) -> Self {
        Self {
            kind,
            text: page_text::truncate_chars(text.as_ref(), MAX_TEXT_CHARS).to_string(),
            credential,
        }
    }

    /// Page text, already cut to [`MAX_TEXT_CHARS`] characters.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prompt(&self) -> String {
        self.kind.prompt(&self.text)
    }

    /// The trimmed credential, or [`ClassificationError::MissingCredential`] when it is blank.
    pub fn credential(&self) -> Result<Secret<String>, ClassificationError> {
        let credential = self.credential.expose_secret().trim();
        if credential.is_empty() {
            crate::error!("OpenRouter API Key is missing");
            return Err(ClassificationError::MissingCredential);
        }
        Ok(Secret::new(credential.to_string()))
    }
}
