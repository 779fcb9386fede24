//! Front-end orchestration: credential handling, page extraction, and the
//! mapping from classifier outcomes to what a user sees.

use crate::{
    credentials::{CredentialStore, KeyValueStore, StoreError},
    llms::api::openrouter::OpenRouterBackend,
    page::PageSource,
    requests::classification::{ClassificationKind, Label},
};
use secrecy::Secret;

pub const MSG_KEY_REQUIRED: &str = "Please enter and save your OpenRouter API Key first.";
pub const MSG_NO_TEXT: &str = "No substantial text found on this page to analyze.";
pub const MSG_EXTRACT_FAILED: &str = "Failed to extract text from the webpage.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Loaded,
    Missing,
    Saved,
    Rejected,
}

impl CredentialStatus {
    pub fn message(&self) -> &'static str {
        match self {
            CredentialStatus::Loaded => "API Key loaded.",
            CredentialStatus::Missing => "No API Key saved.",
            CredentialStatus::Saved => "API Key saved successfully!",
            CredentialStatus::Rejected => "Please enter an API Key.",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CredentialStatus::Loaded | CredentialStatus::Saved)
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Display color of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Blue,
    Gray,
}

impl From<Label> for Tone {
    fn from(label: Label) -> Self {
        match label {
            Label::Positive => Tone::Green,
            Label::Negative | Label::RightLeaning => Tone::Red,
            Label::LeftLeaning => Tone::Blue,
            Label::Neutral | Label::Unbiased => Tone::Gray,
        }
    }
}

/// What the result area shows after an analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Label {
        kind: ClassificationKind,
        label: Label,
        tone: Tone,
    },
    Error(String),
}

impl DisplayState {
    fn label(kind: ClassificationKind, label: Label) -> Self {
        DisplayState::Label {
            kind,
            label,
            tone: label.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::Error(_))
    }
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayState::Label { label, .. } => write!(f, "{label}"),
            DisplayState::Error(message) => f.write_str(message),
        }
    }
}

/// One open front end: a backend, a credential store and an optional typed-in key.
///
/// `analyze` takes `&mut self`, so a session never has more than one
/// classification in flight.
pub struct ClassifierSession<S: KeyValueStore> {
    backend: OpenRouterBackend,
    credentials: CredentialStore<S>,
    credential_override: Option<Secret<String>>,
}

impl<S: KeyValueStore> ClassifierSession<S> {
    pub fn new(backend: OpenRouterBackend, store: S) -> Self {
        Self {
            backend,
            credentials: CredentialStore::new(store),
            credential_override: None,
        }
    }

    /// Use `credential` for this session instead of the stored one. Blank values are ignored.
    pub fn with_credential_override<K: AsRef<str>>(mut self, credential: Option<K>) -> Self {
        self.credential_override = credential
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Secret::new);
        self
    }

    /// Status shown when the front end opens.
    pub fn credential_status(&self) -> CredentialStatus {
        match self.credentials.load() {
            Ok(Some(_)) => CredentialStatus::Loaded,
            Ok(None) => CredentialStatus::Missing,
            Err(e) => {
                crate::error!("Failed to read stored credential: {e}");
                CredentialStatus::Missing
            }
        }
    }

    pub fn save_credential(&mut self, input: &str) -> Result<CredentialStatus, StoreError> {
        match self.credentials.save(input) {
            Ok(()) => Ok(CredentialStatus::Saved),
            Err(StoreError::EmptyCredential) => Ok(CredentialStatus::Rejected),
            Err(e) => Err(e),
        }
    }

    /// Typed-in key first, then the store, then the backend's environment variable.
    pub fn resolve_credential(&self) -> Option<Secret<String>> {
        if let Some(credential) = &self.credential_override {
            return Some(credential.clone());
        }
        match self.credentials.load() {
            Ok(Some(credential)) => return Some(credential),
            Ok(None) => (),
            Err(e) => crate::error!("Failed to read stored credential: {e}"),
        }
        self.backend.env_credential()
    }

    /// The credential to classify with, or the key-required display.
    ///
    /// Front ends that read page text from a blocking source call this before reading it.
    pub fn require_credential(&self) -> Result<Secret<String>, DisplayState> {
        self.resolve_credential()
            .ok_or_else(|| DisplayState::Error(MSG_KEY_REQUIRED.to_string()))
    }

    pub async fn analyze(&mut self, kind: ClassificationKind, page: &PageSource) -> DisplayState {
        let credential = match self.require_credential() {
            Ok(credential) => credential,
            Err(state) => return state,
        };

        let text = match page.extract_text().await {
            Ok(text) => text,
            Err(e) => {
                crate::error!("Page extraction failed: {e}");
                return DisplayState::Error(MSG_EXTRACT_FAILED.to_string());
            }
        };
        if text.trim().is_empty() {
            return DisplayState::Error(MSG_NO_TEXT.to_string());
        }

        match self.backend.classify(kind, &text, &credential).await {
            Ok(label) => DisplayState::label(kind, label),
            Err(e) => DisplayState::Error(format!("Error: {e}")),
        }
    }

    pub fn backend(&self) -> &OpenRouterBackend {
        &self.backend
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }
}
