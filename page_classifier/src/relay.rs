//! JSON message relay.
//!
//! Speaks the same shapes as the extension's background worker:
//!
//! ```text
//! -> {"action":"sentiment","text":"I love this!","apiKey":"sk-or-..."}
//! <- {"sentiment":"Positive"}
//! -> {"action":"analyzeLeaning","text":"...","apiKey":""}
//! <- {"error":"OpenRouter API Key is missing. Please set it in the extension popup."}
//! ```
//!
//! [`MessageRelay::run`] reads one message per line and writes one reply per line.

use crate::{
    llms::api::openrouter::OpenRouterBackend,
    requests::classification::{ClassificationKind, Label},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const MSG_RELAY_KEY_MISSING: &str =
    "OpenRouter API Key is missing. Please set it in the extension popup.";

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayMessage {
    pub action: ClassificationKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub api_key: String,
}

impl std::fmt::Debug for RelayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayMessage")
            .field("action", &self.action)
            .field("text_chars", &self.text.chars().count())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayReply {
    Sentiment(Label),
    Leaning(Label),
    Error(String),
}

impl RelayReply {
    fn from_label(label: Label) -> Self {
        match label.kind() {
            ClassificationKind::Sentiment => RelayReply::Sentiment(label),
            ClassificationKind::Leaning => RelayReply::Leaning(label),
        }
    }
}

pub struct MessageRelay {
    backend: OpenRouterBackend,
}

impl MessageRelay {
    pub fn new(backend: OpenRouterBackend) -> Self {
        Self { backend }
    }

    pub async fn handle(&self, message: RelayMessage) -> RelayReply {
        crate::info!("Relay received {} request", message.action);
        if message.api_key.trim().is_empty() {
            crate::error!("OpenRouter API Key is missing");
            return RelayReply::Error(MSG_RELAY_KEY_MISSING.to_string());
        }

        let kind = message.action;
        let credential = Secret::new(message.api_key);
        match self.backend.classify(kind, &message.text, &credential).await {
            Ok(label) => RelayReply::from_label(label),
            Err(e) => RelayReply::Error(format!(
                "Could not analyze {}: {e}",
                kind.display_name()
            )),
        }
    }

    /// Parses one JSON message and answers it. Unparseable input gets an error reply.
    pub async fn handle_line(&self, line: &str) -> RelayReply {
        self.handle_bytes(line.as_bytes()).await
    }

    async fn handle_bytes(&self, line: &[u8]) -> RelayReply {
        match serde_json::from_slice::<RelayMessage>(line) {
            Ok(message) => self.handle(message).await,
            Err(e) => {
                crate::warn!("Rejected relay message: {e}");
                RelayReply::Error(format!("invalid message: {e}"))
            }
        }
    }

    /// Answers newline-delimited messages until `reader` is exhausted. Blank lines are skipped.
    ///
    /// Lines that are not valid UTF-8 or JSON get an error reply and do not stop the loop.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let reply = self.handle_bytes(&line).await;
            let mut encoded = serde_json::to_string(&reply)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok(())
    }
}
