//! page_classifier: Sentiment and Political Leaning Labels for Page Text
//! =====================================================================
//!
//! Sends the visible text of a page to an OpenRouter chat-completion model and
//! reads back a single label:
//!
//! | Kind        | Labels                                   | Default    |
//! |-------------|------------------------------------------|------------|
//! | `sentiment` | `Positive`, `Negative`, `Neutral`        | `Neutral`  |
//! | `leaning`   | `Right-leaning`, `Left-leaning`, `Unbiased` | `Unbiased` |
//!
//! Any model output outside the label set of the requested kind is coerced to
//! that kind's default; it is never an error.
//!
//! ```rust,no_run
//! use page_classifier::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = PageClassifier::openrouter().logging_enabled(false).init()?;
//! let label = backend
//!     .classify(
//!         ClassificationKind::Sentiment,
//!         "I love this!",
//!         &secrecy::Secret::new("sk-or-...".to_string()),
//!     )
//!     .await?;
//! println!("{label}");
//! # Ok(())
//! # }
//! ```
//!
//! The [`session`] module wraps the classifier for interactive front ends
//! (credential persistence, page extraction, display state) and [`relay`]
//! answers JSON messages the way a browser extension's background worker would.

#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Error, Result};
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};

pub mod credentials;
pub mod llms;
pub mod logging;
pub mod page;
pub mod relay;
pub mod requests;
pub mod session;

pub use credentials::{ConfyStore, CredentialStore, KeyValueStore, MemoryStore, StoreError};
pub use llms::{
    api::openrouter::{builder::OpenRouterBackendBuilder, OpenRouterBackend, OpenRouterConfig},
    ApiConfig, ClientError, LlmApiConfigTrait,
};
pub use logging::{LoggingConfig, LoggingConfigTrait};
pub use page::PageSource;
pub use relay::{MessageRelay, RelayMessage, RelayReply};
pub use requests::classification::{
    ClassificationError, ClassificationKind, ClassificationRequest, Label, MAX_TEXT_CHARS,
};
pub use session::{ClassifierSession, CredentialStatus, DisplayState, Tone};

pub struct PageClassifier {}

impl PageClassifier {
    /// Creates a new [`OpenRouterBackendBuilder`]. Call `init` on it to get an [`OpenRouterBackend`].
    pub fn openrouter() -> OpenRouterBackendBuilder {
        OpenRouterBackendBuilder::default()
    }
}
