pub mod builder;
pub mod completion;

use super::{
    client::ApiClient,
    config::{ApiConfig, ApiConfigTrait},
};
use crate::{
    logging::LoggingConfig,
    requests::classification::{ClassificationError, ClassificationKind, ClassificationRequest, Label},
};
use completion::{ChatCompletionRequest, ChatCompletionResponse};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::Secret;

/// Default v1 API base url
pub const OPENROUTER_API_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Chat completion endpoint, relative to the base url
pub const OPENROUTER_COMPLETION_PATH: &str = "/chat/completions";
/// Free model used when none is configured
pub const OPENROUTER_DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528-qwen3-8b:free";
/// App attribution headers, see https://openrouter.ai/docs/api-reference/overview
pub const OPENROUTER_REFERER_HEADER: &str = "http-referer";
pub const OPENROUTER_TITLE_HEADER: &str = "x-title";

pub struct OpenRouterBackend {
    pub(crate) client: ApiClient<OpenRouterConfig>,
    pub model: String,
}

impl OpenRouterBackend {
    pub fn new(mut config: OpenRouterConfig, model: String) -> crate::Result<Self> {
        config.api_config.validate()?;
        if model.trim().is_empty() {
            crate::bail!("model id must not be empty");
        }
        config.logging_config.load_logger()?;
        Ok(Self {
            client: ApiClient::new(config),
            model,
        })
    }

    /// Classifies `text` as `kind` using `credential`.
    ///
    /// The text is cut to its first [`crate::MAX_TEXT_CHARS`] characters before it is
    /// embedded in the prompt. One request is made; there is no retry.
    pub async fn classify(
        &self,
        kind: ClassificationKind,
        text: &str,
        credential: &Secret<String>,
    ) -> Result<Label, ClassificationError> {
        let request = ClassificationRequest::new(kind, text, credential.clone());
        self.classification_request(&request).await
    }

    pub async fn classification_request(
        &self,
        request: &ClassificationRequest,
    ) -> Result<Label, ClassificationError> {
        let kind = request.kind;
        let credential = request.credential()?;

        crate::info!("Initiating {} analysis", kind.display_name());
        let body = ChatCompletionRequest::new(&self.model, request.prompt());

        let response: ChatCompletionResponse = self
            .client
            .post(OPENROUTER_COMPLETION_PATH, &body, &credential)
            .await
            .inspect_err(|e| crate::error!("{} analysis failed: {e}", kind.display_name()))?;

        let content = response.first_content()?;
        let label = match content.and_then(|content| kind.parse_label(content)) {
            Some(label) => label,
            None => {
                crate::warn!(
                    "Unexpected {} output {:?}, defaulting to {}",
                    kind.display_name(),
                    content,
                    kind.default_label()
                );
                kind.default_label()
            }
        };

        crate::info!("{} analysis result: {label}", kind.display_name());
        Ok(label)
    }

    /// Credential from the configured environment variable, if any.
    pub fn env_credential(&self) -> Option<Secret<String>> {
        self.client.config.api_config.load_api_key_from_env()
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.client.config
    }
}

#[derive(Clone, Debug)]
pub struct OpenRouterConfig {
    pub api_config: ApiConfig,
    pub logging_config: LoggingConfig,
    /// Sent as `HTTP-Referer` when set
    pub app_referer: String,
    /// Sent as `X-Title` when set
    pub app_title: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_config: ApiConfig {
                base_url: OPENROUTER_API_BASE_URL.to_string(),
                api_key_env_var: "OPENROUTER_API_KEY".to_string(),
            },
            logging_config: LoggingConfig {
                logger_name: "openrouter".to_string(),
                ..Default::default()
            },
            app_referer: Default::default(),
            app_title: Default::default(),
        }
    }
}

impl OpenRouterConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Site url shown for this app on openrouter.ai rankings
    pub fn with_app_referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.app_referer = referer.into();
        self
    }

    /// App name shown on openrouter.ai rankings
    pub fn with_app_title<S: Into<String>>(mut self, title: S) -> Self {
        self.app_title = title.into();
        self
    }
}

impl ApiConfigTrait for OpenRouterConfig {
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if !self.app_referer.is_empty() {
            if let Ok(header_value) = HeaderValue::from_str(self.app_referer.as_str()) {
                headers.insert(OPENROUTER_REFERER_HEADER, header_value);
            } else {
                crate::error!("Failed to create header value from app_referer value");
            }
        }
        if !self.app_title.is_empty() {
            if let Ok(header_value) = HeaderValue::from_str(self.app_title.as_str()) {
                headers.insert(OPENROUTER_TITLE_HEADER, header_value);
            } else {
                crate::error!("Failed to create header value from app_title value");
            }
        }

        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_config.base_url.trim_end_matches('/'), path)
    }
}
