use super::{OpenRouterBackend, OpenRouterConfig, OPENROUTER_DEFAULT_MODEL};
use crate::{
    llms::api::config::{ApiConfig, LlmApiConfigTrait},
    logging::{LoggingConfig, LoggingConfigTrait},
};

pub struct OpenRouterBackendBuilder {
    pub config: OpenRouterConfig,
    pub model: String,
}

impl Default for OpenRouterBackendBuilder {
    fn default() -> Self {
        Self {
            config: Default::default(),
            model: OPENROUTER_DEFAULT_MODEL.to_string(),
        }
    }
}

impl OpenRouterBackendBuilder {
    pub fn init(self) -> crate::Result<OpenRouterBackend> {
        OpenRouterBackend::new(self.config, self.model)
    }

    /// Any model id listed at https://openrouter.ai/models
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_app_referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.config = self.config.with_app_referer(referer);
        self
    }

    pub fn with_app_title<S: Into<String>>(mut self, title: S) -> Self {
        self.config = self.config.with_app_title(title);
        self
    }
}

impl LlmApiConfigTrait for OpenRouterBackendBuilder {
    fn api_base_config_mut(&mut self) -> &mut ApiConfig {
        &mut self.config.api_config
    }

    fn api_config(&self) -> &ApiConfig {
        &self.config.api_config
    }
}

impl LoggingConfigTrait for OpenRouterBackendBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.config.logging_config
    }
}
