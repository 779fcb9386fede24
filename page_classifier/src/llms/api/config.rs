use reqwest::header::HeaderMap;
use secrecy::Secret;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Scheme, host and path prefix shared by every endpoint, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    /// Environment variable consulted when no credential was supplied by the caller.
    pub api_key_env_var: String,
}

impl ApiConfig {
    /// Reads the fallback credential from the process environment, loading `.env` first.
    ///
    /// Blank values count as unset.
    pub fn load_api_key_from_env(&self) -> Option<Secret<String>> {
        dotenvy::dotenv().ok();

        match dotenvy::var(&self.api_key_env_var) {
            Ok(api_key) if !api_key.trim().is_empty() => {
                crate::trace!("Loaded api_key from {}", self.api_key_env_var);
                Some(Secret::new(api_key.trim().to_string()))
            }
            _ => {
                crate::trace!("{} not found in environment or .env", self.api_key_env_var);
                None
            }
        }
    }

    pub(crate) fn validate(&self) -> crate::Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| crate::anyhow!("invalid api base url '{}': {e}", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            crate::bail!("api base url '{}' must use http or https", self.base_url);
        }
        Ok(())
    }
}

pub trait LlmApiConfigTrait {
    fn api_base_config_mut(&mut self) -> &mut ApiConfig;

    fn api_config(&self) -> &ApiConfig;

    /// Point the client at a different deployment, or at a local mock server.
    fn with_api_base_url<S: AsRef<str>>(mut self, base_url: S) -> Self
    where
        Self: Sized,
    {
        self.api_base_config_mut().base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Set the environment variable name for the fallback API key. Default is set from the backend.
    fn with_api_key_env_var<S: Into<String>>(mut self, api_key_env_var: S) -> Self
    where
        Self: Sized,
    {
        self.api_base_config_mut().api_key_env_var = api_key_env_var.into();
        self
    }
}

pub(crate) trait ApiConfigTrait {
    fn headers(&self) -> HeaderMap;

    fn url(&self, path: &str) -> String;
}
