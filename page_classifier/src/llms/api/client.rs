use super::{
    config::ApiConfigTrait,
    error::{map_deserialization_error, provider_error_message, ClientError},
};
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone)]
pub(crate) struct ApiClient<C: ApiConfigTrait> {
    http_client: reqwest::Client,
    pub config: C,
}

impl<C: ApiConfigTrait> ApiClient<C> {
    pub fn new(config: C) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Make a POST request to {path} with bearer authorization and deserialize the response body
    ///
    /// A credential that cannot be encoded as a header value surfaces as a reqwest builder error.
    pub(crate) async fn post<I, O>(
        &self,
        path: &str,
        request: &I,
        credential: &Secret<String>,
    ) -> Result<O, ClientError>
    where
        I: Serialize + std::fmt::Debug,
        O: DeserializeOwned,
    {
        crate::trace!("Outgoing request: {:?}", request);
        let request = self
            .http_client
            .post(self.config.url(path))
            .headers(self.config.headers())
            .bearer_auth(credential.expose_secret())
            .json(request)
            .build()?;
        self.execute(request).await
    }

    /// Execute a HTTP request once. There is no retry: a failed call is reported to the caller as is.
    async fn execute<O>(&self, request: reqwest::Request) -> Result<O, ClientError>
    where
        O: DeserializeOwned,
    {
        crate::debug!("Sending {} {}", request.method(), request.url());
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = provider_error_message(&bytes).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            crate::error!("Api response not OK: {} {}", status.as_u16(), message);
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        // Deserialize once into a generic Value
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| map_deserialization_error(e, &bytes))?;

        crate::trace!(
            "Serialized response: {}",
            serde_json::to_string_pretty(&value).unwrap_or_default()
        );

        // Convert the Value into the target type
        let response: O =
            serde_json::from_value(value).map_err(|e| map_deserialization_error(e, &bytes))?;

        Ok(response)
    }
}
