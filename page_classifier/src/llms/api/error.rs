use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Underlying error from reqwest, raised while building, sending or reading the request
    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// API answered with a non-success status
    #[error("api error {status}: {message}")]
    ApiError { status: u16, message: String },
    /// Error when a response cannot be deserialized into a Rust type
    #[error("failed to deserialize api response: {0}")]
    JSONDeserialize(serde_json::Error),
}

/// Wrapper to deserialize the error object nested in "error" JSON key
#[derive(Debug, Deserialize)]
pub(crate) struct WrappedError {
    pub(crate) error: ApiError,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiError {
    pub message: String,
    pub code: Option<serde_json::Value>,
    pub metadata: Option<serde_json::Value>,
}

/// Pulls the provider's explanation out of an error body.
///
/// Accepts both `{"error": {"message": ..}}` and a bare `{"message": ..}`.
pub(crate) fn provider_error_message(bytes: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct BareError {
        message: String,
    }

    let message = match serde_json::from_slice::<WrappedError>(bytes) {
        Ok(wrapped) => wrapped.error.message,
        Err(_) => serde_json::from_slice::<BareError>(bytes).ok()?.message,
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

pub(crate) fn map_deserialization_error(e: serde_json::Error, bytes: &[u8]) -> ClientError {
    tracing::error!(
        "failed deserialization of: {}",
        String::from_utf8_lossy(bytes)
    );
    ClientError::JSONDeserialize(e)
}
