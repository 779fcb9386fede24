use crate::llms::api::ClientError;

/// Everything that can stop a classification from producing a label.
///
/// An unexpected model answer is not in here: it is normalized to the kind's default label.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("OpenRouter API Key is missing")]
    MissingCredential,
    #[error("OpenRouter API error: {status} - {message}")]
    HttpError { status: u16, message: String },
    #[error("OpenRouter API response structure is unexpected or content is missing: {0}")]
    MalformedResponse(String),
    #[error("request to OpenRouter failed: {0}")]
    TransportFailure(#[source] reqwest::Error),
}

impl ClassificationError {
    /// HTTP status for provider errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClassificationError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for ClassificationError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Reqwest(e) => ClassificationError::TransportFailure(e),
            ClientError::ApiError { status, message } => {
                ClassificationError::HttpError { status, message }
            }
            ClientError::JSONDeserialize(e) => ClassificationError::MalformedResponse(e.to_string()),
        }
    }
}
