use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("ProviderError::InvalidAccessCredential: {0}")]
    InvalidAccessCredential(String),
    #[error("ProviderError::Unreachable: {0}")]
    Unreachable(String),
    #[error("ProviderError::MalformedPayload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // The request url carries the access key
        ProviderError::Unreachable(e.without_url().to_string())
    }
}
impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::MalformedPayload(e.to_string())
    }
}
