use std::fmt;
use std::fmt::Formatter;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use log4rs::config::runtime::ConfigErrors;
use log::{error, SetLoggerError};
use serde::Serialize;
use utoipa::ToSchema;
use crate::manager_db::errors::DBError;
use crate::manager_weatherstack::errors::ProviderError;
use crate::mapper::MappingError;

/// Error representing an unrecoverable error that will halt the application
///
#[derive(Debug)]
pub struct UnrecoverableError(pub String);
impl fmt::Display for UnrecoverableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UnrecoverableError: {}", self.0)
    }
}
impl From<std::io::Error> for UnrecoverableError {
    fn from(e: std::io::Error) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<ConfigError> for UnrecoverableError {
    fn from(e: ConfigError) -> Self {
        UnrecoverableError(e.to_string())
    }
}
impl From<DBError> for UnrecoverableError {
    fn from(e: DBError) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<ProviderError> for UnrecoverableError {
    fn from(e: ProviderError) -> Self { UnrecoverableError(e.to_string()) }
}

/// Errors while managing configuration
///
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<SetLoggerError> for ConfigError {
    fn from(e: SetLoggerError) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<ConfigErrors> for ConfigError {
    fn from(e: ConfigErrors) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}

pub const INVALID_POSTAL_CODE_MSG: &str = "The provided postal code is invalid. Please check and try again.";
pub const INVALID_USER_MSG: &str = "The specified user is invalid or does not exist. Please verify the details.";
pub const INTERNAL_SERVER_ERROR_MSG: &str = "An unexpected error occurred on the server. Please try again later.";
pub const INVALID_REQUEST_MSG: &str = "Invalid request body. The user and postalCode fields are required and cannot be empty.";
pub const EXTERNAL_SERVICE_ERROR_MSG: &str = "The weather service could not be reached or rejected the request. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidPostalCode,
    InvalidUser,
    InternalError,
    InvalidRequest,
    ExternalServiceError,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPostalCode => "W-0001",
            ErrorKind::InvalidUser => "W-0002",
            ErrorKind::InternalError => "W-0004",
            ErrorKind::InvalidRequest => "W-0005",
            ErrorKind::ExternalServiceError => "W-0006",
        }
    }

    /// True for failures on our or the provider's side, as opposed to a bad request
    pub fn is_server_fault(&self) -> bool {
        matches!(self, ErrorKind::InternalError | ErrorKind::ExternalServiceError)
    }

    fn message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPostalCode => INVALID_POSTAL_CODE_MSG,
            ErrorKind::InvalidUser => INVALID_USER_MSG,
            ErrorKind::InternalError => INTERNAL_SERVER_ERROR_MSG,
            ErrorKind::InvalidRequest => INVALID_REQUEST_MSG,
            ErrorKind::ExternalServiceError => EXTERNAL_SERVICE_ERROR_MSG,
        }
    }
}

/// Error surfaced to clients, carries a stable code, a message and when it happened
///
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeatherError {
    #[serde(skip)]
    pub kind: ErrorKind,
    #[schema(value_type = String, example = "W-0005")]
    pub code: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl WeatherError {
    pub fn new(kind: ErrorKind) -> Self {
        WeatherError {
            kind,
            code: kind.code(),
            message: kind.message().to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WeatherError {}: {}", self.code, self.message)
    }
}

impl From<ProviderError> for WeatherError {
    fn from(e: ProviderError) -> Self {
        error!("{}", e);
        match e {
            ProviderError::InvalidAccessCredential(_) | ProviderError::Unreachable(_) =>
                WeatherError::new(ErrorKind::ExternalServiceError),
            ProviderError::MalformedPayload(_) => WeatherError::new(ErrorKind::InternalError),
        }
    }
}
impl From<MappingError> for WeatherError {
    fn from(e: MappingError) -> Self {
        error!("{}", e);
        WeatherError::new(ErrorKind::InternalError)
    }
}
impl From<DBError> for WeatherError {
    fn from(e: DBError) -> Self {
        error!("{}", e);
        WeatherError::new(ErrorKind::InternalError)
    }
}

impl ResponseError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidPostalCode | ErrorKind::InvalidUser | ErrorKind::InvalidRequest =>
                StatusCode::BAD_REQUEST,
            ErrorKind::ExternalServiceError => StatusCode::BAD_GATEWAY,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn status_codes() {
        let cases = [
            (ErrorKind::InvalidPostalCode, StatusCode::BAD_REQUEST),
            (ErrorKind::InvalidUser, StatusCode::BAD_REQUEST),
            (ErrorKind::InvalidRequest, StatusCode::BAD_REQUEST),
            (ErrorKind::ExternalServiceError, StatusCode::BAD_GATEWAY),
            (ErrorKind::InternalError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(WeatherError::new(kind).status_code(), status);
        }
    }

    #[test]
    fn only_internal_and_provider_failures_are_server_faults() {
        assert!(ErrorKind::InternalError.is_server_fault());
        assert!(ErrorKind::ExternalServiceError.is_server_fault());
        assert!(!ErrorKind::InvalidRequest.is_server_fault());
        assert!(!ErrorKind::InvalidUser.is_server_fault());
        assert!(!ErrorKind::InvalidPostalCode.is_server_fault());
    }

    #[test]
    fn provider_errors_map_to_kinds() {
        let credential: WeatherError = ProviderError::InvalidAccessCredential("101".into()).into();
        let unreachable: WeatherError = ProviderError::Unreachable("503".into()).into();
        let malformed: WeatherError = ProviderError::MalformedPayload("eof".into()).into();

        assert_eq!(credential.kind, ErrorKind::ExternalServiceError);
        assert_eq!(unreachable.kind, ErrorKind::ExternalServiceError);
        assert_eq!(malformed.kind, ErrorKind::InternalError);
    }

    #[test]
    fn internal_errors_hide_details() {
        let e: WeatherError = DBError("disk I/O error".into()).into();

        assert_eq!(e.code, "W-0004");
        assert!(!e.message.contains("disk"));
    }

    #[actix_web::test]
    async fn response_body_has_code_message_and_timestamp() {
        let resp = WeatherError::new(ErrorKind::InvalidUser).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], "W-0002");
        assert_eq!(body["message"], INVALID_USER_MSG);
        assert!(body["timestamp"].is_string());
        assert!(body.get("kind").is_none());
    }
}
