pub mod errors;
pub mod models;

use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use crate::manager_weatherstack::errors::ProviderError;
use crate::manager_weatherstack::models::{ProviderFailure, WeatherResponse};

/// Struct for fetching current weather conditions from weatherstack
pub struct Weatherstack {
    client: Client,
    endpoint: String,
    access_key: String,
}

impl Weatherstack {
    /// Returns a Weatherstack struct ready for fetching current conditions
    ///
    /// No timeout is set beyond what the transport defaults to, and every fetch is a
    /// single attempt.
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - full url to the current conditions endpoint
    /// * 'access_key' - weatherstack access key
    pub fn new(endpoint: &str, access_key: &str) -> Result<Weatherstack, ProviderError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            access_key: access_key.to_string(),
        })
    }

    /// Retrieves current weather conditions for the given postal code.
    ///
    /// Weatherstack signals a rejected access key with status 200 and an `error` member
    /// in the body, so the body is inspected before it is accepted as a payload.
    ///
    /// # Arguments
    ///
    /// * 'postal_code' - postal code to look up
    pub async fn current(&self, postal_code: &str) -> Result<WeatherResponse, ProviderError> {
        let resp = self.client
            .get(&self.endpoint)
            .query(&[("access_key", self.access_key.as_str()), ("query", postal_code)])
            .send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!("weather API request failed with status {}", status);
            return Err(ProviderError::Unreachable(format!("weather API responded with status {}", status)));
        }

        let body = resp.text().await?;
        let json: Value = serde_json::from_str(&body)?;

        if let Some(err) = json.get("error") {
            error!("weather API returned an error: {}", err);
            let failure: ProviderFailure = serde_json::from_value(err.clone())
                .unwrap_or(ProviderFailure { code: 0, error_type: String::new(), info: err.to_string() });
            return Err(ProviderError::InvalidAccessCredential(
                format!("{} {}: {}", failure.code, failure.error_type, failure.info)
            ));
        }

        let payload: WeatherResponse = serde_json::from_value(json)?;
        if let Some(r) = &payload.request {
            debug!("weather API answered {} query {} (unit {}, language {})", r.query_type, r.query, r.unit, r.language);
        }

        Ok(payload)
    }
}
