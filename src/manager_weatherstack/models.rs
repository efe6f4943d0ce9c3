use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Reads any JSON number into an i32, dropping the fraction
///
/// Weatherstack sends some of its measurements with decimals (precipitation in
/// particular), they are kept as whole numbers.
fn truncated<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.trunc() as i32)
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RequestInfo {
    #[serde(rename = "type")]
    pub query_type: String,
    pub query: String,
    pub language: String,
    pub unit: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub region: String,
    pub lat: String,
    pub lon: String,
    pub timezone_id: String,
    pub localtime: String,
    pub localtime_epoch: i64,
    pub utc_offset: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Default)]
pub struct Current {
    pub observation_time: String,
    #[serde(deserialize_with = "truncated")]
    pub temperature: i32,
    #[serde(deserialize_with = "truncated")]
    pub weather_code: i32,
    pub weather_icons: Vec<String>,
    pub weather_descriptions: Vec<String>,
    #[serde(deserialize_with = "truncated")]
    pub wind_speed: i32,
    #[serde(deserialize_with = "truncated")]
    pub wind_degree: i32,
    pub wind_dir: String,
    #[serde(deserialize_with = "truncated")]
    pub pressure: i32,
    #[serde(deserialize_with = "truncated")]
    pub precip: i32,
    #[serde(deserialize_with = "truncated")]
    pub humidity: i32,
    #[serde(deserialize_with = "truncated")]
    pub cloudcover: i32,
    #[serde(deserialize_with = "truncated")]
    pub feelslike: i32,
    #[serde(deserialize_with = "truncated")]
    pub uv_index: i32,
    #[serde(deserialize_with = "truncated")]
    pub visibility: i32,
    pub is_day: String,
}

/// Current conditions as delivered by weatherstack
#[derive(Deserialize, Debug, Clone)]
pub struct WeatherResponse {
    #[serde(default)]
    pub request: Option<RequestInfo>,
    pub location: Location,
    pub current: Current,
}

/// Error body that weatherstack sends with a 200 status
#[derive(Deserialize, Debug)]
pub struct ProviderFailure {
    #[serde(default)]
    pub code: i32,
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub info: String,
}
