use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use crate::manager_weatherstack::models::{Current, Location};

/// Body of an inbound save request
#[derive(Deserialize, Serialize, ToSchema, Debug, Clone, Default)]
pub struct WeatherRequest {
    #[serde(default)]
    pub user: String,
    #[serde(rename = "postalCode", default)]
    pub postal_code: String,
}

/// One location/conditions pair as shown to clients
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct WeatherHistory {
    pub location: Location,
    #[serde(rename = "weather")]
    pub current: Current,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Default)]
pub struct WeatherSummary {
    pub history: Vec<WeatherHistory>,
}
