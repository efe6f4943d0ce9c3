use chrono::{DateTime, Utc};

/// Flattened location and current conditions owned by exactly one record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherDetails {
    pub precipitation: String,
    pub city: String,
    pub country: String,
    pub region: String,
    pub latitude: String,
    pub longitude: String,
    pub timezone_id: String,
    pub local_time: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub weather_description: String,
    pub humidity: i32,
    pub cloud_cover: i32,
    pub pressure: i32,
    pub visibility: i32,
    pub wind_speed: i32,
    pub wind_degree: i32,
    pub wind_direction: String,
    pub uv_index: i32,
    pub is_day: String,
    pub weather_icon_url: String,
    pub observation_time: String,
    pub utc_offset: String,
    pub weather_code: i32,
    pub localtime_epoch: i64,
}

/// A persisted weather observation. `id` is None until the record has been inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub id: Option<i64>,
    pub user: String,
    pub postal_code: String,
    pub timestamp: DateTime<Utc>,
    pub details: WeatherDetails,
}
