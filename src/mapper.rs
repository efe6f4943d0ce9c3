use chrono::Utc;
use thiserror::Error;
use crate::manager_db::models::{WeatherDetails, WeatherRecord};
use crate::manager_weatherstack::models::{Current, Location, WeatherResponse};
use crate::models::{WeatherHistory, WeatherRequest, WeatherSummary};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("MappingError::MalformedPayload: {0}")]
    MalformedPayload(String),
    #[error("MappingError::MalformedRecord: {0}")]
    MalformedRecord(String),
}

/// Flattens a provider payload into a record stamped with the current time
///
/// # Arguments
///
/// * 'request' - the validated request the payload was fetched for
/// * 'payload' - current conditions from the provider
pub fn to_record(request: &WeatherRequest, payload: &WeatherResponse) -> Result<WeatherRecord, MappingError> {
    let location = &payload.location;
    let current = &payload.current;

    let icon = current.weather_icons.first()
        .ok_or_else(|| MappingError::MalformedPayload("weather_icons is empty".to_string()))?;
    let description = current.weather_descriptions.first()
        .ok_or_else(|| MappingError::MalformedPayload("weather_descriptions is empty".to_string()))?;

    let details = WeatherDetails {
        precipitation: current.precip.to_string(),
        city: location.name.clone(),
        country: location.country.clone(),
        region: location.region.clone(),
        latitude: location.lat.clone(),
        longitude: location.lon.clone(),
        timezone_id: location.timezone_id.clone(),
        local_time: location.localtime.clone(),
        temperature: current.temperature,
        feels_like: current.feelslike,
        weather_description: description.clone(),
        humidity: current.humidity,
        cloud_cover: current.cloudcover,
        pressure: current.pressure,
        visibility: current.visibility,
        wind_speed: current.wind_speed,
        wind_degree: current.wind_degree,
        wind_direction: current.wind_dir.clone(),
        uv_index: current.uv_index,
        is_day: current.is_day.clone(),
        weather_icon_url: icon.clone(),
        observation_time: current.observation_time.clone(),
        utc_offset: location.utc_offset.clone(),
        weather_code: current.weather_code,
        localtime_epoch: location.localtime_epoch,
    };

    Ok(WeatherRecord {
        id: None,
        user: request.user.clone(),
        postal_code: request.postal_code.clone(),
        timestamp: Utc::now(),
        details,
    })
}

/// Rebuilds the nested location/conditions shape from a stored record
///
/// # Arguments
///
/// * 'record' - stored record
pub fn to_summary(record: &WeatherRecord) -> Result<WeatherHistory, MappingError> {
    let d = &record.details;

    // Precipitation is kept as text in the database
    let precip: i32 = d.precipitation.trim().parse().map_err(|_| {
        MappingError::MalformedRecord(format!(
            "precipitation {:?} of record {:?} is not an integer", d.precipitation, record.id
        ))
    })?;

    let location = Location {
        name: d.city.clone(),
        country: d.country.clone(),
        region: d.region.clone(),
        lat: d.latitude.clone(),
        lon: d.longitude.clone(),
        timezone_id: d.timezone_id.clone(),
        localtime: d.local_time.clone(),
        localtime_epoch: d.localtime_epoch,
        utc_offset: d.utc_offset.clone(),
    };

    let current = Current {
        observation_time: d.observation_time.clone(),
        temperature: d.temperature,
        weather_code: d.weather_code,
        weather_icons: vec![d.weather_icon_url.clone()],
        weather_descriptions: vec![d.weather_description.clone()],
        wind_speed: d.wind_speed,
        wind_degree: d.wind_degree,
        wind_dir: d.wind_direction.clone(),
        pressure: d.pressure,
        precip,
        humidity: d.humidity,
        cloudcover: d.cloud_cover,
        feelslike: d.feels_like,
        uv_index: d.uv_index,
        visibility: d.visibility,
        is_day: d.is_day.clone(),
    };

    Ok(WeatherHistory { location, current })
}

/// Maps stored records to a summary, keeping their order. No records gives an empty summary.
///
/// # Arguments
///
/// * 'records' - stored records, if any
pub fn to_summary_list(records: Option<&[WeatherRecord]>) -> Result<WeatherSummary, MappingError> {
    let history = records
        .unwrap_or_default()
        .iter()
        .map(to_summary)
        .collect::<Result<Vec<WeatherHistory>, MappingError>>()?;

    Ok(WeatherSummary { history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_weatherstack::tests::payload_json;

    fn payload() -> WeatherResponse {
        serde_json::from_value(payload_json()).unwrap()
    }

    fn request() -> WeatherRequest {
        WeatherRequest { user: "John Doe".to_string(), postal_code: "10001".to_string() }
    }

    #[test]
    fn record_flattens_payload() {
        let before = Utc::now();
        let record = to_record(&request(), &payload()).unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.user, "John Doe");
        assert_eq!(record.postal_code, "10001");
        assert!(record.timestamp >= before);
        assert_eq!(record.details.city, "New York");
        assert_eq!(record.details.precipitation, "2");
        assert_eq!(record.details.weather_description, "Light Rain");
        assert!(record.details.weather_icon_url.ends_with("cloudy_with_light_rain.png"));
    }

    #[test]
    fn empty_icons_is_malformed_payload() {
        let mut p = payload();
        p.current.weather_icons.clear();

        assert!(matches!(to_record(&request(), &p), Err(MappingError::MalformedPayload(_))));
    }

    #[test]
    fn empty_descriptions_is_malformed_payload() {
        let mut p = payload();
        p.current.weather_descriptions.clear();

        assert!(matches!(to_record(&request(), &p), Err(MappingError::MalformedPayload(_))));
    }

    #[test]
    fn summary_reproduces_payload() {
        let p = payload();
        let entry = to_summary(&to_record(&request(), &p).unwrap()).unwrap();

        assert_eq!(entry.location, p.location);
        assert_eq!(entry.current, p.current);
    }

    #[test]
    fn summary_keeps_only_first_icon_and_description() {
        let mut p = payload();
        p.current.weather_icons.push("second.png".to_string());
        p.current.weather_descriptions.push("Mist".to_string());

        let entry = to_summary(&to_record(&request(), &p).unwrap()).unwrap();

        assert_eq!(entry.current.weather_icons.len(), 1);
        assert_eq!(entry.current.weather_descriptions, vec!["Light Rain".to_string()]);
    }

    #[test]
    fn unparseable_precipitation_is_malformed_record() {
        let mut record = to_record(&request(), &payload()).unwrap();
        record.details.precipitation = "0.4".to_string();

        assert!(matches!(to_summary(&record), Err(MappingError::MalformedRecord(_))));
    }

    #[test]
    fn summary_list_of_nothing_is_empty() {
        assert!(to_summary_list(None).unwrap().history.is_empty());
        assert!(to_summary_list(Some(&[][..])).unwrap().history.is_empty());
    }

    #[test]
    fn summary_list_keeps_order() {
        let mut first = to_record(&request(), &payload()).unwrap();
        first.details.city = "First".to_string();
        let mut second = first.clone();
        second.details.city = "Second".to_string();

        let summary = to_summary_list(Some(&[first, second][..])).unwrap();
        let names: Vec<&str> = summary.history.iter().map(|h| h.location.name.as_str()).collect();

        assert_eq!(names, vec!["First", "Second"]);
    }
}
