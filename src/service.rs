use std::sync::Arc;
use log::{debug, warn};
use tokio::sync::Mutex;
use crate::errors::{ErrorKind, WeatherError};
use crate::manager_db::DB;
use crate::manager_weatherstack::Weatherstack;
use crate::mapper::{to_record, to_summary, to_summary_list};
use crate::models::{WeatherHistory, WeatherRequest, WeatherSummary};
use crate::query_selector::select_query;
use crate::validation::{is_blank, is_readable, validate_write_request};

/// Sequences validation, fetching, mapping and persistence for save and history requests
pub struct WeatherService {
    db: Arc<Mutex<DB>>,
    weatherstack: Weatherstack,
}

impl WeatherService {
    /// Returns a new WeatherService
    ///
    /// # Arguments
    ///
    /// * 'db' - database to store records in and read history from
    /// * 'weatherstack' - client for the weather provider
    pub fn new(db: Arc<Mutex<DB>>, weatherstack: Weatherstack) -> Self {
        Self { db, weatherstack }
    }

    /// Fetches current conditions for the requested postal code, stores them and returns
    /// what was stored
    ///
    /// Nothing is fetched unless the request validates, and nothing is stored unless the
    /// fetch succeeded and the payload could be mapped.
    ///
    /// # Arguments
    ///
    /// * 'request' - user and postal code to save weather for
    pub async fn save_weather(&self, request: &WeatherRequest) -> Result<WeatherHistory, WeatherError> {
        if !validate_write_request(Some(request)) {
            warn!("invalid save request: {:?}", request);
            return Err(WeatherError::new(ErrorKind::InvalidRequest));
        }

        let payload = self.weatherstack.current(&request.postal_code).await?;
        let record = to_record(request, &payload)?;

        let saved = self.db.lock().await.insert_record(&record)?;

        Ok(to_summary(&saved)?)
    }

    /// Returns stored history filtered on user and/or postal code. With both filters blank
    /// all history is returned, newest first.
    ///
    /// # Arguments
    ///
    /// * 'user' - user filter
    /// * 'postal_code' - postal code filter
    pub async fn get_weather(&self, user: Option<&str>, postal_code: Option<&str>) -> Result<WeatherSummary, WeatherError> {
        let user = user.unwrap_or_default();
        let postal_code = postal_code.unwrap_or_default();

        if !is_readable(user, postal_code) {
            warn!("invalid history request, user: {:?}, postal code: {:?}", user, postal_code);
            return Err(invalid_read_error(user, postal_code));
        }

        let query = select_query(user, postal_code);
        debug!("running history query {:?}", query);

        let records = self.db.lock().await.history(&query)?;

        Ok(to_summary_list(Some(records.as_slice()))?)
    }
}

/// Names the filter that made a history request unreadable
fn invalid_read_error(user: &str, postal_code: &str) -> WeatherError {
    if !is_blank(user) {
        WeatherError::new(ErrorKind::InvalidUser)
    } else if !is_blank(postal_code) {
        WeatherError::new(ErrorKind::InvalidPostalCode)
    } else {
        WeatherError::new(ErrorKind::InternalError)
    }
}
