pub mod errors;
pub mod models;

use chrono::DateTime;
use log::info;
use rusqlite::{params, Connection, Params, Row};
use crate::manager_db::errors::DBError;
use crate::manager_db::models::{WeatherDetails, WeatherRecord};
use crate::query_selector::HistoryQuery;

const SELECT_RECORD: &str =
    "SELECT w.id, w.user, w.postal_code, w.timestamp,
            d.precipitation, d.city, d.country, d.region, d.latitude, d.longitude,
            d.timezone_id, d.local_time, d.temperature, d.feels_like, d.weather_description,
            d.humidity, d.cloud_cover, d.pressure, d.visibility, d.wind_speed, d.wind_degree,
            d.wind_direction, d.uv_index, d.is_day, d.weather_icon_url, d.observation_time,
            d.utc_offset, d.weather_code, d.localtime_epoch
        FROM weather w
        JOIN weather_details d ON d.id = w.details_id";

pub struct DB {
    db_conn: Connection,
}

impl DB {

    /// Creates a new instance of DB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, or `:memory:`
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute_batch(
           "CREATE TABLE IF NOT EXISTS weather_details (
                id integer primary key autoincrement,
                precipitation text not null,
                city text not null,
                country text not null,
                region text not null,
                latitude text not null,
                longitude text not null,
                timezone_id text not null,
                local_time text not null,
                temperature integer not null,
                feels_like integer not null,
                weather_description text not null,
                humidity integer not null,
                cloud_cover integer not null,
                pressure integer not null,
                visibility integer not null,
                wind_speed integer not null,
                wind_degree integer not null,
                wind_direction text not null,
                uv_index integer not null,
                is_day text not null,
                weather_icon_url text not null,
                observation_time text not null,
                utc_offset text not null,
                weather_code integer not null,
                localtime_epoch integer not null
           );
           CREATE TABLE IF NOT EXISTS weather (
                id integer primary key autoincrement,
                user text not null,
                postal_code text not null,
                timestamp integer not null,
                details_id integer not null unique references weather_details (id)
           );
           CREATE INDEX IF NOT EXISTS weather_user_idx ON weather (user);
           CREATE INDEX IF NOT EXISTS weather_postal_code_idx ON weather (postal_code);",
        )?;

        Ok(DB { db_conn })
    }

    /// Inserts a record together with its details in one transaction and returns the
    /// record with its assigned id
    ///
    /// # Arguments
    ///
    /// * 'record' - the record to insert, any id it carries is ignored
    pub fn insert_record(&self, record: &WeatherRecord) -> Result<WeatherRecord, DBError> {
        let d = &record.details;
        let tx = self.db_conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO weather_details (
                precipitation, city, country, region, latitude, longitude, timezone_id,
                local_time, temperature, feels_like, weather_description, humidity, cloud_cover,
                pressure, visibility, wind_speed, wind_degree, wind_direction, uv_index, is_day,
                weather_icon_url, observation_time, utc_offset, weather_code, localtime_epoch)
             values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                     ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25)",
            params![
                d.precipitation, d.city, d.country, d.region, d.latitude, d.longitude,
                d.timezone_id, d.local_time, d.temperature, d.feels_like, d.weather_description,
                d.humidity, d.cloud_cover, d.pressure, d.visibility, d.wind_speed, d.wind_degree,
                d.wind_direction, d.uv_index, d.is_day, d.weather_icon_url, d.observation_time,
                d.utc_offset, d.weather_code, d.localtime_epoch,
            ],
        )?;
        let details_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO weather (user, postal_code, timestamp, details_id) values (?1, ?2, ?3, ?4)",
            params![record.user, record.postal_code, record.timestamp.timestamp(), details_id],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        info!("inserted weather record {} for postal code {}", id, record.postal_code);

        Ok(WeatherRecord { id: Some(id), ..record.clone() })
    }

    /// Returns records for the given user and postal code, oldest first
    pub fn find_by_user_and_postal_code(&self, user: &str, postal_code: &str) -> Result<Vec<WeatherRecord>, DBError> {
        self.query_records(
            &format!("{} WHERE w.user = ?1 AND w.postal_code = ?2 ORDER BY w.id", SELECT_RECORD),
            params![user, postal_code],
        )
    }

    /// Returns records for the given user, oldest first
    pub fn find_by_user(&self, user: &str) -> Result<Vec<WeatherRecord>, DBError> {
        self.query_records(&format!("{} WHERE w.user = ?1 ORDER BY w.id", SELECT_RECORD), params![user])
    }

    /// Returns records for the given postal code, oldest first
    pub fn find_by_postal_code(&self, postal_code: &str) -> Result<Vec<WeatherRecord>, DBError> {
        self.query_records(&format!("{} WHERE w.postal_code = ?1 ORDER BY w.id", SELECT_RECORD), params![postal_code])
    }

    /// Returns all records, newest first
    pub fn find_all_desc(&self) -> Result<Vec<WeatherRecord>, DBError> {
        self.query_records(&format!("{} ORDER BY w.id DESC", SELECT_RECORD), [])
    }

    /// Runs the given history query
    ///
    /// # Arguments
    ///
    /// * 'query' - query as chosen by the query selector
    pub fn history(&self, query: &HistoryQuery) -> Result<Vec<WeatherRecord>, DBError> {
        match query {
            HistoryQuery::UserAndPostalCode { user, postal_code } => self.find_by_user_and_postal_code(user, postal_code),
            HistoryQuery::User(user) => self.find_by_user(user),
            HistoryQuery::PostalCode(postal_code) => self.find_by_postal_code(postal_code),
            HistoryQuery::All => self.find_all_desc(),
        }
    }

    fn query_records<P: Params>(&self, sql: &str, params: P) -> Result<Vec<WeatherRecord>, DBError> {
        let mut stmt = self.db_conn.prepare(sql)?;
        let rows = stmt.query_map(params, record_from_row)?;

        let mut result: Vec<WeatherRecord> = Vec::new();
        for r in rows {
            result.push(r?);
        }

        Ok(result)
    }
}

fn record_from_row(row: &Row) -> rusqlite::Result<WeatherRecord> {
    let seconds: i64 = row.get(3)?;
    let timestamp = DateTime::from_timestamp(seconds, 0)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(3, seconds))?;

    Ok(WeatherRecord {
        id: Some(row.get(0)?),
        user: row.get(1)?,
        postal_code: row.get(2)?,
        timestamp,
        details: WeatherDetails {
            precipitation: row.get(4)?,
            city: row.get(5)?,
            country: row.get(6)?,
            region: row.get(7)?,
            latitude: row.get(8)?,
            longitude: row.get(9)?,
            timezone_id: row.get(10)?,
            local_time: row.get(11)?,
            temperature: row.get(12)?,
            feels_like: row.get(13)?,
            weather_description: row.get(14)?,
            humidity: row.get(15)?,
            cloud_cover: row.get(16)?,
            pressure: row.get(17)?,
            visibility: row.get(18)?,
            wind_speed: row.get(19)?,
            wind_degree: row.get(20)?,
            wind_direction: row.get(21)?,
            uv_index: row.get(22)?,
            is_day: row.get(23)?,
            weather_icon_url: row.get(24)?,
            observation_time: row.get(25)?,
            utc_offset: row.get(26)?,
            weather_code: row.get(27)?,
            localtime_epoch: row.get(28)?,
        },
    })
}
