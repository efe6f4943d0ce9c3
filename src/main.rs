mod doc;
mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_db;
mod manager_weatherstack;
mod mapper;
mod models;
mod query_selector;
mod service;
mod validation;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use tokio::sync::Mutex;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::DB;
use crate::manager_weatherstack::Weatherstack;
use crate::service::WeatherService;

pub struct AppState {
    service: WeatherService,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    info!("starting weather history service");

    let db = Arc::new(Mutex::new(DB::new(&config.db.db_path)?));
    let weatherstack = Weatherstack::new(&config.weather_api.endpoint, &config.weather_api.access_key)?;
    let state = web::Data::new(AppState { service: WeatherService::new(db, weatherstack) });

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
            .service(doc::swagger_ui())
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
