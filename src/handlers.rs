use actix_web::error::JsonPayloadError;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{debug, error, info, warn};
use serde::Deserialize;
use utoipa::IntoParams;
use crate::errors::{ErrorKind, WeatherError};
use crate::models::{WeatherHistory, WeatherRequest, WeatherSummary};
use crate::AppState;

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Only history saved by this user
    user: Option<String>,
    /// Only history saved for this postal code
    #[serde(rename = "postalCode")]
    postal_code: Option<String>,
}

/// Fetches current weather for a postal code and saves it for the user
#[utoipa::path(
    post,
    path = "/app/weather",
    request_body = WeatherRequest,
    responses(
        (status = 200, description = "Saved weather", body = WeatherHistory),
        (status = 400, description = "Invalid request", body = WeatherError),
        (status = 500, description = "Internal server error", body = WeatherError),
        (status = 502, description = "Weather provider failed", body = WeatherError)
    ),
    tags = ["weather"],
    operation_id = "saveWeather"
)]
#[post("/weather")]
pub async fn save_weather(body: web::Json<WeatherRequest>, data: web::Data<AppState>) -> Result<HttpResponse, WeatherError> {
    debug!("save request: {:?}", body);

    match data.service.save_weather(&body).await {
        Ok(entry) => {
            info!("saved weather for postal code {}", body.postal_code);
            Ok(HttpResponse::Ok().json(entry))
        },
        Err(e) => {
            if e.kind.is_server_fault() {
                error!("failed to save weather for {:?}: {}", body, e);
            } else {
                warn!("rejected save request {:?}: {}", body, e);
            }
            Err(e)
        }
    }
}

/// Returns saved weather history filtered on user and/or postal code
#[utoipa::path(
    get,
    path = "/app/history",
    params(HistoryParams),
    responses(
        (status = 200, description = "Weather history", body = WeatherSummary),
        (status = 400, description = "Invalid user or postal code", body = WeatherError),
        (status = 500, description = "Internal server error", body = WeatherError)
    ),
    tags = ["weather"],
    operation_id = "getHistory"
)]
#[get("/history")]
pub async fn get_history(params: web::Query<HistoryParams>, data: web::Data<AppState>) -> Result<HttpResponse, WeatherError> {
    debug!("history request: {:?}", params);

    let summary = data.service
        .get_weather(params.user.as_deref(), params.postal_code.as_deref())
        .await?;

    debug!("returning {} history entries", summary.history.len());
    Ok(HttpResponse::Ok().json(summary))
}

/// Turns bodies that can't be read as a save request into an invalid request error
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("unreadable save request body: {}", err);
    WeatherError::new(ErrorKind::InvalidRequest).into()
}

/// Registers the weather endpoints under `/app`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/app")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(save_weather)
            .service(get_history),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use tokio::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::manager_db::DB;
    use crate::manager_weatherstack::tests::payload_json;
    use crate::manager_weatherstack::Weatherstack;
    use crate::service::WeatherService;

    fn state(server: &MockServer) -> web::Data<AppState> {
        let db = Arc::new(Mutex::new(DB::new(":memory:").unwrap()));
        let ws = Weatherstack::new(&format!("{}/current", server.uri()), "KEY").unwrap();
        web::Data::new(AppState { service: WeatherService::new(db, ws) })
    }

    #[actix_web::test]
    async fn save_and_list_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload_json()))
            .mount(&server)
            .await;
        let app = test::init_service(App::new().app_data(state(&server)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/app/weather")
            .set_json(json!({"user": "John Doe", "postalCode": "10001"}))
            .to_request();
        let saved: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(saved["location"]["name"], "New York");
        assert_eq!(saved["weather"]["precip"], 2);
        assert_eq!(saved["weather"]["weather_descriptions"], json!(["Light Rain"]));

        let req = test::TestRequest::get().uri("/app/history?user=John%20Doe&postalCode=10001").to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["history"].as_array().unwrap().len(), 1);
        assert_eq!(summary["history"][0], saved);

        let req = test::TestRequest::get().uri("/app/history").to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["history"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn invalid_save_request_is_bad_request() {
        let server = MockServer::start().await;
        let app = test::init_service(App::new().app_data(state(&server)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/app/weather")
            .set_json(json!({"user": "john_doe", "postalCode": "10001"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "W-0005");
    }

    #[actix_web::test]
    async fn unreadable_body_is_invalid_request() {
        let server = MockServer::start().await;
        let app = test::init_service(App::new().app_data(state(&server)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/app/weather")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "W-0005");
    }

    #[actix_web::test]
    async fn provider_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let app = test::init_service(App::new().app_data(state(&server)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/app/weather")
            .set_json(json!({"user": "John Doe", "postalCode": "10001"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "W-0006");
    }

    #[actix_web::test]
    async fn invalid_history_filter() {
        let server = MockServer::start().await;
        let app = test::init_service(App::new().app_data(state(&server)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/app/history?postalCode=abcde").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "W-0001");
    }
}
