//! OpenAPI document for the weather endpoints, served through Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::errors::WeatherError;
use crate::manager_weatherstack::models::{Current, Location};
use crate::models::{WeatherHistory, WeatherRequest, WeatherSummary};

pub const OPENAPI_URL: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather history API",
        description = "Saves current weather for a user and postal code and serves the saved history."
    ),
    paths(
        crate::handlers::save_weather,
        crate::handlers::get_history,
    ),
    components(schemas(WeatherRequest, WeatherHistory, WeatherSummary, Location, Current, WeatherError)),
    tags(
        (name = "weather", description = "Operations related to weather")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, backed by the generated document
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs/{_:.*}").url(OPENAPI_URL, ApiDoc::openapi())
}
