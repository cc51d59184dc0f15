use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};

use crate::{
    ClimateApiError,
    models::{DateRange, PrecipitationReading, TemperatureObservations, TemperatureStats},
    observations::ObservationService,
};

/// Prefix every data route is mounted under
pub const API_PREFIX: &str = "/api/v1.0";

const ROUTES: [(&str, &str); 5] = [
    ("/precipitation", "Precipitation for the most recent year"),
    ("/stations", "All station identifiers"),
    ("/tobs", "Temperature observations for the most recent year"),
    (
        "/temp/2016-08-23/2017-08-23",
        "Max, min and average temperature between two dates",
    ),
    (
        "/temp/2016-08-23",
        "Max, min and average temperature from a date onwards",
    ),
];

/// Plain-text listing of the available routes
#[must_use]
pub fn route_listing() -> String {
    let mut listing = String::from("Available Routes:\n");
    for (path, description) in ROUTES {
        listing.push_str(&format!("{API_PREFIX}{path}    {description}\n"));
    }
    listing
}

pub fn router() -> Router<ObservationService> {
    Router::new()
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/temp/{start}", get(get_temp_from))
        .route("/temp/{start}/{end}", get(get_temp_between))
}

async fn get_precipitation(
    State(service): State<ObservationService>,
) -> Result<Json<Vec<PrecipitationReading>>, ClimateApiError> {
    Ok(Json(service.recent_precipitation().await?))
}

async fn get_stations(
    State(service): State<ObservationService>,
) -> Result<Json<Vec<String>>, ClimateApiError> {
    Ok(Json(service.station_ids().await?))
}

async fn get_tobs(
    State(service): State<ObservationService>,
) -> Result<Json<TemperatureObservations>, ClimateApiError> {
    Ok(Json(service.recent_temperatures().await?))
}

async fn get_temp_from(
    State(service): State<ObservationService>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ClimateApiError> {
    let range = DateRange::parse(&start, None)?;
    Ok(Json(service.temperature_stats(range).await?))
}

async fn get_temp_between(
    State(service): State<ObservationService>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ClimateApiError> {
    let range = DateRange::parse(&start, Some(&end))?;
    Ok(Json(service.temperature_stats(range).await?))
}
