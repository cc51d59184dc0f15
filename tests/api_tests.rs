//! HTTP integration tests for the climate API

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Days, NaiveDate};
use common::{STATION, get, get_text, hawaii_app, spawn_app};
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

fn as_date(value: &Value) -> NaiveDate {
    NaiveDate::parse_from_str(value.as_str().unwrap(), "%Y-%m-%d").unwrap()
}

/// The index lists every data route
#[tokio::test]
async fn test_index_lists_routes() {
    let app = hawaii_app();
    let (status, body) = get_text(&app.router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Available Routes"));
    for route in ["precipitation", "stations", "tobs", "temp/2016-08-23"] {
        assert!(body.contains(&format!("/api/v1.0/{route}")), "missing {route}");
    }
}

/// Precipitation covers exactly the trailing year and keeps missing values null
#[tokio::test]
async fn test_precipitation_trailing_year() {
    let app = hawaii_app();
    let (status, body) = get(&app.router, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let readings = body.as_array().unwrap();
    assert_eq!(readings.len(), 6);

    let latest = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
    let cutoff = latest.checked_sub_days(Days::new(365)).unwrap();
    assert!(readings.iter().all(|r| as_date(&r["date"]) >= cutoff));

    assert_eq!(readings[0], json!({"date": "2016-08-23", "prcp": 1.79}));
    assert_eq!(readings[2], json!({"date": "2017-01-15", "prcp": null}));
}

/// Station list mirrors the station table, duplicates included
#[tokio::test]
async fn test_stations_include_duplicates() {
    let app = spawn_app(&["USC00519397", STATION, STATION], &[]);
    let (status, body) = get(&app.router, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["USC00519397", STATION, STATION]));
}

/// Tobs is a flat [date, station, temperature, ...] array for the fixed station
#[tokio::test]
async fn test_tobs_flattened_for_fixed_station() {
    let app = hawaii_app();
    let (status, body) = get(&app.router, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            "2016-08-23", STATION, 68.0,
            "2017-01-15", STATION, 70.0,
            "2017-08-18", STATION, 75.0,
        ])
    );
}

#[rstest]
#[case("/api/v1.0/temp/2016-08-23/2017-08-23", json!([75.0, 68.0, 71.0]))]
#[case("/api/v1.0/temp/2016-08-20", json!([80.0, 68.0, 73.25]))]
#[case("/api/v1.0/temp/2017-01-15/2017-01-15", json!([70.0, 70.0, 70.0]))]
#[case("/api/v1.0/temp/2018-01-01", json!([null, null, null]))]
#[case("/api/v1.0/temp/2017-08-23/2016-08-23", json!([null, null, null]))]
#[tokio::test]
async fn test_temperature_stats(#[case] uri: &str, #[case] expected: Value) {
    let app = hawaii_app();
    let (status, body) = get(&app.router, uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

/// max >= avg >= min whenever the range holds data
#[tokio::test]
async fn test_temperature_stats_are_ordered() {
    let app = hawaii_app();
    for start in ["2016-01-01", "2016-08-23", "2017-01-01", "2017-08-01"] {
        let (_, body) = get(&app.router, &format!("/api/v1.0/temp/{start}/2017-08-23")).await;
        let values: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        let (max, min, avg) = (values[0], values[1], values[2]);
        assert!(max >= min, "{start}: {values:?}");
        assert!(min <= avg && avg <= max, "{start}: {values:?}");
    }
}

#[rstest]
#[case("/api/v1.0/temp/2016-8-23")]
#[case("/api/v1.0/temp/not-a-date")]
#[case("/api/v1.0/temp/2016-08-23/2017-02-30")]
#[tokio::test]
async fn test_malformed_dates_are_client_errors(#[case] uri: &str) {
    let app = hawaii_app();
    let (status, body) = get(&app.router, uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));
}

/// An empty observation table has no most recent date
#[tokio::test]
async fn test_empty_dataset_reports_no_data() {
    let app = spawn_app(&[STATION], &[]);

    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs"] {
        let (status, body) = get(&app.router, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string());
    }

    let (status, body) = get(&app.router, "/api/v1.0/temp/2016-08-23").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([null, null, null]));
}

/// A stored date outside YYYY-MM-DD cannot anchor the trailing window
#[rstest]
#[case("/api/v1.0/precipitation")]
#[case("/api/v1.0/tobs")]
#[tokio::test]
async fn test_unparsable_stored_date_is_server_error(#[case] uri: &str) {
    let app = spawn_app(
        &[STATION],
        &[
            (STATION, "2017-08-22", Some(0.1), Some(78.0)),
            (STATION, "2017/08/23", Some(0.0), Some(80.0)),
        ],
    );
    let (status, body) = get(&app.router, uri).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error."}));
}

/// The store disappearing mid-flight is a server error, not a panic
#[tokio::test]
async fn test_missing_store_is_server_error() {
    let app = hawaii_app();
    std::fs::remove_file(app.dir.path().join("hawaii.sqlite")).unwrap();

    let (status, body) = get(&app.router, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error."}));
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let app = hawaii_app();
    let first = get(&app.router, "/api/v1.0/precipitation").await;
    let second = get(&app.router, "/api/v1.0/precipitation").await;
    assert_eq!(first, second);
}

/// Any origin may read the API
#[tokio::test]
async fn test_cross_origin_requests_allowed() {
    let app = hawaii_app();
    let request = Request::builder()
        .uri("/api/v1.0/stations")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = hawaii_app();
    let (status, _) = get_text(&app.router, "/api/v1.0/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
