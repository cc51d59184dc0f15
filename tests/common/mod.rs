//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::path::Path;

use axum::{Router, body::Body, http::Request, http::StatusCode};
use climate_api::config::QueryConfig;
use climate_api::{Database, ObservationService, web};
use http_body_util::BodyExt;
use rusqlite::{Connection, params};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const STATION: &str = "USC00519281";

/// A dataset on disk plus the router serving it
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

/// Measurement row: (station, date, prcp, tobs)
pub type Row<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

pub fn create_dataset(path: &Path, stations: &[&str], rows: &[Row<'_>]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT
        );
        CREATE TABLE station (
            id INTEGER PRIMARY KEY, station TEXT, name TEXT,
            latitude FLOAT, longitude FLOAT, elevation FLOAT
        );",
    )
    .unwrap();

    for station in stations {
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, 'TEST STATION, HI US', 21.3, -157.8, 3.0)",
            params![station],
        )
        .unwrap();
    }
    for (station, date, prcp, tobs) in rows {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![station, date, prcp, tobs],
        )
        .unwrap();
    }
}

pub fn spawn_app(stations: &[&str], rows: &[Row<'_>]) -> TestApp {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    create_dataset(&path, stations, rows);

    let database = Database::open(&path).unwrap();
    let service = ObservationService::new(database, &QueryConfig::default());
    TestApp {
        dir,
        router: web::app(service),
    }
}

/// The observations most tests run against
pub fn hawaii_app() -> TestApp {
    spawn_app(
        &["USC00519397", "USC00513117", STATION, "USC00516128"],
        &[
            (STATION, "2016-08-20", Some(0.3), Some(80.0)),
            (STATION, "2016-08-23", Some(1.79), Some(68.0)),
            ("USC00519397", "2016-08-23", Some(0.0), Some(81.0)),
            (STATION, "2017-01-15", None, Some(70.0)),
            ("USC00516128", "2017-05-01", None, None),
            (STATION, "2017-08-18", Some(0.06), Some(75.0)),
            ("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
        ],
    )
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(router, uri).await;
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_text(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
