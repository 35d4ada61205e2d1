use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, UnitSystem, WeatherReport, classify, meter_position};
use crate::web::SharedDashboard;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiAirQuality {
    pub aqi: u32,
    pub level: String,
    pub color: String,
    pub meter_position: f64,
}

impl From<u32> for ApiAirQuality {
    fn from(aqi: u32) -> Self {
        let level = classify(aqi);
        Self {
            aqi,
            level: level.level.to_string(),
            color: level.color.to_string(),
            meter_position: meter_position(aqi),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiSession {
    pub unit: UnitSystem,
    pub location: Option<Coordinate>,
    pub has_report: bool,
}

pub fn router() -> Router<SharedDashboard> {
    Router::new()
        .route("/report", get(get_report))
        .route("/session", get(get_session))
        .route("/air-quality/{aqi}", get(get_air_quality))
}

async fn get_report(
    State(dashboard): State<SharedDashboard>,
) -> Result<Json<WeatherReport>, StatusCode> {
    dashboard
        .latest_report()
        .await
        .map(|report| Json(WeatherReport::clone(&report)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_session(State(dashboard): State<SharedDashboard>) -> Json<ApiSession> {
    let session = dashboard.session().await;
    Json(ApiSession {
        unit: session.unit,
        location: session.location,
        has_report: session.report.is_some(),
    })
}

async fn get_air_quality(Path(aqi): Path<u32>) -> Json<ApiAirQuality> {
    Json(ApiAirQuality::from(aqi))
}
