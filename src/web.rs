use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::models::UnitSystem;
use crate::render;

pub type SharedDashboard = Arc<Dashboard>;

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

pub fn router(dashboard: SharedDashboard) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/unit/{unit}", post(set_unit))
        .route("/locate", post(locate))
        .nest("/api", api::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(dashboard)
}

pub async fn run(address: &str, dashboard: SharedDashboard) -> Result<()> {
    let app = router(dashboard);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| DashboardError::server(format!("cannot bind {address}: {e}")))?;
    tracing::info!("Web server running at http://{}", address);
    axum::serve(listener, app)
        .await
        .context("Web server terminated unexpectedly")?;
    Ok(())
}

async fn current_page(dashboard: &Dashboard) -> Html<String> {
    let content = dashboard.screen().current();
    Html(render::page(&content, dashboard.unit().await))
}

async fn index(State(dashboard): State<SharedDashboard>) -> Html<String> {
    current_page(&dashboard).await
}

async fn search(
    State(dashboard): State<SharedDashboard>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    dashboard.search(&params.q).await;
    current_page(&dashboard).await
}

async fn set_unit(
    State(dashboard): State<SharedDashboard>,
    Path(unit): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let unit: UnitSystem = unit
        .parse()
        .map_err(|e: DashboardError| (StatusCode::BAD_REQUEST, e.user_message()))?;
    dashboard.set_unit(unit).await;
    Ok(current_page(&dashboard).await)
}

async fn locate(State(dashboard): State<SharedDashboard>) -> Html<String> {
    dashboard.locate().await;
    current_page(&dashboard).await
}
