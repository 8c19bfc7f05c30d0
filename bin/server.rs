// Streamer Anniversaries - Web Server
// REST API with Axum over an in-memory roster

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use streamer_anniversaries::{
    classify_roster, today, AnniversaryKind, Config, Region, Roster, RosterFilter, DATE_FORMAT,
};

/// Shared application state; the roster never changes after startup
#[derive(Clone)]
struct AppState {
    roster: Arc<Roster>,
    config: Arc<Config>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query string for the anniversaries endpoint
#[derive(Debug, Default, Deserialize)]
struct AnniversaryQuery {
    /// Name search
    q: Option<String>,

    /// Comma separated region tags
    regions: Option<String>,

    hide_ended: Option<bool>,

    /// YYYY/MM/DD, defaults to today
    date: Option<String>,
}

impl AnniversaryQuery {
    fn filter(self, config: &Config) -> Result<RosterFilter, String> {
        let regions = match self.regions.as_deref() {
            Some(raw) => raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse::<Region>)
                .collect::<Result<BTreeSet<_>, _>>()?,
            None => config.regions.clone(),
        };

        Ok(RosterFilter {
            query: self.q,
            regions,
            hide_ended: self.hide_ended.unwrap_or(config.hide_ended),
        })
    }
}

fn parse_reference(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| format!("invalid date {:?}, expected YYYY/MM/DD", raw)),
        None => Ok(today()),
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::err(message))).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/anniversaries - default kind from config
async fn get_default_anniversaries(
    State(state): State<AppState>,
    Query(query): Query<AnniversaryQuery>,
) -> Response {
    let kind = state.config.default_kind;
    anniversaries_response(&state, kind, query)
}

/// GET /api/anniversaries/:kind - classified roster for one anniversary kind
async fn get_anniversaries(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<AnniversaryQuery>,
) -> Response {
    let kind = match kind.parse::<AnniversaryKind>() {
        Ok(kind) => kind,
        Err(e) => return bad_request(e),
    };
    anniversaries_response(&state, kind, query)
}

fn anniversaries_response(state: &AppState, kind: AnniversaryKind, query: AnniversaryQuery) -> Response {
    // Captured once per request
    let reference = match parse_reference(query.date.as_deref()) {
        Ok(date) => date,
        Err(e) => return bad_request(e),
    };
    let filter = match query.filter(&state.config) {
        Ok(filter) => filter,
        Err(e) => return bad_request(e),
    };

    let filtered = filter.apply(state.roster.as_ref());
    match classify_roster(filtered, kind, reference) {
        Ok(classification) => (StatusCode::OK, Json(ApiResponse::ok(classification))).into_response(),
        Err(e) => {
            error!("Error classifying roster: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /api/streamers/:id - single roster entry
async fn get_streamer(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.roster.get(&id) {
        Some(streamer) => (StatusCode::OK, Json(ApiResponse::ok(streamer))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::err(format!("streamer not found: {}", id))),
        )
            .into_response(),
    }
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/anniversaries", get(get_default_anniversaries))
        .route("/api/anniversaries/:kind", get(get_anniversaries))
        .route("/api/streamers/:id", get(get_streamer))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting anniversary server");

    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    let roster = Roster::from_file(&config.roster_path)?;
    info!("Loaded {} streamers from {:?}", roster.len(), config.roster_path);

    let addr: SocketAddr = config.bind_address.parse()?;
    let state = AppState {
        roster: Arc::new(roster),
        config: Arc::new(config),
    };

    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
