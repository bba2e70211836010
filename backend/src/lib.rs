pub mod alerts;
pub mod comparison;
pub mod config;
pub mod dem;
pub mod difficulty;
pub mod directions;
pub mod elevation;
pub mod engine;
pub mod error;
pub mod geodesy;
pub mod open_elevation;
pub mod places;
pub mod provider;
pub mod sampling;
pub mod session;
pub mod stats;
pub mod terrain;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Timelike;
use serde::Deserialize;
use shared::{
    AnalyzedRoute, ApiError, ComfortAmenities, RouteRequest, RouteResponse, SelectRouteRequest,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::alerts::analyze_route;
use crate::comparison::compare_routes;
use crate::directions::SyntheticDirections;
use crate::elevation::ElevationSource;
use crate::engine::RouteAnalyticsEngine;
use crate::error::AnalyticsError;
use crate::places::PlaceCatalog;
use crate::session::{RouteSession, SelectedRoute, SessionError};

pub type DefaultEngine = RouteAnalyticsEngine<SyntheticDirections, ElevationSource, PlaceCatalog>;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DefaultEngine>,
    pub session: Arc<RouteSession>,
}

impl AppState {
    pub fn new(engine: DefaultEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            session: Arc::new(RouteSession::new()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/route", post(route_handler))
        .route("/api/route/selected", get(selected_route_handler))
        .route("/api/route/select", post(select_route_handler))
        .route("/api/amenities", get(amenities_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

async fn route_handler(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> ApiResult<RouteResponse> {
    let ticket = state.session.begin();
    tracing::info!(
        "Route request {}: {:?} -> {:?} via {} waypoint(s)",
        ticket.id(),
        req.start,
        req.end,
        req.waypoints.len()
    );

    let routes = state.engine.plan(&req).await.map_err(analytics_error)?;
    state
        .session
        .commit(ticket, req.mode, routes.clone())
        .map_err(session_error)?;

    let hour = local_hour();
    let comparison = if routes.len() > 1 {
        compare_routes(&routes)
    } else {
        None
    };
    let analyzed = routes
        .into_iter()
        .map(|route| {
            let analysis = analyze_route(&route, req.mode, hour);
            AnalyzedRoute { route, analysis }
        })
        .collect();

    Ok(Json(RouteResponse {
        request_id: ticket.id(),
        routes: analyzed,
        selected: 0,
        comparison,
    }))
}

async fn selected_route_handler(State(state): State<AppState>) -> ApiResult<AnalyzedRoute> {
    let selected = state
        .session
        .selected()
        .ok_or(SessionError::NoSelection)
        .map_err(session_error)?;
    Ok(Json(analyze_selected(selected)))
}

async fn select_route_handler(
    State(state): State<AppState>,
    Json(req): Json<SelectRouteRequest>,
) -> ApiResult<AnalyzedRoute> {
    let selected = state.session.select(req.index).map_err(session_error)?;
    tracing::info!(
        "Selected alternative {} of request {}",
        selected.index,
        selected.request_id
    );
    Ok(Json(analyze_selected(selected)))
}

#[derive(Debug, Deserialize)]
struct AmenitiesQuery {
    radius_m: Option<f64>,
}

async fn amenities_handler(
    State(state): State<AppState>,
    Query(query): Query<AmenitiesQuery>,
) -> ApiResult<ComfortAmenities> {
    let selected = state
        .session
        .selected()
        .ok_or(SessionError::NoSelection)
        .map_err(session_error)?;

    state
        .engine
        .comfort_amenities(&selected.route.points, query.radius_m)
        .await
        .map(Json)
        .ok_or_else(|| {
            api_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "selected route has no points".to_string(),
            )
        })
}

fn analyze_selected(selected: SelectedRoute) -> AnalyzedRoute {
    let analysis = analyze_route(&selected.route, selected.mode, local_hour());
    AnalyzedRoute {
        route: selected.route,
        analysis,
    }
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

fn api_error(status: StatusCode, message: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { message }))
}

fn analytics_error(err: AnalyticsError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        AnalyticsError::DegenerateInput(_) => StatusCode::BAD_REQUEST,
        _ if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        AnalyticsError::Provider(_) => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!("Route request failed: {}", err);
    api_error(status, err.to_string())
}

fn session_error(err: SessionError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        SessionError::Superseded { .. } => StatusCode::CONFLICT,
        SessionError::NoSelection | SessionError::NoSuchAlternative { .. } => StatusCode::NOT_FOUND,
    };
    api_error(status, err.to_string())
}
