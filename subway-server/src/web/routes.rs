//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::fare::{FareMode, FareTableError};
use crate::itinerary::Itinerary;
use crate::network::NetworkError;
use crate::router::Router as RouteFinder;

use super::dto::*;
use super::state::AppState;

/// Served endpoints: route pattern, an example request, description.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("/health", "/health", "Health check"),
    ("/stations", "/stations", "All stations"),
    ("/stations/transfers", "/stations/transfers", "Transfer stations"),
    ("/stations/:name", "/stations/B", "One station and its lines"),
    (
        "/stations/:name/nearby?max_distance=",
        "/stations/B/nearby?max_distance=3",
        "Stations within max_distance",
    ),
    (
        "/route/shortest?from=&to=&mode=",
        "/route/shortest?from=A&to=D&mode=normal",
        "Shortest route with fare",
    ),
    (
        "/route/all?from=&to=&max_paths=",
        "/route/all?from=A&to=C&max_paths=5",
        "All simple routes",
    ),
    ("/fare?distance=&mode=", "/fare?distance=9.5&mode=discounted", "Fare quote"),
];

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/stations/transfers", get(transfer_stations))
        .route("/stations/:name", get(station))
        .route("/stations/:name/nearby", get(nearby_stations))
        .route("/route/shortest", get(shortest_route))
        .route("/route/all", get(all_routes))
        .route("/fare", get(fare_quote))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations, in the order they were first loaded.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let network = &state.network;
    let stations = network
        .stations()
        .map(|s| StationResult::from_station(network, s))
        .collect();
    Json(StationsResponse { stations })
}

/// Stations served by two or more lines.
async fn transfer_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .network
        .transfer_stations()
        .into_iter()
        .map(StationResult::from_transfer)
        .collect();
    Json(StationsResponse { stations })
}

/// One station by name.
async fn station(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
) -> Result<Json<StationResult>, AppError> {
    let found = state.network.get_station(&name)?;
    Ok(Json(StationResult::from_station(&state.network, found)))
}

/// Stations within a distance budget of the named one.
async fn nearby_stations(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    if !req.max_distance.is_finite() || req.max_distance < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid max_distance: {}", req.max_distance),
        });
    }

    let network = &state.network;
    let nearby = RouteFinder::new(network).find_nearby_stations(&name, req.max_distance)?;
    let stations = nearby
        .iter()
        .map(|n| NearbyResult::from_nearby(network, n))
        .collect();

    Ok(Json(NearbyResponse {
        origin: name,
        max_distance_km: req.max_distance,
        stations,
    }))
}

/// Shortest route with itinerary and fare.
async fn shortest_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let mode = parse_mode(req.mode.as_deref())?;
    let network = &state.network;

    let path = RouteFinder::new(network).shortest_path(&req.from, &req.to)?;
    let itinerary = Itinerary::build(network, &path)?;
    let fare = FareResult::quote(&state.fares, path.distance(), mode);

    debug!(
        from = %req.from,
        to = %req.to,
        distance = path.distance(),
        transfers = itinerary.transfer_count(),
        "route planned"
    );

    Ok(Json(RouteResponse::new(network, &path, &itinerary, fare)))
}

/// Bounded enumeration of simple routes, shortest first.
async fn all_routes(
    State(state): State<AppState>,
    Query(req): Query<AllRoutesRequest>,
) -> Result<Json<AllRoutesResponse>, AppError> {
    let limits = match req.max_paths {
        Some(0) => {
            return Err(AppError::BadRequest {
                message: "max_paths must be at least 1".to_string(),
            });
        }
        Some(n) => state.limits.as_ref().clone().with_max_paths(n.min(state.limits.max_paths)),
        None => state.limits.as_ref().clone(),
    };

    let network = &state.network;
    let enumeration = RouteFinder::new(network).find_paths_bounded(&req.from, &req.to, &limits)?;

    let mut paths = enumeration
        .paths
        .iter()
        .map(|p| {
            let itinerary = Itinerary::build(network, p)?;
            Ok::<_, NetworkError>(PathResult {
                stations: p.names(network).into_iter().map(str::to_string).collect(),
                distance_km: p.distance(),
                transfers: itinerary.transfer_count(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.transfers.cmp(&b.transfers))
    });

    Ok(Json(AllRoutesResponse {
        paths,
        truncated: enumeration.truncated,
    }))
}

/// Fare for a distance.
async fn fare_quote(
    State(state): State<AppState>,
    Query(req): Query<FareRequest>,
) -> Result<Json<FareResponse>, AppError> {
    if !req.distance.is_finite() {
        return Err(AppError::BadRequest {
            message: format!("Invalid distance: {}", req.distance),
        });
    }

    let mode = parse_mode(req.mode.as_deref())?;
    Ok(Json(FareResponse {
        distance_km: req.distance,
        fare: FareResult::quote(&state.fares, req.distance, mode),
    }))
}

fn parse_mode(mode: Option<&str>) -> Result<FareMode, AppError> {
    mode.map_or(Ok(FareMode::Normal), |m| m.parse::<FareMode>().map_err(AppError::from))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::NotFound(_) | NetworkError::NoPath { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            NetworkError::InvalidDistance { .. } | NetworkError::DiscontinuousLine { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            NetworkError::NoCommonLine { .. } | NetworkError::CapacityExceeded { .. } => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<FareTableError> for AppError {
    fn from(e: FareTableError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
