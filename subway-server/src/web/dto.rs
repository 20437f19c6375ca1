//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::fare::{FareMode, FareTable, format_fare};
use crate::itinerary::{Itinerary, RideSegment};
use crate::network::{Network, Station, TransferStation};
use crate::router::{NearbyStation, Path};

/// A station and the lines serving it.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StationResult {
    /// Station name
    pub name: String,

    /// Serving lines, sorted
    pub lines: Vec<String>,

    /// Whether two or more lines serve it
    pub is_transfer: bool,
}

impl StationResult {
    pub fn from_station(network: &Network, station: &Station) -> Self {
        Self {
            name: station.name().to_string(),
            lines: network.line_names(station.id()),
            is_transfer: station.is_transfer(),
        }
    }

    pub fn from_transfer(transfer: TransferStation) -> Self {
        Self {
            name: transfer.name,
            lines: transfer.lines,
            is_transfer: true,
        }
    }
}

/// Response listing stations.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Query for nearby stations.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// Distance budget in kilometres (inclusive)
    pub max_distance: f64,
}

/// A station within reach.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct NearbyResult {
    pub name: String,

    /// Shortest distance from the origin
    pub distance_km: f64,

    pub lines: Vec<String>,
}

impl NearbyResult {
    pub fn from_nearby(network: &Network, nearby: &NearbyStation) -> Self {
        Self {
            name: network.name_of(nearby.station).to_string(),
            distance_km: nearby.distance,
            lines: network.line_names(nearby.station),
        }
    }
}

/// Response for nearby stations.
#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub origin: String,
    pub max_distance_km: f64,
    pub stations: Vec<NearbyResult>,
}

/// Query for a shortest route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Fare mode (`normal`, `discounted`, `one_day`, `three_day`,
    /// `seven_day`); defaults to `normal`
    pub mode: Option<String>,
}

/// One ride of an itinerary.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RideResult {
    pub line: String,
    pub from: String,
    pub to: String,

    /// Hops ridden on this line
    pub stops: usize,
}

impl RideResult {
    pub fn from_segment(segment: &RideSegment) -> Self {
        Self {
            line: segment.line_name.clone(),
            from: segment.from_name.clone(),
            to: segment.to_name.clone(),
            stops: segment.stops,
        }
    }
}

/// Fare quote.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FareResult {
    pub mode: String,
    pub amount: f64,

    /// Formatted amount, e.g. "¥3.00"
    pub display: String,
}

impl FareResult {
    pub fn quote(fares: &FareTable, distance: f64, mode: FareMode) -> Self {
        let amount = fares.fare(distance, mode);
        Self {
            mode: mode.to_string(),
            amount,
            display: format_fare(amount),
        }
    }
}

/// Response for a shortest route.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Stations along the route, origin first
    pub stations: Vec<String>,

    /// Total distance in kilometres
    pub distance_km: f64,

    /// Rides, one per line
    pub rides: Vec<RideResult>,

    /// Number of line changes
    pub transfers: usize,

    /// Printable directions
    pub instructions: Vec<String>,

    pub fare: FareResult,
}

impl RouteResponse {
    pub fn new(network: &Network, path: &Path, itinerary: &Itinerary, fare: FareResult) -> Self {
        Self {
            stations: path.names(network).into_iter().map(str::to_string).collect(),
            distance_km: path.distance(),
            rides: itinerary.segments().iter().map(RideResult::from_segment).collect(),
            transfers: itinerary.transfer_count(),
            instructions: itinerary.instructions(),
            fare,
        }
    }
}

/// Query for route enumeration.
#[derive(Debug, Deserialize)]
pub struct AllRoutesRequest {
    pub from: String,
    pub to: String,

    /// Cap on returned routes; never above the server's own limit
    pub max_paths: Option<usize>,
}

/// One enumerated route.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PathResult {
    pub stations: Vec<String>,
    pub distance_km: f64,
    pub transfers: usize,
}

/// Response for route enumeration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AllRoutesResponse {
    /// Routes, shortest first
    pub paths: Vec<PathResult>,

    /// True if a search limit was hit, so more routes may exist
    pub truncated: bool,
}

/// Query for a fare quote.
#[derive(Debug, Deserialize)]
pub struct FareRequest {
    /// Ride distance in kilometres
    pub distance: f64,

    pub mode: Option<String>,
}

/// Response for a fare quote.
#[derive(Debug, Serialize, Deserialize)]
pub struct FareResponse {
    pub distance_km: f64,
    pub fare: FareResult,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
