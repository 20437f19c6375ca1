//! Path type returned by the router.

use crate::network::{Network, StationId};

/// A route through the network as a sequence of stations.
///
/// Only stations are recorded, not the line used for each hop; see
/// [`Itinerary`](crate::itinerary::Itinerary) for line attribution.
///
/// # Invariants
///
/// - At least one station
/// - Consecutive stations are joined by an edge of the network that
///   produced the path
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    stations: Vec<StationId>,
    distance: f64,
}

impl Path {
    pub(crate) fn new(stations: Vec<StationId>, distance: f64) -> Self {
        debug_assert!(!stations.is_empty());
        Self { stations, distance }
    }

    /// The single-station path of a trip that goes nowhere.
    pub(crate) fn stay(station: StationId) -> Self {
        Self::new(vec![station], 0.0)
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Total length in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of stations, including both ends.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false; a path has at least one station.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.stations.len() - 1
    }

    pub fn origin(&self) -> StationId {
        self.stations[0]
    }

    pub fn destination(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Returns true if no station appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.stations.len());
        self.stations.iter().all(|s| seen.insert(*s))
    }

    /// Station names along the path.
    pub fn names<'n>(&self, network: &'n Network) -> Vec<&'n str> {
        self.stations.iter().map(|s| network.name_of(*s)).collect()
    }

    /// Renders the path as `A → B → C (7.00 km)`.
    pub fn describe(&self, network: &Network) -> String {
        format!("{} ({:.2} km)", self.names(network).join(" → "), self.distance)
    }
}
