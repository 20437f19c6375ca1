//! Application state for the web layer.

use std::sync::Arc;

use crate::fare::FareTable;
use crate::network::Network;
use crate::router::PathLimits;

/// Shared application state.
///
/// The network is immutable after loading, so handlers read it through
/// the `Arc` without any locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded subway network
    pub network: Arc<Network>,

    /// Fare table used for quotes
    pub fares: Arc<FareTable>,

    /// Limits applied to route enumeration
    pub limits: Arc<PathLimits>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, fares: FareTable, limits: PathLimits) -> Self {
        Self {
            network: Arc::new(network),
            fares: Arc::new(fares),
            limits: Arc::new(limits),
        }
    }
}
