//! Subway network model.
//!
//! Stations and lines are interned to dense ids while building; the
//! resulting [`Network`] holds the registry and an adjacency index keyed by
//! those ids. Building and querying are separate phases: a
//! [`NetworkBuilder`] is consumed to produce an immutable `Network`.

mod builder;
mod error;
mod graph;
mod station;

pub use builder::{ChainPolicy, NetworkBuilder};
pub use error::NetworkError;
pub use graph::{Edge, Network, TransferStation};
pub use station::{Chain, Line, LineId, Station, StationId};
