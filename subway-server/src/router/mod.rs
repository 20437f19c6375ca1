//! Route queries over a built network.
//!
//! Three searches share the same [`Network`]:
//!
//! - shortest path (Dijkstra with early exit),
//! - simple-path enumeration (explicit-stack DFS, optionally bounded),
//! - bounded-radius reachability (Dijkstra cut off at a distance budget).
//!
//! All of them take station names, resolve them once, and work on
//! interned [`StationId`](crate::network::StationId)s internally. Scratch
//! state is local to each call.

mod config;
mod dijkstra;
mod path;
mod paths;

pub use config::PathLimits;
pub use dijkstra::NearbyStation;
pub use path::Path;
pub use paths::PathEnumeration;

use crate::network::{Network, NetworkError};

/// Answers routing queries against one network.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    network: &'a Network,
}

impl<'a> Router<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// Shortest path between two stations by total distance.
    ///
    /// `shortest_path(a, a)` is the single-station path of length zero.
    ///
    /// Among several equally short routes the result is fixed by the order
    /// segments were added to the network: edges are relaxed in that order
    /// and a tie never replaces an earlier relaxation.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::NotFound`] if either station is unknown
    /// - [`NetworkError::NoPath`] if `to` can't be reached from `from`
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::network::NetworkBuilder;
    /// use subway_server::router::Router;
    ///
    /// let mut builder = NetworkBuilder::new();
    /// builder.add_segment("Line1", "A", "B", 3.0).unwrap();
    /// builder.add_segment("Line1", "B", "C", 4.0).unwrap();
    /// builder.add_segment("Line2", "B", "D", 2.0).unwrap();
    /// let network = builder.build();
    ///
    /// let path = Router::new(&network).shortest_path("A", "D").unwrap();
    /// assert_eq!(path.names(&network), vec!["A", "B", "D"]);
    /// assert_eq!(path.distance(), 5.0);
    /// ```
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Path, NetworkError> {
        let start = self.network.station_id(from)?;
        let end = self.network.station_id(to)?;
        dijkstra::shortest_path(self.network, start, end)
    }

    /// Every simple path from `from` to `to`.
    ///
    /// This is exponential in the number of loops in the network and has no
    /// built-in bound. Prefer [`Router::find_paths_bounded`] unless the
    /// network is known to be small.
    pub fn find_all_paths(&self, from: &str, to: &str) -> Result<Vec<Path>, NetworkError> {
        self.find_paths_bounded(from, to, &PathLimits::unbounded())
            .map(|e| e.paths)
    }

    /// Simple-path enumeration cut off by `limits`.
    ///
    /// Paths come out in depth-first order (neighbours in adjacency order).
    /// Check [`PathEnumeration::truncated`] to tell whether the result is
    /// complete.
    pub fn find_paths_bounded(
        &self,
        from: &str,
        to: &str,
        limits: &PathLimits,
    ) -> Result<PathEnumeration, NetworkError> {
        let start = self.network.station_id(from)?;
        let end = self.network.station_id(to)?;
        Ok(paths::enumerate(self.network, start, end, limits))
    }

    /// Stations whose shortest distance from `from` is at most
    /// `max_distance` (inclusive, with a 1e-9 km tolerance for float sums),
    /// excluding `from` itself.
    ///
    /// Sorted by distance, then station name.
    pub fn find_nearby_stations(
        &self,
        from: &str,
        max_distance: f64,
    ) -> Result<Vec<NearbyStation>, NetworkError> {
        let start = self.network.station_id(from)?;
        let mut found = dijkstra::nearby_stations(self.network, start, max_distance);
        found.sort_by(|a, b| {
            a.distance.total_cmp(&b.distance).then_with(|| {
                self.network
                    .name_of(a.station)
                    .cmp(self.network.name_of(b.station))
            })
        });
        Ok(found)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::{ChainPolicy, NetworkBuilder};
    use proptest::prelude::*;

    /// Small random networks: few stations so enumeration stays cheap.
    fn network() -> impl Strategy<Value = Network> {
        prop::collection::vec((0u8..6, 0u8..6, 1u32..20, 0u8..3), 1..12).prop_map(|segs| {
            let mut builder = NetworkBuilder::with_policy(ChainPolicy::Lenient);
            for (a, b, d, line) in segs {
                if a == b {
                    continue;
                }
                builder
                    .add_segment(&format!("L{line}"), &format!("S{a}"), &format!("S{b}"), f64::from(d))
                    .unwrap();
            }
            builder.build()
        })
    }

    fn station_pair(net: &Network) -> Option<(String, String)> {
        let mut names = net.stations().map(|s| s.name().to_string());
        let a = names.next()?;
        let b = names.last()?;
        Some((a, b))
    }

    proptest! {
        /// Shortest distance equals the minimum over all simple paths
        #[test]
        fn completeness(net in network()) {
            let Some((a, b)) = station_pair(&net) else { return Ok(()); };
            let router = Router::new(&net);
            let all = router.find_all_paths(&a, &b).unwrap();

            match router.shortest_path(&a, &b) {
                Ok(best) => {
                    let min = all
                        .iter()
                        .map(Path::distance)
                        .fold(f64::INFINITY, f64::min);
                    prop_assert!((best.distance() - min).abs() < 1e-9);
                }
                Err(NetworkError::NoPath { .. }) => prop_assert!(all.is_empty()),
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
        }

        /// No enumerated path repeats a station, and each ends where asked
        #[test]
        fn no_repeats(net in network()) {
            let Some((a, b)) = station_pair(&net) else { return Ok(()); };
            let a_id = net.station_id(&a).unwrap();
            let b_id = net.station_id(&b).unwrap();
            for path in Router::new(&net).find_all_paths(&a, &b).unwrap() {
                prop_assert!(path.is_simple());
                prop_assert_eq!(path.origin(), a_id);
                prop_assert_eq!(path.destination(), b_id);
            }
        }

        /// Nearby distances agree with shortest paths
        #[test]
        fn nearby_matches_shortest(net in network(), budget in 0u32..40) {
            let Some((a, _)) = station_pair(&net) else { return Ok(()); };
            let router = Router::new(&net);
            let budget = f64::from(budget);
            let nearby = router.find_nearby_stations(&a, budget).unwrap();

            for station in net.stations() {
                if station.name() == a {
                    continue;
                }
                let listed = nearby.iter().find(|n| n.station == station.id());
                match router.shortest_path(&a, station.name()) {
                    Ok(p) if p.distance() <= budget => {
                        let listed = listed.map(|n| n.distance);
                        prop_assert_eq!(listed, Some(p.distance()));
                    }
                    _ => prop_assert!(listed.is_none()),
                }
            }
        }
    }
}
