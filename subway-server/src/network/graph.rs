//! The built, read-only subway network.

use std::collections::{BTreeSet, HashMap};

use super::error::NetworkError;
use super::station::{Line, LineId, Station, StationId};

/// A directed edge of the network graph.
///
/// Every segment added to the network produces two edges, one per direction,
/// with the same distance and line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,
    /// Hop length in kilometres.
    pub distance: f64,
    pub line: LineId,
}

/// A station served by two or more lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStation {
    pub id: StationId,
    pub name: String,
    /// Names of the serving lines, sorted.
    pub lines: Vec<String>,
}

/// A subway network: station/line registry plus adjacency index.
///
/// Produced by [`NetworkBuilder::build`](super::NetworkBuilder::build) and
/// immutable afterwards, so a `Network` can be shared freely between
/// concurrent readers (e.g. behind an `Arc`).
///
/// `StationId`s and `LineId`s are only meaningful for the network that
/// issued them; accessors taking an id index directly and panic on a
/// foreign id.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(super) stations: Vec<Station>,
    pub(super) station_index: HashMap<String, StationId>,
    pub(super) lines: Vec<Line>,
    pub(super) line_index: HashMap<String, LineId>,
    /// Outgoing edges per station, in insertion order.
    pub(super) adjacency: Vec<Vec<Edge>>,
}

impl Network {
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of directed edges (twice the number of segments).
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Resolves a station name to its id.
    pub fn station_id(&self, name: &str) -> Result<StationId, NetworkError> {
        self.station_index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::NotFound(name.to_string()))
    }

    /// Looks up a station by name.
    pub fn get_station(&self, name: &str) -> Result<&Station, NetworkError> {
        self.station_id(name).map(|id| self.station(id))
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    pub fn name_of(&self, id: StationId) -> &str {
        self.station(id).name()
    }

    /// All stations in id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.line_index.get(name).map(|id| self.line_by_id(*id))
    }

    pub fn line_by_id(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    pub fn line_name(&self, id: LineId) -> &str {
        self.line_by_id(id).name()
    }

    /// All lines in id order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Outgoing edges of a station, in the order segments were added.
    pub fn edges_from(&self, id: StationId) -> &[Edge] {
        &self.adjacency[id.index()]
    }

    /// Lines with a direct edge between `a` and `b`.
    pub fn lines_between(&self, a: StationId, b: StationId) -> BTreeSet<LineId> {
        self.edges_from(a)
            .iter()
            .filter(|e| e.to == b)
            .map(|e| e.line)
            .collect()
    }

    /// Names of the lines serving a station, sorted.
    pub fn line_names(&self, id: StationId) -> Vec<String> {
        let mut names: Vec<String> = self
            .station(id)
            .lines()
            .iter()
            .map(|l| self.line_name(*l).to_string())
            .collect();
        names.sort();
        names
    }

    /// Stations served by at least two lines, sorted by name.
    ///
    /// Derived from the stations' line sets on every call.
    pub fn transfer_stations(&self) -> Vec<TransferStation> {
        let mut transfers: Vec<TransferStation> = self
            .stations
            .iter()
            .filter(|s| s.is_transfer())
            .map(|s| TransferStation {
                id: s.id(),
                name: s.name().to_string(),
                lines: self.line_names(s.id()),
            })
            .collect();
        transfers.sort_by(|a, b| a.name.cmp(&b.name));
        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::super::NetworkBuilder;
    use super::*;

    fn scenario() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line1", "B", "C", 4.0).unwrap();
        builder.add_segment("Line2", "B", "D", 2.0).unwrap();
        builder.build()
    }

    #[test]
    fn counts() {
        let net = scenario();
        assert_eq!(net.station_count(), 4);
        assert_eq!(net.line_count(), 2);
        assert_eq!(net.edge_count(), 6);
        assert!(!net.is_empty());
    }

    #[test]
    fn station_lookup() {
        let net = scenario();
        let b = net.get_station("B").unwrap();
        assert_eq!(b.name(), "B");
        assert_eq!(net.line_names(b.id()), vec!["Line1", "Line2"]);

        assert_eq!(
            net.get_station("Z").unwrap_err(),
            NetworkError::NotFound("Z".into())
        );
    }

    #[test]
    fn ids_follow_first_reference() {
        let net = scenario();
        assert_eq!(net.station_id("A").unwrap(), StationId(0));
        assert_eq!(net.station_id("B").unwrap(), StationId(1));
        assert_eq!(net.station_id("C").unwrap(), StationId(2));
        assert_eq!(net.station_id("D").unwrap(), StationId(3));
        assert_eq!(net.name_of(StationId(3)), "D");
    }

    #[test]
    fn transfer_stations_scenario() {
        let net = scenario();
        let transfers = net.transfer_stations();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].name, "B");
        assert_eq!(transfers[0].lines, vec!["Line1", "Line2"]);
    }

    #[test]
    fn edge_set_is_symmetric() {
        let net = scenario();
        for station in net.stations() {
            for edge in net.edges_from(station.id()) {
                assert_eq!(edge.from, station.id());
                let reverse = net
                    .edges_from(edge.to)
                    .iter()
                    .any(|r| r.to == edge.from && r.distance == edge.distance && r.line == edge.line);
                assert!(reverse, "missing reverse of {:?}", edge);
            }
        }
    }

    #[test]
    fn lines_between_parallel_service() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line9", "A", "B", 3.5).unwrap();
        builder.add_segment("Line9", "B", "C", 1.0).unwrap();
        let net = builder.build();

        let a = net.station_id("A").unwrap();
        let b = net.station_id("B").unwrap();
        let c = net.station_id("C").unwrap();

        let names: Vec<&str> = net
            .lines_between(a, b)
            .into_iter()
            .map(|l| net.line_name(l))
            .collect();
        assert_eq!(names, vec!["Line1", "Line9"]);
        assert!(net.lines_between(a, c).is_empty());
    }

    #[test]
    fn line_accessors() {
        let net = scenario();
        let line1 = net.line("Line1").unwrap();
        let names: Vec<&str> = line1.stations().iter().map(|s| net.name_of(*s)).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(line1.length(), 7.0);
        assert!(net.line("Line3").is_none());
        assert_eq!(net.lines().count(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::super::{ChainPolicy, NetworkBuilder};
    use proptest::prelude::*;

    /// Random segments over a small station alphabet, each on its own line
    /// so the strict chain policy never rejects them.
    fn segments() -> impl Strategy<Value = Vec<(u8, u8, u32)>> {
        prop::collection::vec((0u8..8, 0u8..8, 1u32..50), 1..20)
    }

    proptest! {
        /// Every edge has a reverse twin with the same distance and line
        #[test]
        fn symmetric(segs in segments()) {
            let mut builder = NetworkBuilder::new();
            for (i, (a, b, d)) in segs.iter().enumerate() {
                let line = format!("L{i}");
                builder
                    .add_segment(&line, &format!("S{a}"), &format!("S{b}"), f64::from(*d))
                    .unwrap();
            }
            let net = builder.build();
            prop_assert_eq!(net.edge_count(), segs.len() * 2);

            for station in net.stations() {
                for edge in net.edges_from(station.id()) {
                    let twins = net
                        .edges_from(edge.to)
                        .iter()
                        .filter(|r| r.to == edge.from && r.distance == edge.distance && r.line == edge.line)
                        .count();
                    prop_assert!(twins >= 1);
                }
            }
        }

        /// Transfer stations are exactly those with two or more lines
        #[test]
        fn transfer_set_derivation(segs in segments()) {
            // Lenient so arbitrary segment order is accepted
            let mut builder = NetworkBuilder::with_policy(ChainPolicy::Lenient);
            for (i, (a, b, d)) in segs.iter().enumerate() {
                let line = format!("L{}", i % 3);
                builder
                    .add_segment(&line, &format!("S{a}"), &format!("S{b}"), f64::from(*d))
                    .unwrap();
            }
            let net = builder.build();

            let expected: Vec<String> = {
                let mut names: Vec<String> = net
                    .stations()
                    .filter(|s| s.lines().len() >= 2)
                    .map(|s| s.name().to_string())
                    .collect();
                names.sort();
                names
            };
            let actual: Vec<String> = net.transfer_stations().into_iter().map(|t| t.name).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
