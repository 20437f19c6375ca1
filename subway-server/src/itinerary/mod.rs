//! Per-line itineraries.
//!
//! A [`Path`] only lists stations. This module works out which line each
//! hop rides and groups consecutive hops on the same line into
//! [`RideSegment`]s, giving the transfer count and printable directions.
//!
//! # Line attribution
//!
//! For each hop the candidate lines are those serving both stations,
//! narrowed to the lines with a direct edge between them whenever there is
//! one. When several candidates remain (parallel service), a ride is opened
//! on the candidate that covers the most consecutive hops from that point;
//! ties go to the lexicographically smallest line name. A ride then
//! continues for as long as its line remains a candidate, so no transfer is
//! reported where staying on board was possible.

use std::collections::BTreeSet;
use std::fmt;

use tracing::trace;

use crate::network::{LineId, Network, NetworkError, StationId};
use crate::router::Path;

/// A continuous ride on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSegment {
    pub line: LineId,
    pub line_name: String,
    pub from: StationId,
    pub from_name: String,
    pub to: StationId,
    pub to_name: String,
    /// Number of hops ridden on this line.
    pub stops: usize,
}

/// A path broken into rides, one per line.
///
/// Owns all its data; it doesn't borrow the network it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    segments: Vec<RideSegment>,
    distance: f64,
}

impl Itinerary {
    /// Attribute lines to every hop of `path` and group them into rides.
    ///
    /// A single-station path produces an empty itinerary.
    ///
    /// # Errors
    ///
    /// [`NetworkError::NoCommonLine`] if two consecutive stations share no
    /// line, which means `path` didn't come from `network`.
    pub fn build(network: &Network, path: &Path) -> Result<Self, NetworkError> {
        let stations = path.stations();
        let candidates = stations
            .windows(2)
            .map(|hop| hop_candidates(network, hop[0], hop[1]))
            .collect::<Result<Vec<_>, _>>()?;

        let mut segments = Vec::new();
        let mut i = 0;
        while i < candidates.len() {
            let from = stations[i];
            let (line, run) = longest_ride(network, &candidates[i..]).ok_or_else(|| {
                NetworkError::NoCommonLine {
                    from: network.name_of(from).to_string(),
                    to: network.name_of(stations[i + 1]).to_string(),
                }
            })?;
            let to = stations[i + run];
            segments.push(RideSegment {
                line,
                line_name: network.line_name(line).to_string(),
                from,
                from_name: network.name_of(from).to_string(),
                to,
                to_name: network.name_of(to).to_string(),
                stops: run,
            });
            i += run;
        }

        trace!(
            hops = candidates.len(),
            rides = segments.len(),
            "itinerary built"
        );

        Ok(Self {
            segments,
            distance: path.distance(),
        })
    }

    pub fn segments(&self) -> &[RideSegment] {
        &self.segments
    }

    /// Total distance of the underlying path in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of line changes: rides minus one, zero for no ride at all.
    pub fn transfer_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Returns true if the trip needs no ride (origin is the destination).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Stations where the traveller changes line, in order.
    pub fn transfer_points(&self) -> Vec<&str> {
        self.segments
            .iter()
            .skip(1)
            .map(|s| s.from_name.as_str())
            .collect()
    }

    /// Human-readable directions, one line per ride and per change.
    pub fn instructions(&self) -> Vec<String> {
        if self.segments.is_empty() {
            return vec!["No ride needed".to_string()];
        }

        let mut out = Vec::with_capacity(self.segments.len() * 2);
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(format!("Change to {} at {}", seg.line_name, seg.from_name));
            }
            let mut ride = format!("Take {} from {} to {}", seg.line_name, seg.from_name, seg.to_name);
            if seg.stops > 1 {
                ride.push_str(&format!(" ({} stops)", seg.stops));
            }
            out.push(ride);
        }
        out
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.instructions().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Lines that could carry the hop `a -> b`.
fn hop_candidates(
    network: &Network,
    a: StationId,
    b: StationId,
) -> Result<BTreeSet<LineId>, NetworkError> {
    let direct = network.lines_between(a, b);
    let candidates = if direct.is_empty() {
        network
            .station(a)
            .lines()
            .intersection(network.station(b).lines())
            .copied()
            .collect()
    } else {
        direct
    };

    if candidates.is_empty() {
        return Err(NetworkError::NoCommonLine {
            from: network.name_of(a).to_string(),
            to: network.name_of(b).to_string(),
        });
    }
    Ok(candidates)
}

/// Picks the line for a ride starting at the first hop of `hops` and
/// returns it with the number of hops it covers.
fn longest_ride(network: &Network, hops: &[BTreeSet<LineId>]) -> Option<(LineId, usize)> {
    let run_of = |line: LineId| hops.iter().take_while(|c| c.contains(&line)).count();

    hops.first()?
        .iter()
        .map(|&line| (line, run_of(line)))
        .max_by(|(a, a_run), (b, b_run)| {
            a_run
                .cmp(b_run)
                .then_with(|| network.line_name(*b).cmp(network.line_name(*a)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;
    use crate::router::Router;

    fn scenario() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line1", "B", "C", 4.0).unwrap();
        builder.add_segment("Line2", "B", "D", 2.0).unwrap();
        builder.build()
    }

    fn path_of(net: &Network, names: &[&str], distance: f64) -> Path {
        let ids = names.iter().map(|n| net.station_id(n).unwrap()).collect();
        Path::new(ids, distance)
    }

    #[test]
    fn scenario_itinerary() {
        let net = scenario();
        let path = Router::new(&net).shortest_path("A", "D").unwrap();
        let itinerary = Itinerary::build(&net, &path).unwrap();

        assert_eq!(itinerary.segments().len(), 2);
        assert_eq!(itinerary.transfer_count(), 1);
        assert_eq!(itinerary.distance(), 5.0);

        let first = &itinerary.segments()[0];
        assert_eq!(first.line_name, "Line1");
        assert_eq!(first.from_name, "A");
        assert_eq!(first.to_name, "B");
        assert_eq!(first.stops, 1);

        let second = &itinerary.segments()[1];
        assert_eq!(second.line_name, "Line2");
        assert_eq!(second.from_name, "B");
        assert_eq!(second.to_name, "D");

        assert_eq!(itinerary.transfer_points(), vec!["B"]);
    }

    #[test]
    fn instructions_text() {
        let net = scenario();
        let path = path_of(&net, &["C", "B", "A"], 7.0);
        let itinerary = Itinerary::build(&net, &path).unwrap();
        assert_eq!(itinerary.instructions(), vec!["Take Line1 from C to A (2 stops)"]);
        assert_eq!(itinerary.transfer_count(), 0);

        let path = path_of(&net, &["C", "B", "D"], 6.0);
        let itinerary = Itinerary::build(&net, &path).unwrap();
        assert_eq!(
            itinerary.to_string(),
            "Take Line1 from C to B\nChange to Line2 at B\nTake Line2 from B to D"
        );
    }

    #[test]
    fn single_station_needs_no_ride() {
        let net = scenario();
        let path = Router::new(&net).shortest_path("B", "B").unwrap();
        let itinerary = Itinerary::build(&net, &path).unwrap();

        assert!(itinerary.is_empty());
        assert_eq!(itinerary.transfer_count(), 0);
        assert_eq!(itinerary.instructions(), vec!["No ride needed"]);
    }

    #[test]
    fn inconsistent_path_has_no_common_line() {
        let net = scenario();
        // A and D are not adjacent and share no line
        let path = path_of(&net, &["A", "D"], 1.0);
        assert_eq!(
            Itinerary::build(&net, &path).unwrap_err(),
            NetworkError::NoCommonLine {
                from: "A".into(),
                to: "D".into(),
            }
        );
    }

    #[test]
    fn parallel_service_prefers_longest_ride() {
        // Line1 and Line2 both run A-B; only Line2 continues to C
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line2", "A", "B", 3.0).unwrap();
        builder.add_segment("Line2", "B", "C", 2.0).unwrap();
        let net = builder.build();

        let path = path_of(&net, &["A", "B", "C"], 5.0);
        let itinerary = Itinerary::build(&net, &path).unwrap();

        assert_eq!(itinerary.segments().len(), 1);
        assert_eq!(itinerary.segments()[0].line_name, "Line2");
        assert_eq!(itinerary.segments()[0].stops, 2);
        assert_eq!(itinerary.transfer_count(), 0);
    }

    #[test]
    fn parallel_service_tie_goes_to_smallest_name() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line9", "A", "B", 3.0).unwrap();
        builder.add_segment("Line10", "A", "B", 3.0).unwrap();
        let net = builder.build();

        let path = path_of(&net, &["A", "B"], 3.0);
        let itinerary = Itinerary::build(&net, &path).unwrap();

        // Plain string order: "Line10" < "Line9"
        assert_eq!(itinerary.segments()[0].line_name, "Line10");
    }

    #[test]
    fn direct_edge_beats_shared_line() {
        // B and C are both on Line1 but only Line2 links them directly
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "B", "X", 1.0).unwrap();
        builder.add_segment("Line1", "X", "C", 1.0).unwrap();
        builder.add_segment("Line2", "B", "C", 1.5).unwrap();
        let net = builder.build();

        let path = path_of(&net, &["B", "C"], 1.5);
        let itinerary = Itinerary::build(&net, &path).unwrap();
        assert_eq!(itinerary.segments()[0].line_name, "Line2");
    }

    #[test]
    fn transfer_boundary_belongs_to_both_rides() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 1.0).unwrap();
        builder.add_segment("Line1", "B", "C", 1.0).unwrap();
        builder.add_segment("Line2", "C", "D", 1.0).unwrap();
        builder.add_segment("Line2", "D", "E", 1.0).unwrap();
        builder.add_segment("Line3", "E", "F", 1.0).unwrap();
        let net = builder.build();

        let path = Router::new(&net).shortest_path("A", "F").unwrap();
        let itinerary = Itinerary::build(&net, &path).unwrap();

        let rides: Vec<(&str, &str, &str, usize)> = itinerary
            .segments()
            .iter()
            .map(|s| (s.line_name.as_str(), s.from_name.as_str(), s.to_name.as_str(), s.stops))
            .collect();
        assert_eq!(
            rides,
            vec![
                ("Line1", "A", "C", 2),
                ("Line2", "C", "E", 2),
                ("Line3", "E", "F", 1),
            ]
        );
        assert_eq!(itinerary.transfer_count(), 2);
        assert_eq!(itinerary.transfer_points(), vec!["C", "E"]);
    }
}
