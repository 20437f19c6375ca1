//! Priority-expansion searches: shortest path and bounded radius.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::network::{Network, NetworkError, StationId};

use super::path::Path;

/// Slack on the nearby budget, so a station whose distance is summed from
/// float hop lengths (e.g. 0.1 + 0.2) isn't dropped a hair past the limit.
const BUDGET_EPSILON: f64 = 1e-9;

/// Frontier entry.
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: StationId,
}

impl Eq for State {}

// Min-heap by cost, then by station id so equal costs pop in a fixed order
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A station within reach of a search origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyStation {
    pub station: StationId,
    /// Shortest distance from the origin in kilometres.
    pub distance: f64,
}

/// Dijkstra from `start`, stopping as soon as `end` is settled.
///
/// Edges are relaxed in adjacency order and only a strictly shorter
/// distance replaces a recorded one, so among equal-cost routes the first
/// one discovered is kept.
pub(super) fn shortest_path(
    network: &Network,
    start: StationId,
    end: StationId,
) -> Result<Path, NetworkError> {
    if start == end {
        return Ok(Path::stay(start));
    }

    let n = network.station_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut predecessors: Vec<Option<StationId>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut popped = 0usize;

    distances[start.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        popped += 1;
        if node == end {
            break;
        }

        // Stale entry
        if cost > distances[node.index()] {
            continue;
        }

        for edge in network.edges_from(node) {
            let next_cost = cost + edge.distance;
            if next_cost < distances[edge.to.index()] {
                distances[edge.to.index()] = next_cost;
                predecessors[edge.to.index()] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    node: edge.to,
                });
            }
        }
    }

    let total = distances[end.index()];
    if total.is_infinite() {
        return Err(NetworkError::NoPath {
            from: network.name_of(start).to_string(),
            to: network.name_of(end).to_string(),
        });
    }

    let mut stations = vec![end];
    let mut current = end;
    while let Some(prev) = predecessors[current.index()] {
        stations.push(prev);
        current = prev;
    }
    stations.reverse();

    trace!(
        from = network.name_of(start),
        to = network.name_of(end),
        distance = total,
        popped,
        "shortest path found"
    );

    Ok(Path::new(stations, total))
}

/// All stations other than `start` whose shortest distance is at most
/// `max_distance` (within `BUDGET_EPSILON`), in the order they were
/// settled.
///
/// The heap is min-ordered, so the first entry popped beyond the budget
/// ends the search: every later entry is at least as far.
pub(super) fn nearby_stations(
    network: &Network,
    start: StationId,
    max_distance: f64,
) -> Vec<NearbyStation> {
    let mut found = Vec::new();
    if max_distance.is_nan() || max_distance < 0.0 {
        return found;
    }

    let limit = max_distance + BUDGET_EPSILON;
    let mut distances = vec![f64::INFINITY; network.station_count()];
    let mut heap = BinaryHeap::new();

    distances[start.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > distances[node.index()] {
            continue;
        }
        if cost > limit {
            break;
        }

        // Popped with its final distance
        if node != start {
            found.push(NearbyStation {
                station: node,
                distance: cost,
            });
        }

        for edge in network.edges_from(node) {
            let next_cost = cost + edge.distance;
            if next_cost <= limit && next_cost < distances[edge.to.index()] {
                distances[edge.to.index()] = next_cost;
                heap.push(State {
                    cost: next_cost,
                    node: edge.to,
                });
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;

    #[test]
    fn heap_pops_cheapest_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(State {
            cost: 5.0,
            node: StationId(0),
        });
        heap.push(State {
            cost: 2.0,
            node: StationId(9),
        });
        heap.push(State {
            cost: 2.0,
            node: StationId(3),
        });

        assert_eq!(heap.pop().unwrap().node, StationId(3));
        assert_eq!(heap.pop().unwrap().node, StationId(9));
        assert_eq!(heap.pop().unwrap().node, StationId(0));
    }

    #[test]
    fn nearby_budget_absorbs_float_drift() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 0.1).unwrap();
        builder.add_segment("Line1", "B", "C", 0.2).unwrap();
        builder.add_segment("Line1", "C", "D", 0.1).unwrap();
        let net = builder.build();

        let a = net.station_id("A").unwrap();
        let c = net.station_id("C").unwrap();

        // 0.1 + 0.2 sums to 0.30000000000000004
        let found = nearby_stations(&net, a, 0.3);
        let stations: Vec<StationId> = found.iter().map(|n| n.station).collect();
        assert_eq!(stations.len(), 2);
        assert!(stations.contains(&c));

        // D at about 0.4 km stays out
        assert!(found.iter().all(|n| net.name_of(n.station) != "D"));
    }
}
