//! Simple-path enumeration.
//!
//! Depth-first search driven by an explicit stack. Every frame owns its
//! path prefix and visited set, so sibling branches never observe each
//! other's state and no backtracking step is needed.

use tracing::debug;

use crate::network::{Network, StationId};

use super::config::PathLimits;
use super::path::Path;

/// Result of a (possibly bounded) enumeration.
#[derive(Debug, Clone)]
pub struct PathEnumeration {
    /// Paths in depth-first discovery order.
    pub paths: Vec<Path>,

    /// True if a limit cut the search short, so `paths` may be incomplete.
    pub truncated: bool,

    /// Number of search frames expanded.
    pub steps: usize,
}

/// One pending branch of the search.
struct Frame {
    station: StationId,
    prefix: Vec<StationId>,
    visited: Vec<bool>,
    distance: f64,
}

/// Distinct neighbours of a station in adjacency order.
///
/// Parallel edges (several lines over the same hop) collapse into one
/// entry carrying the shortest of their distances.
fn neighbours(network: &Network, station: StationId) -> Vec<(StationId, f64)> {
    let mut out: Vec<(StationId, f64)> = Vec::new();
    for edge in network.edges_from(station) {
        match out.iter_mut().find(|(to, _)| *to == edge.to) {
            Some((_, d)) => *d = d.min(edge.distance),
            None => out.push((edge.to, edge.distance)),
        }
    }
    out
}

pub(super) fn enumerate(
    network: &Network,
    start: StationId,
    end: StationId,
    limits: &PathLimits,
) -> PathEnumeration {
    let mut paths = Vec::new();
    let mut truncated = false;
    let mut steps = 0usize;

    let mut visited = vec![false; network.station_count()];
    visited[start.index()] = true;
    let mut stack = vec![Frame {
        station: start,
        prefix: vec![start],
        visited,
        distance: 0.0,
    }];

    while let Some(frame) = stack.pop() {
        if paths.len() >= limits.max_paths || steps >= limits.max_steps {
            truncated = true;
            break;
        }
        steps += 1;

        if frame.station == end {
            paths.push(Path::new(frame.prefix, frame.distance));
            continue;
        }

        if frame.prefix.len() >= limits.max_stations {
            truncated = true;
            continue;
        }

        // Reversed so the first neighbour is explored first
        for (next, hop) in neighbours(network, frame.station).into_iter().rev() {
            if frame.visited[next.index()] {
                continue;
            }
            let mut prefix = frame.prefix.clone();
            prefix.push(next);
            let mut visited = frame.visited.clone();
            visited[next.index()] = true;
            stack.push(Frame {
                station: next,
                prefix,
                visited,
                distance: frame.distance + hop,
            });
        }
    }

    debug!(
        from = network.name_of(start),
        to = network.name_of(end),
        paths = paths.len(),
        steps,
        truncated,
        "path enumeration complete"
    );

    PathEnumeration {
        paths,
        truncated,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;

    #[test]
    fn parallel_edges_collapse() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line2", "A", "B", 2.5).unwrap();
        builder.add_segment("Line2", "B", "C", 1.0).unwrap();
        let net = builder.build();

        let a = net.station_id("A").unwrap();
        let b = net.station_id("B").unwrap();
        let c = net.station_id("C").unwrap();

        assert_eq!(neighbours(&net, a), vec![(b, 2.5)]);
        assert_eq!(neighbours(&net, b), vec![(a, 2.5), (c, 1.0)]);
    }

    #[test]
    fn parallel_edges_yield_one_path() {
        let mut builder = NetworkBuilder::new();
        builder.add_segment("Line1", "A", "B", 3.0).unwrap();
        builder.add_segment("Line2", "A", "B", 2.5).unwrap();
        let net = builder.build();

        let a = net.station_id("A").unwrap();
        let b = net.station_id("B").unwrap();
        let result = enumerate(&net, a, b, &PathLimits::unbounded());

        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].distance(), 2.5);
        assert!(!result.truncated);
    }
}
