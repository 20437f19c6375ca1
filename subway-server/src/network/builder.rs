//! Network construction.
//!
//! The builder is the only place the registry and adjacency index are
//! mutated. Once [`NetworkBuilder::build`] returns, the network is frozen.

use tracing::{debug, trace};

use super::error::NetworkError;
use super::graph::{Edge, Network};
use super::station::{Line, LineId, Station, StationId};

/// How strictly a line's segments must follow each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainPolicy {
    /// Each segment must start where the line's chain currently ends.
    #[default]
    Strict,
    /// A segment that doesn't continue the chain starts a new branch.
    Lenient,
}

/// Incrementally builds a [`Network`] from segment records.
///
/// # Examples
///
/// ```
/// use subway_server::network::NetworkBuilder;
///
/// let mut builder = NetworkBuilder::new();
/// builder.add_segment("Line 1", "A", "B", 3.0).unwrap();
/// builder.add_segment("Line 1", "B", "C", 4.0).unwrap();
///
/// // Doesn't continue from C
/// assert!(builder.add_segment("Line 1", "A", "D", 1.0).is_err());
///
/// let network = builder.build();
/// assert_eq!(network.station_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Network,
    policy: ChainPolicy,
}

impl NetworkBuilder {
    /// Create a builder using the strict chain policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ChainPolicy) -> Self {
        Self {
            inner: Network::default(),
            policy,
        }
    }

    pub fn policy(&self) -> ChainPolicy {
        self.policy
    }

    /// Number of segments accepted so far.
    pub fn segment_count(&self) -> usize {
        self.inner.edge_count() / 2
    }

    /// Add one segment of `line` between two adjacent stations.
    ///
    /// Unknown stations and lines are registered on first reference. Both
    /// directed edges are inserted.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidDistance`] if `distance` is not a positive,
    ///   finite number.
    /// - [`NetworkError::DiscontinuousLine`] under [`ChainPolicy::Strict`]
    ///   when the line already has stations and `station_a` isn't its tail.
    /// - [`NetworkError::CapacityExceeded`] if a new station or line would
    ///   need an id past `u32::MAX`.
    ///
    /// On error the network is left exactly as it was.
    pub fn add_segment(
        &mut self,
        line: &str,
        station_a: &str,
        station_b: &str,
        distance: f64,
    ) -> Result<(), NetworkError> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(NetworkError::InvalidDistance {
                line: line.to_string(),
                from: station_a.to_string(),
                to: station_b.to_string(),
                distance,
            });
        }

        let continues = self.continues_chain(line, station_a);
        if !continues && self.policy == ChainPolicy::Strict {
            let tail = self
                .tail_of(line)
                .map(|id| self.inner.name_of(id).to_string())
                .unwrap_or_default();
            return Err(NetworkError::DiscontinuousLine {
                line: line.to_string(),
                tail,
                origin: station_a.to_string(),
            });
        }

        let new_stations = [station_a, station_b]
            .into_iter()
            .filter(|name| !self.inner.station_index.contains_key(*name))
            .count();
        if new_stations > 0 {
            next_id(self.inner.stations.len() + new_stations - 1, "stations")?;
        }
        if !self.inner.line_index.contains_key(line) {
            next_id(self.inner.lines.len(), "lines")?;
        }

        // Validation done; everything below succeeds.
        let line_id = self.intern_line(line)?;
        let a = self.intern_station(station_a)?;
        let b = self.intern_station(station_b)?;

        self.inner.stations[a.index()].add_line(line_id);
        self.inner.stations[b.index()].add_line(line_id);

        let entry = &mut self.inner.lines[line_id.index()];
        if continues {
            entry.extend(a, b, distance);
        } else {
            trace!(line, from = station_a, "opening branch chain");
            entry.branch(a, b, distance);
        }

        self.inner.adjacency[a.index()].push(Edge {
            from: a,
            to: b,
            distance,
            line: line_id,
        });
        self.inner.adjacency[b.index()].push(Edge {
            from: b,
            to: a,
            distance,
            line: line_id,
        });

        Ok(())
    }

    /// Freeze the network.
    pub fn build(self) -> Network {
        debug!(
            stations = self.inner.station_count(),
            lines = self.inner.line_count(),
            segments = self.segment_count(),
            "network built"
        );
        self.inner
    }

    fn tail_of(&self, line: &str) -> Option<StationId> {
        self.inner.line(line).and_then(Line::tail)
    }

    /// True when a segment starting at `origin` may extend `line`'s current
    /// chain (including the empty-line case).
    fn continues_chain(&self, line: &str, origin: &str) -> bool {
        match self.tail_of(line) {
            None => true,
            Some(tail) => self.inner.name_of(tail) == origin,
        }
    }

    fn intern_station(&mut self, name: &str) -> Result<StationId, NetworkError> {
        if let Some(id) = self.inner.station_index.get(name) {
            return Ok(*id);
        }
        let id = StationId(next_id(self.inner.stations.len(), "stations")?);
        self.inner.stations.push(Station::new(id, name.to_string()));
        self.inner.adjacency.push(Vec::new());
        self.inner.station_index.insert(name.to_string(), id);
        Ok(id)
    }

    fn intern_line(&mut self, name: &str) -> Result<LineId, NetworkError> {
        if let Some(id) = self.inner.line_index.get(name) {
            return Ok(*id);
        }
        let id = LineId(next_id(self.inner.lines.len(), "lines")?);
        self.inner.lines.push(Line::new(id, name.to_string()));
        self.inner.line_index.insert(name.to_string(), id);
        Ok(id)
    }
}

/// Id for the entry after the first `len` of a registry.
fn next_id(len: usize, kind: &'static str) -> Result<u32, NetworkError> {
    u32::try_from(len).map_err(|_| NetworkError::CapacityExceeded { kind })
}
