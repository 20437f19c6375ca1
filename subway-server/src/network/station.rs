//! Station and line registry types.

use std::collections::BTreeSet;
use std::fmt;

/// Dense index of a station within one [`Network`](super::Network).
///
/// Assigned in order of first reference while building, so the first
/// station mentioned by the first segment is `StationId(0)`. A network
/// holds at most `u32::MAX` stations; the builder rejects any more with
/// [`NetworkError::CapacityExceeded`](super::NetworkError::CapacityExceeded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u32);

impl StationId {
    /// Returns the id as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense index of a line within one [`Network`](super::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u32);

impl LineId {
    /// Returns the id as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A station and the set of lines that serve it.
///
/// # Invariants
///
/// - `lines` is never empty once the network is built: a station only
///   exists because some segment of some line referenced it.
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
    lines: BTreeSet<LineId>,
}

impl Station {
    pub(super) fn new(id: StationId, name: String) -> Self {
        Self {
            id,
            name,
            lines: BTreeSet::new(),
        }
    }

    pub(super) fn add_line(&mut self, line: LineId) {
        self.lines.insert(line);
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lines serving this station, ordered by id.
    pub fn lines(&self) -> &BTreeSet<LineId> {
        &self.lines
    }

    /// Returns true if `line` stops here.
    pub fn is_served_by(&self, line: LineId) -> bool {
        self.lines.contains(&line)
    }

    /// A transfer station is served by two or more lines.
    pub fn is_transfer(&self) -> bool {
        self.lines.len() >= 2
    }
}

/// One contiguous run of stations along a line.
///
/// `distances[i]` is the length of the hop `stations[i] -> stations[i + 1]`,
/// so `distances.len() == stations.len() - 1`.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    stations: Vec<StationId>,
    distances: Vec<f64>,
}

impl Chain {
    fn start(from: StationId, to: StationId, distance: f64) -> Self {
        Self {
            stations: vec![from, to],
            distances: vec![distance],
        }
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn tail(&self) -> Option<StationId> {
        self.stations.last().copied()
    }

    pub fn length(&self) -> f64 {
        self.distances.iter().sum()
    }
}

/// A subway line: a name and its ordered station chain.
///
/// Under the strict chain policy a line has at most one chain. The lenient
/// policy opens an extra chain whenever a segment doesn't continue from the
/// current tail (branches, loops written out of order).
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    chains: Vec<Chain>,
}

impl Line {
    pub(super) fn new(id: LineId, name: String) -> Self {
        Self {
            id,
            name,
            chains: Vec::new(),
        }
    }

    /// Extends the current chain. The caller has checked `from` is the tail
    /// (or the line is empty).
    pub(super) fn extend(&mut self, from: StationId, to: StationId, distance: f64) {
        match self.chains.last_mut() {
            Some(chain) if chain.tail() == Some(from) => {
                chain.stations.push(to);
                chain.distances.push(distance);
            }
            _ => self.chains.push(Chain::start(from, to, distance)),
        }
    }

    /// Opens a new chain regardless of the current tail.
    pub(super) fn branch(&mut self, from: StationId, to: StationId, distance: f64) {
        self.chains.push(Chain::start(from, to, distance));
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Stations of the main (first) chain.
    pub fn stations(&self) -> &[StationId] {
        self.chains.first().map(Chain::stations).unwrap_or(&[])
    }

    /// Last station of the chain currently being extended.
    pub fn tail(&self) -> Option<StationId> {
        self.chains.last().and_then(Chain::tail)
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Number of segments across all chains.
    pub fn segment_count(&self) -> usize {
        self.chains.iter().map(|c| c.distances.len()).sum()
    }

    /// Total track length across all chains.
    pub fn length(&self) -> f64 {
        self.chains.iter().map(Chain::length).sum()
    }
}
