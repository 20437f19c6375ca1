//! Limits for exhaustive path enumeration.

/// Caller-imposed bounds on simple-path enumeration.
///
/// Enumerating every simple path is exponential on networks with loops, so
/// anything facing real traffic should go through
/// [`Router::find_paths_bounded`](super::Router::find_paths_bounded) with
/// these limits rather than the unbounded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLimits {
    /// Stop after this many paths have been found.
    pub max_paths: usize,

    /// Longest path considered, counted in stations (both ends included).
    pub max_stations: usize,

    /// Maximum number of search frames expanded.
    pub max_steps: usize,
}

impl PathLimits {
    /// Create limits with the given parameters.
    pub fn new(max_paths: usize, max_stations: usize, max_steps: usize) -> Self {
        Self {
            max_paths,
            max_stations,
            max_steps,
        }
    }

    /// No limits at all.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX, usize::MAX, usize::MAX)
    }

    /// Returns a copy with `max_paths` replaced.
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_paths: 100,
            max_stations: 64,
            max_steps: 100_000,
        }
    }
}
