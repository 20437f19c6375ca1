//! Network error types.
//!
//! Raised while building the network (bad segments) and while querying it
//! (unknown stations, unreachable destinations, inconsistent paths).

/// Errors from building or querying a subway network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// A query named a station the network doesn't know
    #[error("station not found: {0}")]
    NotFound(String),

    /// The destination can't be reached from the origin
    #[error("no path from {from} to {to}")]
    NoPath { from: String, to: String },

    /// A segment was added with a non-positive (or non-finite) distance
    #[error("invalid distance {distance} on {line} between {from} and {to}")]
    InvalidDistance {
        line: String,
        from: String,
        to: String,
        distance: f64,
    },

    /// A segment doesn't continue from the end of its line's chain
    #[error("discontinuous line {line}: segment starts at {origin} but chain ends at {tail}")]
    DiscontinuousLine {
        line: String,
        tail: String,
        origin: String,
    },

    /// The network already holds as many stations (or lines) as a `u32`
    /// id can number
    #[error("too many {kind}: ids are limited to {}", u32::MAX)]
    CapacityExceeded { kind: &'static str },

    /// Two consecutive path stations share no line
    #[error("no common line between {from} and {to}")]
    NoCommonLine { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NetworkError::NotFound("Hankou".into());
        assert_eq!(err.to_string(), "station not found: Hankou");

        let err = NetworkError::NoPath {
            from: "A".into(),
            to: "Z".into(),
        };
        assert_eq!(err.to_string(), "no path from A to Z");

        let err = NetworkError::InvalidDistance {
            line: "Line 1".into(),
            from: "A".into(),
            to: "B".into(),
            distance: -1.5,
        };
        assert_eq!(
            err.to_string(),
            "invalid distance -1.5 on Line 1 between A and B"
        );

        let err = NetworkError::DiscontinuousLine {
            line: "Line 2".into(),
            tail: "C".into(),
            origin: "X".into(),
        };
        assert_eq!(
            err.to_string(),
            "discontinuous line Line 2: segment starts at X but chain ends at C"
        );

        let err = NetworkError::NoCommonLine {
            from: "A".into(),
            to: "D".into(),
        };
        assert_eq!(err.to_string(), "no common line between A and D");

        let err = NetworkError::CapacityExceeded { kind: "stations" };
        assert_eq!(
            err.to_string(),
            "too many stations: ids are limited to 4294967295"
        );
    }
}
