//! Network file loader.
//!
//! Reads the line-delimited segment format:
//!
//! ```text
//! # line      from        to          km
//! Line1       Hankou      Xunlimen    1.8
//! Line1       Xunlimen    Dazhimen    1.2
//! ```
//!
//! Each row has exactly four whitespace-separated fields, so names can't
//! contain spaces. Blank lines and lines starting with `#` are skipped.
//! Rows are numbered from 1 as they appear in the input, comments and
//! blanks included, so errors point at the right line of the file.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::network::{ChainPolicy, Network, NetworkBuilder, NetworkError};

/// Errors from loading a network description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A row couldn't be parsed
    #[error("row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    /// A well-formed row was rejected by the network builder
    #[error("row {row}: {source}")]
    Segment {
        row: usize,
        #[source]
        source: NetworkError,
    },

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// The 1-based row the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            LoadError::MalformedInput { row, .. } | LoadError::Segment { row, .. } => Some(*row),
            LoadError::Io(_) => None,
        }
    }
}

/// What to do with a row that can't be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Stop at the first bad row and return its error.
    #[default]
    Abort,
    /// Log a warning, skip the row and keep going.
    SkipInvalid,
}

/// One parsed row of the segment file.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub line: String,
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Outcome of a successful load.
#[derive(Debug)]
pub struct LoadReport {
    pub network: Network,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

/// Parses one row.
///
/// Returns `Ok(None)` for blank and comment rows.
pub fn parse_row(row: usize, text: &str) -> Result<Option<SegmentRecord>, LoadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let [line, from, to, distance] = fields.as_slice() else {
        return Err(LoadError::MalformedInput {
            row,
            reason: format!("expected 4 fields, found {}", fields.len()),
        });
    };

    let distance: f64 = distance.parse().map_err(|_| LoadError::MalformedInput {
        row,
        reason: format!("distance is not a number: {distance}"),
    })?;

    Ok(Some(SegmentRecord {
        line: (*line).to_string(),
        from: (*from).to_string(),
        to: (*to).to_string(),
        distance,
    }))
}

/// Loads a network from an in-memory string.
pub fn load_str(
    input: &str,
    chain_policy: ChainPolicy,
    load_policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    load_reader(input.as_bytes(), chain_policy, load_policy)
}

/// Loads a network from a file on disk.
pub fn load_file(
    path: impl AsRef<Path>,
    chain_policy: ChainPolicy,
    load_policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let report = load_reader(file, chain_policy, load_policy)?;
    info!(
        path = %path.display(),
        stations = report.network.station_count(),
        lines = report.network.line_count(),
        rows = report.rows_loaded,
        skipped = report.rows_skipped,
        "network loaded"
    );
    Ok(report)
}

/// Loads a network from any reader, one row per line.
pub fn load_reader<R: Read>(
    reader: R,
    chain_policy: ChainPolicy,
    load_policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let mut builder = NetworkBuilder::with_policy(chain_policy);
    let mut rows_loaded = 0;
    let mut rows_skipped = 0;

    for (i, text) in BufReader::new(reader).lines().enumerate() {
        let row = i + 1;
        let text = text?;

        let result = parse_row(row, &text).and_then(|record| match record {
            Some(r) => builder
                .add_segment(&r.line, &r.from, &r.to, r.distance)
                .map(|()| true)
                .map_err(|source| LoadError::Segment { row, source }),
            None => Ok(false),
        });

        match result {
            Ok(true) => rows_loaded += 1,
            Ok(false) => {}
            Err(e) => match load_policy {
                LoadPolicy::Abort => return Err(e),
                LoadPolicy::SkipInvalid => {
                    warn!(row, error = %e, "skipping row");
                    rows_skipped += 1;
                }
            },
        }
    }

    Ok(LoadReport {
        network: builder.build(),
        rows_loaded,
        rows_skipped,
    })
}
