//! Street map loading.
//!
//! A map file is a sequence of street records. Each record is the street
//! name on its own line, the number of segments on the next, then one line
//! per segment holding four whitespace-separated numbers:
//!
//! ```text
//! Broxton Avenue
//! 2
//! 34.0625329 -118.4470263 34.0632405 -118.4470467
//! 34.0632405 -118.4470467 34.0636533 -118.4470480
//! ```
//!
//! Input ends at end of file or at the first blank line where a street name
//! is expected. Every segment is inserted in both directions.

use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::{GeoCoordinate, GeoCoordinateError, StreetMap, StreetSegment};
use thiserror::Error;

use crate::fs::open_input;
use crate::lines::NumberedLines;

/// Errors raised while loading a street map.
#[derive(Debug, Error)]
pub enum MapLoadError {
    /// Opening the map file failed.
    #[error("failed to open street map at {path}")]
    Open {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Map file path.
        path: Utf8PathBuf,
    },
    /// Reading a line failed.
    #[error("failed to read street map line {line}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Line being read.
        line: usize,
    },
    /// Input ended after a street name.
    #[error("street {street:?} on line {line} has no segment count")]
    MissingCount {
        /// Line holding the street name.
        line: usize,
        /// The street.
        street: String,
    },
    /// The segment count is not a non-negative integer.
    #[error("line {line}: expected a segment count, found {found:?}")]
    InvalidCount {
        /// Offending line.
        line: usize,
        /// Text found on the line.
        found: String,
    },
    /// A segment line does not hold exactly four fields.
    #[error("line {line}: expected four coordinates, found {found:?}")]
    MalformedSegment {
        /// Offending line.
        line: usize,
        /// Text found on the line.
        found: String,
    },
    /// A segment endpoint is not a valid coordinate.
    #[error("line {line}: invalid coordinate")]
    InvalidCoordinate {
        /// Offending line.
        line: usize,
        /// Parse failure.
        #[source]
        source: GeoCoordinateError,
    },
    /// Input ended before all announced segments were read.
    #[error("street {street:?} announced {expected} segments but input ended after {read}")]
    Truncated {
        /// The street.
        street: String,
        /// Announced segment count.
        expected: usize,
        /// Segments actually read.
        read: usize,
    },
}

/// Load a street map from `path`.
///
/// # Errors
/// Returns [`MapLoadError::Open`] when the file cannot be opened, otherwise
/// any error from [`parse_street_map`].
pub fn load_street_map(path: &Utf8Path) -> Result<StreetMap, MapLoadError> {
    let file = open_input(path).map_err(|source| MapLoadError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let map = parse_street_map(BufReader::new(file))?;
    log::info!(
        "loaded {} segments over {} vertices from {path}",
        map.segment_count(),
        map.vertex_count()
    );
    Ok(map)
}

/// Parse street records from `reader`.
///
/// # Errors
/// Returns a [`MapLoadError`] naming the offending line when the input is
/// malformed or cannot be read.
///
/// # Examples
/// ```
/// use courier_data::parse_street_map;
///
/// let text = "Main St\n1\n0 0 0 0.01\n";
/// let map = parse_street_map(text.as_bytes()).expect("well formed");
/// assert_eq!(map.segment_count(), 2);
/// ```
pub fn parse_street_map<R: BufRead>(reader: R) -> Result<StreetMap, MapLoadError> {
    let mut lines = NumberedLines::new(reader);
    let mut map = StreetMap::new();
    let mut streets = 0_usize;

    while let Some((name_line, name)) = next_line(&mut lines)? {
        let street = name.trim();
        if street.is_empty() {
            break;
        }
        let Some((count_line, count_text)) = next_line(&mut lines)? else {
            return Err(MapLoadError::MissingCount {
                line: name_line,
                street: street.to_owned(),
            });
        };
        let expected: usize =
            count_text
                .trim()
                .parse()
                .map_err(|_| MapLoadError::InvalidCount {
                    line: count_line,
                    found: count_text.clone(),
                })?;

        let street_name: Arc<str> = Arc::from(street);
        for read in 0..expected {
            let Some((line, text)) = next_line(&mut lines)? else {
                return Err(MapLoadError::Truncated {
                    street: street.to_owned(),
                    expected,
                    read,
                });
            };
            map.insert(parse_segment(line, &text, &street_name)?);
        }
        streets += 1;
    }

    log::debug!("parsed {streets} streets");
    Ok(map)
}

fn next_line<R: BufRead>(
    lines: &mut NumberedLines<R>,
) -> Result<Option<(usize, String)>, MapLoadError> {
    lines.next_line().map_err(|source| MapLoadError::Read {
        source,
        line: lines.line() + 1,
    })
}

fn parse_segment(line: usize, text: &str, street: &Arc<str>) -> Result<StreetSegment, MapLoadError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [start_lat, start_lon, end_lat, end_lon] = fields.as_slice() else {
        return Err(MapLoadError::MalformedSegment {
            line,
            found: text.to_owned(),
        });
    };
    let coordinate = |lat: &str, lon: &str| {
        GeoCoordinate::parse(lat, lon)
            .map_err(|source| MapLoadError::InvalidCoordinate { line, source })
    };
    Ok(StreetSegment::new(
        coordinate(start_lat, start_lon)?,
        coordinate(end_lat, end_lon)?,
        Arc::clone(street),
    ))
}
