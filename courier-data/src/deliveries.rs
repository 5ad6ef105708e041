//! Delivery manifest loading.
//!
//! The first non-blank line holds the depot as `<lat> <lon>`. Every later
//! non-blank line is one delivery written `<lat> <lon>:<item>`:
//!
//! ```text
//! 34.0625329 -118.4470263
//! 34.0636533 -118.4470480:Chicken tenders
//! 34.0632405 -118.4460000:B-Plate salmon
//! ```

use std::io::{self, BufRead, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use courier_core::{DeliveryRequest, GeoCoordinate, GeoCoordinateError};
use thiserror::Error;

use crate::fs::open_input;
use crate::lines::NumberedLines;

/// A depot and the deliveries to make from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryManifest {
    /// Start and end of every tour.
    pub depot: GeoCoordinate,
    /// Deliveries in file order.
    pub deliveries: Vec<DeliveryRequest>,
}

/// Errors raised while loading a delivery manifest.
#[derive(Debug, Error)]
pub enum DeliveryLoadError {
    /// Opening the manifest failed.
    #[error("failed to open deliveries at {path}")]
    Open {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Manifest path.
        path: Utf8PathBuf,
    },
    /// Reading a line failed.
    #[error("failed to read deliveries line {line}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
        /// Line being read.
        line: usize,
    },
    /// The input holds no depot line.
    #[error("deliveries input has no depot line")]
    MissingDepot,
    /// A delivery line has no `:` separating location and item.
    #[error("line {line}: expected `<lat> <lon>:<item>`, found {found:?}")]
    MissingItem {
        /// Offending line.
        line: usize,
        /// Text found on the line.
        found: String,
    },
    /// A location is not a valid coordinate.
    #[error("line {line}: invalid location")]
    InvalidLocation {
        /// Offending line.
        line: usize,
        /// Parse failure.
        #[source]
        source: GeoCoordinateError,
    },
}

/// Load a delivery manifest from `path`.
///
/// # Errors
/// Returns [`DeliveryLoadError::Open`] when the file cannot be opened,
/// otherwise any error from [`parse_deliveries`].
pub fn load_deliveries(path: &Utf8Path) -> Result<DeliveryManifest, DeliveryLoadError> {
    let file = open_input(path).map_err(|source| DeliveryLoadError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    let manifest = parse_deliveries(BufReader::new(file))?;
    log::info!(
        "loaded {} deliveries from {path}",
        manifest.deliveries.len()
    );
    Ok(manifest)
}

/// Parse a delivery manifest from `reader`.
///
/// Blank lines are skipped. A manifest with a depot and no deliveries is
/// valid; the planner rejects it later.
///
/// # Errors
/// Returns a [`DeliveryLoadError`] naming the offending line.
///
/// # Examples
/// ```
/// use courier_data::parse_deliveries;
///
/// let manifest = parse_deliveries("0 0\n0 0.01:pizza\n".as_bytes()).expect("well formed");
/// assert_eq!(manifest.deliveries[0].item, "pizza");
/// ```
pub fn parse_deliveries<R: BufRead>(reader: R) -> Result<DeliveryManifest, DeliveryLoadError> {
    let mut lines = NumberedLines::new(reader);
    let mut depot = None;
    let mut deliveries = Vec::new();

    loop {
        let next = lines.next_line().map_err(|source| DeliveryLoadError::Read {
            source,
            line: lines.line() + 1,
        })?;
        let Some((line, text)) = next else {
            break;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if depot.is_none() {
            depot = Some(parse_location(line, trimmed)?);
            continue;
        }
        let Some((location, item)) = trimmed.split_once(':') else {
            return Err(DeliveryLoadError::MissingItem {
                line,
                found: text.clone(),
            });
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(DeliveryLoadError::MissingItem {
                line,
                found: text.clone(),
            });
        }
        deliveries.push(DeliveryRequest::new(parse_location(line, location)?, item));
    }

    let depot = depot.ok_or(DeliveryLoadError::MissingDepot)?;
    Ok(DeliveryManifest { depot, deliveries })
}

fn parse_location(line: usize, text: &str) -> Result<GeoCoordinate, DeliveryLoadError> {
    text.trim()
        .parse()
        .map_err(|source| DeliveryLoadError::InvalidLocation { line, source })
}
