//! Street-map builders shared by unit, behaviour and property tests.

use crate::{DeliveryRequest, GeoCoordinate, StreetMap, StreetSegment};

/// Coordinate from the node grid used by [`grid_map`].
///
/// Row `r` sits at latitude `r * spacing`, column `c` at longitude
/// `c * spacing`. Texts are formatted with six decimals so the same grid
/// position always produces an equal coordinate.
///
/// # Panics
/// Panics if the position falls outside valid latitude/longitude ranges.
#[must_use]
pub fn grid_coordinate(row: u32, column: u32, spacing: f64) -> GeoCoordinate {
    let latitude = format!("{:.6}", f64::from(row) * spacing);
    let longitude = format!("{:.6}", f64::from(column) * spacing);
    GeoCoordinate::parse(&latitude, &longitude).expect("grid position is a valid coordinate")
}

/// A `rows × columns` lattice with streets along every row and column.
///
/// Row streets are named `Row <r>`, column streets `Column <c>`.
#[must_use]
pub fn grid_map(rows: u32, columns: u32, spacing: f64) -> StreetMap {
    let mut segments = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let here = grid_coordinate(row, column, spacing);
            if column + 1 < columns {
                segments.push(StreetSegment::new(
                    here.clone(),
                    grid_coordinate(row, column + 1, spacing),
                    format!("Row {row}"),
                ));
            }
            if row + 1 < rows {
                segments.push(StreetSegment::new(
                    here,
                    grid_coordinate(row + 1, column, spacing),
                    format!("Column {column}"),
                ));
            }
        }
    }
    StreetMap::from_segments(segments)
}

/// A single street running east through `points` in order.
///
/// # Panics
/// Panics if any point is not a valid `"<lat> <lon>"` string.
#[must_use]
pub fn line_map(street: &str, points: &[&str]) -> StreetMap {
    let coordinates: Vec<GeoCoordinate> = points
        .iter()
        .map(|text| text.parse().expect("valid coordinate"))
        .collect();
    coordinates
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(StreetSegment::new(from.clone(), to.clone(), street)),
            _ => None,
        })
        .collect()
}

/// Deliveries at the given grid positions, named `item-<n>`.
#[must_use]
pub fn grid_deliveries(positions: &[(u32, u32)], spacing: f64) -> Vec<DeliveryRequest> {
    positions
        .iter()
        .enumerate()
        .map(|(index, &(row, column))| {
            DeliveryRequest::new(
                grid_coordinate(row, column, spacing),
                format!("item-{index}"),
            )
        })
        .collect()
}
