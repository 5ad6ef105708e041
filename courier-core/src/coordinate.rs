//! Geographic coordinates with textual identity.
//!
//! A [`GeoCoordinate`] remembers the exact text it was parsed from. Equality
//! and hashing use that text so coordinates read from a map file compare
//! exactly, with no floating-point drift between two spellings of the same
//! vertex. The parsed values are kept alongside for distance maths.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use geo::{Distance, Haversine, Point};
use thiserror::Error;

const METRES_PER_MILE: f64 = 1_609.344;

/// Which half of a coordinate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south component, degrees in `[-90, 90]`.
    Latitude,
    /// East/west component, degrees in `[-180, 180]`.
    Longitude,
}

impl Axis {
    const fn bound(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude => f.write_str("latitude"),
            Self::Longitude => f.write_str("longitude"),
        }
    }
}

/// Errors returned by [`GeoCoordinate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoCoordinateError {
    /// The text is not a finite decimal number.
    #[error("{axis} {text:?} is not a finite number")]
    InvalidNumber {
        /// Offending axis.
        axis: Axis,
        /// Text as supplied.
        text: String,
    },
    /// The number lies outside the valid range for its axis.
    #[error("{axis} {text} is out of range")]
    OutOfRange {
        /// Offending axis.
        axis: Axis,
        /// Text as supplied.
        text: String,
    },
    /// A combined `"<lat> <lon>"` string did not contain exactly two parts.
    #[error("expected \"<latitude> <longitude>\", found {0:?}")]
    Malformed(String),
}

/// A latitude/longitude pair identified by its textual representation.
///
/// # Examples
/// ```
/// use courier_core::GeoCoordinate;
///
/// let a = GeoCoordinate::parse("34.0625329", "-118.4470263")?;
/// let b: GeoCoordinate = "34.0625329 -118.4470263".parse()?;
/// assert_eq!(a, b);
/// assert!((a.latitude() - 34.0625329).abs() < 1e-9);
///
/// // Same value, different spelling: a different vertex.
/// let c = GeoCoordinate::parse("34.06253290", "-118.4470263")?;
/// assert_ne!(a, c);
/// # Ok::<(), courier_core::GeoCoordinateError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "CoordinateRepr", try_from = "CoordinateRepr")
)]
pub struct GeoCoordinate {
    latitude_text: Arc<str>,
    longitude_text: Arc<str>,
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Parse a coordinate from its latitude and longitude texts.
    ///
    /// Surrounding whitespace is ignored; the trimmed text becomes the
    /// coordinate's identity.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, GeoCoordinateError> {
        let latitude_text = latitude.trim();
        let longitude_text = longitude.trim();
        let latitude = parse_axis(Axis::Latitude, latitude_text)?;
        let longitude = parse_axis(Axis::Longitude, longitude_text)?;
        Ok(Self {
            latitude_text: Arc::from(latitude_text),
            longitude_text: Arc::from(longitude_text),
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude exactly as it was parsed.
    #[must_use]
    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    /// Longitude exactly as it was parsed.
    #[must_use]
    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }

    /// The coordinate as a `geo` point (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance to `other` in miles.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        great_circle_miles(self, other)
    }
}

fn parse_axis(axis: Axis, text: &str) -> Result<f64, GeoCoordinateError> {
    let value: f64 = text
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| GeoCoordinateError::InvalidNumber {
            axis,
            text: text.to_owned(),
        })?;
    if value.abs() > axis.bound() {
        return Err(GeoCoordinateError::OutOfRange {
            axis,
            text: text.to_owned(),
        });
    }
    Ok(value)
}

/// Great-circle ("crow-flight") distance between two coordinates in miles.
///
/// Uses the haversine formula on a sphere of the mean earth radius. The value
/// never exceeds the length of any road path between the points, which is
/// what makes it an admissible search heuristic.
#[must_use]
pub fn great_circle_miles(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    Haversine.distance(from.to_point(), to.to_point()) / METRES_PER_MILE
}

impl PartialEq for GeoCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.latitude_text == other.latitude_text && self.longitude_text == other.longitude_text
    }
}

impl Eq for GeoCoordinate {}

impl Hash for GeoCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude_text.hash(state);
        self.longitude_text.hash(state);
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.latitude_text, self.longitude_text)
    }
}

impl FromStr for GeoCoordinate {
    type Err = GeoCoordinateError;

    /// Parse `"<latitude> <longitude>"` (any whitespace between the parts).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(latitude), Some(longitude), None) => Self::parse(latitude, longitude),
            _ => Err(GeoCoordinateError::Malformed(s.to_owned())),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CoordinateRepr {
    latitude: String,
    longitude: String,
}

#[cfg(feature = "serde")]
impl From<GeoCoordinate> for CoordinateRepr {
    fn from(value: GeoCoordinate) -> Self {
        Self {
            latitude: value.latitude_text.to_string(),
            longitude: value.longitude_text.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CoordinateRepr> for GeoCoordinate {
    type Error = GeoCoordinateError;

    fn try_from(value: CoordinateRepr) -> Result<Self, Self::Error> {
        Self::parse(&value.latitude, &value.longitude)
    }
}
