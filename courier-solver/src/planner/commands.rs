//! Turn-by-turn commands and the geometry that classifies them.

use std::fmt;

use courier_core::StreetSegment;

/// Compass direction of travel, in 45° sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Heading {
    /// Sector centred on 0°.
    East,
    /// Sector centred on 45°.
    Northeast,
    /// Sector centred on 90°.
    North,
    /// Sector centred on 135°.
    Northwest,
    /// Sector centred on 180°.
    West,
    /// Sector centred on 225°.
    Southwest,
    /// Sector centred on 270°.
    South,
    /// Sector centred on 315°.
    Southeast,
}

// Exclusive upper bound of each sector; angles from 337.5° wrap to east.
const SECTORS: [(f64, Heading); 8] = [
    (22.5, Heading::East),
    (67.5, Heading::Northeast),
    (112.5, Heading::North),
    (157.5, Heading::Northwest),
    (202.5, Heading::West),
    (247.5, Heading::Southwest),
    (292.5, Heading::South),
    (337.5, Heading::Southeast),
];

impl Heading {
    /// Classify an angle in degrees (0° = east, counter-clockwise).
    ///
    /// Angles outside `[0, 360)` are normalised first.
    #[must_use]
    pub fn from_angle(degrees: f64) -> Self {
        let angle = normalise_degrees(degrees);
        SECTORS
            .iter()
            .find(|(upper, _)| angle < *upper)
            .map_or(Self::East, |(_, heading)| *heading)
    }

    /// Heading of travel along `segment`.
    #[must_use]
    pub fn of_segment(segment: &StreetSegment) -> Self {
        Self::from_angle(segment_angle(segment))
    }

    /// Lower-case compass name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::Northeast => "northeast",
            Self::North => "north",
            Self::Northwest => "northwest",
            Self::West => "west",
            Self::Southwest => "southwest",
            Self::South => "south",
            Self::Southeast => "southeast",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side to turn towards when changing street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TurnDirection {
    /// Turn angle in `[1°, 180°)`.
    Left,
    /// Turn angle in `[180°, 359°]`.
    Right,
}

impl TurnDirection {
    /// Classify a turn angle in degrees; `None` means carry straight on.
    #[must_use]
    pub fn from_angle(degrees: f64) -> Option<Self> {
        let angle = normalise_degrees(degrees);
        if !(1.0..=359.0).contains(&angle) {
            None
        } else if angle < 180.0 {
            Some(Self::Left)
        } else {
            Some(Self::Right)
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// One instruction for the driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "command", rename_all = "snake_case")
)]
pub enum DeliveryCommand {
    /// Travel along one street.
    Proceed {
        /// Direction of the first segment on the street.
        heading: Heading,
        /// Street name.
        street: String,
        /// Distance along the street in miles.
        distance_miles: f64,
    },
    /// Change street.
    Turn {
        /// Which way to turn.
        direction: TurnDirection,
        /// Street being turned onto.
        street: String,
    },
    /// Hand over an item at the current stop.
    Deliver {
        /// Item delivered.
        item: String,
    },
}

impl fmt::Display for DeliveryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed {
                heading,
                street,
                distance_miles,
            } => write!(f, "Proceed {heading} on {street} for {distance_miles:.2} miles"),
            Self::Turn { direction, street } => write!(f, "Turn {direction} on {street}"),
            Self::Deliver { item } => write!(f, "Deliver {item}"),
        }
    }
}

/// Angle of `segment` in degrees, 0° = east, counter-clockwise, in `[0, 360)`.
///
/// Computed on raw latitude/longitude differences.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "bearings are derived from coordinate differences"
)]
pub fn segment_angle(segment: &StreetSegment) -> f64 {
    let rise = segment.end.latitude() - segment.start.latitude();
    let run = segment.end.longitude() - segment.start.longitude();
    normalise_degrees(rise.atan2(run).to_degrees())
}

/// Angle from `previous` to `next` in degrees, in `[0, 360)`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "turn angle is a bearing difference")]
pub fn turn_angle(previous: &StreetSegment, next: &StreetSegment) -> f64 {
    normalise_degrees(segment_angle(next) - segment_angle(previous))
}

fn normalise_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Street currently being followed while a leg is turned into commands.
struct Pending<'a> {
    heading: Heading,
    street: &'a str,
    distance_miles: f64,
}

impl<'a> Pending<'a> {
    fn start(segment: &'a StreetSegment) -> Self {
        Self {
            heading: Heading::of_segment(segment),
            street: segment.street_name(),
            distance_miles: segment.length_miles(),
        }
    }

    #[expect(clippy::float_arithmetic, reason = "street distance accumulates")]
    fn extend(&mut self, segment: &StreetSegment) {
        self.distance_miles += segment.length_miles();
    }

    fn finish(self) -> DeliveryCommand {
        DeliveryCommand::Proceed {
            heading: self.heading,
            street: self.street.to_owned(),
            distance_miles: self.distance_miles,
        }
    }
}

/// Append the `Proceed`/`Turn` commands that drive along `segments`.
///
/// An empty slice appends nothing.
pub(crate) fn push_leg_commands(segments: &[StreetSegment], commands: &mut Vec<DeliveryCommand>) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let mut pending = Pending::start(first);
    let mut previous = first;
    for segment in rest {
        if segment.street == previous.street {
            pending.extend(segment);
        } else {
            commands.push(pending.finish());
            if let Some(direction) = TurnDirection::from_angle(turn_angle(previous, segment)) {
                commands.push(DeliveryCommand::Turn {
                    direction,
                    street: segment.street_name().to_owned(),
                });
            }
            pending = Pending::start(segment);
        }
        previous = segment;
    }
    commands.push(pending.finish());
}
