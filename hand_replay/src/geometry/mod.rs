//! Table geometry.
//!
//! Pure functions that place the six seats of a 6-max table on an ellipse
//! and scale the whole layout to the container it is drawn in. Nothing
//! here holds state: every layout pass is re-derived from the container
//! dimensions, so a resize simply means calling [`TableLayout::compute`]
//! again.
//!
//! Angles are measured in degrees, `0°` pointing east and increasing
//! clockwise in screen space (y grows downwards).

pub mod constants;
pub mod format;

pub use format::{AmountFormat, format_amount, format_pot};

use constants::{
    BASE_CANVAS_HEIGHT, BASE_CANVAS_WIDTH, DEALER_BUTTON_GAP, DEALER_BUTTON_RADIUS, MAX_SCALE,
    SEAT_AVATAR_RADIUS, SEAT_DISTANCE_FACTOR, TABLE_RADIUS_X, TABLE_RADIUS_Y,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A point in canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a canvas or container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Unscaled canvas the base layout is designed for.
    #[must_use]
    pub const fn base() -> Self {
        Self::new(BASE_CANVAS_WIDTH, BASE_CANVAS_HEIGHT)
    }
}

/// Scale and centring offsets for one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleConfig {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Canonical 6-max seat labels, clockwise from the button.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum SeatLabel {
    #[serde(rename = "BTN")]
    Btn,
    #[serde(rename = "SB")]
    Sb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "UTG")]
    Utg,
    #[serde(rename = "MP")]
    Mp,
    #[serde(rename = "CO")]
    Co,
}

impl SeatLabel {
    pub const ALL: [SeatLabel; 6] = [
        SeatLabel::Btn,
        SeatLabel::Sb,
        SeatLabel::Bb,
        SeatLabel::Utg,
        SeatLabel::Mp,
        SeatLabel::Co,
    ];

    /// Fixed seat angle in degrees.
    #[must_use]
    pub const fn angle_degrees(self) -> f64 {
        match self {
            Self::Btn => 270.0,
            Self::Sb => 210.0,
            Self::Bb => 150.0,
            Self::Utg => 90.0,
            Self::Mp => 30.0,
            Self::Co => 330.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Btn => "BTN",
            Self::Sb => "SB",
            Self::Bb => "BB",
            Self::Utg => "UTG",
            Self::Mp => "MP",
            Self::Co => "CO",
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Btn => 0,
            Self::Sb => 1,
            Self::Bb => 2,
            Self::Utg => 3,
            Self::Mp => 4,
            Self::Co => 5,
        }
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeatLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown seat label '{s}'"))
    }
}

/// Canvas position of every seat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeatMap([Point; 6]);

impl SeatMap {
    #[must_use]
    pub const fn get(&self, label: SeatLabel) -> Point {
        self.0[label.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatLabel, Point)> + '_ {
        SeatLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }
}

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Position of `label` on the ellipse centred at `center`, pulled in by
/// `distance_factor` (1.0 puts the seat on the felt edge).
#[must_use]
pub fn seat_position(
    label: SeatLabel,
    center: Point,
    radius_x: f64,
    radius_y: f64,
    distance_factor: f64,
) -> Point {
    let angle = degrees_to_radians(label.angle_degrees());
    Point {
        x: center.x + radius_x * distance_factor * angle.cos(),
        y: center.y + radius_y * distance_factor * angle.sin(),
    }
}

/// Positions of all six seats at the default distance factor.
#[must_use]
pub fn all_seat_positions(center: Point, radius_x: f64, radius_y: f64) -> SeatMap {
    SeatMap(SeatLabel::ALL.map(|label| {
        seat_position(label, center, radius_x, radius_y, SEAT_DISTANCE_FACTOR)
    }))
}

/// Dealer button position for the seat drawn at `seat`, nudged towards
/// the table centre.
#[must_use]
pub fn dealer_button_position(seat: Point, label: SeatLabel) -> Point {
    let angle = degrees_to_radians(label.angle_degrees());
    let offset = SEAT_AVATAR_RADIUS + DEALER_BUTTON_RADIUS + DEALER_BUTTON_GAP;
    Point {
        x: seat.x - offset * angle.cos() * 0.5,
        y: seat.y - offset * angle.sin() * 0.5,
    }
}

/// Scale that fits `base` inside `container`, capped at [`MAX_SCALE`].
///
/// A degenerate base (zero or negative size) yields a zero scale instead
/// of infinities, and negative container sizes are treated as zero.
#[must_use]
pub fn responsive_scale(container: Dimensions, base: Dimensions) -> ScaleConfig {
    let width = container.width.max(0.0);
    let height = container.height.max(0.0);

    let scale = if base.width > 0.0 && base.height > 0.0 {
        (width / base.width).min(height / base.height).min(MAX_SCALE)
    } else {
        0.0
    };

    ScaleConfig {
        scale,
        offset_x: (width - base.width.max(0.0) * scale) / 2.0,
        offset_y: (height - base.height.max(0.0) * scale) / 2.0,
    }
}

#[must_use]
pub fn table_center(dimensions: Dimensions) -> Point {
    Point {
        x: dimensions.width / 2.0,
        y: dimensions.height / 2.0,
    }
}

/// Everything the renderer needs for one frame, derived from the
/// container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableLayout {
    pub container: Dimensions,
    pub scale: ScaleConfig,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub seats: SeatMap,
}

impl TableLayout {
    #[must_use]
    pub fn compute(container: Dimensions) -> Self {
        let scale = responsive_scale(container, Dimensions::base());
        let center = table_center(container);
        let radius_x = TABLE_RADIUS_X * scale.scale;
        let radius_y = TABLE_RADIUS_Y * scale.scale;

        Self {
            container,
            scale,
            center,
            radius_x,
            radius_y,
            seats: all_seat_positions(center, radius_x, radius_y),
        }
    }

    #[must_use]
    pub fn seat(&self, label: SeatLabel) -> Point {
        self.seats.get(label)
    }

    /// Dealer button for `dealer`, with the offset scaled like the table.
    #[must_use]
    pub fn dealer_button(&self, dealer: SeatLabel) -> Point {
        let seat = self.seat(dealer);
        let unscaled = dealer_button_position(seat, dealer);
        Point {
            x: seat.x + (unscaled.x - seat.x) * self.scale.scale,
            y: seat.y + (unscaled.y - seat.y) * self.scale.scale,
        }
    }
}
