//! Base table layout, in unscaled canvas units.

/// Horizontal radius of the felt ellipse.
pub const TABLE_RADIUS_X: f64 = 320.0;
/// Vertical radius of the felt ellipse.
pub const TABLE_RADIUS_Y: f64 = 180.0;
/// Width of the wooden border drawn outside the felt.
pub const TABLE_BORDER_WIDTH: f64 = 20.0;
pub const TABLE_RAIL_WIDTH: f64 = 8.0;

pub const SEAT_AVATAR_RADIUS: f64 = 32.0;
/// Fraction of the table radii at which seats are placed.
pub const SEAT_DISTANCE_FACTOR: f64 = 0.85;

pub const DEALER_BUTTON_RADIUS: f64 = 16.0;
/// Gap between a seat avatar and its dealer button.
pub const DEALER_BUTTON_GAP: f64 = 8.0;

/// Responsive scale never grows past this, however large the container.
pub const MAX_SCALE: f64 = 1.5;

/// Padding added around the table when computing the base canvas.
pub const CANVAS_PADDING: f64 = 200.0;
pub const BASE_CANVAS_WIDTH: f64 = TABLE_RADIUS_X * 2.0 + CANVAS_PADDING;
pub const BASE_CANVAS_HEIGHT: f64 = TABLE_RADIUS_Y * 2.0 + CANVAS_PADDING;
