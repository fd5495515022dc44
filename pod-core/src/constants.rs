// Aim prediction
pub const MOMENTUM_LEAD_TURNS: i32 = 4;
pub const ADVANCE_RADIUS: f64 = 800.0;

/// `(upper bound on |heading error| in degrees, radius multiplier)`, checked in order.
/// Anything at or beyond the last bound uses `WIDE_HEADING_MULTIPLIER`.
pub const ADVANCE_BANDS: [(f64, f64); 3] = [(150.0, 1.0), (160.0, 1.2), (170.0, 1.5)];
pub const WIDE_HEADING_MULTIPLIER: f64 = 1.9;

// Thrust
pub const MAX_THRUST: u8 = 100;
pub const FULL_THRUST_CONE_DEG: f64 = 90.0;
pub const OPENING_THRUST: u8 = 100;
pub const OPENING_CHECKPOINT: usize = 1;

// Collision anticipation
pub const COLLISION_LOOKAHEAD_PERCENT: i32 = 120;
pub const COLLISION_RADIUS: f64 = 800.0;
pub const COLLISION_SEVERITY_SPEED: f64 = 300.0;
pub const COLLISION_HEADING_MIN_DEG: i32 = 40;
pub const COLLISION_HEADING_MAX_DEG: i32 = 320;

// Protocol
/// Bound on any coordinate or velocity component; keeps the steering math inside `i32`.
pub const COORDINATE_LIMIT: i32 = 1_000_000;
pub const ANGLE_LIMIT_DEG: i32 = 360;
pub const MAX_LEAD_TURNS: i32 = 100;
pub const MAX_LOOKAHEAD_PERCENT: i32 = 1_000;
pub const VEHICLE_FIELDS: usize = 6;
pub const BOOST_TOKEN: &str = "BOOST";
pub const SHIELD_TOKEN: &str = "SHIELD";
