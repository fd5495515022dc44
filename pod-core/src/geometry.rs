use core::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// Integer 2D coordinate. Positions, velocities and aim targets all share it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan(self, other: Point) -> i64 {
        (self.x as i64 - other.x as i64).abs() + (self.y as i64 - other.y as i64).abs()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// Euclidean norm, i.e. the speed when this point is a velocity.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }

    /// Scales by `percent / 100`, truncating each component toward zero.
    #[inline]
    pub fn scale_percent(self, percent: i32) -> Point {
        Point {
            x: self.x * percent / 100,
            y: self.y * percent / 100,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Maps any angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Direction of travel from `from` to `to`, in degrees.
pub fn bearing_degrees(from: Point, to: Point) -> f64 {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Heading of a velocity vector. A stationary vehicle reports 0.
pub fn velocity_heading(velocity: Point) -> f64 {
    normalize_degrees((velocity.y as f64).atan2(velocity.x as f64).to_degrees())
}

/// Signed difference between the bearing `from -> to` and `reference_deg`.
pub fn heading_error(from: Point, to: Point, reference_deg: f64) -> f64 {
    normalize_degrees(bearing_degrees(from, to) - reference_deg)
}
