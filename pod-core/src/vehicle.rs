use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_LIMIT_DEG, COORDINATE_LIMIT};
use crate::error::ProtocolError;
use crate::geometry::Point;

pub(crate) fn check_component(
    field: &'static str,
    value: i32,
    limit: i32,
) -> Result<(), ProtocolError> {
    if value.unsigned_abs() > limit.unsigned_abs() {
        return Err(ProtocolError::ValueOutOfRange {
            line: None,
            field,
            value: value as i64,
        });
    }
    Ok(())
}

pub(crate) fn check_point(field: &'static str, point: Point) -> Result<(), ProtocolError> {
    check_component(field, point.x, COORDINATE_LIMIT)?;
    check_component(field, point.y, COORDINATE_LIMIT)
}

/// Kinematic state of one racer as reported by the environment for a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Point,
    pub velocity: Point,
    /// Facing angle in degrees.
    pub angle: i32,
    pub next_checkpoint: usize,
}

impl VehicleState {
    /// Rejects states whose magnitudes would overflow the steering math.
    pub fn check_bounds(&self) -> Result<(), ProtocolError> {
        check_point("position", self.position)?;
        check_point("velocity", self.velocity)?;
        check_component("angle", self.angle, ANGLE_LIMIT_DEG)
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Position one turn ahead, carrying `lookahead_percent` of the velocity.
    pub fn predicted_position(&self, lookahead_percent: i32) -> Point {
        self.position + self.velocity.scale_percent(lookahead_percent)
    }
}

/// One-shot ability flag. Goes `Ready -> Spent` at most once and never back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charge {
    #[default]
    Ready,
    Spent,
}

impl Charge {
    #[inline]
    pub fn is_ready(self) -> bool {
        self == Charge::Ready
    }

    /// Returns true only on the transition out of `Ready`.
    pub fn consume(&mut self) -> bool {
        let was_ready = self.is_ready();
        *self = Charge::Spent;
        was_ready
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub boost: Charge,
    pub shield: Charge,
}

/// A racer under our control: the latest reported state plus everything that
/// outlives a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnedVehicle {
    pub state: VehicleState,
    pub abilities: Abilities,
    pub aim: Point,
}

impl OwnedVehicle {
    pub fn new(state: VehicleState) -> Self {
        Self {
            state,
            abilities: Abilities::default(),
            aim: state.position,
        }
    }

    /// Replaces kinematics and race progress. Abilities are left untouched.
    pub fn refresh(&mut self, state: VehicleState) {
        self.state = state;
    }
}

/// The four racers of a turn in wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub owned: [VehicleState; 2],
    pub adversaries: [VehicleState; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_is_spent_exactly_once() {
        let mut charge = Charge::default();
        assert!(charge.is_ready());
        assert!(charge.consume());
        assert!(!charge.consume());
        assert_eq!(charge, Charge::Spent);
    }

    #[test]
    fn refresh_preserves_abilities() {
        let mut vehicle = OwnedVehicle::new(VehicleState::default());
        vehicle.abilities.boost.consume();
        let next = VehicleState {
            position: Point::new(10, 20),
            velocity: Point::new(1, 2),
            angle: 45,
            next_checkpoint: 1,
        };
        vehicle.refresh(next);
        assert_eq!(vehicle.state, next);
        assert_eq!(vehicle.abilities.boost, Charge::Spent);
        assert_eq!(vehicle.abilities.shield, Charge::Ready);
    }

    #[test]
    fn extreme_magnitudes_are_rejected() {
        let mut state = VehicleState::default();
        assert_eq!(state.check_bounds(), Ok(()));
        state.velocity = Point::new(600_000_000, 0);
        assert_eq!(
            state.check_bounds(),
            Err(ProtocolError::ValueOutOfRange {
                line: None,
                field: "velocity",
                value: 600_000_000
            })
        );
        state.velocity = Point::ZERO;
        state.angle = i32::MIN;
        assert!(state.check_bounds().is_err());
    }

    #[test]
    fn prediction_carries_scaled_velocity() {
        let state = VehicleState {
            position: Point::new(80, 500),
            velocity: Point::new(350, 0),
            angle: 0,
            next_checkpoint: 0,
        };
        assert_eq!(state.predicted_position(120), Point::new(500, 500));
        assert_eq!(state.speed(), 350.0);
    }
}
