//! When to spend the one-shot boost and shield.

use crate::command::Power;
use crate::config::PolicyConfig;
use crate::constants::MAX_THRUST;
use crate::vehicle::{Abilities, VehicleState};

/// Boost replaces full thrust while it is still available.
pub fn plan_power(thrust: u8, abilities: &Abilities) -> Power {
    if thrust == MAX_THRUST && abilities.boost.is_ready() {
        Power::Boost
    } else {
        Power::Thrust(thrust)
    }
}

/// Facing angles that are not close to parallel.
#[inline]
pub fn headings_cross(a: i32, b: i32, cfg: &PolicyConfig) -> bool {
    let gap = (a - b).abs();
    cfg.collision_heading_min_deg < gap && gap < cfg.collision_heading_max_deg
}

/// Whether a collision between these two racers next turn is worth shielding.
pub fn collision_is_severe(own: &VehicleState, other: &VehicleState, cfg: &PolicyConfig) -> bool {
    own.speed().max(other.speed()) > cfg.collision_severity_speed
        && headings_cross(other.angle, own.angle, cfg)
}

/// Scans the adversaries in order and returns the one to shield against.
///
/// Only the first adversary whose predicted position is in range is
/// considered. If that encounter is not severe, later adversaries are not
/// checked this turn.
pub fn shield_threat(
    own: &VehicleState,
    adversaries: &[VehicleState],
    cfg: &PolicyConfig,
) -> Option<usize> {
    let own_next = own.predicted_position(cfg.collision_lookahead_percent);
    let (index, other) = adversaries.iter().enumerate().find(|(_, other)| {
        own_next.distance(other.predicted_position(cfg.collision_lookahead_percent))
            < cfg.collision_radius
    })?;
    collision_is_severe(own, other, cfg).then_some(index)
}
