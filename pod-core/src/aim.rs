//! Momentum-compensated aiming and checkpoint advancement.

use crate::config::PolicyConfig;
use crate::course::Course;
use crate::error::ProtocolError;
use crate::geometry::{heading_error, velocity_heading, Point};
use crate::vehicle::VehicleState;

/// Point to steer at so the vehicle's own drift carries it onto `checkpoint`.
#[inline]
pub fn lead_point(checkpoint: Point, velocity: Point, lead_turns: i32) -> Point {
    checkpoint - velocity * lead_turns
}

/// Radius multiplier for the advancement test given `|af|` in degrees.
pub fn advance_multiplier(heading_gap_deg: f64, cfg: &PolicyConfig) -> f64 {
    let gap = heading_gap_deg.abs();
    cfg.advance_bands
        .iter()
        .find(|(bound, _)| gap < *bound)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(cfg.wide_heading_multiplier)
}

/// Moves `state` on to the next checkpoint when it is close enough to the
/// lead point of its current one. Returns whether it advanced.
pub fn advance_checkpoint(
    state: &mut VehicleState,
    course: &Course,
    cfg: &PolicyConfig,
) -> Result<bool, ProtocolError> {
    let checkpoint = course.checkpoint_at(state.next_checkpoint)?;
    let target = lead_point(checkpoint, state.velocity, cfg.momentum_lead_turns);

    // Flying past the point rather than toward it widens the tolerance.
    let gap = heading_error(state.position, target, velocity_heading(state.velocity));
    let radius = cfg.advance_radius * advance_multiplier(gap, cfg);

    if (state.position.manhattan(target) as f64) < radius {
        state.next_checkpoint = course.next_index(state.next_checkpoint);
        return Ok(true);
    }
    Ok(false)
}

/// Aim target against the (possibly just advanced) checkpoint.
pub fn aim_point(
    state: &VehicleState,
    course: &Course,
    cfg: &PolicyConfig,
) -> Result<Point, ProtocolError> {
    let checkpoint = course.checkpoint_at(state.next_checkpoint)?;
    Ok(lead_point(checkpoint, state.velocity, cfg.momentum_lead_turns))
}
