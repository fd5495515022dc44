use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ProtocolError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    // Aim
    pub momentum_lead_turns: i32,
    pub advance_radius: f64,
    pub advance_bands: Vec<(f64, f64)>,
    pub wide_heading_multiplier: f64,

    // Thrust
    pub full_thrust_cone_deg: f64,
    pub opening_thrust: u8,

    // Collision anticipation
    pub collision_lookahead_percent: i32,
    pub collision_radius: f64,
    pub collision_severity_speed: f64,
    pub collision_heading_min_deg: i32,
    pub collision_heading_max_deg: i32,

    /// Lets the shield fire on every qualifying turn instead of once per race.
    pub reusable_shield: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            momentum_lead_turns: MOMENTUM_LEAD_TURNS,
            advance_radius: ADVANCE_RADIUS,
            advance_bands: ADVANCE_BANDS.to_vec(),
            wide_heading_multiplier: WIDE_HEADING_MULTIPLIER,
            full_thrust_cone_deg: FULL_THRUST_CONE_DEG,
            opening_thrust: OPENING_THRUST,
            collision_lookahead_percent: COLLISION_LOOKAHEAD_PERCENT,
            collision_radius: COLLISION_RADIUS,
            collision_severity_speed: COLLISION_SEVERITY_SPEED,
            collision_heading_min_deg: COLLISION_HEADING_MIN_DEG,
            collision_heading_max_deg: COLLISION_HEADING_MAX_DEG,
            reusable_shield: false,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if !(0..=MAX_LEAD_TURNS).contains(&self.momentum_lead_turns) {
            return Err(ProtocolError::InvalidConfig {
                field: "momentum_lead_turns",
            });
        }
        if !(self.advance_radius > 0.0) {
            return Err(ProtocolError::InvalidConfig {
                field: "advance_radius",
            });
        }
        let mut last_bound = 0.0;
        for &(bound, multiplier) in &self.advance_bands {
            if !(bound > last_bound) || !(multiplier > 0.0) {
                return Err(ProtocolError::InvalidConfig {
                    field: "advance_bands",
                });
            }
            last_bound = bound;
        }
        if !(self.wide_heading_multiplier > 0.0) {
            return Err(ProtocolError::InvalidConfig {
                field: "wide_heading_multiplier",
            });
        }
        if !(self.full_thrust_cone_deg > 0.0 && self.full_thrust_cone_deg <= 180.0) {
            return Err(ProtocolError::InvalidConfig {
                field: "full_thrust_cone_deg",
            });
        }
        if self.opening_thrust > MAX_THRUST {
            return Err(ProtocolError::InvalidConfig {
                field: "opening_thrust",
            });
        }
        if !(1..=MAX_LOOKAHEAD_PERCENT).contains(&self.collision_lookahead_percent) {
            return Err(ProtocolError::InvalidConfig {
                field: "collision_lookahead_percent",
            });
        }
        if !(self.collision_radius > 0.0) {
            return Err(ProtocolError::InvalidConfig {
                field: "collision_radius",
            });
        }
        if self.collision_heading_min_deg >= self.collision_heading_max_deg {
            return Err(ProtocolError::InvalidConfig {
                field: "collision_heading_band",
            });
        }
        Ok(())
    }
}
