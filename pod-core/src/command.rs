use core::fmt;
use serde::{Deserialize, Serialize};

use crate::constants::{BOOST_TOKEN, SHIELD_TOKEN};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    Thrust(u8),
    Boost,
    Shield,
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thrust(value) => write!(f, "{value}"),
            Self::Boost => f.write_str(BOOST_TOKEN),
            Self::Shield => f.write_str(SHIELD_TOKEN),
        }
    }
}

/// One output line: where to steer and how hard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub target: Point,
    pub power: Power,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target.x, self.target.y, self.power)
    }
}
