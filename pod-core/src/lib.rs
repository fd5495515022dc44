pub mod ability;
pub mod aim;
pub mod command;
pub mod config;
pub mod constants;
pub mod course;
pub mod error;
pub mod geometry;
pub mod protocol;
pub mod thrust;
pub mod turn;
pub mod vehicle;

pub use command::{Command, Power};
pub use config::PolicyConfig;
pub use course::Course;
pub use error::ProtocolError;
pub use geometry::Point;
pub use turn::{RaceChannel, RaceSummary, TurnLoop, TurnPhase, TurnReport};
pub use vehicle::{Abilities, Charge, OwnedVehicle, Snapshot, VehicleState};
