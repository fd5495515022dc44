//! The per-turn read four / decide two / emit two cycle.

use serde::Serialize;

use crate::ability::{plan_power, shield_threat};
use crate::aim::{advance_checkpoint, aim_point};
use crate::command::{Command, Power};
use crate::config::PolicyConfig;
use crate::constants::OPENING_CHECKPOINT;
use crate::course::Course;
use crate::error::ProtocolError;
use crate::geometry::heading_error;
use crate::thrust::thrust_for_heading_error;
use crate::vehicle::{OwnedVehicle, Snapshot, VehicleState};

/// Blocking request/response link to the race environment.
pub trait RaceChannel {
    type Error: From<ProtocolError>;

    /// Next turn's four vehicle states, or `None` once the channel is closed.
    fn next_turn_state(&mut self) -> Result<Option<Snapshot>, Self::Error>;

    fn emit(&mut self, commands: &[Command; 2]) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    AwaitingTurnInput,
    UpdatingState,
    Deciding,
    EmittingCommands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub commands: [Command; 2],
    pub advanced: [bool; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VehicleSummary {
    pub boost_turn: Option<u32>,
    pub first_shield_turn: Option<u32>,
    pub shield_turns: u32,
    pub advancements: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RaceSummary {
    pub laps: u32,
    pub checkpoints: usize,
    pub turns: u32,
    pub vehicles: [VehicleSummary; 2],
}

pub struct TurnLoop {
    course: Course,
    config: PolicyConfig,
    owned: [OwnedVehicle; 2],
    adversaries: [VehicleState; 2],
    turn: u32,
    phase: TurnPhase,
    summary: RaceSummary,
}

impl TurnLoop {
    /// Creates the loop from the setup snapshot, which only seeds the vehicles.
    pub fn new(
        course: Course,
        initial: Snapshot,
        config: PolicyConfig,
    ) -> Result<Self, ProtocolError> {
        config.validate()?;
        check_snapshot(&course, &initial)?;
        let summary = RaceSummary {
            laps: course.laps(),
            checkpoints: course.len(),
            ..RaceSummary::default()
        };
        Ok(Self {
            owned: initial.owned.map(OwnedVehicle::new),
            adversaries: initial.adversaries,
            course,
            config,
            turn: 0,
            phase: TurnPhase::AwaitingTurnInput,
            summary,
        })
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn owned(&self) -> &[OwnedVehicle; 2] {
        &self.owned
    }

    pub fn adversaries(&self) -> &[VehicleState; 2] {
        &self.adversaries
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn summary(&self) -> &RaceSummary {
        &self.summary
    }

    /// Placeholder emitted before any motion history exists.
    pub fn opening_commands(&self) -> [Command; 2] {
        let checkpoints = self.course.checkpoints();
        let command = Command {
            target: checkpoints[OPENING_CHECKPOINT % checkpoints.len()],
            power: Power::Thrust(self.config.opening_thrust),
        };
        [command, command]
    }

    /// Ingests one snapshot and decides both commands.
    pub fn step(&mut self, snapshot: Snapshot) -> Result<TurnReport, ProtocolError> {
        self.phase = TurnPhase::UpdatingState;
        check_snapshot(&self.course, &snapshot)?;
        for (vehicle, state) in self.owned.iter_mut().zip(snapshot.owned) {
            vehicle.refresh(state);
        }
        self.adversaries = snapshot.adversaries;

        self.phase = TurnPhase::Deciding;
        self.decide()
    }

    fn decide(&mut self) -> Result<TurnReport, ProtocolError> {
        self.turn += 1;
        let turn = self.turn;
        let cfg = &self.config;

        let mut planned = [Power::Thrust(0); 2];
        let mut advanced = [false; 2];
        for (slot, vehicle) in self.owned.iter_mut().enumerate() {
            advanced[slot] = advance_checkpoint(&mut vehicle.state, &self.course, cfg)?;
            vehicle.aim = aim_point(&vehicle.state, &self.course, cfg)?;

            let delta = heading_error(vehicle.state.position, vehicle.aim, vehicle.state.angle as f64);
            let thrust = thrust_for_heading_error(delta, cfg);
            planned[slot] = plan_power(thrust, &vehicle.abilities);
            tracing::debug!(
                turn,
                slot,
                checkpoint = vehicle.state.next_checkpoint,
                advanced = advanced[slot],
                aim_x = vehicle.aim.x,
                aim_y = vehicle.aim.y,
                delta,
                thrust,
                "steering"
            );
        }

        for (slot, vehicle) in self.owned.iter().enumerate() {
            if !cfg.reusable_shield && !vehicle.abilities.shield.is_ready() {
                continue;
            }
            if let Some(adversary) = shield_threat(&vehicle.state, &self.adversaries, cfg) {
                tracing::debug!(turn, slot, adversary, "collision predicted");
                planned[slot] = Power::Shield;
            }
        }

        let mut commands = [Command {
            target: self.owned[0].aim,
            power: planned[0],
        }; 2];
        for (slot, vehicle) in self.owned.iter_mut().enumerate() {
            let stats = &mut self.summary.vehicles[slot];
            if advanced[slot] {
                stats.advancements += 1;
            }
            match planned[slot] {
                Power::Boost => {
                    vehicle.abilities.boost.consume();
                    stats.boost_turn = Some(turn);
                    tracing::info!(turn, slot, "boost");
                }
                Power::Shield => {
                    vehicle.abilities.shield.consume();
                    stats.first_shield_turn.get_or_insert(turn);
                    stats.shield_turns += 1;
                    tracing::info!(turn, slot, "shield");
                }
                Power::Thrust(_) => {}
            }
            commands[slot] = Command {
                target: vehicle.aim,
                power: planned[slot],
            };
        }
        self.summary.turns = turn;

        Ok(TurnReport {
            turn,
            commands,
            advanced,
        })
    }

    /// Drives the channel until it closes.
    pub fn run<C: RaceChannel>(&mut self, channel: &mut C) -> Result<RaceSummary, C::Error> {
        tracing::info!(
            laps = self.course.laps(),
            checkpoints = self.course.len(),
            "race started"
        );
        self.phase = TurnPhase::EmittingCommands;
        channel.emit(&self.opening_commands())?;

        loop {
            self.phase = TurnPhase::AwaitingTurnInput;
            let Some(snapshot) = channel.next_turn_state()? else {
                break;
            };
            let report = self.step(snapshot)?;
            self.phase = TurnPhase::EmittingCommands;
            channel.emit(&report.commands)?;
        }

        self.phase = TurnPhase::AwaitingTurnInput;
        tracing::info!(turns = self.turn, "channel closed");
        Ok(self.summary.clone())
    }
}

fn check_snapshot(course: &Course, snapshot: &Snapshot) -> Result<(), ProtocolError> {
    for state in snapshot.owned.iter().chain(&snapshot.adversaries) {
        course.validate_index(state.next_checkpoint as i64)?;
        state.check_bounds()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
