use super::*;
use crate::geometry::Point;
use crate::vehicle::Charge;
use std::collections::VecDeque;

fn racer(x: i32, y: i32, vx: i32, vy: i32, angle: i32, next_checkpoint: usize) -> VehicleState {
    VehicleState {
        position: Point::new(x, y),
        velocity: Point::new(vx, vy),
        angle,
        next_checkpoint,
    }
}

fn course() -> Course {
    Course::new(
        3,
        vec![
            Point::new(10_000, 500),
            Point::new(10_000, 5_000),
            Point::new(2_000, 7_000),
        ],
    )
    .expect("course")
}

/// Both owned racers face their checkpoint; the adversaries are far away.
fn cruising() -> Snapshot {
    Snapshot {
        owned: [
            racer(80, 500, 350, 0, 0, 0),
            racer(0, 5_000, 0, 0, 0, 1),
        ],
        adversaries: [
            racer(-8_000, -8_000, 0, 0, 90, 0),
            racer(-9_000, -9_000, 0, 0, 90, 0),
        ],
    }
}

/// `cruising`, with adversary #1 landing on owned #1 head-on next turn.
fn head_on() -> Snapshot {
    let mut snapshot = cruising();
    snapshot.adversaries[0] = racer(884, 500, -320, 0, 180, 0);
    snapshot
}

fn new_loop() -> TurnLoop {
    TurnLoop::new(course(), cruising(), PolicyConfig::default()).expect("turn loop")
}

struct ScriptedChannel {
    turns: VecDeque<Snapshot>,
    emitted: Vec<[Command; 2]>,
}

impl ScriptedChannel {
    fn new(turns: impl IntoIterator<Item = Snapshot>) -> Self {
        Self {
            turns: turns.into_iter().collect(),
            emitted: Vec::new(),
        }
    }
}

impl RaceChannel for ScriptedChannel {
    type Error = ProtocolError;

    fn next_turn_state(&mut self) -> Result<Option<Snapshot>, ProtocolError> {
        Ok(self.turns.pop_front())
    }

    fn emit(&mut self, commands: &[Command; 2]) -> Result<(), ProtocolError> {
        self.emitted.push(*commands);
        Ok(())
    }
}

#[test]
fn opening_aims_at_second_checkpoint() {
    let race = new_loop();
    let opening = race.opening_commands();
    for command in opening {
        assert_eq!(command.target, Point::new(10_000, 5_000));
        assert_eq!(command.power, Power::Thrust(100));
    }
}

#[test]
fn opening_on_single_checkpoint_course_wraps() {
    let course = Course::new(1, vec![Point::new(42, 24)]).expect("course");
    let mut snapshot = cruising();
    snapshot.owned[1].next_checkpoint = 0;
    let race = TurnLoop::new(course, snapshot, PolicyConfig::default()).expect("turn loop");
    assert_eq!(race.opening_commands()[0].target, Point::new(42, 24));
}

#[test]
fn boost_fires_once_per_vehicle() {
    let mut race = new_loop();
    let first = race.step(cruising()).expect("turn 1");
    assert_eq!(first.commands[0].power, Power::Boost);
    assert_eq!(first.commands[1].power, Power::Boost);
    assert_eq!(first.commands[0].target, Point::new(8_600, 500));
    assert_eq!(first.commands[1].target, Point::new(10_000, 5_000));

    for _ in 0..5 {
        let later = race.step(cruising()).expect("later turn");
        assert_eq!(later.commands[0].power, Power::Thrust(100));
        assert_eq!(later.commands[1].power, Power::Thrust(100));
    }
    assert_eq!(race.summary().vehicles[0].boost_turn, Some(1));
    assert_eq!(race.summary().vehicles[1].boost_turn, Some(1));
}

#[test]
fn shield_overrides_boost_without_spending_it() {
    let mut race = new_loop();
    let first = race.step(head_on()).expect("turn 1");
    assert_eq!(first.commands[0].power, Power::Shield);
    assert_eq!(first.commands[1].power, Power::Boost);
    assert_eq!(race.owned()[0].abilities.boost, Charge::Ready);
    assert_eq!(race.owned()[0].abilities.shield, Charge::Spent);

    let second = race.step(cruising()).expect("turn 2");
    assert_eq!(second.commands[0].power, Power::Boost);
}

#[test]
fn shield_is_single_use() {
    let mut race = new_loop();
    assert_eq!(race.step(head_on()).expect("turn 1").commands[0].power, Power::Shield);
    let again = race.step(head_on()).expect("turn 2");
    assert_eq!(again.commands[0].power, Power::Boost);
    for _ in 0..3 {
        let later = race.step(head_on()).expect("later turn");
        assert_eq!(later.commands[0].power, Power::Thrust(100));
    }
    let stats = &race.summary().vehicles[0];
    assert_eq!(stats.first_shield_turn, Some(1));
    assert_eq!(stats.shield_turns, 1);
}

#[test]
fn reusable_shield_refires() {
    let cfg = PolicyConfig {
        reusable_shield: true,
        ..PolicyConfig::default()
    };
    let mut race = TurnLoop::new(course(), cruising(), cfg).expect("turn loop");
    for _ in 0..3 {
        assert_eq!(race.step(head_on()).expect("turn").commands[0].power, Power::Shield);
    }
    assert_eq!(race.summary().vehicles[0].shield_turns, 3);
    assert_eq!(race.summary().vehicles[0].first_shield_turn, Some(1));
}

#[test]
fn parallel_adversary_is_not_shielded() {
    let mut race = new_loop();
    let mut snapshot = head_on();
    snapshot.adversaries[0].angle = 10;
    assert_eq!(race.step(snapshot).expect("turn").commands[0].power, Power::Boost);
}

#[test]
fn stalled_input_gives_same_aim_and_checkpoint() {
    let mut race = new_loop();
    let mut snapshot = cruising();
    // Owned #2 sits right on its checkpoint so it advances.
    snapshot.owned[1] = racer(10_000, 5_000, 0, 0, 90, 1);

    let first = race.step(snapshot).expect("turn 1");
    let first_checkpoints = race.owned().map(|v| v.state.next_checkpoint);
    let second = race.step(snapshot).expect("turn 2");
    let second_checkpoints = race.owned().map(|v| v.state.next_checkpoint);

    assert_eq!(first.advanced, [false, true]);
    assert_eq!(first.advanced, second.advanced);
    assert_eq!(first_checkpoints, [0, 2]);
    assert_eq!(first_checkpoints, second_checkpoints);
    for slot in 0..2 {
        assert_eq!(first.commands[slot].target, second.commands[slot].target);
    }
    assert_eq!(first.commands[1].target, Point::new(2_000, 7_000));
}

#[test]
fn advancement_from_last_checkpoint_wraps_to_zero() {
    let mut race = new_loop();
    let mut snapshot = cruising();
    snapshot.owned[0] = racer(2_000, 7_000, 0, 0, 0, 2);
    let report = race.step(snapshot).expect("turn");
    assert!(report.advanced[0]);
    assert_eq!(race.owned()[0].state.next_checkpoint, 0);
    assert_eq!(report.commands[0].target, Point::new(10_000, 500));
}

#[test]
fn out_of_range_checkpoint_is_fatal() {
    let mut race = new_loop();
    let mut snapshot = cruising();
    snapshot.adversaries[1].next_checkpoint = 3;
    assert_eq!(
        race.step(snapshot),
        Err(ProtocolError::CheckpointOutOfRange { index: 3, count: 3 })
    );
}

#[test]
fn run_emits_opening_then_one_pair_per_turn() {
    let mut race = new_loop();
    let mut channel = ScriptedChannel::new([cruising(), head_on(), cruising()]);
    let summary = race.run(&mut channel).expect("run");

    assert_eq!(channel.emitted.len(), 4);
    assert_eq!(channel.emitted[0], race.opening_commands());
    assert_eq!(channel.emitted[1][0].power, Power::Boost);
    assert_eq!(channel.emitted[2][0].power, Power::Shield);
    assert_eq!(channel.emitted[3][0].power, Power::Thrust(100));
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.laps, 3);
    assert_eq!(summary.checkpoints, 3);
    assert_eq!(race.phase(), TurnPhase::AwaitingTurnInput);
}

#[test]
fn extreme_velocity_is_fatal_instead_of_wrapping() {
    let mut race = new_loop();
    let mut snapshot = cruising();
    snapshot.owned[0].velocity = Point::new(600_000_000, 0);
    assert_eq!(
        race.step(snapshot),
        Err(ProtocolError::ValueOutOfRange {
            line: None,
            field: "velocity",
            value: 600_000_000
        })
    );
    assert_eq!(race.summary().turns, 0);
}
