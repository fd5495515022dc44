//! Line parsers for the race input channel.
//!
//! Setup is a lap count, a checkpoint count, that many `x y` lines, then four
//! vehicle lines `x y vx vy angle next_checkpoint_id` in the order
//! owned#1, owned#2, adversary#1, adversary#2. Every later turn repeats the
//! four vehicle lines. Line numbers in errors are 1-based.

use crate::constants::VEHICLE_FIELDS;
use crate::course::Course;
use crate::error::ProtocolError;
use crate::geometry::Point;
use crate::vehicle::{check_point, Snapshot, VehicleState};

fn parse_fields<const N: usize>(line: &str, line_no: usize) -> Result<[i64; N], ProtocolError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != N {
        return Err(ProtocolError::FieldCount {
            line: line_no,
            expected: N,
            found: tokens.len(),
        });
    }
    let mut out = [0i64; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token
            .parse::<i64>()
            .map_err(|_| ProtocolError::InvalidInteger {
                line: line_no,
                token: token.to_string(),
            })?;
    }
    Ok(out)
}

fn narrow(value: i64, line_no: usize) -> Result<i32, ProtocolError> {
    i32::try_from(value).map_err(|_| ProtocolError::InvalidInteger {
        line: line_no,
        token: value.to_string(),
    })
}

/// Attaches the input line to a range error raised by a bounds check.
fn at_line(err: ProtocolError, line_no: usize) -> ProtocolError {
    match err {
        ProtocolError::ValueOutOfRange { field, value, .. } => ProtocolError::ValueOutOfRange {
            line: Some(line_no),
            field,
            value,
        },
        other => other,
    }
}

pub fn parse_count(line: &str, line_no: usize) -> Result<u32, ProtocolError> {
    let [value] = parse_fields::<1>(line, line_no)?;
    u32::try_from(value).map_err(|_| ProtocolError::NegativeCount {
        line: line_no,
        value,
    })
}

pub fn parse_checkpoint(line: &str, line_no: usize) -> Result<Point, ProtocolError> {
    let [x, y] = parse_fields::<2>(line, line_no)?;
    let checkpoint = Point::new(narrow(x, line_no)?, narrow(y, line_no)?);
    check_point("checkpoint", checkpoint).map_err(|err| at_line(err, line_no))?;
    Ok(checkpoint)
}

pub fn parse_vehicle(
    line: &str,
    line_no: usize,
    course: &Course,
) -> Result<VehicleState, ProtocolError> {
    let [x, y, vx, vy, angle, next] = parse_fields::<VEHICLE_FIELDS>(line, line_no)?;
    let state = VehicleState {
        position: Point::new(narrow(x, line_no)?, narrow(y, line_no)?),
        velocity: Point::new(narrow(vx, line_no)?, narrow(vy, line_no)?),
        angle: narrow(angle, line_no)?,
        next_checkpoint: course.validate_index(next)?,
    };
    state.check_bounds().map_err(|err| at_line(err, line_no))?;
    Ok(state)
}

/// Builds a snapshot from exactly four numbered vehicle lines.
pub fn parse_snapshot<'a, I>(lines: I, course: &Course) -> Result<Snapshot, ProtocolError>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut vehicles = [VehicleState::default(); 4];
    let mut received = 0usize;
    for (line_no, line) in lines {
        if received == vehicles.len() {
            return Err(ProtocolError::ExtraTurnLines { line: line_no });
        }
        vehicles[received] = parse_vehicle(line, line_no, course)?;
        received += 1;
    }
    if received < vehicles.len() {
        return Err(ProtocolError::TruncatedTurn { received });
    }
    Ok(Snapshot {
        owned: [vehicles[0], vehicles[1]],
        adversaries: [vehicles[2], vehicles[3]],
    })
}
