use serde::Serialize;

use crate::error::ProtocolError;
use crate::geometry::Point;
use crate::vehicle::check_point;

/// Ordered, circular list of checkpoints. Fixed for the whole race.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Course {
    laps: u32,
    checkpoints: Vec<Point>,
}

impl Course {
    pub fn new(laps: u32, checkpoints: Vec<Point>) -> Result<Self, ProtocolError> {
        if checkpoints.is_empty() {
            return Err(ProtocolError::EmptyCourse);
        }
        for checkpoint in &checkpoints {
            check_point("checkpoint", *checkpoint)?;
        }
        Ok(Self { laps, checkpoints })
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Point] {
        &self.checkpoints
    }

    pub fn checkpoint_at(&self, index: usize) -> Result<Point, ProtocolError> {
        self.checkpoints
            .get(index)
            .copied()
            .ok_or(ProtocolError::CheckpointOutOfRange {
                index: index as i64,
                count: self.checkpoints.len(),
            })
    }

    /// Index following `index`, wrapping to 0 after the last checkpoint.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.checkpoints.len() {
            index + 1
        } else {
            0
        }
    }

    /// Converts a raw index from the wire into a checked course index.
    pub fn validate_index(&self, raw: i64) -> Result<usize, ProtocolError> {
        if raw < 0 || raw as u64 >= self.checkpoints.len() as u64 {
            return Err(ProtocolError::CheckpointOutOfRange {
                index: raw,
                count: self.checkpoints.len(),
            });
        }
        Ok(raw as usize)
    }
}
