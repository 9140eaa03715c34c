use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Win/loss/tie classification for one side of a match, derived purely
/// from comparing the two team scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

impl Outcome {
    /// Classify the side that scored `own` against the side that scored `other`.
    pub fn from_scores(own: i64, other: i64) -> Self {
        match own.cmp(&other) {
            Ordering::Greater => Self::Win,
            Ordering::Less => Self::Loss,
            Ordering::Equal => Self::Tie,
        }
    }

    /// The same result seen from the opposing side.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Win => Self::Loss,
            Self::Loss => Self::Win,
            Self::Tie => Self::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Tie => "tie",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "tie" => Ok(Self::Tie),
            _ => Err(CoreError::Serialization(format!("unknown outcome: {s}"))),
        }
    }
}
