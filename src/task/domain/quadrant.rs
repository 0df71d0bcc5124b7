//! Eisenhower matrix classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quadrant of the Eisenhower matrix, numbered 1-4.
///
/// The quadrant is always derived from a task's importance and urgency flags;
/// it is never stored or edited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EisenhowerQuadrant {
    /// Important and urgent.
    DoFirst,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither important nor urgent.
    Eliminate,
}

impl EisenhowerQuadrant {
    /// Classifies a task from its importance and urgency flags.
    #[must_use]
    pub const fn from_flags(importance: bool, urgency: bool) -> Self {
        match (importance, urgency) {
            (true, true) => Self::DoFirst,
            (true, false) => Self::Schedule,
            (false, true) => Self::Delegate,
            (false, false) => Self::Eliminate,
        }
    }

    /// Returns the quadrant number in `1..=4`.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::DoFirst => 1,
            Self::Schedule => 2,
            Self::Delegate => 3,
            Self::Eliminate => 4,
        }
    }
}

impl From<EisenhowerQuadrant> for u8 {
    fn from(quadrant: EisenhowerQuadrant) -> Self {
        quadrant.number()
    }
}

impl TryFrom<u8> for EisenhowerQuadrant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::DoFirst),
            2 => Ok(Self::Schedule),
            3 => Ok(Self::Delegate),
            4 => Ok(Self::Eliminate),
            other => Err(format!("eisenhower quadrant {other} is outside 1..=4")),
        }
    }
}

impl fmt::Display for EisenhowerQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
