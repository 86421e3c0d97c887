//! Fundamental mission engine types.

use serde::{Deserialize, Serialize};

use crate::enums::EffectKind;

/// Mission time tracking. One tick per discrete game turn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MissionClock {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl MissionClock {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// A single effect a timer attachment applies when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEffect {
    pub kind: EffectKind,
    pub magnitude: i64,
}

/// External snapshot values the condition evaluator pulls from collaborators.
///
/// The combat layer pushes a fresh copy whenever one of these changes; the
/// engine never computes them itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionObservations {
    pub stealth_breached: bool,
    pub vip_lost: bool,
    pub area_lost: bool,
    /// Elapsed mission time in minutes, as the combat layer measures it.
    pub elapsed_minutes: i64,
    /// Accumulated resource bonus score.
    pub resource_score: i64,
    /// Accumulated intel bonus score.
    pub intel_score: i64,
}
