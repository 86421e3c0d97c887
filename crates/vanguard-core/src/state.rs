//! Mission state snapshot — the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MissionEvent;

/// Complete mission state handed to the presentation and strategic layers
/// after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub tick: u64,
    pub state: MissionState,
    /// Terminal result once the mission ends; a soft PartialSuccess read
    /// while it is still in progress.
    pub result: Option<MissionResult>,
    /// Legacy global countdown (ticks remaining).
    pub mission_timer: i64,
    pub objectives: ObjectiveBoard,
    pub timers: Vec<TimerView>,
    /// Sum of remaining time over active timers.
    pub total_time_remaining: i64,
    /// Sticky: true once any timer has gone critical.
    pub time_critical: bool,
    /// Global pressure counter driven by timer pressure effects.
    pub pressure_level: i64,
    pub squad: SquadView,
    pub consequences: Vec<ConsequenceView>,
    pub events: Vec<MissionEvent>,
}

/// Objective checklist, partitioned for UI feedback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveBoard {
    pub pending: Vec<ObjectiveView>,
    pub active: Vec<ObjectiveView>,
    pub completed: Vec<ObjectiveView>,
    pub failed: Vec<ObjectiveView>,
}

/// A single objective as shown on the checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub id: String,
    pub description: String,
    pub kind: ObjectiveKind,
    pub required: bool,
    pub progress: u32,
    pub required_progress: u32,
    pub completion_tick: Option<u64>,
}

/// A mission timer as shown on the timer rail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerView {
    pub id: String,
    pub name: String,
    pub kind: TimerKind,
    pub priority: TimerPriority,
    pub initial_time: i64,
    pub current_time: i64,
    pub active: bool,
    pub paused: bool,
    /// At or below the critical threshold.
    pub critical: bool,
    pub linked_objective: Option<String>,
}

/// Squad roster partitions plus evacuation flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SquadView {
    pub members: Vec<String>,
    pub evacuated: Vec<String>,
    pub lost: Vec<String>,
    pub evacuation_available: bool,
    pub evacuation_triggered: bool,
}

/// A ledger entry as exposed to the strategic layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsequenceView {
    pub id: String,
    pub description: String,
    pub kind: ConsequenceKind,
    pub severity: u32,
    pub affected_systems: Vec<String>,
    pub applied_tick: u64,
}
