//! Events emitted by the mission engine for UI and strategic-layer feedback.

use serde::{Deserialize, Serialize};

use crate::enums::MissionResult;

/// Per-tick mission events, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionEvent {
    /// An objective entered the active partition.
    ObjectiveActivated { objective_id: String },
    ObjectiveCompleted { objective_id: String },
    ObjectiveFailed { objective_id: String },
    /// A dynamic objective template materialized into a live objective.
    DynamicObjectiveActivated {
        dynamic_id: String,
        objective_id: String,
    },
    /// A trigger fired. The per-objective effect on the affected ids is a
    /// content-policy decision made by the listener, not the engine.
    TriggerActivated {
        trigger_id: String,
        affected_objectives: Vec<String>,
    },
    /// A timer crossed its warning threshold.
    TimerWarning { timer_id: String, remaining: i64 },
    /// A timer crossed its critical threshold.
    TimerCritical { timer_id: String, remaining: i64 },
    /// A timer reached zero and fired its attached consequences.
    TimerExpired { timer_id: String },
    /// A scheduled timer event fired.
    TimerEventFired { event_id: String, timer_id: String },
    EvacuationTriggered,
    UnitLost { unit: String },
    UnitEvacuated { unit: String },
    /// The mission reached a terminal result.
    MissionEnded { result: MissionResult },
}
