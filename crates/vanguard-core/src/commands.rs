//! Commands sent by collaborators (combat layer, player) to the mission engine.
//!
//! Commands are queued and processed at the next tick boundary. Every
//! precondition violation collapses to an "operation declined" no-op; no
//! command raises an error.

use serde::{Deserialize, Serialize};

use crate::types::MissionObservations;

/// All inbound mission operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MissionCommand {
    // --- Lifecycle ---
    /// Begin the mission. Only valid from Preparing.
    StartMission,
    /// Abandon the mission. Terminal.
    AbortMission,

    // --- Objectives ---
    /// Mark an objective completed.
    CompleteObjective { objective_id: String },
    /// Mark an objective failed.
    FailObjective { objective_id: String },
    /// Advance an objective's progress counter; completes it at the
    /// required count.
    RecordProgress { objective_id: String, amount: u32 },

    // --- Squad roster ---
    /// A squad member was lost in combat.
    UnitLost { unit: String },
    /// A squad member reached the evacuation zone.
    UnitEvacuated { unit: String },
    /// Open the evacuation flow (injects the EVACUATION objective).
    TriggerEvacuation,

    // --- Timers ---
    /// Apply a registered timer manipulation (ability-gated, cooldown-gated).
    ApplyManipulation { manipulation_id: String },
    /// Consume a one-shot timer bonus.
    ActivateBonus { bonus_id: String },

    // --- External signals ---
    /// Report a new value for an objective trigger's watched signal.
    UpdateTriggerValue { trigger_id: String, value: i64 },
    /// Replace the pulled external observation snapshot.
    UpdateObservations { observations: MissionObservations },
    /// Grant an ability that manipulations may list as a precondition.
    GrantAbility { ability: String },
}
