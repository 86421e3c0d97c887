//! Declarative mission plan — everything the engine is constructed from.
//!
//! A plan is a flat serde record, loadable from JSON, validated before the
//! engine accepts it. Authoring tools produce plans; the engine never
//! mutates one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vanguard_core::constants::DEFAULT_MISSION_TIMER;

use crate::conditions::{FailureCondition, SuccessCondition};
use crate::dynamic::DynamicObjective;
use crate::objectives::MissionObjective;
use crate::timers::{
    MissionTimer, TimerBonus, TimerConsequence, TimerEvent, TimerManipulation, TimerPressure,
};

fn default_mission_timer() -> i64 {
    DEFAULT_MISSION_TIMER
}

/// Validation and parse failures for mission plans.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("mission plan has no objectives")]
    NoObjectives,
    #[error("mission plan has no success conditions")]
    NoSuccessConditions,
    #[error("mission plan has no failure conditions")]
    NoFailureConditions,
    #[error("duplicate id in mission plan: {0}")]
    DuplicateId(String),
    #[error("attachment {attachment} references unknown timer {timer_id}")]
    UnknownTimer {
        attachment: String,
        timer_id: String,
    },
    #[error("failed to parse mission plan: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The full authored content of one mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionPlan {
    #[serde(default)]
    pub name: String,
    pub objectives: Vec<MissionObjective>,
    pub success_conditions: Vec<SuccessCondition>,
    pub failure_conditions: Vec<FailureCondition>,
    #[serde(default)]
    pub timers: Vec<MissionTimer>,
    #[serde(default)]
    pub timer_events: Vec<TimerEvent>,
    #[serde(default)]
    pub timer_consequences: Vec<TimerConsequence>,
    #[serde(default)]
    pub manipulations: Vec<TimerManipulation>,
    #[serde(default)]
    pub pressures: Vec<TimerPressure>,
    #[serde(default)]
    pub bonuses: Vec<TimerBonus>,
    #[serde(default)]
    pub dynamic_objectives: Vec<DynamicObjective>,
    /// Squad member names, in deployment order.
    #[serde(default)]
    pub squad: Vec<String>,
    /// Abilities available at mission start (manipulation preconditions).
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Starting value of the legacy global countdown, in ticks.
    #[serde(default = "default_mission_timer")]
    pub mission_timer: i64,
    #[serde(default)]
    pub evacuation_available: bool,
}

impl MissionPlan {
    /// Parse and validate a plan from JSON.
    pub fn from_json(data: &str) -> Result<Self, PlanError> {
        let plan: MissionPlan = serde_json::from_str(data)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check the structural invariants the engine relies on: the three
    /// authored lists are non-empty, ids are unique within their namespace
    /// (objectives share theirs with dynamic objectives, which materialize
    /// into the same store), and every timer attachment resolves.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.objectives.is_empty() {
            return Err(PlanError::NoObjectives);
        }
        if self.success_conditions.is_empty() {
            return Err(PlanError::NoSuccessConditions);
        }
        if self.failure_conditions.is_empty() {
            return Err(PlanError::NoFailureConditions);
        }

        let mut objective_ids = HashSet::new();
        for id in self
            .objectives
            .iter()
            .map(|o| &o.id)
            .chain(self.dynamic_objectives.iter().map(|d| &d.id))
        {
            if !objective_ids.insert(id.clone()) {
                return Err(PlanError::DuplicateId(id.clone()));
            }
        }

        let mut timer_ids = HashSet::new();
        for timer in &self.timers {
            if !timer_ids.insert(timer.id.clone()) {
                return Err(PlanError::DuplicateId(timer.id.clone()));
            }
        }
        let attachments = self
            .timer_events
            .iter()
            .map(|e| (&e.id, &e.timer_id))
            .chain(self.timer_consequences.iter().map(|c| (&c.id, &c.timer_id)))
            .chain(self.manipulations.iter().map(|m| (&m.id, &m.timer_id)))
            .chain(self.pressures.iter().map(|p| (&p.id, &p.timer_id)));
        for (attachment, timer_id) in attachments {
            if !timer_ids.contains(timer_id.as_str()) {
                return Err(PlanError::UnknownTimer {
                    attachment: attachment.clone(),
                    timer_id: timer_id.clone(),
                });
            }
        }
        Ok(())
    }
}
