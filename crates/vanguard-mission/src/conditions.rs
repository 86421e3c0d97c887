//! Success/failure condition evaluation.
//!
//! Conditions are pure predicates over mission state: each evaluation
//! recomputes the `met`/`triggered` flag and current-value snapshot and has
//! no other side effect. The one exception is that a failure condition which
//! is true submits its consequence to the ledger every tick it stays true;
//! the ledger's effect-identity dedup suppresses the repeats.

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{ConsequenceKind, FailureConditionKind, SuccessConditionKind};
use vanguard_core::types::MissionObservations;

use crate::consequences::{ConsequenceLedger, MissionConsequence};

/// A win predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessCondition {
    pub id: String,
    pub description: String,
    pub kind: SuccessConditionKind,
    #[serde(default)]
    pub met: bool,
    /// Threshold the current value is compared against (meaning per kind).
    #[serde(default)]
    pub required_value: i64,
    #[serde(default)]
    pub current_value: i64,
    /// Objectives that must be completed, for kinds that name specific work.
    #[serde(default)]
    pub required_objectives: Vec<String>,
    #[serde(default)]
    pub evaluated_tick: u64,
}

/// A loss predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureCondition {
    pub id: String,
    pub description: String,
    pub kind: FailureConditionKind,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default)]
    pub threshold: i64,
    #[serde(default)]
    pub current_value: i64,
    #[serde(default)]
    pub evaluated_tick: u64,
    /// Consequence submitted while triggered. Synthesized from the kind
    /// when the plan does not author one.
    #[serde(default)]
    pub consequence: Option<MissionConsequence>,
}

impl FailureCondition {
    fn ledger_entry(&self) -> MissionConsequence {
        if let Some(c) = &self.consequence {
            return c.clone();
        }
        let (kind, severity) = match self.kind {
            FailureConditionKind::SquadWipe => (ConsequenceKind::MoraleImpact, 5),
            FailureConditionKind::TimerExpired => (ConsequenceKind::StrategicImpact, 3),
            FailureConditionKind::ObjectiveFailed => (ConsequenceKind::StrategicImpact, 3),
            FailureConditionKind::VipLost => (ConsequenceKind::RelationshipDamage, 4),
            FailureConditionKind::AreaLost => (ConsequenceKind::StrategicImpact, 4),
            FailureConditionKind::ExcessiveCasualties => (ConsequenceKind::MoraleImpact, 3),
            FailureConditionKind::StealthBreached => (ConsequenceKind::IntelLoss, 2),
        };
        MissionConsequence::new(
            format!("failure_{}", self.id),
            self.description.clone(),
            kind,
            severity,
        )
    }
}

/// Mission-state counters the evaluator reads each tick.
#[derive(Debug, Clone, Copy)]
pub struct ConditionInputs<'a> {
    pub active_objectives: usize,
    pub completed_objectives: usize,
    pub failed_objectives: usize,
    pub squad_members: usize,
    pub lost_units: usize,
    /// The legacy global mission countdown.
    pub mission_timer: i64,
    pub observations: &'a MissionObservations,
}

/// All conditions registered for the mission.
#[derive(Debug, Default)]
pub struct ConditionSet {
    success: Vec<SuccessCondition>,
    failure: Vec<FailureCondition>,
}

impl ConditionSet {
    pub fn new(success: Vec<SuccessCondition>, failure: Vec<FailureCondition>) -> Self {
        Self { success, failure }
    }

    /// Re-evaluate every condition against current mission state, feeding
    /// triggered failure consequences to the ledger.
    pub fn evaluate_all(
        &mut self,
        inputs: ConditionInputs<'_>,
        tick: u64,
        ledger: &mut ConsequenceLedger,
    ) {
        for cond in &mut self.success {
            evaluate_success(cond, inputs, tick);
        }
        for cond in &mut self.failure {
            evaluate_failure(cond, inputs, tick);
            if cond.triggered {
                ledger.add(cond.ledger_entry(), tick);
            }
        }
    }

    /// First triggered failure condition, if any. Failure is checked ahead
    /// of success when the mission result is determined.
    pub fn first_triggered_failure(&self) -> Option<&FailureCondition> {
        self.failure.iter().find(|c| c.triggered)
    }

    pub fn first_met_success(&self) -> Option<&SuccessCondition> {
        self.success.iter().find(|c| c.met)
    }

    pub fn success_conditions(&self) -> &[SuccessCondition] {
        &self.success
    }

    pub fn failure_conditions(&self) -> &[FailureCondition] {
        &self.failure
    }
}

/// Evaluate one success condition. The flag is recomputed, not latched.
pub fn evaluate_success(cond: &mut SuccessCondition, inputs: ConditionInputs<'_>, tick: u64) {
    let obs = inputs.observations;
    let (current, met) = match cond.kind {
        // Literal semantics: satisfied when no objectives remain active,
        // regardless of how many failed. Preserved as authoritative.
        SuccessConditionKind::AllObjectivesComplete => (
            inputs.active_objectives as i64,
            inputs.active_objectives == 0,
        ),
        SuccessConditionKind::MinimumObjectivesComplete => (
            inputs.completed_objectives as i64,
            inputs.completed_objectives as i64 >= cond.required_value,
        ),
        SuccessConditionKind::SquadSurvival => (
            inputs.squad_members as i64,
            inputs.squad_members as i64 >= cond.required_value,
        ),
        // Bonus-style completion reads: only meaningful once the work is
        // done, so they gate on the active partition being empty.
        SuccessConditionKind::StealthComplete => (
            i64::from(!obs.stealth_breached),
            inputs.active_objectives == 0 && !obs.stealth_breached,
        ),
        SuccessConditionKind::TimeBonus => (
            obs.elapsed_minutes,
            inputs.active_objectives == 0 && obs.elapsed_minutes <= cond.required_value,
        ),
        SuccessConditionKind::ResourceBonus => (
            obs.resource_score,
            obs.resource_score >= cond.required_value,
        ),
        SuccessConditionKind::IntelBonus => {
            (obs.intel_score, obs.intel_score >= cond.required_value)
        }
    };
    cond.current_value = current;
    cond.met = met;
    cond.evaluated_tick = tick;
}

/// Evaluate one failure condition. The flag is recomputed, not latched.
pub fn evaluate_failure(cond: &mut FailureCondition, inputs: ConditionInputs<'_>, tick: u64) {
    let obs = inputs.observations;
    let (current, triggered) = match cond.kind {
        FailureConditionKind::SquadWipe => {
            (inputs.squad_members as i64, inputs.squad_members == 0)
        }
        FailureConditionKind::TimerExpired => (inputs.mission_timer, inputs.mission_timer <= 0),
        FailureConditionKind::ObjectiveFailed => (
            inputs.failed_objectives as i64,
            inputs.failed_objectives as i64 >= cond.threshold.max(1),
        ),
        FailureConditionKind::VipLost => (i64::from(obs.vip_lost), obs.vip_lost),
        FailureConditionKind::AreaLost => (i64::from(obs.area_lost), obs.area_lost),
        FailureConditionKind::ExcessiveCasualties => (
            inputs.lost_units as i64,
            inputs.lost_units as i64 >= cond.threshold.max(1),
        ),
        FailureConditionKind::StealthBreached => {
            (i64::from(obs.stealth_breached), obs.stealth_breached)
        }
    };
    cond.current_value = current;
    cond.triggered = triggered;
    cond.evaluated_tick = tick;
}
