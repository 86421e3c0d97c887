//! Consequence ledger — lasting effects a mission outcome applies outward.
//!
//! Append-only during the mission; the strategic layer reads the entries
//! once, at mission end.

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{ConsequenceKind, MissionResult};
use vanguard_core::state::ConsequenceView;

/// A single ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionConsequence {
    pub id: String,
    pub description: String,
    pub kind: ConsequenceKind,
    pub severity: u32,
    /// Outside systems the strategic layer should touch.
    #[serde(default)]
    pub affected_systems: Vec<String>,
    /// Tick at which the ledger accepted the entry.
    #[serde(default)]
    pub applied_tick: u64,
}

impl MissionConsequence {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        kind: ConsequenceKind,
        severity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            severity,
            affected_systems: Vec::new(),
            applied_tick: 0,
        }
    }

    /// Identity comparison ignoring the applied tick. A failure condition
    /// re-submits its consequence every tick it stays true; entries that
    /// differ only by tick are the same effect.
    fn same_effect(&self, other: &MissionConsequence) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.severity == other.severity
            && self.description == other.description
            && self.affected_systems == other.affected_systems
    }
}

/// Append-only record of mission consequences.
#[derive(Debug, Default)]
pub struct ConsequenceLedger {
    entries: Vec<MissionConsequence>,
}

impl ConsequenceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a consequence, stamping the applied tick. Declines entries
    /// whose effect identity duplicates an existing one.
    pub fn add(&mut self, mut consequence: MissionConsequence, tick: u64) -> bool {
        if self.entries.iter().any(|e| e.same_effect(&consequence)) {
            return false;
        }
        consequence.applied_tick = tick;
        tracing::debug!(
            target: "vanguard::consequences",
            id = %consequence.id,
            kind = ?consequence.kind,
            severity = consequence.severity,
            tick,
            "consequence.recorded"
        );
        self.entries.push(consequence);
        true
    }

    /// Record the outcome-specific consequences for a terminal result.
    /// Called exactly once, from `complete_mission`.
    pub fn apply_outcome(&mut self, result: MissionResult, tick: u64) {
        for consequence in outcome_consequences(result) {
            self.add(consequence, tick);
        }
    }

    pub fn entries(&self) -> &[MissionConsequence] {
        &self.entries
    }

    pub fn views(&self) -> Vec<ConsequenceView> {
        self.entries
            .iter()
            .map(|c| ConsequenceView {
                id: c.id.clone(),
                description: c.description.clone(),
                kind: c.kind,
                severity: c.severity,
                affected_systems: c.affected_systems.clone(),
                applied_tick: c.applied_tick,
            })
            .collect()
    }
}

/// Lasting effects each terminal result propagates to the strategic layer.
fn outcome_consequences(result: MissionResult) -> Vec<MissionConsequence> {
    match result {
        MissionResult::CompleteSuccess | MissionResult::StealthSuccess => Vec::new(),
        MissionResult::PartialSuccess => vec![MissionConsequence {
            affected_systems: vec!["supply".to_string()],
            ..MissionConsequence::new(
                "partial_success_losses",
                "Secondary objectives abandoned; recovered materiel reduced",
                ConsequenceKind::ResourceLoss,
                1,
            )
        }],
        MissionResult::SquadWipe => vec![
            MissionConsequence {
                affected_systems: vec!["barracks".to_string(), "morale".to_string()],
                ..MissionConsequence::new(
                    "squad_wipe_morale",
                    "Entire squad lost; organization-wide morale shock",
                    ConsequenceKind::MoraleImpact,
                    5,
                )
            },
            MissionConsequence {
                affected_systems: vec!["strategic_map".to_string()],
                ..MissionConsequence::new(
                    "squad_wipe_strategic",
                    "Region abandoned to the enemy",
                    ConsequenceKind::StrategicImpact,
                    4,
                )
            },
        ],
        MissionResult::TimerExpired => vec![
            MissionConsequence {
                affected_systems: vec!["strategic_map".to_string()],
                ..MissionConsequence::new(
                    "timer_expired_strategic",
                    "Window of opportunity closed before the mission resolved",
                    ConsequenceKind::StrategicImpact,
                    3,
                )
            },
            MissionConsequence {
                affected_systems: vec!["intel".to_string()],
                ..MissionConsequence::new(
                    "timer_expired_intel",
                    "Time-sensitive intelligence lost",
                    ConsequenceKind::IntelLoss,
                    2,
                )
            },
        ],
        MissionResult::ObjectiveFailed => vec![MissionConsequence {
            affected_systems: vec!["strategic_map".to_string()],
            ..MissionConsequence::new(
                "objective_failed_strategic",
                "Critical objective failed; enemy position strengthened",
                ConsequenceKind::StrategicImpact,
                3,
            )
        }],
        MissionResult::Failure => vec![
            MissionConsequence {
                affected_systems: vec!["strategic_map".to_string()],
                ..MissionConsequence::new(
                    "mission_failure_strategic",
                    "Mission failed; regional standing weakened",
                    ConsequenceKind::StrategicImpact,
                    3,
                )
            },
            MissionConsequence {
                affected_systems: vec!["supply".to_string()],
                ..MissionConsequence::new(
                    "mission_failure_resources",
                    "Deployed equipment unrecovered",
                    ConsequenceKind::ResourceLoss,
                    2,
                )
            },
        ],
    }
}
