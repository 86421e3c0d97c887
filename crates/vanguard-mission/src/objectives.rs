//! Objective store — the dependency/blocker graph of mission work.
//!
//! Objectives live in a dense arena addressed by `ObjectiveHandle`, with a
//! side id→handle table. They are never deleted, only moved between the
//! Pending/Active/Completed/Failed phases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vanguard_core::constants::DEFAULT_REQUIRED_PROGRESS;
use vanguard_core::enums::{ObjectiveKind, ObjectivePhase};
use vanguard_core::events::MissionEvent;
use vanguard_core::state::{ObjectiveBoard, ObjectiveView};

fn default_required_progress() -> u32 {
    DEFAULT_REQUIRED_PROGRESS
}

/// A trackable unit of mission work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionObjective {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub kind: ObjectiveKind,
    /// Required objectives gate full success in authored content.
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub progress: u32,
    #[serde(default = "default_required_progress")]
    pub required_progress: u32,
    #[serde(default)]
    pub phase: ObjectivePhase,
    #[serde(default)]
    pub completion_tick: Option<u64>,
    /// Ids that must be Completed before this objective can activate.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Ids that lock this objective out once Completed or Failed.
    #[serde(default)]
    pub blockers: Vec<String>,
}

impl MissionObjective {
    pub fn new(id: impl Into<String>, description: impl Into<String>, kind: ObjectiveKind) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
            required: false,
            progress: 0,
            required_progress: DEFAULT_REQUIRED_PROGRESS,
            phase: ObjectivePhase::Pending,
            completion_tick: None,
            dependencies: Vec::new(),
            blockers: Vec::new(),
        }
    }
}

/// Stable index into the objective arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveHandle(u32);

/// Holds every objective registered for the mission.
#[derive(Debug, Default)]
pub struct ObjectiveStore {
    arena: Vec<MissionObjective>,
    index: HashMap<String, ObjectiveHandle>,
}

impl ObjectiveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an objective. Declines duplicate ids. Objectives always
    /// enter Pending regardless of the phase carried by the record.
    pub fn add(&mut self, mut objective: MissionObjective) -> bool {
        if self.index.contains_key(&objective.id) {
            return false;
        }
        objective.phase = ObjectivePhase::Pending;
        objective.completion_tick = None;
        let handle = ObjectiveHandle(self.arena.len() as u32);
        self.index.insert(objective.id.clone(), handle);
        self.arena.push(objective);
        true
    }

    pub fn get(&self, id: &str) -> Option<&MissionObjective> {
        self.index.get(id).map(|h| &self.arena[h.0 as usize])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether the objective at `idx` could activate right now: every
    /// dependency resolves to a Completed objective (unknown ids never
    /// resolve) and no blocker resolves to a Completed or Failed one.
    fn eligible(&self, idx: usize) -> bool {
        let obj = &self.arena[idx];
        let deps_met = obj
            .dependencies
            .iter()
            .all(|d| matches!(self.get(d), Some(o) if o.phase == ObjectivePhase::Completed));
        let blocked = obj.blockers.iter().any(|b| {
            matches!(
                self.get(b),
                Some(o) if matches!(o.phase, ObjectivePhase::Completed | ObjectivePhase::Failed)
            )
        });
        deps_met && !blocked
    }

    /// Activate a single pending objective. Declines if the objective is
    /// unknown, not Pending, or its dependency/blocker preconditions fail.
    pub fn activate(&mut self, id: &str, events: &mut Vec<MissionEvent>) -> bool {
        let Some(handle) = self.index.get(id).copied() else {
            return false;
        };
        let idx = handle.0 as usize;
        if self.arena[idx].phase != ObjectivePhase::Pending || !self.eligible(idx) {
            return false;
        }
        self.arena[idx].phase = ObjectivePhase::Active;
        events.push(MissionEvent::ObjectiveActivated {
            objective_id: self.arena[idx].id.clone(),
        });
        true
    }

    /// Activate every pending objective whose preconditions already hold.
    /// Used at mission start.
    pub fn activate_eligible(&mut self, events: &mut Vec<MissionEvent>) {
        let ready: Vec<usize> = (0..self.arena.len())
            .filter(|&i| self.arena[i].phase == ObjectivePhase::Pending && self.eligible(i))
            .collect();
        for idx in ready {
            self.arena[idx].phase = ObjectivePhase::Active;
            events.push(MissionEvent::ObjectiveActivated {
                objective_id: self.arena[idx].id.clone(),
            });
        }
    }

    /// Complete an objective, then activate any pending dependents that
    /// became eligible. Declines unknown ids and objectives already
    /// Completed or Failed.
    pub fn complete(&mut self, id: &str, tick: u64, events: &mut Vec<MissionEvent>) -> bool {
        let Some(handle) = self.index.get(id).copied() else {
            return false;
        };
        let idx = handle.0 as usize;
        if matches!(
            self.arena[idx].phase,
            ObjectivePhase::Completed | ObjectivePhase::Failed
        ) {
            return false;
        }
        {
            let obj = &mut self.arena[idx];
            obj.phase = ObjectivePhase::Completed;
            obj.completion_tick = Some(tick);
            obj.progress = obj.progress.max(obj.required_progress);
        }
        events.push(MissionEvent::ObjectiveCompleted {
            objective_id: id.to_string(),
        });

        // Dependents of the completed objective may now be eligible.
        let unlocked: Vec<usize> = (0..self.arena.len())
            .filter(|&i| {
                self.arena[i].phase == ObjectivePhase::Pending
                    && self.arena[i].dependencies.iter().any(|d| d == id)
                    && self.eligible(i)
            })
            .collect();
        for i in unlocked {
            self.arena[i].phase = ObjectivePhase::Active;
            events.push(MissionEvent::ObjectiveActivated {
                objective_id: self.arena[i].id.clone(),
            });
        }
        true
    }

    /// Fail an objective. Same guard as `complete`; does not cascade —
    /// dependents stay Pending unless their own graph frees them.
    pub fn fail(&mut self, id: &str, events: &mut Vec<MissionEvent>) -> bool {
        let Some(handle) = self.index.get(id).copied() else {
            return false;
        };
        let idx = handle.0 as usize;
        if matches!(
            self.arena[idx].phase,
            ObjectivePhase::Completed | ObjectivePhase::Failed
        ) {
            return false;
        }
        self.arena[idx].phase = ObjectivePhase::Failed;
        events.push(MissionEvent::ObjectiveFailed {
            objective_id: id.to_string(),
        });
        true
    }

    /// Advance an active objective's progress counter, completing it when
    /// the required count is reached.
    pub fn record_progress(
        &mut self,
        id: &str,
        amount: u32,
        tick: u64,
        events: &mut Vec<MissionEvent>,
    ) -> bool {
        let Some(handle) = self.index.get(id).copied() else {
            return false;
        };
        let idx = handle.0 as usize;
        if self.arena[idx].phase != ObjectivePhase::Active {
            return false;
        }
        let done = {
            let obj = &mut self.arena[idx];
            obj.progress = obj.progress.saturating_add(amount);
            obj.progress >= obj.required_progress
        };
        if done {
            return self.complete(id, tick, events);
        }
        true
    }

    fn in_phase(&self, phase: ObjectivePhase) -> impl Iterator<Item = &MissionObjective> {
        self.arena.iter().filter(move |o| o.phase == phase)
    }

    pub fn pending(&self) -> impl Iterator<Item = &MissionObjective> {
        self.in_phase(ObjectivePhase::Pending)
    }

    pub fn active(&self) -> impl Iterator<Item = &MissionObjective> {
        self.in_phase(ObjectivePhase::Active)
    }

    pub fn completed(&self) -> impl Iterator<Item = &MissionObjective> {
        self.in_phase(ObjectivePhase::Completed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &MissionObjective> {
        self.in_phase(ObjectivePhase::Failed)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    /// Build the partitioned checklist view for the snapshot.
    pub fn board(&self) -> ObjectiveBoard {
        ObjectiveBoard {
            pending: self.pending().map(view).collect(),
            active: self.active().map(view).collect(),
            completed: self.completed().map(view).collect(),
            failed: self.failed().map(view).collect(),
        }
    }
}

fn view(obj: &MissionObjective) -> ObjectiveView {
    ObjectiveView {
        id: obj.id.clone(),
        description: obj.description.clone(),
        kind: obj.kind,
        required: obj.required,
        progress: obj.progress,
        required_progress: obj.required_progress,
        completion_tick: obj.completion_tick,
    }
}
