//! Dynamic objective injector — trigger-driven content that goes live
//! mid-mission.
//!
//! A dynamic objective is a template; the moment any owned trigger satisfies
//! its threshold the template materializes exactly once into a live
//! `MissionObjective` in the objective store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vanguard_core::enums::{DynamicObjectiveKind, ObjectiveKind, TriggerKind};
use vanguard_core::events::MissionEvent;

use crate::objectives::{MissionObjective, ObjectiveStore};

/// A threshold predicate over a watched numeric signal. Activates at most
/// once; `current_value >= threshold` is the activation predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveTrigger {
    pub id: String,
    pub description: String,
    pub kind: TriggerKind,
    #[serde(default)]
    pub activated: bool,
    pub threshold: i64,
    #[serde(default)]
    pub current_value: i64,
    /// Objective ids this trigger affects when it fires. The per-objective
    /// effect is a content-policy seam; the engine only announces it.
    #[serde(default)]
    pub affected_objectives: Vec<String>,
}

impl ObjectiveTrigger {
    pub fn satisfied(&self) -> bool {
        self.current_value >= self.threshold
    }
}

/// A template objective that only becomes live when a trigger fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicObjective {
    pub id: String,
    pub description: String,
    pub kind: DynamicObjectiveKind,
    pub triggers: Vec<ObjectiveTrigger>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub activation_tick: Option<u64>,
}

/// Registry of dynamic objective templates and their triggers.
#[derive(Debug, Default)]
pub struct DynamicObjectives {
    entries: Vec<DynamicObjective>,
    index: HashMap<String, usize>,
}

impl DynamicObjectives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Declines duplicate ids. If any owned trigger
    /// already satisfies its threshold, the template activates immediately.
    pub fn add(
        &mut self,
        dynamic: DynamicObjective,
        store: &mut ObjectiveStore,
        tick: u64,
        events: &mut Vec<MissionEvent>,
    ) -> bool {
        if self.index.contains_key(&dynamic.id) {
            return false;
        }
        self.index.insert(dynamic.id.clone(), self.entries.len());
        self.entries.push(dynamic);
        let idx = self.entries.len() - 1;
        if !self.entries[idx].active && self.entries[idx].triggers.iter().any(|t| t.satisfied()) {
            self.activate_entry(idx, store, tick, events);
        }
        true
    }

    /// Report a new value for a trigger's watched signal. Declines unknown
    /// trigger ids and triggers that already fired.
    pub fn update_trigger_value(&mut self, trigger_id: &str, value: i64) -> bool {
        for entry in &mut self.entries {
            if let Some(trigger) = entry.triggers.iter_mut().find(|t| t.id == trigger_id) {
                if trigger.activated {
                    return false;
                }
                trigger.current_value = value;
                return true;
            }
        }
        false
    }

    /// Feed internally-derived signals: elapsed mission ticks and the
    /// completed-objective count.
    pub fn feed_internal(&mut self, elapsed_ticks: u64, completed_objectives: usize) {
        for entry in &mut self.entries {
            for trigger in entry.triggers.iter_mut().filter(|t| !t.activated) {
                match trigger.kind {
                    TriggerKind::TimeElapsed => trigger.current_value = elapsed_ticks as i64,
                    TriggerKind::ObjectiveCompleted => {
                        trigger.current_value = completed_objectives as i64
                    }
                    _ => {}
                }
            }
        }
    }

    /// Activate every non-active template whose trigger predicate now holds.
    pub fn sweep(&mut self, store: &mut ObjectiveStore, tick: u64, events: &mut Vec<MissionEvent>) {
        let ready: Vec<usize> = (0..self.entries.len())
            .filter(|&i| {
                !self.entries[i].active && self.entries[i].triggers.iter().any(|t| t.satisfied())
            })
            .collect();
        for idx in ready {
            self.activate_entry(idx, store, tick, events);
        }
    }

    /// Materialize a template into the objective store. Idempotent on the
    /// `active` flag.
    fn activate_entry(
        &mut self,
        idx: usize,
        store: &mut ObjectiveStore,
        tick: u64,
        events: &mut Vec<MissionEvent>,
    ) {
        let entry = &mut self.entries[idx];
        if entry.active {
            return;
        }
        entry.active = true;
        entry.activation_tick = Some(tick);

        for trigger in entry.triggers.iter_mut().filter(|t| t.satisfied()) {
            if trigger.activated {
                continue;
            }
            trigger.activated = true;
            events.push(MissionEvent::TriggerActivated {
                trigger_id: trigger.id.clone(),
                affected_objectives: trigger.affected_objectives.clone(),
            });
        }

        let objective = MissionObjective::new(
            entry.id.clone(),
            entry.description.clone(),
            ObjectiveKind::Timed,
        );
        let objective_id = entry.id.clone();
        let dynamic_id = entry.id.clone();
        if store.add(objective) {
            store.activate(&objective_id, events);
            tracing::info!(
                target: "vanguard::dynamic",
                dynamic = %dynamic_id,
                tick,
                "dynamic_objective.activated"
            );
            events.push(MissionEvent::DynamicObjectiveActivated {
                dynamic_id,
                objective_id,
            });
        }
    }

    pub fn get(&self, id: &str) -> Option<&DynamicObjective> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[DynamicObjective] {
        &self.entries
    }
}
