//! Mission state machine — orchestrates objectives, conditions, dynamic
//! content and timers for one mission.
//!
//! `MissionEngine` owns all mission state, processes queued commands at the
//! tick boundary, runs the fixed per-tick pipeline, and produces
//! `MissionSnapshot`s. Completely headless (no I/O), enabling deterministic
//! testing. One instance per mission; there is no shared or global state.

use std::collections::{HashSet, VecDeque};

use vanguard_core::commands::MissionCommand;
use vanguard_core::constants::EVACUATION_OBJECTIVE_ID;
use vanguard_core::enums::{
    FailureConditionKind, MissionResult, MissionState, ObjectiveKind, SuccessConditionKind,
};
use vanguard_core::events::MissionEvent;
use vanguard_core::state::{MissionSnapshot, SquadView};
use vanguard_core::types::{MissionClock, MissionObservations};

use crate::conditions::{ConditionInputs, ConditionSet};
use crate::consequences::ConsequenceLedger;
use crate::dynamic::DynamicObjectives;
use crate::objectives::{MissionObjective, ObjectiveStore};
use crate::plan::{MissionPlan, PlanError};
use crate::timers::TimerEngine;

/// Squad roster partitions. Members move out exactly once, to evacuated or
/// lost, never back.
#[derive(Debug, Default)]
struct SquadRoster {
    members: Vec<String>,
    evacuated: Vec<String>,
    lost: Vec<String>,
}

/// The mission engine. Owns the full state of a single tactical mission.
pub struct MissionEngine {
    clock: MissionClock,
    state: MissionState,
    result: Option<MissionResult>,
    start_tick: Option<u64>,
    end_tick: Option<u64>,
    /// Legacy global countdown, decremented once per in-progress tick.
    mission_timer: i64,

    objectives: ObjectiveStore,
    conditions: ConditionSet,
    dynamics: DynamicObjectives,
    timers: TimerEngine,
    ledger: ConsequenceLedger,

    squad: SquadRoster,
    evacuation_available: bool,
    evacuation_triggered: bool,
    abilities: HashSet<String>,
    observations: MissionObservations,

    command_queue: VecDeque<MissionCommand>,
    events: Vec<MissionEvent>,
}

impl MissionEngine {
    /// Build an engine from a validated mission plan. State starts at
    /// `Preparing`.
    pub fn new(plan: MissionPlan) -> Result<Self, PlanError> {
        plan.validate()?;

        let mut engine = Self {
            clock: MissionClock::default(),
            state: MissionState::Preparing,
            result: None,
            start_tick: None,
            end_tick: None,
            mission_timer: plan.mission_timer,
            objectives: ObjectiveStore::new(),
            conditions: ConditionSet::new(plan.success_conditions, plan.failure_conditions),
            dynamics: DynamicObjectives::new(),
            timers: TimerEngine::new(),
            ledger: ConsequenceLedger::new(),
            squad: SquadRoster {
                members: plan.squad,
                ..SquadRoster::default()
            },
            evacuation_available: plan.evacuation_available,
            evacuation_triggered: false,
            abilities: plan.abilities.into_iter().collect(),
            observations: MissionObservations::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };

        for objective in plan.objectives {
            engine.objectives.add(objective);
        }
        for timer in plan.timers {
            engine.timers.add_timer(timer);
        }
        for event in plan.timer_events {
            engine.timers.attach_event(event);
        }
        for consequence in plan.timer_consequences {
            engine.timers.attach_consequence(consequence);
        }
        for manipulation in plan.manipulations {
            engine.timers.add_manipulation(manipulation);
        }
        for pressure in plan.pressures {
            engine.timers.attach_pressure(pressure);
        }
        for bonus in plan.bonuses {
            engine.timers.add_bonus(bonus);
        }
        for dynamic in plan.dynamic_objectives {
            engine
                .dynamics
                .add(dynamic, &mut engine.objectives, 0, &mut engine.events);
        }

        Ok(engine)
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MissionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MissionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the mission by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> MissionSnapshot {
        self.process_commands();

        if self.state == MissionState::InProgress {
            self.update_mission_progress();
        }
        self.clock.advance();

        self.build_snapshot()
    }

    /// The fixed per-tick pipeline: timers fire before dynamic triggers
    /// re-check, which happens before conditions re-evaluate, which happens
    /// before the result determination. A timer expiring must be able to
    /// fail the mission in the same tick a success condition would
    /// otherwise pass.
    fn update_mission_progress(&mut self) {
        let tick = self.clock.tick;

        self.timers.advance_all(-1, &mut self.events);
        self.mission_timer -= 1;

        let elapsed = self.start_tick.map_or(0, |s| tick.saturating_sub(s));
        self.dynamics
            .feed_internal(elapsed, self.objectives.completed_count());
        self.dynamics
            .sweep(&mut self.objectives, tick, &mut self.events);

        let inputs = ConditionInputs {
            active_objectives: self.objectives.active_count(),
            completed_objectives: self.objectives.completed_count(),
            failed_objectives: self.objectives.failed_count(),
            squad_members: self.squad.members.len(),
            lost_units: self.squad.lost.len(),
            mission_timer: self.mission_timer,
            observations: &self.observations,
        };
        self.conditions.evaluate_all(inputs, tick, &mut self.ledger);

        self.determine_mission_result();
    }

    /// Failure takes priority over success within the same tick. With
    /// neither triggered, at least one completed objective and zero failed
    /// ones reads as a soft PartialSuccess without ending the mission.
    fn determine_mission_result(&mut self) {
        if let Some(failure) = self.conditions.first_triggered_failure() {
            let result = match failure.kind {
                FailureConditionKind::SquadWipe => MissionResult::SquadWipe,
                FailureConditionKind::TimerExpired => MissionResult::TimerExpired,
                FailureConditionKind::ObjectiveFailed => MissionResult::ObjectiveFailed,
                _ => MissionResult::Failure,
            };
            self.complete_mission(result);
            return;
        }
        if let Some(success) = self.conditions.first_met_success() {
            let result = if success.kind == SuccessConditionKind::StealthComplete {
                MissionResult::StealthSuccess
            } else {
                MissionResult::CompleteSuccess
            };
            self.complete_mission(result);
            return;
        }
        if self.objectives.completed_count() >= 1 && self.objectives.failed_count() == 0 {
            self.result = Some(MissionResult::PartialSuccess);
        }
    }

    /// Begin the mission. Only valid from Preparing. Activates every
    /// objective whose dependency/blocker preconditions already hold.
    pub fn start_mission(&mut self) -> bool {
        if self.state != MissionState::Preparing {
            return false;
        }
        self.start_tick = Some(self.clock.tick);
        self.state = MissionState::InProgress;
        self.objectives.activate_eligible(&mut self.events);
        tracing::info!(
            target: "vanguard::mission",
            tick = self.clock.tick,
            "mission.started"
        );
        true
    }

    /// Mark an objective completed. Dependents that become eligible
    /// activate immediately.
    pub fn complete_objective(&mut self, id: &str) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.objectives.complete(id, self.clock.tick, &mut self.events)
    }

    /// Mark an objective failed. Does not cascade to dependents.
    pub fn fail_objective(&mut self, id: &str) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.objectives.fail(id, &mut self.events)
    }

    /// Advance an objective's progress counter.
    pub fn record_progress(&mut self, id: &str, amount: u32) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.objectives
            .record_progress(id, amount, self.clock.tick, &mut self.events)
    }

    /// Open the evacuation flow: transitions to Evacuating and injects the
    /// required EVACUATION objective. Valid once, and only while the
    /// mission is in progress with evacuation available.
    pub fn trigger_evacuation(&mut self) -> bool {
        if self.evacuation_triggered
            || !self.evacuation_available
            || self.state != MissionState::InProgress
        {
            return false;
        }
        self.evacuation_triggered = true;
        self.state = MissionState::Evacuating;

        let objective = MissionObjective {
            required: true,
            ..MissionObjective::new(
                EVACUATION_OBJECTIVE_ID,
                "Evacuate all remaining squad members",
                ObjectiveKind::ExtractVip,
            )
        };
        let added = self.objectives.add(objective);
        if added {
            self.objectives
                .activate(EVACUATION_OBJECTIVE_ID, &mut self.events);
        }
        self.events.push(MissionEvent::EvacuationTriggered);
        tracing::info!(
            target: "vanguard::mission",
            tick = self.clock.tick,
            "mission.evacuation_triggered"
        );
        true
    }

    /// Move a unit from the active roster to evacuated. Evacuating the last
    /// remaining member completes the mission as CompleteSuccess.
    pub fn evacuate_unit(&mut self, unit: &str) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let Some(pos) = self.squad.members.iter().position(|m| m == unit) else {
            return false;
        };
        let name = self.squad.members.remove(pos);
        self.squad.evacuated.push(name);
        self.events.push(MissionEvent::UnitEvacuated {
            unit: unit.to_string(),
        });
        if self.squad.members.is_empty() {
            self.complete_mission(MissionResult::CompleteSuccess);
        }
        true
    }

    /// Move a unit from the active roster to lost. Losing the last
    /// remaining member completes the mission as SquadWipe.
    pub fn lose_unit(&mut self, unit: &str) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        let Some(pos) = self.squad.members.iter().position(|m| m == unit) else {
            return false;
        };
        let name = self.squad.members.remove(pos);
        self.squad.lost.push(name);
        self.events.push(MissionEvent::UnitLost {
            unit: unit.to_string(),
        });
        if self.squad.members.is_empty() {
            self.complete_mission(MissionResult::SquadWipe);
        }
        true
    }

    /// Terminal transition. Stamps the end tick, maps the result to a final
    /// state, and applies outcome consequences exactly once. Declined once
    /// the mission is already terminal.
    pub fn complete_mission(&mut self, result: MissionResult) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.result = Some(result);
        self.end_tick = Some(self.clock.tick);
        self.state = match result {
            MissionResult::CompleteSuccess
            | MissionResult::PartialSuccess
            | MissionResult::StealthSuccess => MissionState::Success,
            MissionResult::Failure
            | MissionResult::SquadWipe
            | MissionResult::TimerExpired
            | MissionResult::ObjectiveFailed => MissionState::Failure,
        };
        self.ledger.apply_outcome(result, self.clock.tick);
        self.events.push(MissionEvent::MissionEnded { result });
        tracing::info!(
            target: "vanguard::mission",
            result = ?result,
            state = ?self.state,
            tick = self.clock.tick,
            "mission.ended"
        );
        true
    }

    /// Player-initiated abandonment. Terminal, no result mapping and no
    /// outcome consequences.
    pub fn abort_mission(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = MissionState::Aborted;
        self.end_tick = Some(self.clock.tick);
        tracing::info!(
            target: "vanguard::mission",
            tick = self.clock.tick,
            "mission.aborted"
        );
        true
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command. Declined operations are silent no-ops.
    fn handle_command(&mut self, command: MissionCommand) {
        match command {
            MissionCommand::StartMission => {
                self.start_mission();
            }
            MissionCommand::AbortMission => {
                self.abort_mission();
            }
            MissionCommand::CompleteObjective { objective_id } => {
                self.complete_objective(&objective_id);
            }
            MissionCommand::FailObjective { objective_id } => {
                self.fail_objective(&objective_id);
            }
            MissionCommand::RecordProgress {
                objective_id,
                amount,
            } => {
                self.record_progress(&objective_id, amount);
            }
            MissionCommand::UnitLost { unit } => {
                self.lose_unit(&unit);
            }
            MissionCommand::UnitEvacuated { unit } => {
                self.evacuate_unit(&unit);
            }
            MissionCommand::TriggerEvacuation => {
                self.trigger_evacuation();
            }
            MissionCommand::ApplyManipulation { manipulation_id } => {
                self.timers
                    .manipulate(&manipulation_id, self.clock.tick, &self.abilities);
            }
            MissionCommand::ActivateBonus { bonus_id } => {
                self.timers.activate_bonus(&bonus_id);
            }
            MissionCommand::UpdateTriggerValue { trigger_id, value } => {
                self.dynamics.update_trigger_value(&trigger_id, value);
            }
            MissionCommand::UpdateObservations { observations } => {
                self.observations = observations;
            }
            MissionCommand::GrantAbility { ability } => {
                self.abilities.insert(ability);
            }
        }
    }

    fn build_snapshot(&mut self) -> MissionSnapshot {
        MissionSnapshot {
            tick: self.clock.tick,
            state: self.state,
            result: self.result,
            mission_timer: self.mission_timer,
            objectives: self.objectives.board(),
            timers: self.timers.views(),
            total_time_remaining: self.timers.total_time_remaining(),
            time_critical: self.timers.is_time_critical(),
            pressure_level: self.timers.pressure_level(),
            squad: SquadView {
                members: self.squad.members.clone(),
                evacuated: self.squad.evacuated.clone(),
                lost: self.squad.lost.clone(),
                evacuation_available: self.evacuation_available,
                evacuation_triggered: self.evacuation_triggered,
            },
            consequences: self.ledger.views(),
            events: std::mem::take(&mut self.events),
        }
    }

    // --- Read-only access for collaborators ---

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn result(&self) -> Option<MissionResult> {
        self.result
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.tick
    }

    pub fn mission_timer(&self) -> i64 {
        self.mission_timer
    }

    pub fn objectives(&self) -> &ObjectiveStore {
        &self.objectives
    }

    pub fn timers(&self) -> &TimerEngine {
        &self.timers
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn dynamics(&self) -> &DynamicObjectives {
        &self.dynamics
    }

    pub fn ledger(&self) -> &ConsequenceLedger {
        &self.ledger
    }
}
