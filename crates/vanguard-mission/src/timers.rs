//! Timer engine — concurrent mission countdowns and their attached effects.
//!
//! All active, unpaused timers advance once per tick. Attached events fire
//! when remaining time crosses their trigger time, consequences fire when a
//! timer reaches zero, and pressure intensity rises as remaining time runs
//! out. Events and consequences latch: each fires at most once.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use vanguard_core::constants::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_WARNING_THRESHOLD, PRESSURE_INTENSITY_FLOOR,
};
use vanguard_core::enums::{EffectKind, ManipulationKind, TimerKind, TimerPriority};
use vanguard_core::events::MissionEvent;
use vanguard_core::state::TimerView;
use vanguard_core::types::TimerEffect;

fn default_active() -> bool {
    true
}

fn default_warning() -> i64 {
    DEFAULT_WARNING_THRESHOLD
}

fn default_critical() -> i64 {
    DEFAULT_CRITICAL_THRESHOLD
}

/// A per-mission countdown. `current_time` only moves down unless an
/// explicit manipulation or bonus moves it, and never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionTimer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: TimerKind,
    pub initial_time: i64,
    /// Remaining time. Defaults to `initial_time` at registration.
    #[serde(default)]
    pub current_time: i64,
    #[serde(default = "default_warning")]
    pub warning_threshold: i64,
    #[serde(default = "default_critical")]
    pub critical_threshold: i64,
    #[serde(default)]
    pub priority: TimerPriority,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub linked_objective: Option<String>,
    #[serde(default)]
    pub warning_fired: bool,
    #[serde(default)]
    pub critical_fired: bool,
}

impl MissionTimer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_time: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: TimerKind::Primary,
            initial_time,
            current_time: initial_time,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            priority: TimerPriority::Medium,
            active: true,
            paused: false,
            linked_objective: None,
            warning_fired: false,
            critical_fired: false,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.active && self.current_time <= self.critical_threshold
    }
}

/// Effects applied when a timer reaches zero. Fires once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConsequence {
    pub id: String,
    pub timer_id: String,
    pub description: String,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default)]
    pub effects: Vec<TimerEffect>,
}

/// Effects applied when remaining time first drops to `trigger_time`.
/// Fires once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEvent {
    pub id: String,
    pub timer_id: String,
    pub description: String,
    pub trigger_time: i64,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default)]
    pub effects: Vec<TimerEffect>,
}

/// An explicit operation on a timer, gated by a cooldown and an optional
/// required ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerManipulation {
    pub id: String,
    pub kind: ManipulationKind,
    pub timer_id: String,
    #[serde(default)]
    pub amount: i64,
    /// Minimum ticks between applications.
    #[serde(default)]
    pub cooldown: u64,
    #[serde(default)]
    pub last_applied_tick: Option<u64>,
    #[serde(default)]
    pub required_ability: Option<String>,
}

/// An intensifying modifier tied to a timer's remaining-time fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerPressure {
    pub id: String,
    pub timer_id: String,
    pub base_intensity: f64,
    /// Recomputed each tick: `max(1, base * (1 - current/initial))`.
    #[serde(default)]
    pub intensity: f64,
    #[serde(default)]
    pub effects: Vec<TimerEffect>,
}

/// A one-shot consumable reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerBonus {
    pub id: String,
    pub description: String,
    #[serde(default = "default_active")]
    pub available: bool,
    #[serde(default)]
    pub effects: Vec<TimerEffect>,
}

/// Stable index into the timer arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

/// Holds every timer and attachment registered for the mission.
#[derive(Debug, Default)]
pub struct TimerEngine {
    arena: Vec<MissionTimer>,
    index: HashMap<String, TimerHandle>,
    consequences: Vec<TimerConsequence>,
    scheduled: Vec<TimerEvent>,
    manipulations: HashMap<String, TimerManipulation>,
    pressures: Vec<TimerPressure>,
    bonuses: HashMap<String, TimerBonus>,
    /// Global pressure counter, the load-bearing pressure side effect.
    pressure_level: i64,
    /// Sticky once any timer goes critical.
    time_critical: bool,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer. Declines duplicate ids. A zero `current_time` is
    /// normalized to the initial time.
    pub fn add_timer(&mut self, mut timer: MissionTimer) -> bool {
        if self.index.contains_key(&timer.id) {
            return false;
        }
        if timer.current_time <= 0 {
            timer.current_time = timer.initial_time;
        }
        let handle = TimerHandle(self.arena.len() as u32);
        self.index.insert(timer.id.clone(), handle);
        self.arena.push(timer);
        true
    }

    /// Attach a zero-time consequence to an existing timer.
    pub fn attach_consequence(&mut self, consequence: TimerConsequence) -> bool {
        if !self.index.contains_key(&consequence.timer_id)
            || self.consequences.iter().any(|c| c.id == consequence.id)
        {
            return false;
        }
        self.consequences.push(consequence);
        true
    }

    /// Attach a scheduled event to an existing timer.
    pub fn attach_event(&mut self, event: TimerEvent) -> bool {
        if !self.index.contains_key(&event.timer_id)
            || self.scheduled.iter().any(|e| e.id == event.id)
        {
            return false;
        }
        self.scheduled.push(event);
        true
    }

    /// Register a manipulation for later application by command.
    pub fn add_manipulation(&mut self, manipulation: TimerManipulation) -> bool {
        if !self.index.contains_key(&manipulation.timer_id)
            || self.manipulations.contains_key(&manipulation.id)
        {
            return false;
        }
        self.manipulations
            .insert(manipulation.id.clone(), manipulation);
        true
    }

    /// Attach a pressure record. Declines unless the target timer is
    /// active. Its PressureLevel effects feed the global counter
    /// immediately; the other effect kinds are hooks read from the
    /// snapshot.
    pub fn attach_pressure(&mut self, mut pressure: TimerPressure) -> bool {
        let active = match self.index.get(&pressure.timer_id) {
            Some(h) => {
                let t = &self.arena[h.0 as usize];
                pressure.intensity = pressure_intensity(&pressure, t);
                t.active
            }
            None => false,
        };
        if !active || self.pressures.iter().any(|p| p.id == pressure.id) {
            return false;
        }
        for effect in &pressure.effects {
            if effect.kind == EffectKind::PressureLevel {
                self.pressure_level += effect.magnitude;
            }
        }
        self.pressures.push(pressure);
        true
    }

    /// Register a one-shot bonus.
    pub fn add_bonus(&mut self, bonus: TimerBonus) -> bool {
        if self.bonuses.contains_key(&bonus.id) {
            return false;
        }
        self.bonuses.insert(bonus.id.clone(), bonus);
        true
    }

    /// Advance every active, unpaused timer by `delta` (normally -1 per
    /// tick) and fire whatever crossed a threshold.
    pub fn advance_all(&mut self, delta: i64, events: &mut Vec<MissionEvent>) {
        for idx in 0..self.arena.len() {
            self.apply_update(idx, delta, events);
        }
    }

    /// Advance a single timer by `delta`. No-op (declined) unless the timer
    /// exists, is active, and is not paused.
    pub fn update(&mut self, id: &str, delta: i64, events: &mut Vec<MissionEvent>) -> bool {
        match self.index.get(id).copied() {
            Some(handle) => self.apply_update(handle.0 as usize, delta, events),
            None => false,
        }
    }

    fn apply_update(&mut self, idx: usize, delta: i64, events: &mut Vec<MissionEvent>) -> bool {
        let (timer_id, current) = {
            let timer = &mut self.arena[idx];
            if !timer.active || timer.paused {
                return false;
            }
            timer.current_time = (timer.current_time + delta).max(0);
            (timer.id.clone(), timer.current_time)
        };

        let mut fired: Vec<TimerEffect> = Vec::new();

        // Scheduled events first, then zero-time consequences.
        for event in self.scheduled.iter_mut().filter(|e| e.timer_id == timer_id) {
            if !event.triggered && current <= event.trigger_time {
                event.triggered = true;
                fired.extend(event.effects.iter().copied());
                events.push(MissionEvent::TimerEventFired {
                    event_id: event.id.clone(),
                    timer_id: timer_id.clone(),
                });
            }
        }
        for consequence in self
            .consequences
            .iter_mut()
            .filter(|c| c.timer_id == timer_id)
        {
            if !consequence.triggered && current <= 0 {
                consequence.triggered = true;
                fired.extend(consequence.effects.iter().copied());
                tracing::warn!(
                    target: "vanguard::timers",
                    timer = %timer_id,
                    consequence = %consequence.id,
                    "timer.expired"
                );
                events.push(MissionEvent::TimerExpired {
                    timer_id: timer_id.clone(),
                });
            }
        }

        // Warning/critical latches, each fires once per timer.
        {
            let timer = &mut self.arena[idx];
            if !timer.warning_fired && current <= timer.warning_threshold {
                timer.warning_fired = true;
                events.push(MissionEvent::TimerWarning {
                    timer_id: timer_id.clone(),
                    remaining: current,
                });
            }
            if !timer.critical_fired && current <= timer.critical_threshold {
                timer.critical_fired = true;
                self.time_critical = true;
                events.push(MissionEvent::TimerCritical {
                    timer_id: timer_id.clone(),
                    remaining: current,
                });
            }
        }

        for effect in fired {
            self.apply_effect(effect);
        }

        // Pressure intensity rises monotonically as the timer counts down.
        let timer = self.arena[idx].clone();
        for pressure in self
            .pressures
            .iter_mut()
            .filter(|p| p.timer_id == timer_id)
        {
            pressure.intensity = pressure_intensity(pressure, &timer);
        }
        true
    }

    fn apply_effect(&mut self, effect: TimerEffect) {
        match effect.kind {
            EffectKind::PressureLevel => self.pressure_level += effect.magnitude,
            EffectKind::PressureRelief => {
                self.pressure_level = (self.pressure_level - effect.magnitude).max(0)
            }
            EffectKind::TimeExtension => self.extend_all_active(effect.magnitude),
            // Movement/accuracy/damage/reinforcement/reward channels are
            // consumed by outside systems via the snapshot.
            EffectKind::MovementPenalty
            | EffectKind::AccuracyPenalty
            | EffectKind::DamageModifier
            | EffectKind::ReinforcementRate
            | EffectKind::IntelReward
            | EffectKind::ResourceReward => {}
        }
    }

    fn extend_all_active(&mut self, amount: i64) {
        for timer in self.arena.iter_mut().filter(|t| t.active) {
            timer.current_time += amount;
        }
    }

    /// Apply a registered manipulation. Declined when the manipulation or
    /// its target is unknown, the required ability is missing, or the
    /// cooldown has not elapsed.
    pub fn manipulate(&mut self, manipulation_id: &str, tick: u64, abilities: &HashSet<String>) -> bool {
        let (kind, amount, timer_id) = match self.manipulations.get(manipulation_id) {
            Some(m) => {
                if let Some(required) = &m.required_ability {
                    if !abilities.contains(required) {
                        return false;
                    }
                }
                if let Some(last) = m.last_applied_tick {
                    if tick.saturating_sub(last) < m.cooldown {
                        return false;
                    }
                }
                (m.kind, m.amount, m.timer_id.clone())
            }
            None => return false,
        };
        let Some(handle) = self.index.get(&timer_id).copied() else {
            return false;
        };
        {
            let timer = &mut self.arena[handle.0 as usize];
            match kind {
                ManipulationKind::ExtendTime => timer.current_time += amount,
                ManipulationKind::ReduceTime => {
                    timer.current_time = (timer.current_time - amount).max(0)
                }
                ManipulationKind::PauseTimer => timer.paused = true,
                ManipulationKind::ResetTimer => {
                    timer.current_time = timer.initial_time;
                    timer.warning_fired = false;
                    timer.critical_fired = false;
                }
                // Extension points: accepted but carry no numeric effect,
                // since rate-of-advance is not modeled.
                ManipulationKind::Accelerate
                | ManipulationKind::Slow
                | ManipulationKind::Transfer
                | ManipulationKind::Split => {}
            }
        }
        if let Some(m) = self.manipulations.get_mut(manipulation_id) {
            m.last_applied_tick = Some(tick);
        }
        true
    }

    /// Consume a one-shot bonus.
    pub fn activate_bonus(&mut self, bonus_id: &str) -> bool {
        let effects = match self.bonuses.get_mut(bonus_id) {
            Some(bonus) if bonus.available => {
                bonus.available = false;
                bonus.effects.clone()
            }
            _ => return false,
        };
        tracing::info!(
            target: "vanguard::timers",
            bonus = %bonus_id,
            "timer_bonus.activated"
        );
        for effect in effects {
            self.apply_effect(effect);
        }
        true
    }

    pub fn get(&self, id: &str) -> Option<&MissionTimer> {
        self.index.get(id).map(|h| &self.arena[h.0 as usize])
    }

    /// Active timers at or below their critical threshold.
    pub fn critical_timers(&self) -> Vec<&MissionTimer> {
        self.arena.iter().filter(|t| t.is_critical()).collect()
    }

    /// Sum of remaining time over active timers.
    pub fn total_time_remaining(&self) -> i64 {
        self.arena
            .iter()
            .filter(|t| t.active)
            .map(|t| t.current_time)
            .sum()
    }

    /// Sticky flag OR any currently critical timer.
    pub fn is_time_critical(&self) -> bool {
        self.time_critical || self.arena.iter().any(|t| t.is_critical())
    }

    pub fn pressure_level(&self) -> i64 {
        self.pressure_level
    }

    pub fn pressures(&self) -> &[TimerPressure] {
        &self.pressures
    }

    pub fn views(&self) -> Vec<TimerView> {
        self.arena
            .iter()
            .map(|t| TimerView {
                id: t.id.clone(),
                name: t.name.clone(),
                kind: t.kind,
                priority: t.priority,
                initial_time: t.initial_time,
                current_time: t.current_time,
                active: t.active,
                paused: t.paused,
                critical: t.is_critical(),
                linked_objective: t.linked_objective.clone(),
            })
            .collect()
    }
}

fn pressure_intensity(pressure: &TimerPressure, timer: &MissionTimer) -> f64 {
    let initial = timer.initial_time.max(1) as f64;
    let elapsed_fraction = 1.0 - timer.current_time as f64 / initial;
    (pressure.base_intensity * elapsed_fraction).max(PRESSURE_INTENSITY_FLOOR)
}
