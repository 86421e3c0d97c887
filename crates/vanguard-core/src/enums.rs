//! Enumeration types used throughout the mission engine.

use serde::{Deserialize, Serialize};

/// What a mission objective asks the squad to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveKind {
    #[default]
    EliminateTarget,
    SecureArea,
    HackTerminal,
    ExtractVip,
    DefendPosition,
    DestroyObjective,
    StealthComplete,
    Timed,
    Escort,
    Reconnaissance,
}

/// Lifecycle phase of a single objective within the store.
///
/// An objective is never simultaneously Completed and Failed; it starts
/// Pending and is only ever moved between phases, never deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectivePhase {
    /// Registered but not yet activated (dependencies unmet or mission not started).
    #[default]
    Pending,
    /// Live — the squad can work on it.
    Active,
    Completed,
    Failed,
}

/// Top-level mission state.
///
/// `Preparing` is the only entry state; `Success`, `Failure` and `Aborted`
/// are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    #[default]
    Preparing,
    InProgress,
    /// Evacuation triggered — remaining members must leave the field.
    Evacuating,
    Success,
    Failure,
    /// Player-initiated abandonment. No result is recorded.
    Aborted,
}

impl MissionState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MissionState::Success | MissionState::Failure | MissionState::Aborted
        )
    }
}

/// How the mission ended (or is trending, for the soft partial-success read).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionResult {
    CompleteSuccess,
    PartialSuccess,
    Failure,
    SquadWipe,
    TimerExpired,
    ObjectiveFailed,
    StealthSuccess,
}

/// Success condition predicate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessConditionKind {
    /// No objectives remain active. Failed objectives do NOT block this.
    AllObjectivesComplete,
    MinimumObjectivesComplete,
    SquadSurvival,
    StealthComplete,
    TimeBonus,
    ResourceBonus,
    IntelBonus,
}

/// Failure condition predicate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureConditionKind {
    SquadWipe,
    /// The legacy global mission countdown reached zero.
    TimerExpired,
    ObjectiveFailed,
    VipLost,
    AreaLost,
    ExcessiveCasualties,
    StealthBreached,
}

/// Category of a dynamic (trigger-injected) objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicObjectiveKind {
    EmergencyExtraction,
    ReinforcementArrival,
    ObjectiveChange,
    NewThreat,
    EnvironmentalHazard,
}

/// Signal a trigger watches. UnitDamage, EnemySpotted, EnvironmentChange and
/// SquadPosition values are reported by external collaborators; TimeElapsed
/// and ObjectiveCompleted are fed from internal mission state each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    UnitDamage,
    TimeElapsed,
    ObjectiveCompleted,
    EnemySpotted,
    EnvironmentChange,
    SquadPosition,
}

/// Role of a mission timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    #[default]
    Primary,
    Secondary,
    /// Running but not shown to the player.
    Hidden,
    Escalation,
    Reinforcement,
    Extraction,
    Hacking,
    Defusal,
    Rescue,
    Evacuation,
}

/// Timer display/urgency priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Optional,
}

/// Operations that alter a timer's current time or paused state.
///
/// Accelerate/Slow/Transfer/Split are declared extension points with no
/// numeric effect — rate-of-advance is not otherwise modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManipulationKind {
    ExtendTime,
    ReduceTime,
    PauseTimer,
    ResetTimer,
    Accelerate,
    Slow,
    Transfer,
    Split,
}

/// Closed set of effect channels a timer attachment can drive.
///
/// Only PressureLevel, TimeExtension and PressureRelief carry numeric
/// behavior inside the engine; the remainder are hooks read by outside
/// systems from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Adds to the global mission pressure counter.
    PressureLevel,
    /// Adds the magnitude to every currently active timer.
    TimeExtension,
    /// Subtracts from the global pressure counter (floor 0).
    PressureRelief,
    MovementPenalty,
    AccuracyPenalty,
    DamageModifier,
    ReinforcementRate,
    IntelReward,
    ResourceReward,
}

/// Category of a lasting consequence a mission outcome applies outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsequenceKind {
    StrategicImpact,
    ResourceLoss,
    IntelLoss,
    MoraleImpact,
    TechnologyLoss,
    RelationshipDamage,
}
