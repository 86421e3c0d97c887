//! Mission engine constants and tuning defaults.

/// Objective id injected when evacuation is triggered.
pub const EVACUATION_OBJECTIVE_ID: &str = "EVACUATION";

/// Default value of the legacy global mission countdown, in ticks.
pub const DEFAULT_MISSION_TIMER: i64 = 30;

/// Default remaining-time threshold at which a timer warns, in time units.
pub const DEFAULT_WARNING_THRESHOLD: i64 = 10;

/// Default remaining-time threshold at which a timer is critical.
pub const DEFAULT_CRITICAL_THRESHOLD: i64 = 5;

/// Pressure intensity never recomputes below this floor.
pub const PRESSURE_INTENSITY_FLOOR: f64 = 1.0;

/// Default required progress for an objective with no explicit counter.
pub const DEFAULT_REQUIRED_PROGRESS: u32 = 1;
