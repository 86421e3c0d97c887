//! Mission lifecycle engine for VANGUARD.
//!
//! One `MissionEngine` instance owns the full state of a single tactical
//! mission — objective graph, win/lose conditions, concurrent timers,
//! trigger-injected dynamic objectives, squad roster and consequence
//! ledger — advances it once per tick, and produces `MissionSnapshot`s.
//! Completely headless and I/O-free, enabling deterministic testing.

pub mod conditions;
pub mod consequences;
pub mod dynamic;
pub mod engine;
pub mod objectives;
pub mod plan;
pub mod timers;

pub use engine::MissionEngine;
pub use plan::{MissionPlan, PlanError};
pub use vanguard_core as core;
