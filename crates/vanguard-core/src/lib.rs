//! Core types and definitions for the VANGUARD mission engine.
//!
//! This crate defines the vocabulary shared across the engine and its
//! collaborators: enums, commands, state snapshots, events, and constants.
//! It has no dependency on any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
