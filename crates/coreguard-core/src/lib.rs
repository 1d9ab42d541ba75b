//! Core types and definitions for the COREGUARD simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, actions, card catalog, state snapshots, events, and
//! constants. It has no dependency on any runtime framework.

pub mod actions;
pub mod cards;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod route;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
