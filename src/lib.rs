//! Survival-event simulation: roster generation, deterministic event engine,
//! game orchestration, win-odds estimation, and a small local HTTP API.

pub mod cli;
pub mod game;
pub mod model;
pub mod orchestrator;
pub mod server;
pub mod store;
