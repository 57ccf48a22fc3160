//! Per-event result records. An `EventResult` is created fresh by the engine,
//! appended to the game history, and never mutated afterwards (the one
//! exception is the orchestrator's wipe-recovery step, which runs before the
//! result is published).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::event::GameEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivorOutcome {
    pub player_id: Uuid,
    pub number: u32,
    pub name: String,
    /// Seconds left on the clock when the event ended. Pacing flavor that
    /// feeds the event score, not the elimination odds.
    pub time_remaining: u32,
    pub event_kills: u32,
    pub betrayed: bool,
    pub event_score: i64,
    /// Cumulative counters after this event.
    pub kills: u32,
    pub total_score: i64,
    pub survived_events: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationOutcome {
    pub player_id: Uuid,
    pub number: u32,
    pub name: String,
    pub elimination_time: u32,
    pub cause: String,
    pub decor: String,
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResult {
    pub event_id: u32,
    pub event_name: String,
    pub survivors: Vec<SurvivorOutcome>,
    pub eliminated: Vec<EliminationOutcome>,
    pub total_participants: usize,
}

impl EventResult {
    /// Degenerate result for an empty cohort.
    pub fn empty(event: &GameEvent) -> Self {
        Self {
            event_id: event.id,
            event_name: event.name.clone(),
            survivors: Vec::new(),
            eliminated: Vec::new(),
            total_participants: 0,
        }
    }
}
