//! Event definitions: the kind of trial, its difficulty, how large a share of
//! the cohort it eliminates, and the presentational flavor attached to deaths.

use serde::{Deserialize, Serialize};

use crate::model::player::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Intelligence,
    Force,
    Agility,
    Mixed,
}

impl EventKind {
    /// The archetype that gets the specialist bonus for this kind of event.
    pub fn specialist_role(self) -> Option<Role> {
        match self {
            Self::Intelligence => Some(Role::Intelligent),
            Self::Force => Some(Role::Brute),
            Self::Agility => Some(Role::Sportif),
            Self::Mixed => None,
        }
    }

    /// Mixed events reward nothing in particular; the three core kinds do.
    pub fn is_core(self) -> bool {
        !matches!(self, Self::Mixed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: u32,
    pub name: String,
    pub kind: EventKind,
    /// 1-10. Above 5 penalizes survival scores, below 5 helps them.
    pub difficulty: u8,
    /// Target fraction of participants to eliminate, in [0.10, 0.99].
    pub elimination_rate: f64,
    pub is_final: bool,
    /// A final only runs once the live cohort is at or below this count.
    pub min_players_for_final: usize,
    /// Survival-time bounds in seconds. Presentational pacing only; never
    /// part of the elimination odds.
    pub min_survival_secs: u32,
    pub max_survival_secs: u32,
    /// Flavor pool for death causes.
    pub causes: Vec<String>,
    pub decor: String,
}

impl GameEvent {
    /// Per-killer attribution cap for one event. Force trials are messier.
    pub fn max_kills_per_killer(&self) -> u32 {
        if self.kind == EventKind::Force {
            2
        } else {
            1
        }
    }
}
