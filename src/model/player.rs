//! Player entities: identity, role, attributes, and cumulative record.
//! Rosters are generated with role-biased attribute rolls; the engine mutates
//! the cumulative fields in place during each simulated event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::rng::Rng;

/// Behavioral archetype. Labels keep the original game's French vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Normal,
    Sportif,
    Peureux,
    Brute,
    Intelligent,
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Core attributes, each on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub intelligence: u8,
    pub force: u8,
    pub agility: u8,
}

impl PlayerStats {
    /// Integer mean of the three attributes (floor).
    pub fn mean(&self) -> u8 {
        (u16::from(self.intelligence) + u16::from(self.force) + u16::from(self.agility)) as u8 / 3
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub number: u32,
    pub name: String,
    pub nationality: String,
    pub gender: Gender,
    pub role: Role,
    pub stats: PlayerStats,
    pub alive: bool,
    /// Cumulative kill count. Always equals `killed_players.len()`.
    pub kills: u32,
    /// Victim ids, in attribution order. Audit trail for `kills`.
    pub killed_players: Vec<Uuid>,
    pub betrayals: u32,
    pub survived_events: u32,
    pub total_score: i64,
    pub group_id: Option<Uuid>,
}

impl Player {
    pub fn new(number: u32, name: &str, nationality: &str, gender: Gender, role: Role, stats: PlayerStats) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            name: name.to_string(),
            nationality: nationality.to_string(),
            gender,
            role,
            stats,
            alive: true,
            kills: 0,
            killed_players: Vec::new(),
            betrayals: 0,
            survived_events: 0,
            total_score: 0,
            group_id: None,
        }
    }

    /// Credit this player with eliminating `victims`, keeping the
    /// kills/killed_players pairing consistent.
    pub fn record_kills(&mut self, victims: &[Uuid]) {
        self.killed_players.extend_from_slice(victims);
        self.kills = self.killed_players.len() as u32;
    }
}

const FIRST_NAMES: [&str; 24] = [
    "Ji-hun", "Marta", "Omar", "Lucie", "Dmitri", "Aiko", "Carlos", "Nadia",
    "Pieter", "Fatou", "Henrik", "Rosa", "Tariq", "Ingrid", "Mateo", "Yuna",
    "Brendan", "Sofia", "Kwame", "Elif", "Viktor", "Amara", "Diego", "Hana",
];

const NATIONALITIES: [&str; 16] = [
    "France", "South Korea", "Brazil", "Nigeria", "Japan", "Germany", "Mexico", "Egypt",
    "Sweden", "Turkey", "Canada", "Kenya", "Spain", "Ukraine", "Vietnam", "Australia",
];

/// Weighted role draw: Normal is common, the five special archetypes are rarer.
fn draw_role(rng: &mut Rng) -> Role {
    match rng.below(10) {
        0..=4 => Role::Normal,
        5 => Role::Sportif,
        6 => Role::Peureux,
        7 => Role::Brute,
        8 => Role::Intelligent,
        _ => Role::Zero,
    }
}

/// Role-biased attribute roll. Specialists roll high on their specialty,
/// Peureux rolls low everywhere, Zero rolls very low everywhere (its strength
/// is the universal event bonus, not raw attributes).
fn draw_stats(rng: &mut Rng, role: Role) -> PlayerStats {
    match role {
        Role::Normal => PlayerStats {
            intelligence: rng.range_u32(2, 8) as u8,
            force: rng.range_u32(2, 8) as u8,
            agility: rng.range_u32(2, 8) as u8,
        },
        Role::Sportif => PlayerStats {
            intelligence: rng.range_u32(2, 7) as u8,
            force: rng.range_u32(2, 7) as u8,
            agility: rng.range_u32(6, 10) as u8,
        },
        Role::Brute => PlayerStats {
            intelligence: rng.range_u32(2, 7) as u8,
            force: rng.range_u32(6, 10) as u8,
            agility: rng.range_u32(2, 7) as u8,
        },
        Role::Intelligent => PlayerStats {
            intelligence: rng.range_u32(6, 10) as u8,
            force: rng.range_u32(2, 7) as u8,
            agility: rng.range_u32(2, 7) as u8,
        },
        Role::Peureux => PlayerStats {
            intelligence: rng.range_u32(0, 5) as u8,
            force: rng.range_u32(0, 5) as u8,
            agility: rng.range_u32(0, 5) as u8,
        },
        Role::Zero => PlayerStats {
            intelligence: rng.range_u32(0, 3) as u8,
            force: rng.range_u32(0, 3) as u8,
            agility: rng.range_u32(0, 3) as u8,
        },
    }
}

pub fn generate_player(rng: &mut Rng, number: u32) -> Player {
    let role = draw_role(rng);
    let stats = draw_stats(rng, role);
    let name = rng.pick(&FIRST_NAMES).copied().unwrap_or("Player");
    let nationality = rng.pick(&NATIONALITIES).copied().unwrap_or("Unknown");
    let gender = if rng.chance(0.5) { Gender::Female } else { Gender::Male };
    Player::new(number, &format!("{name} #{number:03}"), nationality, gender, role, stats)
}

/// Generate a numbered roster of `count` players.
pub fn generate_players(rng: &mut Rng, count: usize) -> Vec<Player> {
    (1..=count as u32).map(|n| generate_player(rng, n)).collect()
}
