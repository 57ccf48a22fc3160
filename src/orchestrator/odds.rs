//! Win-odds estimation: run a game to completion many times under derived
//! seeds and report each player's win rate. Used by the celebrity-market side
//! of the app; the engine itself knows nothing about it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::rng::Rng;
use crate::orchestrator::{run_to_completion, Game};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinOdds {
    pub player_id: Uuid,
    pub number: u32,
    pub name: String,
    pub wins: u32,
    pub win_rate: f64,
}

pub fn estimate_win_odds(game: &Game, rounds: usize, seed: u64) -> Vec<WinOdds> {
    let winners: Vec<Option<Uuid>> = (0..rounds)
        .map(|round| play_round(game, seed, round))
        .collect();
    tally(game, rounds, &winners)
}

/// Like [estimate_win_odds] but distributes rounds across all CPU cores.
/// Same seeds per round, so results match the sequential path exactly.
pub fn estimate_win_odds_parallel(game: &Game, rounds: usize, seed: u64) -> Vec<WinOdds> {
    let winners: Vec<Option<Uuid>> = (0..rounds)
        .into_par_iter()
        .map(|round| play_round(game, seed, round))
        .collect();
    tally(game, rounds, &winners)
}

fn play_round(game: &Game, seed: u64, round: usize) -> Option<Uuid> {
    let mut replica = game.clone();
    let mut rng = Rng::new(seed.wrapping_add(round as u64));
    run_to_completion(&mut replica, &mut rng)
}

fn tally(game: &Game, rounds: usize, winners: &[Option<Uuid>]) -> Vec<WinOdds> {
    let mut odds: Vec<WinOdds> = game
        .players
        .iter()
        .map(|p| WinOdds {
            player_id: p.id,
            number: p.number,
            name: p.name.clone(),
            wins: 0,
            win_rate: 0.0,
        })
        .collect();
    for winner in winners.iter().flatten() {
        if let Some(entry) = odds.iter_mut().find(|o| o.player_id == *winner) {
            entry.wins += 1;
        }
    }
    if rounds > 0 {
        for entry in &mut odds {
            entry.win_rate = f64::from(entry.wins) / rounds as f64;
        }
    }
    odds.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.number.cmp(&b.number))
    });
    odds
}
