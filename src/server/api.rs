//! API payload builders. Each function parses a request body, talks to the
//! game store, and returns a JSON string or a typed [ApiError]; the route
//! table maps those onto HTTP statuses.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::rng::Rng;
use crate::model::catalog::effective_catalog;
use crate::model::group::PlayerGroup;
use crate::model::player::generate_players;
use crate::orchestrator::odds::estimate_win_odds_parallel;
use crate::orchestrator::{advance, run_to_completion, Game, GameStatus};
use crate::store::{GameStore, InMemoryStore, StoreError};

const DEFAULT_ROSTER_SIZE: usize = 20;
const MAX_ROSTER_SIZE: usize = 512;
const DEFAULT_ODDS_ROUNDS: u32 = 1000;
const MAX_ODDS_ROUNDS: u32 = 100_000;

#[derive(Debug)]
pub enum ApiError {
    Parse(serde_json::Error),
    Validation(String),
    NotFound,
    AlreadyRunning,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::NotFound => write!(f, "game not found"),
            Self::AlreadyRunning => write!(f, "a simulation is already running for this game"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyRunning => Self::AlreadyRunning,
        }
    }
}

fn store() -> &'static InMemoryStore {
    static STORE: OnceLock<InMemoryStore> = OnceLock::new();
    STORE.get_or_init(InMemoryStore::new)
}

fn parse_game_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("invalid game id '{raw}'")))
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "thunderdome-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct EventListItem {
    pub id: u32,
    pub name: String,
    pub kind: crate::model::event::EventKind,
    pub difficulty: u8,
    pub elimination_rate: f64,
    pub is_final: bool,
}

pub fn events_payload() -> Result<String, serde_json::Error> {
    let list: Vec<EventListItem> = effective_catalog()
        .into_iter()
        .map(|e| EventListItem {
            id: e.id,
            name: e.name,
            kind: e.kind,
            difficulty: e.difficulty,
            elimination_rate: e.elimination_rate,
            is_final: e.is_final,
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "events": list }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    /// Player numbers (1-based roster positions) belonging to this group.
    pub members: Vec<u32>,
    #[serde(default)]
    pub allow_betrayals: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub name: Option<String>,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub id: Uuid,
    pub name: String,
    pub status: GameStatus,
    pub players: usize,
    pub alive: usize,
    pub events_played: usize,
    pub winner_id: Option<Uuid>,
}

fn summarize(game: &Game) -> GameSummary {
    GameSummary {
        id: game.id,
        name: game.name.clone(),
        status: game.status,
        players: game.players.len(),
        alive: game.alive_count(),
        events_played: game.history.len(),
        winner_id: game.winner_id,
    }
}

pub fn create_game_payload(body: &str) -> Result<String, ApiError> {
    let request: CreateGameRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let roster_size = request.players.unwrap_or(DEFAULT_ROSTER_SIZE);
    if !(2..=MAX_ROSTER_SIZE).contains(&roster_size) {
        return Err(ApiError::Validation(format!(
            "players must be between 2 and {MAX_ROSTER_SIZE}"
        )));
    }

    let seed = request.seed.unwrap_or(0);
    let mut rng = Rng::new(seed);
    let mut players = generate_players(&mut rng, roster_size);

    let mut groups = HashMap::new();
    for spec in &request.groups {
        let mut group = PlayerGroup::new(&spec.name, spec.allow_betrayals);
        for &number in &spec.members {
            let Some(player) = players.iter_mut().find(|p| p.number == number) else {
                return Err(ApiError::Validation(format!(
                    "group '{}' references unknown player number {number}",
                    spec.name
                )));
            };
            if player.group_id.is_some() {
                return Err(ApiError::Validation(format!(
                    "player number {number} is already in a group"
                )));
            }
            player.group_id = Some(group.id);
            group.member_ids.push(player.id);
        }
        groups.insert(group.id, group);
    }

    let name = request.name.unwrap_or_else(|| "Unnamed game".to_string());
    let game = Game::new(&name, players, groups, effective_catalog());
    let summary = summarize(&game);
    store().insert(game);
    serde_json::to_string_pretty(&summary).map_err(ApiError::Parse)
}

pub fn games_payload() -> Result<String, serde_json::Error> {
    let summaries: Vec<GameSummary> = store().list().iter().map(summarize).collect();
    serde_json::to_string_pretty(&serde_json::json!({ "games": summaries }))
}

pub fn game_get_payload(raw_id: &str) -> Result<String, ApiError> {
    let id = parse_game_id(raw_id)?;
    let game = store().get(id).ok_or(ApiError::NotFound)?;
    serde_json::to_string_pretty(&game).map_err(ApiError::Parse)
}

pub fn game_delete_payload(raw_id: &str) -> Result<String, ApiError> {
    let id = parse_game_id(raw_id)?;
    if !store().remove(id) {
        return Err(ApiError::NotFound);
    }
    serde_json::to_string_pretty(&serde_json::json!({ "status": "ok", "deleted": id }))
        .map_err(ApiError::Parse)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepRequest {
    pub seed: Option<u64>,
}

fn parse_step_request(body: &str) -> Result<StepRequest, ApiError> {
    if body.trim().is_empty() {
        return Ok(StepRequest::default());
    }
    serde_json::from_str(body).map_err(ApiError::Parse)
}

pub fn game_step_payload(raw_id: &str, body: &str) -> Result<String, ApiError> {
    let id = parse_game_id(raw_id)?;
    let request = parse_step_request(body)?;
    store().begin_simulation(id)?;
    let outcome = step_locked(id, request.seed.unwrap_or(0));
    store().end_simulation(id);
    outcome
}

fn step_locked(id: Uuid, seed: u64) -> Result<String, ApiError> {
    let mut game = store().get(id).ok_or(ApiError::NotFound)?;
    // Seed varies per event so repeated default-seed steps do not replay
    // identical draws, while staying reproducible for a given game state.
    let mut rng = Rng::new(seed.wrapping_add(game.event_cursor as u64));
    let outcome = advance(&mut game, &mut rng);
    let summary = summarize(&game);
    store().update(game);
    serde_json::to_string_pretty(&serde_json::json!({
        "step": outcome,
        "game": summary,
    }))
    .map_err(ApiError::Parse)
}

pub fn game_run_payload(raw_id: &str, body: &str) -> Result<String, ApiError> {
    let id = parse_game_id(raw_id)?;
    let request = parse_step_request(body)?;
    store().begin_simulation(id)?;
    let outcome = run_locked(id, request.seed.unwrap_or(0));
    store().end_simulation(id);
    outcome
}

fn run_locked(id: Uuid, seed: u64) -> Result<String, ApiError> {
    let mut game = store().get(id).ok_or(ApiError::NotFound)?;
    let mut rng = Rng::new(seed.wrapping_add(game.event_cursor as u64));
    let winner_id = run_to_completion(&mut game, &mut rng);
    let winner = winner_id.and_then(|w| game.players.iter().find(|p| p.id == w).cloned());
    let summary = summarize(&game);
    store().update(game);
    serde_json::to_string_pretty(&serde_json::json!({
        "winner": winner,
        "game": summary,
    }))
    .map_err(ApiError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsRequest {
    pub game_id: Uuid,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
}

pub fn odds_payload(body: &str) -> Result<String, ApiError> {
    let request: OddsRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let rounds = request.rounds.unwrap_or(DEFAULT_ODDS_ROUNDS);
    if !(1..=MAX_ODDS_ROUNDS).contains(&rounds) {
        return Err(ApiError::Validation(format!(
            "rounds must be between 1 and {MAX_ODDS_ROUNDS}"
        )));
    }
    let seed = request.seed.unwrap_or(0);
    let game = store().get(request.game_id).ok_or(ApiError::NotFound)?;
    let odds = estimate_win_odds_parallel(&game, rounds as usize, seed);
    serde_json::to_string_pretty(&serde_json::json!({
        "game_id": request.game_id,
        "rounds": rounds,
        "seed": seed,
        "odds": odds,
    }))
    .map_err(ApiError::Parse)
}
