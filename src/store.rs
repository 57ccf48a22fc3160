//! Game storage: an explicit repository seam between the orchestration layer
//! and whatever holds the games. The engine never sees this; it operates only
//! on in-memory structures handed to it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use uuid::Uuid;

use crate::orchestrator::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    NotFound,
    /// A simulation for this game is already in flight; at most one is
    /// permitted per game id.
    AlreadyRunning,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "game not found"),
            Self::AlreadyRunning => write!(f, "a simulation is already running for this game"),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait GameStore {
    fn insert(&self, game: Game);
    fn get(&self, id: Uuid) -> Option<Game>;
    /// Replace a stored game. Returns false if it was never inserted.
    fn update(&self, game: Game) -> bool;
    fn remove(&self, id: Uuid) -> bool;
    fn list(&self) -> Vec<Game>;
    /// Claim the per-game simulation slot. Must be released with
    /// [GameStore::end_simulation].
    fn begin_simulation(&self, id: Uuid) -> Result<(), StoreError>;
    fn end_simulation(&self, id: Uuid);
}

struct StoredGame {
    game: Game,
    simulation_running: bool,
}

/// Process-memory store. No durability: dropping it loses every game.
pub struct InMemoryStore {
    inner: Mutex<HashMap<Uuid, StoredGame>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, StoredGame>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore for InMemoryStore {
    fn insert(&self, game: Game) {
        self.lock().insert(game.id, StoredGame { game, simulation_running: false });
    }

    fn get(&self, id: Uuid) -> Option<Game> {
        self.lock().get(&id).map(|s| s.game.clone())
    }

    fn update(&self, game: Game) -> bool {
        match self.lock().get_mut(&game.id) {
            Some(stored) => {
                stored.game = game;
                true
            }
            None => false,
        }
    }

    fn remove(&self, id: Uuid) -> bool {
        self.lock().remove(&id).is_some()
    }

    fn list(&self) -> Vec<Game> {
        let mut games: Vec<Game> = self.lock().values().map(|s| s.game.clone()).collect();
        games.sort_by_key(|g| g.created_at);
        games
    }

    fn begin_simulation(&self, id: Uuid) -> Result<(), StoreError> {
        match self.lock().get_mut(&id) {
            None => Err(StoreError::NotFound),
            Some(stored) if stored.simulation_running => Err(StoreError::AlreadyRunning),
            Some(stored) => {
                stored.simulation_running = true;
                Ok(())
            }
        }
    }

    fn end_simulation(&self, id: Uuid) {
        if let Some(stored) = self.lock().get_mut(&id) {
            stored.simulation_running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rng::Rng;
    use crate::model::catalog::builtin_events;
    use crate::model::player::generate_players;

    fn fixture() -> Game {
        let mut rng = Rng::new(5);
        Game::new("store-test", generate_players(&mut rng, 4), HashMap::new(), builtin_events())
    }

    #[test]
    fn insert_get_update_remove_roundtrip() {
        let store = InMemoryStore::new();
        let game = fixture();
        let id = game.id;
        store.insert(game.clone());
        assert!(store.get(id).is_some());

        let mut updated = game;
        updated.name = "renamed".to_string();
        assert!(store.update(updated));
        assert_eq!(store.get(id).map(|g| g.name), Some("renamed".to_string()));

        assert!(store.remove(id));
        assert!(store.get(id).is_none());
        assert!(!store.remove(id));
    }

    #[test]
    fn simulation_slot_is_exclusive() {
        let store = InMemoryStore::new();
        let game = fixture();
        let id = game.id;
        store.insert(game);

        assert!(store.begin_simulation(id).is_ok());
        assert_eq!(store.begin_simulation(id), Err(StoreError::AlreadyRunning));
        store.end_simulation(id);
        assert!(store.begin_simulation(id).is_ok());
    }

    #[test]
    fn begin_simulation_on_unknown_game_is_not_found() {
        let store = InMemoryStore::new();
        assert_eq!(store.begin_simulation(Uuid::new_v4()), Err(StoreError::NotFound));
    }
}
