//! Event catalog: a built-in table of trial definitions plus an optional JSON
//! override file. Loaded by the orchestrator when a game is created; the
//! engine itself never reads it.

use std::fs;

use crate::model::event::{EventKind, GameEvent};

pub const DEFAULT_CATALOG_PATH: &str = "data/events.json";

fn def(
    id: u32,
    name: &str,
    kind: EventKind,
    difficulty: u8,
    elimination_rate: f64,
    decor: &str,
    causes: &[&str],
) -> GameEvent {
    GameEvent {
        id,
        name: name.to_string(),
        kind,
        difficulty,
        elimination_rate,
        is_final: false,
        min_players_for_final: 0,
        min_survival_secs: 60,
        max_survival_secs: 300,
        causes: causes.iter().map(|c| c.to_string()).collect(),
        decor: decor.to_string(),
    }
}

fn final_def(
    id: u32,
    name: &str,
    kind: EventKind,
    difficulty: u8,
    decor: &str,
    causes: &[&str],
) -> GameEvent {
    GameEvent {
        // Finals always cut to a single survivor; the rate is nominal.
        elimination_rate: 0.99,
        is_final: true,
        min_players_for_final: 4,
        ..def(id, name, kind, difficulty, 0.99, decor, causes)
    }
}

/// The built-in trial table, ordered roughly by escalating stakes.
pub fn builtin_events() -> Vec<GameEvent> {
    vec![
        def(1, "Red Light, Green Light", EventKind::Agility, 3, 0.30, "playground",
            &["shot while moving", "froze too late", "tripped at the line"]),
        def(2, "Memory Bridge", EventKind::Intelligence, 5, 0.35, "glass bridge",
            &["stepped on the wrong panel", "lost count of the tiles", "pushed during a panic"]),
        def(3, "Sandbag Carry", EventKind::Force, 4, 0.30, "quarry",
            &["crushed under the load", "collapsed from exhaustion", "shoved off the ramp"]),
        def(4, "Night Maze", EventKind::Mixed, 6, 0.40, "hedge maze",
            &["never found the exit", "cornered in a dead end", "caught by the sweepers"]),
        def(5, "Cipher Lock", EventKind::Intelligence, 7, 0.45, "vault room",
            &["ran out the clock on the code", "triggered the wrong sequence"]),
        def(6, "Tug of War", EventKind::Force, 5, 0.50, "elevated platform",
            &["dragged over the edge", "lost footing on the pull"]),
        def(7, "Rooftop Sprint", EventKind::Agility, 6, 0.40, "rooftops",
            &["missed the jump", "slipped on the ledge", "overtaken before the gate"]),
        def(8, "Poison Banquet", EventKind::Intelligence, 4, 0.25, "banquet hall",
            &["picked the wrong dish", "trusted the wrong neighbor"]),
        def(9, "Cage Scramble", EventKind::Force, 8, 0.55, "steel cage",
            &["pinned against the bars", "overpowered in the scrum"]),
        def(10, "Marble Duel", EventKind::Mixed, 5, 0.50, "alley of doors",
            &["gambled the last marble", "out-bluffed at the wall"]),
        def(11, "Swamp Crossing", EventKind::Agility, 7, 0.45, "swamp",
            &["pulled under the surface", "stuck short of the bank"]),
        def(12, "Pattern Gauntlet", EventKind::Intelligence, 8, 0.50, "light corridor",
            &["misread the sequence", "hesitated one beat too long"]),
        def(13, "Iron Gate", EventKind::Force, 6, 0.40, "fortress gate",
            &["caught under the gate", "beaten to the winch"]),
        def(14, "Spinning Floor", EventKind::Agility, 5, 0.35, "carousel hall",
            &["thrown off the platform", "collided at full spin"]),
        def(15, "Silent Auction", EventKind::Mixed, 4, 0.30, "trading floor",
            &["outbid and out of time", "marked by the auctioneer"]),
        def(16, "Glass Labyrinth", EventKind::Mixed, 9, 0.60, "mirror maze",
            &["walked into the wrong pane", "lost in the reflections"]),
        def(17, "Last Riddle", EventKind::Intelligence, 9, 0.70, "amphitheater",
            &["answered a heartbeat late", "second-guessed the obvious"]),
        final_def(18, "Final Duel", EventKind::Force, 9, "arena circle",
            &["fell in the last exchange", "yielded at the edge"]),
        final_def(19, "Final Ascent", EventKind::Agility, 8, "the tower",
            &["fell short of the summit", "let go on the last pitch"]),
        final_def(20, "Final Gambit", EventKind::Mixed, 10, "glass table",
            &["lost the last hand", "broke first"]),
    ]
}

/// Load a catalog override from a JSON array of event definitions.
/// Returns None if the file is missing or unparseable.
pub fn load_event_catalog(path: &str) -> Option<Vec<GameEvent>> {
    let data = fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

/// The catalog games run on: the override file when present, else built-in.
pub fn effective_catalog() -> Vec<GameEvent> {
    load_event_catalog(DEFAULT_CATALOG_PATH).unwrap_or_else(builtin_events)
}
