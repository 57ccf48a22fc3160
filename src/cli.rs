use std::collections::HashMap;
use std::env;

use crate::game::rng::Rng;
use crate::model::catalog::{builtin_events, effective_catalog};
use crate::model::player::generate_players;
use crate::model::validate::{validate_catalog_file, validate_events};
use crate::orchestrator::odds::estimate_win_odds_parallel;
use crate::orchestrator::{run_to_completion, Game};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Simulate,
    Odds,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("simulate") => Some(Command::Simulate),
        Some("odds") => Some(Command::Odds),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Odds) => handle_odds(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: thunderdome <serve|simulate|odds|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("THUNDERDOME_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let players = parse_usize_arg(args.get(2), "players", 20).clamp(2, 512);
    let seed = parse_u64_arg(args.get(3), "seed", 7);
    let as_table = args.iter().any(|arg| arg == "--table");

    let mut rng = Rng::new(seed);
    let roster = generate_players(&mut rng, players);
    let mut game = Game::new("cli game", roster, HashMap::new(), effective_catalog());
    let winner_id = run_to_completion(&mut game, &mut rng);
    let winner = winner_id.and_then(|w| game.players.iter().find(|p| p.id == w).cloned());

    if as_table {
        println!("players\tseed\tevents_played\twinner");
        println!(
            "{}\t{}\t{}\t{}",
            players,
            seed,
            game.history.len(),
            winner.as_ref().map_or("-", |w| w.name.as_str())
        );
        return 0;
    }

    let payload = serde_json::json!({
        "players": players,
        "seed": seed,
        "events_played": game.history.len(),
        "winner": winner,
        "history": game.history,
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize simulation result: {err}");
            1
        }
    }
}

fn handle_odds(args: &[String]) -> i32 {
    let players = parse_usize_arg(args.get(2), "players", 16).clamp(2, 512);
    let rounds = parse_usize_arg(args.get(3), "rounds", 500).clamp(1, 100_000);
    let seed = parse_u64_arg(args.get(4), "seed", 7);

    let mut rng = Rng::new(seed);
    let roster = generate_players(&mut rng, players);
    let game = Game::new("odds game", roster, HashMap::new(), effective_catalog());
    let odds = estimate_win_odds_parallel(&game, rounds, seed);

    match serde_json::to_string_pretty(&odds) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize odds: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let outcome = match args.get(2) {
        Some(path) => validate_catalog_file(path),
        None => validate_events(&builtin_events()),
    };
    let label = args.get(2).map(String::as_str).unwrap_or("built-in catalog");

    match outcome {
        Ok(()) => {
            println!("validation passed: {label}");
            0
        }
        Err(issues) => {
            eprintln!("validation failed: {} issue(s)", issues.len());
            for issue in issues {
                eprintln!("- {issue}");
            }
            1
        }
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
