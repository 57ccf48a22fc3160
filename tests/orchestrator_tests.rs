use std::collections::HashMap;

use thunderdome::game::rng::Rng;
use thunderdome::model::catalog::builtin_events;
use thunderdome::model::outcome::{EliminationOutcome, EventResult};
use thunderdome::model::player::{generate_players, Player};
use thunderdome::orchestrator::{
    advance, resurrect_if_wiped, run_to_completion, select_winner, Game, GameStatus, StepOutcome,
};

fn roster(count: usize, seed: u64) -> Vec<Player> {
    generate_players(&mut Rng::new(seed), count)
}

#[test]
fn game_runs_to_a_single_winner() {
    let mut game = Game::new("full run", roster(50, 1), HashMap::new(), builtin_events());
    let mut rng = Rng::new(2);
    let winner_id = run_to_completion(&mut game, &mut rng).expect("a winner emerges");

    assert_eq!(game.status, GameStatus::Completed);
    assert!(game.alive_count() >= 1);
    let winner = game.players.iter().find(|p| p.id == winner_id).unwrap();
    assert!(winner.alive);
    assert!(!game.history.is_empty());
}

#[test]
fn same_seed_replays_the_same_game() {
    let base = Game::new("replay", roster(25, 11), HashMap::new(), builtin_events());
    let mut first = base.clone();
    let mut second = base.clone();

    let winner_a = run_to_completion(&mut first, &mut Rng::new(33));
    let winner_b = run_to_completion(&mut second, &mut Rng::new(33));
    assert_eq!(winner_a, winner_b);
    assert_eq!(first.history.len(), second.history.len());
    for (a, b) in first.history.iter().zip(&second.history) {
        assert_eq!(a.event_id, b.event_id);
        let ids_a: Vec<_> = a.survivors.iter().map(|s| s.player_id).collect();
        let ids_b: Vec<_> = b.survivors.iter().map(|s| s.player_id).collect();
        assert_eq!(ids_a, ids_b);
    }
}

#[test]
fn final_is_skipped_while_cohort_is_too_large() {
    let final_event = builtin_events()
        .into_iter()
        .find(|e| e.is_final)
        .expect("catalog has finals");
    assert_eq!(final_event.min_players_for_final, 4);

    let mut game = Game::new("gating", roster(10, 21), HashMap::new(), vec![final_event]);
    let mut rng = Rng::new(22);

    match advance(&mut game, &mut rng) {
        StepOutcome::Skipped { event_id, .. } => assert_eq!(event_id, game.events[0].id),
        other => panic!("expected a skip, got {other:?}"),
    }
    // Queue exhausted: the next step completes the game with everyone alive.
    match advance(&mut game, &mut rng) {
        StepOutcome::Completed { winner_id } => assert!(winner_id.is_some()),
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(game.alive_count(), 10);
}

#[test]
fn final_runs_once_cohort_is_small_enough() {
    let final_event = builtin_events()
        .into_iter()
        .find(|e| e.is_final)
        .expect("catalog has finals");
    let mut game = Game::new("final", roster(3, 31), HashMap::new(), vec![final_event]);
    let mut rng = Rng::new(32);

    match advance(&mut game, &mut rng) {
        StepOutcome::Simulated(result) => {
            assert_eq!(result.survivors.len(), 1);
            assert_eq!(result.eliminated.len(), 2);
        }
        other => panic!("expected a simulated final, got {other:?}"),
    }
    assert_eq!(game.alive_count(), 1);
}

fn scored_player(seed: u64, total_score: i64, survived: u32, betrayals: u32) -> Player {
    let mut player = generate_players(&mut Rng::new(seed), 1).remove(0);
    player.total_score = total_score;
    player.survived_events = survived;
    player.betrayals = betrayals;
    player
}

#[test]
fn winner_prefers_higher_total_score() {
    let players = vec![
        scored_player(1, 120, 5, 0),
        scored_player(2, 300, 2, 4),
        scored_player(3, 250, 9, 0),
    ];
    let winner = select_winner(&players).expect("someone is alive");
    assert_eq!(winner.total_score, 300);
}

#[test]
fn winner_tie_breaks_on_survived_events_then_fewer_betrayals() {
    let players = vec![
        scored_player(1, 200, 4, 1),
        scored_player(2, 200, 6, 3),
        scored_player(3, 200, 6, 1),
    ];
    let winner = select_winner(&players).expect("someone is alive");
    assert_eq!(winner.survived_events, 6);
    assert_eq!(winner.betrayals, 1);
}

#[test]
fn winner_ignores_the_dead() {
    let mut players = vec![scored_player(1, 999, 9, 0), scored_player(2, 10, 1, 0)];
    players[0].alive = false;
    let winner = select_winner(&players).expect("one alive");
    assert_eq!(winner.total_score, 10);
}

#[test]
fn no_winner_when_everyone_is_dead() {
    let mut players = roster(3, 41);
    for p in &mut players {
        p.alive = false;
    }
    assert!(select_winner(&players).is_none());
}

fn wipe_result(players: &[Player], event_name: &str) -> EventResult {
    EventResult {
        event_id: 99,
        event_name: event_name.to_string(),
        survivors: Vec::new(),
        eliminated: players
            .iter()
            .map(|p| EliminationOutcome {
                player_id: p.id,
                number: p.number,
                name: p.name.clone(),
                elimination_time: 10,
                cause: "gone".to_string(),
                decor: "nowhere".to_string(),
                event_name: event_name.to_string(),
            })
            .collect(),
        total_participants: players.len(),
    }
}

#[test]
fn wipe_recovery_revives_the_top_scorer() {
    let mut players = vec![
        scored_player(1, 50, 2, 0),
        scored_player(2, 180, 3, 1),
        scored_player(3, 90, 2, 0),
    ];
    for p in &mut players {
        p.alive = false;
    }
    let mut result = wipe_result(&players, "total wipe");

    resurrect_if_wiped(&mut players, &mut result);

    assert_eq!(players.iter().filter(|p| p.alive).count(), 1);
    let revived = players.iter().find(|p| p.alive).unwrap();
    assert_eq!(revived.total_score, 181, "top scorer plus the minimal score");
    assert_eq!(result.survivors.len(), 1);
    assert_eq!(result.survivors[0].player_id, revived.id);
    assert_eq!(result.eliminated.len(), 2);
    assert!(result.eliminated.iter().all(|e| e.player_id != revived.id));
}

#[test]
fn wipe_recovery_is_a_no_op_when_someone_lives() {
    let mut players = vec![scored_player(1, 50, 2, 0), scored_player(2, 80, 2, 0)];
    players[1].alive = false;
    let mut result = wipe_result(&players[1..], "partial");
    resurrect_if_wiped(&mut players, &mut result);
    assert!(result.survivors.is_empty());
    assert_eq!(result.eliminated.len(), 1);
    assert!(!players[1].alive);
}

#[test]
fn wipe_recovery_is_a_no_op_without_eliminations() {
    let mut players = vec![scored_player(1, 50, 2, 0)];
    players[0].alive = false;
    let mut result = EventResult {
        event_id: 1,
        event_name: "empty".to_string(),
        survivors: Vec::new(),
        eliminated: Vec::new(),
        total_participants: 0,
    };
    resurrect_if_wiped(&mut players, &mut result);
    assert!(!players[0].alive);
    assert!(result.survivors.is_empty());
}

#[test]
fn tiny_game_still_produces_a_winner() {
    let mut game = Game::new("duel", roster(2, 51), HashMap::new(), builtin_events());
    let mut rng = Rng::new(52);
    let winner = run_to_completion(&mut game, &mut rng);
    assert!(winner.is_some());
    assert_eq!(game.alive_count(), 1);
}
