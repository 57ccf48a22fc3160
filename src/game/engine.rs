//! Event simulation engine: survival scoring, tie-diffusion shuffling, the
//! survivor/eliminated partition, and two-pass kill attribution.
//!
//! The engine mutates the passed-in players (`alive`, `kills`,
//! `killed_players`, `betrayals`, `survived_events`, `total_score`) and
//! returns an [EventResult] describing what changed. It owns no state and
//! performs no I/O; all randomness comes from the injected [Rng], so a fixed
//! seed reproduces the full partition and attribution.

use std::collections::HashMap;

use uuid::Uuid;

use crate::game::eligibility::can_eliminate;
use crate::game::rng::Rng;
use crate::model::event::{EventKind, GameEvent};
use crate::model::group::PlayerGroup;
use crate::model::outcome::{EliminationOutcome, EventResult, SurvivorOutcome};
use crate::model::player::{Player, Role};

/// Uniform noise added to every survival score. Deliberately large relative
/// to the other terms so outcomes stay stats-influenced, not
/// stats-deterministic.
pub const SCORE_RANDOM_SPAN: f64 = 25.0;
/// Consecutive scores closer than this form one shuffle cluster.
pub const SCORE_CLUSTER_GAP: f64 = 4.0;
/// Probability that a survivor in a betrayal-tolerant group turns on it.
pub const BETRAYAL_CHANCE: f64 = 0.10;
/// Absolute per-event kill ceiling, even through the fallback path.
pub const HARD_KILL_CEILING: u32 = 2;
const CLUSTER_SHUFFLE_PASSES: usize = 3;
const BETRAYAL_SCORE_PENALTY: i64 = 5;
const KILL_SCORE_BONUS: i64 = 10;

/// How many players survive this event: finals cut to one, otherwise the
/// complement of the elimination rate, never below one and never above the
/// cohort.
pub fn target_survivor_count(alive_count: usize, event: &GameEvent) -> usize {
    if alive_count == 0 {
        return 0;
    }
    if event.is_final {
        return 1;
    }
    let kept = (alive_count as f64 * (1.0 - event.elimination_rate)).floor() as usize;
    kept.max(1).min(alive_count)
}

/// Role multiplier before the x10 scaling. Specialist match beats the Zero
/// universal bonus; Zero and Peureux apply whatever the event kind; the small
/// baseline only applies to the three core kinds.
pub fn role_bonus(role: Role, kind: EventKind) -> f64 {
    if kind.specialist_role() == Some(role) {
        0.20
    } else if role == Role::Zero {
        0.15
    } else if role == Role::Peureux {
        -0.10
    } else if kind.is_core() {
        0.05
    } else {
        0.0
    }
}

fn stat_bonus(player: &Player, kind: EventKind) -> u8 {
    match kind {
        EventKind::Intelligence => player.stats.intelligence,
        EventKind::Force => player.stats.force,
        EventKind::Agility => player.stats.agility,
        EventKind::Mixed => player.stats.mean(),
    }
}

fn survival_score(player: &Player, event: &GameEvent, allies_alive: usize, rng: &mut Rng) -> f64 {
    let stat = f64::from(stat_bonus(player, event.kind));
    let role = role_bonus(player.role, event.kind) * 10.0;
    let group = 0.5 * allies_alive as f64;
    let difficulty_malus = (f64::from(event.difficulty) - 5.0) * 0.5;
    let noise = rng.range_f64(0.0, SCORE_RANDOM_SPAN);
    stat + role + group - difficulty_malus + noise
}

/// Shuffle near-ties so the ranking is not a pure function of the scores:
/// first within clusters of consecutive entries closer than
/// [SCORE_CLUSTER_GAP], then within fixed-size chunks of the reordered
/// sequence.
fn diffuse_ties(scored: &mut [(usize, f64)], rng: &mut Rng) {
    let n = scored.len();
    if n < 2 {
        return;
    }

    let mut start = 0;
    let mut boundaries = Vec::new();
    for i in 1..n {
        if scored[i - 1].1 - scored[i].1 >= SCORE_CLUSTER_GAP {
            boundaries.push((start, i));
            start = i;
        }
    }
    boundaries.push((start, n));
    for (lo, hi) in boundaries {
        if hi - lo > 1 {
            for _ in 0..CLUSTER_SHUFFLE_PASSES {
                rng.shuffle(&mut scored[lo..hi]);
            }
        }
    }

    let chunk = (n / 10).max(5);
    for block in scored.chunks_mut(chunk) {
        rng.shuffle(block);
    }
}

struct SurvivorSlot {
    player_idx: usize,
    time_remaining: u32,
    betrayed: bool,
    event_kills: u32,
    victims: Vec<Uuid>,
}

/// Run one event over the alive subset of `players`.
pub fn simulate_event(
    players: &mut [Player],
    event: &GameEvent,
    groups: &HashMap<Uuid, PlayerGroup>,
    rng: &mut Rng,
) -> EventResult {
    let alive_idx: Vec<usize> = (0..players.len()).filter(|&i| players[i].alive).collect();
    let alive_count = alive_idx.len();
    if alive_count == 0 {
        return EventResult::empty(event);
    }

    let target = target_survivor_count(alive_count, event);

    let mut group_alive: HashMap<Uuid, usize> = HashMap::new();
    for &i in &alive_idx {
        if let Some(gid) = players[i].group_id {
            *group_alive.entry(gid).or_insert(0) += 1;
        }
    }

    let mut scored: Vec<(usize, f64)> = alive_idx
        .iter()
        .map(|&i| {
            let allies = players[i]
                .group_id
                .and_then(|gid| group_alive.get(&gid))
                .map_or(0, |&count| count.saturating_sub(1));
            (i, survival_score(&players[i], event, allies, rng))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    diffuse_ties(&mut scored, rng);

    let time_divisor = if event.is_final { 4 } else { 2 };
    let mut survivor_slots: Vec<SurvivorSlot> = Vec::with_capacity(target);
    for &(idx, _) in &scored[..target] {
        players[idx].survived_events += 1;
        let in_betrayal_group = players[idx]
            .group_id
            .and_then(|gid| groups.get(&gid))
            .map_or(false, |g| g.allow_betrayals);
        let betrayed = in_betrayal_group && rng.chance(BETRAYAL_CHANCE);
        if betrayed {
            players[idx].betrayals += 1;
        }
        let time_remaining =
            rng.range_u32(event.min_survival_secs, event.max_survival_secs) / time_divisor;
        survivor_slots.push(SurvivorSlot {
            player_idx: idx,
            time_remaining,
            betrayed,
            event_kills: 0,
            victims: Vec::new(),
        });
    }

    let mut eliminated = Vec::with_capacity(alive_count - target);
    let mut victim_idx: Vec<usize> = Vec::with_capacity(alive_count - target);
    for &(idx, _) in &scored[target..] {
        players[idx].alive = false;
        let cause = rng
            .pick(&event.causes)
            .cloned()
            .unwrap_or_else(|| "eliminated".to_string());
        let elimination_time = rng.range_u32(event.min_survival_secs, event.max_survival_secs);
        eliminated.push(EliminationOutcome {
            player_id: players[idx].id,
            number: players[idx].number,
            name: players[idx].name.clone(),
            elimination_time,
            cause,
            decor: event.decor.clone(),
            event_name: event.name.clone(),
        });
        victim_idx.push(idx);
    }

    attribute_kills(players, event, groups, &mut survivor_slots, &mut victim_idx, rng);

    let mut survivors: Vec<SurvivorOutcome> = survivor_slots
        .into_iter()
        .map(|slot| {
            let event_score = i64::from(slot.time_remaining)
                + i64::from(slot.event_kills) * KILL_SCORE_BONUS
                - if slot.betrayed { BETRAYAL_SCORE_PENALTY } else { 0 };
            let player = &mut players[slot.player_idx];
            player.record_kills(&slot.victims);
            // Cumulative score never regresses, even for a degenerate
            // catalog where the betrayal penalty exceeds the clock.
            player.total_score += event_score.max(0);
            SurvivorOutcome {
                player_id: player.id,
                number: player.number,
                name: player.name.clone(),
                time_remaining: slot.time_remaining,
                event_kills: slot.event_kills,
                betrayed: slot.betrayed,
                event_score,
                kills: player.kills,
                total_score: player.total_score,
                survived_events: player.survived_events,
            }
        })
        .collect();
    survivors.sort_by(|a, b| b.event_score.cmp(&a.event_score));

    EventResult {
        event_id: event.id,
        event_name: event.name.clone(),
        survivors,
        eliminated,
        total_participants: alive_count,
    }
}

/// Two-pass attribution: prefer a uniform pick among survivors under the
/// per-event cap; fall back to the least-loaded survivor up to the hard
/// ceiling of two. A victim with no eligible killer stays unattributed —
/// accepted data state, not an error. Same-group credit is never given
/// unless the group allows betrayals.
fn attribute_kills(
    players: &[Player],
    event: &GameEvent,
    groups: &HashMap<Uuid, PlayerGroup>,
    slots: &mut [SurvivorSlot],
    victim_idx: &mut Vec<usize>,
    rng: &mut Rng,
) {
    let cap = event.max_kills_per_killer();
    // Attribution order must not correlate with score order.
    rng.shuffle(victim_idx);

    for &victim in victim_idx.iter() {
        let candidates: Vec<usize> = (0..slots.len())
            .filter(|&s| {
                slots[s].event_kills < cap
                    && can_eliminate(&players[slots[s].player_idx], &players[victim], groups)
            })
            .collect();

        let chosen = if let Some(&s) = rng.pick(&candidates) {
            Some(s)
        } else {
            // Relief valve: exceed the normal cap, never the hard ceiling.
            (0..slots.len())
                .filter(|&s| {
                    slots[s].event_kills < HARD_KILL_CEILING
                        && can_eliminate(&players[slots[s].player_idx], &players[victim], groups)
                })
                .min_by_key(|&s| (slots[s].event_kills, s))
        };

        if let Some(s) = chosen {
            slots[s].event_kills += 1;
            slots[s].victims.push(players[victim].id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::builtin_events;
    use crate::model::player::generate_players;

    fn event_of_kind(kind: EventKind) -> GameEvent {
        builtin_events()
            .into_iter()
            .find(|e| e.kind == kind && !e.is_final)
            .expect("catalog covers all kinds")
    }

    #[test]
    fn target_count_floor_and_clamp() {
        let mut event = event_of_kind(EventKind::Agility);
        event.elimination_rate = 0.5;
        assert_eq!(target_survivor_count(10, &event), 5);
        assert_eq!(target_survivor_count(3, &event), 1);
        event.elimination_rate = 0.99;
        assert_eq!(target_survivor_count(10, &event), 1);
        event.elimination_rate = 0.10;
        assert_eq!(target_survivor_count(1, &event), 1);
        assert_eq!(target_survivor_count(0, &event), 0);
    }

    #[test]
    fn final_events_target_exactly_one() {
        let final_event = builtin_events()
            .into_iter()
            .find(|e| e.is_final)
            .expect("catalog has finals");
        assert_eq!(target_survivor_count(4, &final_event), 1);
        assert_eq!(target_survivor_count(2, &final_event), 1);
    }

    #[test]
    fn role_bonus_table() {
        assert_eq!(role_bonus(Role::Brute, EventKind::Force), 0.20);
        assert_eq!(role_bonus(Role::Intelligent, EventKind::Intelligence), 0.20);
        assert_eq!(role_bonus(Role::Sportif, EventKind::Agility), 0.20);
        assert_eq!(role_bonus(Role::Zero, EventKind::Force), 0.15);
        assert_eq!(role_bonus(Role::Zero, EventKind::Mixed), 0.15);
        assert_eq!(role_bonus(Role::Peureux, EventKind::Agility), -0.10);
        assert_eq!(role_bonus(Role::Peureux, EventKind::Mixed), -0.10);
        assert_eq!(role_bonus(Role::Normal, EventKind::Force), 0.05);
        assert_eq!(role_bonus(Role::Brute, EventKind::Agility), 0.05);
        assert_eq!(role_bonus(Role::Normal, EventKind::Mixed), 0.0);
    }

    #[test]
    fn empty_cohort_returns_empty_result() {
        let mut players = generate_players(&mut Rng::new(1), 5);
        for p in &mut players {
            p.alive = false;
        }
        let event = event_of_kind(EventKind::Force);
        let result = simulate_event(&mut players, &event, &HashMap::new(), &mut Rng::new(2));
        assert_eq!(result.total_participants, 0);
        assert!(result.survivors.is_empty());
        assert!(result.eliminated.is_empty());
    }

    #[test]
    fn diffuse_ties_preserves_membership() {
        let mut rng = Rng::new(8);
        let mut scored: Vec<(usize, f64)> =
            (0..30).map(|i| (i, 100.0 - i as f64 * 0.5)).collect();
        diffuse_ties(&mut scored, &mut rng);
        let mut indices: Vec<usize> = scored.iter().map(|&(i, _)| i).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..30).collect::<Vec<usize>>());
    }

    #[test]
    fn survivor_outcomes_are_sorted_by_event_score() {
        let mut players = generate_players(&mut Rng::new(21), 40);
        let event = event_of_kind(EventKind::Mixed);
        let result = simulate_event(&mut players, &event, &HashMap::new(), &mut Rng::new(22));
        for pair in result.survivors.windows(2) {
            assert!(pair[0].event_score >= pair[1].event_score);
        }
    }

    #[test]
    fn eliminated_players_keep_frozen_scores() {
        let mut players = generate_players(&mut Rng::new(31), 20);
        let before: HashMap<Uuid, i64> = players.iter().map(|p| (p.id, p.total_score)).collect();
        let event = event_of_kind(EventKind::Intelligence);
        let result = simulate_event(&mut players, &event, &HashMap::new(), &mut Rng::new(32));
        for outcome in &result.eliminated {
            let player = players.iter().find(|p| p.id == outcome.player_id).unwrap();
            assert!(!player.alive);
            assert_eq!(player.total_score, before[&player.id]);
        }
    }
}
