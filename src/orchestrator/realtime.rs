//! Real-time presentation of a precomputed event: the full [EventResult] is
//! simulated up front, then eliminations are revealed on a virtual clock that
//! supports pause, resume, and speed changes without losing elapsed time.
//!
//! Contract: pausing freezes virtual time; resuming re-anchors so it
//! continues seamlessly; a speed change rescales from the current instant,
//! preserving elapsed virtual time exactly. Cancellation is just dropping the
//! replay record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::outcome::{EliminationOutcome, EventResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledElimination {
    pub at_virtual_secs: f64,
    pub outcome: EliminationOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeReplay {
    pub game_id: Uuid,
    pub result: EventResult,
    schedule: Vec<ScheduledElimination>,
    duration_secs: f64,
    speed: f64,
    paused: bool,
    /// Wall-clock instant of the last resume/speed change.
    anchor: DateTime<Utc>,
    /// Virtual seconds already elapsed at `anchor`.
    virtual_at_anchor: f64,
}

impl RealtimeReplay {
    /// Build a replay from a finished simulation. Each elimination is revealed
    /// at its recorded elimination time; the replay ends at the latest one.
    pub fn new(game_id: Uuid, result: EventResult, started_at: DateTime<Utc>) -> Self {
        let mut schedule: Vec<ScheduledElimination> = result
            .eliminated
            .iter()
            .map(|outcome| ScheduledElimination {
                at_virtual_secs: f64::from(outcome.elimination_time),
                outcome: outcome.clone(),
            })
            .collect();
        schedule.sort_by(|a, b| {
            a.at_virtual_secs
                .partial_cmp(&b.at_virtual_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let duration_secs = schedule.last().map_or(0.0, |s| s.at_virtual_secs);
        Self {
            game_id,
            result,
            schedule,
            duration_secs,
            speed: 1.0,
            paused: false,
            anchor: started_at,
            virtual_at_anchor: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Virtual seconds elapsed as of `now`. Frozen while paused.
    pub fn virtual_elapsed(&self, now: DateTime<Utc>) -> f64 {
        if self.paused {
            return self.virtual_at_anchor;
        }
        let wall = (now - self.anchor).num_milliseconds().max(0) as f64 / 1000.0;
        self.virtual_at_anchor + wall * self.speed
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.paused {
            self.virtual_at_anchor = self.virtual_elapsed(now);
            self.paused = true;
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.paused {
            self.anchor = now;
            self.paused = false;
        }
    }

    /// Change playback speed, keeping elapsed virtual time exact.
    pub fn set_speed(&mut self, factor: f64, now: DateTime<Utc>) {
        self.virtual_at_anchor = self.virtual_elapsed(now);
        self.anchor = now;
        self.speed = factor.max(0.0);
    }

    /// Eliminations revealed so far, in reveal order.
    pub fn revealed(&self, now: DateTime<Utc>) -> &[ScheduledElimination] {
        let elapsed = self.virtual_elapsed(now);
        let count = self
            .schedule
            .partition_point(|s| s.at_virtual_secs <= elapsed);
        &self.schedule[..count]
    }

    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        self.virtual_elapsed(now) >= self.duration_secs
    }
}
