pub mod eligibility;
pub mod engine;
pub mod rng;

pub use eligibility::can_eliminate;
pub use engine::{
    role_bonus, simulate_event, target_survivor_count, BETRAYAL_CHANCE, HARD_KILL_CEILING,
    SCORE_CLUSTER_GAP, SCORE_RANDOM_SPAN,
};
pub use rng::Rng;
