//! Group eligibility: whether one player may be credited with eliminating
//! another. Pure function of the two players and the group table.

use std::collections::HashMap;

use uuid::Uuid;

use crate::model::group::PlayerGroup;
use crate::model::player::Player;

/// True unless both players share a group whose `allow_betrayals` is false.
/// A group id with no record in `groups` imposes no constraint.
pub fn can_eliminate(
    attacker: &Player,
    target: &Player,
    groups: &HashMap<Uuid, PlayerGroup>,
) -> bool {
    match (attacker.group_id, target.group_id) {
        (Some(a), Some(b)) if a == b => groups.get(&a).map_or(true, |g| g.allow_betrayals),
        _ => true,
    }
}
