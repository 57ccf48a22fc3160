//! Player alliances. A group shields its members from being credited with
//! eliminating one another unless it explicitly allows betrayals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerGroup {
    pub id: Uuid,
    pub name: String,
    pub member_ids: Vec<Uuid>,
    pub allow_betrayals: bool,
}

impl PlayerGroup {
    pub fn new(name: &str, allow_betrayals: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            member_ids: Vec::new(),
            allow_betrayals,
        }
    }

}
