use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A news entry, either general (no club) or posted by a single club.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEntry {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub club_id: Option<ID>,
    pub created: i64,
}

impl Entity for NewsEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
