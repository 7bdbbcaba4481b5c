use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `Club` groups members and admins. Membership decides which club-scoped
/// notifications are relevant for a user; admins additionally receive
/// membership requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: ID,
    pub name: String,
    pub members: Vec<ID>,
    pub admins: Vec<ID>,
}

impl Entity for Club {
    fn id(&self) -> &ID {
        &self.id
    }
}
