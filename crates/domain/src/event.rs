use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// An event arranged by a `Club`. Users sign up as participants or mark the
/// event as liked; both make the event eligible for reminder alarms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubEvent {
    pub id: ID,
    pub title: String,
    /// Start of the event as timestamp in millis
    pub start_ts: i64,
    pub club_id: ID,
    pub participants: Vec<ID>,
    pub likers: Vec<ID>,
    /// Users allowed to accept participation requests for this event
    pub admins: Vec<ID>,
    pub created: i64,
    pub updated: i64,
}

impl ClubEvent {
    /// A user should be reminded about this event if it has not started yet
    /// and the user either participates in it or has liked it.
    pub fn is_relevant_for(&self, user_id: &ID, now: i64) -> bool {
        self.start_ts >= now && (self.participants.contains(user_id) || self.likers.contains(user_id))
    }
}

impl Entity for ClubEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}
