use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The seven kinds of notification records the remote store carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    /// A club the user is member of created a new event
    EventCreated,
    /// News entry without a club, relevant for everybody
    NewsGeneral,
    /// News entry posted by a club the user is member of
    NewsClub,
    /// Somebody asked to join a club the user administers
    ClubRequestPending,
    /// The user's own membership request was accepted
    ClubRequestAccepted,
    /// Somebody asked to participate in an event the user administers
    EventRequestPending,
    /// The user's own participation request was accepted
    EventRequestAccepted,
}

impl NotificationType {
    pub fn all() -> [NotificationType; 7] {
        [
            Self::EventCreated,
            Self::NewsGeneral,
            Self::NewsClub,
            Self::ClubRequestPending,
            Self::ClubRequestAccepted,
            Self::EventRequestPending,
            Self::EventRequestAccepted,
        ]
    }

    /// The user setting that turns this kind of notification on or off.
    /// The pending and accepted variants of a request flow share one channel.
    pub fn channel(&self) -> NotificationChannel {
        match self {
            Self::EventCreated => NotificationChannel::ClubEvents,
            Self::NewsGeneral => NotificationChannel::GeneralNews,
            Self::NewsClub => NotificationChannel::ClubNews,
            Self::ClubRequestPending | Self::ClubRequestAccepted => {
                NotificationChannel::ClubMembership
            }
            Self::EventRequestPending | Self::EventRequestAccepted => {
                NotificationChannel::EventParticipation
            }
        }
    }
}

/// A user-facing toggle. Five channels gate the aggregation categories and
/// two gate the reminder alarms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationChannel {
    ClubEvents,
    GeneralNews,
    ClubNews,
    ClubMembership,
    EventParticipation,
    ReminderOneHour,
    ReminderOneDay,
}

impl NotificationChannel {
    pub fn pref_key(&self) -> &'static str {
        match self {
            Self::ClubEvents => "notifications.club_events",
            Self::GeneralNews => "notifications.general_news",
            Self::ClubNews => "notifications.club_news",
            Self::ClubMembership => "notifications.club_membership",
            Self::EventParticipation => "notifications.event_participation",
            Self::ReminderOneHour => "reminders.one_hour",
            Self::ReminderOneDay => "reminders.one_day",
        }
    }
}

/// A notification record in the remote store. Append-only; the only mutation
/// performed from this subsystem is adding a user to `read_by`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: ID,
    pub notification_type: NotificationType,
    /// When the notification was recorded, timestamp in millis
    pub time: i64,
    pub read_by: Vec<ID>,
    pub club_id: Option<ID>,
    pub event_id: Option<ID>,
    pub news_id: Option<ID>,
    pub user_id: Option<ID>,
}

impl Notification {
    pub fn new(notification_type: NotificationType, time: i64) -> Self {
        Self {
            id: Default::default(),
            notification_type,
            time,
            read_by: Vec::new(),
            club_id: None,
            event_id: None,
            news_id: None,
            user_id: None,
        }
    }

    pub fn is_read_by(&self, user_id: &ID) -> bool {
        self.read_by.contains(user_id)
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Display-ready rendition of a `Notification`, produced by joining the
/// record with the entity it references. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub category: NotificationType,
    /// In-app route to navigate to when the notification is tapped
    pub target_route: String,
    pub date: i64,
}

/// What the alert sink ultimately delivers to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Alert {
    /// At most once per calendar day: how many notifications are unread
    Digest { unread_count: usize },
    /// A single alert for the newest unread notification
    Incremental(NotificationContent),
    /// A reminder alarm fired for an upcoming event
    Reminder {
        event_id: ID,
        event_title: String,
        event_start_ts: i64,
    },
}
