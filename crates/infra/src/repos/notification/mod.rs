mod inmemory;

pub use inmemory::InMemoryNotificationRepo;
use klubbhus_notifier_domain::{Notification, NotificationType, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    async fn find_by_type(&self, t: NotificationType) -> anyhow::Result<Vec<Notification>>;
    async fn find_by_type_for_clubs(
        &self,
        t: NotificationType,
        club_ids: &[ID],
    ) -> anyhow::Result<Vec<Notification>>;
    async fn find_by_type_for_events(
        &self,
        t: NotificationType,
        event_ids: &[ID],
    ) -> anyhow::Result<Vec<Notification>>;
    async fn find_by_type_for_user(
        &self,
        t: NotificationType,
        user_id: &ID,
    ) -> anyhow::Result<Vec<Notification>>;
    /// Adds the user to the record's `read_by` set. Adding an already present
    /// user is a no-op; a missing record is an error.
    async fn mark_read(&self, notification_id: &ID, user_id: &ID) -> anyhow::Result<()>;
}
