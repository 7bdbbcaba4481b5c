use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use klubbhus_notifier_domain::{Notification, NotificationType, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_type(&self, t: NotificationType) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n| n.notification_type == t))
    }

    async fn find_by_type_for_clubs(
        &self,
        t: NotificationType,
        club_ids: &[ID],
    ) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n| {
            n.notification_type == t
                && n.club_id
                    .as_ref()
                    .map(|id| club_ids.contains(id))
                    .unwrap_or(false)
        }))
    }

    async fn find_by_type_for_events(
        &self,
        t: NotificationType,
        event_ids: &[ID],
    ) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n| {
            n.notification_type == t
                && n.event_id
                    .as_ref()
                    .map(|id| event_ids.contains(id))
                    .unwrap_or(false)
        }))
    }

    async fn find_by_type_for_user(
        &self,
        t: NotificationType,
        user_id: &ID,
    ) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n| {
            n.notification_type == t && n.user_id.as_ref() == Some(user_id)
        }))
    }

    async fn mark_read(&self, notification_id: &ID, user_id: &ID) -> anyhow::Result<()> {
        let updated = update_one(notification_id, &self.notifications, |n| {
            if !n.read_by.contains(user_id) {
                n.read_by.push(user_id.clone());
            }
        });
        if updated {
            Ok(())
        } else {
            Err(anyhow::Error::msg(format!(
                "No notification with id: {}",
                notification_id
            )))
        }
    }
}
