mod inmemory;

pub use inmemory::InMemoryAlarmRepo;
use klubbhus_notifier_domain::{Alarm, ID};

/// The locally persisted alarm table.
#[async_trait::async_trait]
pub trait IAlarmRepo: Send + Sync {
    async fn insert(&self, alarm: &Alarm) -> anyhow::Result<()>;
    async fn save(&self, alarm: &Alarm) -> anyhow::Result<()>;
    async fn delete(&self, alarm_id: &ID) -> Option<Alarm>;
    async fn find_all(&self) -> anyhow::Result<Vec<Alarm>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use klubbhus_notifier_domain::{Alarm, ClubEvent, ReminderOffset};

    fn event() -> ClubEvent {
        ClubEvent {
            id: Default::default(),
            title: "Board meeting".into(),
            start_ts: 5000,
            club_id: Default::default(),
            participants: Vec::new(),
            likers: Vec::new(),
            admins: Vec::new(),
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn insert_save_delete_roundtrip() {
        let ctx = NotifierContext::create_inmemory();
        let e = event();
        let alarm = Alarm::new(&e, ReminderOffset::OneDay);
        ctx.repos.alarms.insert(&alarm).await.unwrap();
        assert_eq!(ctx.repos.alarms.find_all().await.unwrap(), vec![alarm.clone()]);

        let mut moved = e.clone();
        moved.start_ts = 9000;
        let updated = alarm.with_event(&moved);
        ctx.repos.alarms.save(&updated).await.unwrap();
        let stored = ctx.repos.alarms.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].event_start_ts, 9000);

        assert!(ctx.repos.alarms.delete(&alarm.id).await.is_some());
        assert!(ctx.repos.alarms.find_all().await.unwrap().is_empty());
        // Deleting again finds nothing
        assert!(ctx.repos.alarms.delete(&alarm.id).await.is_none());
    }
}
