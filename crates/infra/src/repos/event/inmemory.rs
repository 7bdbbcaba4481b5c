use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use klubbhus_notifier_domain::{ClubEvent, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<ClubEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &ClubEvent) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save(&self, e: &ClubEvent) -> anyhow::Result<()> {
        save(e, &self.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<ClubEvent> {
        find(event_id, &self.events)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<ClubEvent>> {
        Ok(find_by(&self.events, |_| true))
    }

    async fn find_by_admin(&self, user_id: &ID) -> anyhow::Result<Vec<ClubEvent>> {
        Ok(find_by(&self.events, |e| e.admins.contains(user_id)))
    }

    async fn delete(&self, event_id: &ID) -> Option<ClubEvent> {
        delete(event_id, &self.events)
    }
}
