mod inmemory;

pub use inmemory::InMemoryEventRepo;
use klubbhus_notifier_domain::{ClubEvent, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &ClubEvent) -> anyhow::Result<()>;
    async fn save(&self, e: &ClubEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<ClubEvent>;
    /// One-shot fetch of every event, the input of a reconciliation pass
    async fn find_all(&self) -> anyhow::Result<Vec<ClubEvent>>;
    async fn find_by_admin(&self, user_id: &ID) -> anyhow::Result<Vec<ClubEvent>>;
    async fn delete(&self, event_id: &ID) -> Option<ClubEvent>;
}
