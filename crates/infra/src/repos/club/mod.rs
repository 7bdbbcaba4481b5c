mod inmemory;

pub use inmemory::InMemoryClubRepo;
use klubbhus_notifier_domain::{Club, ID};

#[async_trait::async_trait]
pub trait IClubRepo: Send + Sync {
    async fn insert(&self, club: &Club) -> anyhow::Result<()>;
    async fn save(&self, club: &Club) -> anyhow::Result<()>;
    async fn find(&self, club_id: &ID) -> Option<Club>;
    async fn find_by_member(&self, user_id: &ID) -> anyhow::Result<Vec<Club>>;
    async fn find_by_admin(&self, user_id: &ID) -> anyhow::Result<Vec<Club>>;
}
