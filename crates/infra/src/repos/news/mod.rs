mod inmemory;

pub use inmemory::InMemoryNewsRepo;
use klubbhus_notifier_domain::{NewsEntry, ID};

#[async_trait::async_trait]
pub trait INewsRepo: Send + Sync {
    async fn insert(&self, news: &NewsEntry) -> anyhow::Result<()>;
    async fn find(&self, news_id: &ID) -> Option<NewsEntry>;
}
