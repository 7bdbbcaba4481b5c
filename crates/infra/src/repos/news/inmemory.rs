use super::INewsRepo;
use crate::repos::shared::inmemory_repo::*;
use klubbhus_notifier_domain::{NewsEntry, ID};

pub struct InMemoryNewsRepo {
    news: std::sync::Mutex<Vec<NewsEntry>>,
}

impl InMemoryNewsRepo {
    pub fn new() -> Self {
        Self {
            news: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INewsRepo for InMemoryNewsRepo {
    async fn insert(&self, news: &NewsEntry) -> anyhow::Result<()> {
        insert(news, &self.news);
        Ok(())
    }

    async fn find(&self, news_id: &ID) -> Option<NewsEntry> {
        find(news_id, &self.news)
    }
}
