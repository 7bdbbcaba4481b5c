mod inmemory;

pub use inmemory::InMemoryPreferenceRepo;

/// Small key value store backing the per-channel toggles and the markers the
/// poller keeps between ticks.
#[async_trait::async_trait]
pub trait IPreferenceRepo: Send + Sync {
    async fn get_bool(&self, key: &str) -> Option<bool>;
    async fn set_bool(&self, key: &str, value: bool) -> anyhow::Result<()>;
    async fn get_string(&self, key: &str) -> Option<String>;
    async fn set_string(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;

    #[tokio::test]
    async fn bool_roundtrip_and_overwrite() {
        let ctx = NotifierContext::create_inmemory();
        let prefs = &ctx.repos.preferences;

        assert_eq!(prefs.get_bool("reminders.one_hour").await, None);
        prefs.set_bool("reminders.one_hour", true).await.unwrap();
        assert_eq!(prefs.get_bool("reminders.one_hour").await, Some(true));
        prefs.set_bool("reminders.one_hour", false).await.unwrap();
        assert_eq!(prefs.get_bool("reminders.one_hour").await, Some(false));
    }

    #[tokio::test]
    async fn string_roundtrip_and_delete() {
        let ctx = NotifierContext::create_inmemory();
        let prefs = &ctx.repos.preferences;

        prefs
            .set_string("poller.last_seen_date", "2021-02-21")
            .await
            .unwrap();
        assert_eq!(
            prefs.get_string("poller.last_seen_date").await,
            Some("2021-02-21".to_string())
        );
        prefs.delete("poller.last_seen_date").await.unwrap();
        assert_eq!(prefs.get_string("poller.last_seen_date").await, None);
    }
}
