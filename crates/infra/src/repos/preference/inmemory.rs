use super::IPreferenceRepo;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct InMemoryPreferenceRepo {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryPreferenceRepo {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPreferenceRepo for InMemoryPreferenceRepo {
    async fn get_bool(&self, key: &str) -> Option<bool> {
        self.values
            .lock()
            .unwrap()
            .get(key)
            .and_then(|v| v.parse::<bool>().ok())
    }

    async fn set_bool(&self, key: &str, value: bool) -> anyhow::Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn set_string(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
