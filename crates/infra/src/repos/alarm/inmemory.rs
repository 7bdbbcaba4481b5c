use super::IAlarmRepo;
use crate::repos::shared::inmemory_repo::*;
use klubbhus_notifier_domain::{Alarm, ID};

pub struct InMemoryAlarmRepo {
    alarms: std::sync::Mutex<Vec<Alarm>>,
}

impl InMemoryAlarmRepo {
    pub fn new() -> Self {
        Self {
            alarms: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAlarmRepo for InMemoryAlarmRepo {
    async fn insert(&self, alarm: &Alarm) -> anyhow::Result<()> {
        insert(alarm, &self.alarms);
        Ok(())
    }

    async fn save(&self, alarm: &Alarm) -> anyhow::Result<()> {
        save(alarm, &self.alarms);
        Ok(())
    }

    async fn delete(&self, alarm_id: &ID) -> Option<Alarm> {
        delete(alarm_id, &self.alarms)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Alarm>> {
        Ok(find_by(&self.alarms, |_| true))
    }
}
