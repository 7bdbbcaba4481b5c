use klubbhus_notifier_domain::{Alert, WakePayload};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::info;

/// The OS facility that wakes the app at an exact time with a payload.
///
/// Both calls are idempotent: scheduling twice with the same key replaces the
/// prior armed wake, and cancelling a key that is not armed is a no-op.
#[async_trait::async_trait]
pub trait IWakeScheduler: Send + Sync {
    async fn schedule(&self, key: &str, fire_at: i64, payload: &WakePayload) -> anyhow::Result<()>;
    async fn cancel(&self, key: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArmedWake {
    pub fire_at: i64,
    /// The payload as it crosses the OS boundary
    pub payload: String,
}

impl ArmedWake {
    pub fn decode(&self) -> anyhow::Result<WakePayload> {
        serde_json::from_str(&self.payload).map_err(|e| anyhow::Error::new(e))
    }
}

/// Wake scheduler keeping armed wakes in a map, used by tests and by the
/// standalone daemon. Counts calls so reconciliation idempotency can be
/// asserted.
pub struct InMemoryWakeScheduler {
    armed: Mutex<HashMap<String, ArmedWake>>,
    schedule_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
}

impl InMemoryWakeScheduler {
    pub fn new() -> Self {
        Self {
            armed: Mutex::new(HashMap::new()),
            schedule_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
        }
    }

    pub fn armed_count(&self) -> usize {
        self.armed.lock().unwrap().len()
    }

    pub fn armed_for(&self, key: &str) -> Option<ArmedWake> {
        self.armed.lock().unwrap().get(key).cloned()
    }

    pub fn armed(&self) -> Vec<(String, ArmedWake)> {
        self.armed
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryWakeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IWakeScheduler for InMemoryWakeScheduler {
    async fn schedule(&self, key: &str, fire_at: i64, payload: &WakePayload) -> anyhow::Result<()> {
        let payload = serde_json::to_string(payload)?;
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        self.armed
            .lock()
            .unwrap()
            .insert(key.to_string(), ArmedWake { fire_at, payload });
        Ok(())
    }

    async fn cancel(&self, key: &str) -> anyhow::Result<()> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        self.armed.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Where digest, incremental and reminder alerts end up.
#[async_trait::async_trait]
pub trait IAlertSink: Send + Sync {
    async fn push(&self, alert: Alert);
}

/// Records delivered alerts so tests can assert on them.
pub struct InMemoryAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl InMemoryAlertSink {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Default for InMemoryAlertSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IAlertSink for InMemoryAlertSink {
    async fn push(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// Alert sink for the standalone daemon, which has no UI to alert into.
pub struct TracingAlertSink {}

#[async_trait::async_trait]
impl IAlertSink for TracingAlertSink {
    async fn push(&self, alert: Alert) {
        match alert {
            Alert::Digest { unread_count } => {
                info!("You have {} unread notifications", unread_count)
            }
            Alert::Incremental(content) => info!("{}: {}", content.title, content.body),
            Alert::Reminder {
                event_title,
                event_start_ts,
                ..
            } => info!("Upcoming event {} at {}", event_title, event_start_ts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klubbhus_notifier_domain::{ReminderOffset, ID};

    fn payload() -> WakePayload {
        WakePayload {
            event_id: ID::new(),
            event_title: "Quiz night".into(),
            event_start_ts: 1000,
            offset: ReminderOffset::OneHour,
        }
    }

    #[tokio::test]
    async fn scheduling_same_key_replaces_armed_wake() {
        let scheduler = InMemoryWakeScheduler::new();
        let p = payload();
        scheduler.schedule("a:1h", 100, &p).await.unwrap();
        scheduler.schedule("a:1h", 200, &p).await.unwrap();
        assert_eq!(scheduler.armed_count(), 1);
        assert_eq!(scheduler.armed_for("a:1h").unwrap().fire_at, 200);
        assert_eq!(scheduler.armed_for("a:1h").unwrap().decode().unwrap(), p);
    }

    #[tokio::test]
    async fn cancelling_unarmed_key_is_noop() {
        let scheduler = InMemoryWakeScheduler::new();
        assert!(scheduler.cancel("missing:1d").await.is_ok());
        assert_eq!(scheduler.armed_count(), 0);
    }
}
