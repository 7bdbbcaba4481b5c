use klubbhus_notifier_domain::ID;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds between two ticks of the notification poller
    pub poll_interval_secs: u64,
    /// Seconds between two alarm reconciliation passes of the daemon
    pub resync_interval_secs: u64,
    /// The user the standalone daemon polls for
    pub daemon_user_id: ID,
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => match val.parse::<u64>() {
            Ok(parsed) if parsed > 0 => parsed,
            _ => {
                warn!(
                    "The given {}: {} is not a positive number, falling back to the default: {}.",
                    key, val, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let daemon_user_id = match std::env::var("USER_ID") {
            Ok(raw) => match raw.parse::<ID>() {
                Ok(id) => id,
                Err(_) => {
                    warn!(
                        "The given USER_ID: {} is not a valid id, generating a fresh one.",
                        raw
                    );
                    ID::new()
                }
            },
            Err(_) => {
                let id = ID::new();
                info!(
                    "Did not find USER_ID environment variable. Generated user id: {}",
                    id
                );
                id
            }
        };

        Self {
            poll_interval_secs: env_u64("POLL_INTERVAL_SECS", 10),
            resync_interval_secs: env_u64("ALARM_RESYNC_INTERVAL_SECS", 10 * 60),
            daemon_user_id,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
