use crate::error::NotifierError;
use crate::notification::get_unread_content::GetUnreadContentUseCase;
use crate::shared::usecase::execute;
use klubbhus_notifier_domain::{calendar_date, Alert, NotificationContent, ID};
use klubbhus_notifier_infra::NotifierContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

const LAST_SEEN_DATE_KEY: &str = "poller.last_seen_date";
const LAST_NOTIFICATION_ID_KEY: &str = "poller.last_notification_id";

/// Drives the aggregation pipeline on an interval.
///
/// Every tick publishes the unread content to subscribers and decides whether
/// a digest (first non-empty tick of a calendar day) or an incremental alert
/// (new newest item) is delivered. Ticks run to completion before the next
/// delay starts, so they never overlap; stopping cancels the pending delay
/// but lets an in-flight tick finish.
pub struct NotificationPoller {
    ctx: NotifierContext,
    paused: Arc<AtomicBool>,
    publisher: broadcast::Sender<Vec<NotificationContent>>,
    running: Mutex<Option<RunningPoller>>,
}

struct RunningPoller {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl NotificationPoller {
    pub fn new(ctx: NotifierContext) -> Self {
        let (publisher, _) = broadcast::channel(16);
        Self {
            ctx,
            paused: Arc::new(AtomicBool::new(false)),
            publisher,
            running: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Vec<NotificationContent>> {
        self.publisher.subscribe()
    }

    /// Suppresses publishing, alerts and marker updates while the heartbeat
    /// keeps running. Used around bulk mutations like "mark all as read".
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().unwrap().is_some()
    }

    pub fn start(&self, user_id: ID) -> Result<(), NotifierError> {
        let mut running = self.running.lock().unwrap();
        if running.is_some() {
            warn!("Notification poller is already running");
            return Err(NotifierError::AlreadyRunning);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_loop(
            self.ctx.clone(),
            user_id,
            self.paused.clone(),
            self.publisher.clone(),
            shutdown_rx,
        ));
        *running = Some(RunningPoller {
            shutdown: shutdown_tx,
            handle,
        });
        Ok(())
    }

    pub async fn stop(&self) {
        let running = self.running.lock().unwrap().take();
        if let Some(running) = running {
            let _ = running.shutdown.send(true);
            if let Err(e) = running.handle.await {
                error!("Notification poller task failed: {:?}", e);
            }
        }
    }
}

async fn run_loop(
    ctx: NotifierContext,
    user_id: ID,
    paused: Arc<AtomicBool>,
    publisher: broadcast::Sender<Vec<NotificationContent>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let interval = Duration::from_secs(ctx.config.poll_interval_secs);
    info!("Notification poller started for user {}", user_id);
    loop {
        tick(&ctx, &user_id, &paused, &publisher).await;
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            _ = sleep(interval) => {}
        }
    }
    info!("Notification poller stopped");
}

pub(crate) async fn tick(
    ctx: &NotifierContext,
    user_id: &ID,
    paused: &AtomicBool,
    publisher: &broadcast::Sender<Vec<NotificationContent>>,
) {
    let usecase = GetUnreadContentUseCase {
        user_id: user_id.clone(),
    };
    let unread = match execute(usecase, ctx).await {
        Ok(unread) => unread,
        Err(_) => return,
    };

    // The unread set was still computed; only delivery and the markers are
    // gated by the pause flag
    if paused.load(Ordering::SeqCst) {
        return;
    }
    if unread.is_empty() {
        return;
    }

    // Subscribers get the full list on every non-empty tick, independent of
    // whether an alert is due. Nobody listening is fine.
    let _ = publisher.send(unread.clone());

    deliver_alert(ctx, &unread).await;
}

async fn deliver_alert(ctx: &NotifierContext, unread: &[NotificationContent]) {
    let today = calendar_date(ctx.sys.get_timestamp_millis());
    let newest = &unread[0];
    let prefs = &ctx.repos.preferences;

    let last_seen_date = prefs.get_string(LAST_SEEN_DATE_KEY).await;
    if last_seen_date.as_deref() != Some(today.as_str()) {
        ctx.alerts
            .push(Alert::Digest {
                unread_count: unread.len(),
            })
            .await;
        store_marker(ctx, LAST_SEEN_DATE_KEY, &today).await;
        // The newest id is recorded too, so the digest is not followed by an
        // incremental alert for an item it already counted
        store_marker(ctx, LAST_NOTIFICATION_ID_KEY, &newest.id.as_string()).await;
        return;
    }

    let last_notification_id = prefs.get_string(LAST_NOTIFICATION_ID_KEY).await;
    if last_notification_id.as_deref() != Some(newest.id.as_string().as_str()) {
        ctx.alerts.push(Alert::Incremental(newest.clone())).await;
        store_marker(ctx, LAST_NOTIFICATION_ID_KEY, &newest.id.as_string()).await;
    }
}

async fn store_marker(ctx: &NotifierContext, key: &str, value: &str) {
    if let Err(e) = ctx.repos.preferences.set_string(key, value).await {
        error!("Unable to persist poller marker {}. Err: {:?}", key, e);
    }
}
