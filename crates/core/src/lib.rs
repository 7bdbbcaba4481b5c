mod alarm;
mod error;
mod notification;
mod poller;
mod shared;

use alarm::disable_offset_alarms::DisableOffsetAlarmsUseCase;
use alarm::handle_wake::HandleWakeUseCase;
use alarm::sync_alarms::SyncAlarmsUseCase;
pub use alarm::sync_alarms::SyncReport;
pub use error::NotifierError;
use klubbhus_notifier_domain::{
    Alert, Notification, NotificationChannel, NotificationContent, ReminderOffset, WakePayload, ID,
};
use klubbhus_notifier_infra::NotifierContext;
use notification::get_notifications::GetNotificationsUseCase;
use notification::get_unread_content::GetUnreadContentUseCase;
use notification::mark_read::{MarkAllReadUseCase, MarkNotificationReadUseCase};
pub use poller::NotificationPoller;
use shared::usecase::execute;
use tokio::sync::broadcast;
use tracing::error;

/// Control surface of the reminder and notification core.
///
/// Owns the notification poller and routes every mutation of the local alarm
/// and read state through the use cases, so writes for a given alarm go
/// through a single path.
pub struct NotifierService {
    ctx: NotifierContext,
    poller: NotificationPoller,
}

impl NotifierService {
    pub fn new(ctx: NotifierContext) -> Self {
        Self {
            poller: NotificationPoller::new(ctx.clone()),
            ctx,
        }
    }

    /// Starts the polling service for the given user. Errors when it is
    /// already running.
    pub fn start(&self, user_id: ID) -> Result<(), NotifierError> {
        self.poller.start(user_id)
    }

    /// Stops the polling service, cancelling the pending delay. An in-flight
    /// tick finishes first. Stopping a stopped service is a no-op.
    pub async fn stop(&self) {
        self.poller.stop().await
    }

    /// One full alarm reconciliation pass for the user.
    pub async fn resync(&self, user_id: &ID) -> Result<SyncReport, NotifierError> {
        execute(
            SyncAlarmsUseCase {
                user_id: user_id.clone(),
            },
            &self.ctx,
        )
        .await
        .map_err(NotifierError::from)
    }

    /// Persists a channel toggle. Enabling a reminder channel triggers a full
    /// resync; disabling one drops that offset's alarms without a remote
    /// fetch.
    pub async fn set_channel_enabled(
        &self,
        user_id: &ID,
        channel: NotificationChannel,
        enabled: bool,
    ) -> Result<(), NotifierError> {
        self.ctx
            .repos
            .preferences
            .set_bool(channel.pref_key(), enabled)
            .await
            .map_err(|e| {
                error!("Unable to persist channel toggle {:?}. Err: {:?}", channel, e);
                NotifierError::InternalError
            })?;

        let offset = match channel {
            NotificationChannel::ReminderOneHour => Some(ReminderOffset::OneHour),
            NotificationChannel::ReminderOneDay => Some(ReminderOffset::OneDay),
            _ => None,
        };
        if let Some(offset) = offset {
            if enabled {
                self.resync(user_id).await?;
            } else {
                execute(DisableOffsetAlarmsUseCase { offset }, &self.ctx)
                    .await
                    .map_err(NotifierError::from)?;
            }
        }
        Ok(())
    }

    /// All relevant notifications for the user, newest first.
    pub async fn notifications(&self, user_id: &ID) -> Vec<Notification> {
        execute(
            GetNotificationsUseCase {
                user_id: user_id.clone(),
            },
            &self.ctx,
        )
        .await
        .unwrap_or_default()
    }

    /// The unread subset rendered as display-ready content, newest first.
    pub async fn unread_content(&self, user_id: &ID) -> Vec<NotificationContent> {
        execute(
            GetUnreadContentUseCase {
                user_id: user_id.clone(),
            },
            &self.ctx,
        )
        .await
        .unwrap_or_default()
    }

    pub async fn mark_as_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> Result<(), NotifierError> {
        execute(
            MarkNotificationReadUseCase {
                notification_id: notification_id.clone(),
                user_id: user_id.clone(),
            },
            &self.ctx,
        )
        .await
        .map_err(NotifierError::from)
    }

    /// Marks a batch of notifications as read. The poller is paused for the
    /// duration so a concurrent tick does not alert on a half-updated read
    /// state. Returns how many records were updated.
    pub async fn mark_all_as_read(&self, notification_ids: &[ID], user_id: &ID) -> usize {
        self.poller.set_paused(true);
        let marked = execute(
            MarkAllReadUseCase {
                notification_ids: notification_ids.to_vec(),
                user_id: user_id.clone(),
            },
            &self.ctx,
        )
        .await
        .unwrap_or_default();
        self.poller.set_paused(false);
        marked
    }

    pub fn set_paused(&self, paused: bool) {
        self.poller.set_paused(paused);
    }

    /// Receiver for the unread list published on every non-empty tick.
    /// Broadcasts sent while nobody subscribes are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<NotificationContent>> {
        self.poller.subscribe()
    }

    /// Entry point for a fired wake. Returns the delivered alert, or `None`
    /// when the event is gone or already started.
    pub async fn handle_wake(&self, payload: WakePayload) -> Option<Alert> {
        execute(HandleWakeUseCase { payload }, &self.ctx)
            .await
            .unwrap_or(None)
    }
}
