use crate::shared::usecase::UseCase;
use klubbhus_notifier_domain::{Alert, WakePayload};
use klubbhus_notifier_infra::NotifierContext;
use tracing::info;

/// Consumes a fired wake and turns it into a single reminder alert.
///
/// A wake may fire for an event that was deleted or moved into the past after
/// the alarm was armed; the event is re-checked here and the alert suppressed
/// in that case.
#[derive(Debug)]
pub struct HandleWakeUseCase {
    pub payload: WakePayload,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for HandleWakeUseCase {
    type Response = Option<Alert>;

    type Error = UseCaseError;

    const NAME: &'static str = "HandleWake";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let event = match ctx.repos.events.find(&self.payload.event_id).await {
            Some(event) => event,
            None => {
                info!(
                    "Wake fired for deleted event {}, suppressing alert",
                    self.payload.event_id
                );
                return Ok(None);
            }
        };
        if event.start_ts <= now {
            info!(
                "Wake fired for event {} that already started, suppressing alert",
                event.id
            );
            return Ok(None);
        }

        let alert = Alert::Reminder {
            event_id: event.id.clone(),
            event_title: event.title,
            event_start_ts: event.start_ts,
        };
        ctx.alerts.push(alert.clone()).await;
        Ok(Some(alert))
    }
}
