use crate::error::NotifierError;
use crate::shared::usecase::UseCase;
use klubbhus_notifier_domain::ReminderOffset;
use klubbhus_notifier_infra::NotifierContext;
use tracing::error;

/// Turning a reminder category off: cancel and remove every alarm with that
/// offset. Works purely on the local store, no remote fetch involved.
#[derive(Debug)]
pub struct DisableOffsetAlarmsUseCase {
    pub offset: ReminderOffset,
}

#[derive(Debug)]
pub enum UseCaseError {
    AlarmStoreUnavailable,
}

impl From<UseCaseError> for NotifierError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait]
impl UseCase for DisableOffsetAlarmsUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "DisableOffsetAlarms";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let alarms = ctx.repos.alarms.find_all().await.map_err(|e| {
            error!("Unable to read local alarms. Err: {:?}", e);
            UseCaseError::AlarmStoreUnavailable
        })?;

        let mut removed = 0;
        for alarm in alarms.into_iter().filter(|a| a.offset == self.offset) {
            if let Err(e) = ctx.wake_scheduler.cancel(&alarm.scheduler_key()).await {
                error!("Unable to cancel wake for alarm {}. Err: {:?}", alarm.id, e);
                continue;
            }
            if ctx.repos.alarms.delete(&alarm.id).await.is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
