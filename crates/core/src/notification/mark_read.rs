use crate::error::NotifierError;
use crate::shared::usecase::UseCase;
use klubbhus_notifier_domain::ID;
use klubbhus_notifier_infra::NotifierContext;
use tracing::error;

/// Marks a single notification as read by the user. Safe to repeat.
#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub notification_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for NotifierError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for MarkNotificationReadUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .mark_read(&self.notification_id, &self.user_id)
            .await
            .map_err(|_| UseCaseError::NotFound(self.notification_id.clone()))
    }
}

/// Bulk variant used by "mark all as read". A record that fails to update is
/// logged and skipped so the rest of the batch still completes.
#[derive(Debug)]
pub struct MarkAllReadUseCase {
    pub notification_ids: Vec<ID>,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum MarkAllReadError {}

#[async_trait::async_trait]
impl UseCase for MarkAllReadUseCase {
    type Response = usize;

    type Error = MarkAllReadError;

    const NAME: &'static str = "MarkAllRead";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let mut marked = 0;
        for notification_id in &self.notification_ids {
            match ctx
                .repos
                .notifications
                .mark_read(notification_id, &self.user_id)
                .await
            {
                Ok(_) => marked += 1,
                Err(e) => {
                    error!(
                        "Unable to mark notification {} as read, skipping it. Err: {:?}",
                        notification_id, e
                    );
                }
            }
        }
        Ok(marked)
    }
}
