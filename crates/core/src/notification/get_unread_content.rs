use super::fetch::fetch_relevant;
use crate::shared::usecase::UseCase;
use futures::future;
use klubbhus_notifier_domain::{Notification, NotificationContent, NotificationType, ID};
use klubbhus_notifier_infra::NotifierContext;

/// The unread subset of the user's relevant notifications, rendered into
/// display-ready content and ranked newest first.
///
/// Rendering joins each record with the entity it references. A record whose
/// entity is gone renders to nothing and is dropped; so is a new-event record
/// whose event already started.
#[derive(Debug)]
pub struct GetUnreadContentUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

async fn render_content(
    n: &Notification,
    now: i64,
    ctx: &NotifierContext,
) -> Option<NotificationContent> {
    let (title, body, target_route) = match n.notification_type {
        NotificationType::EventCreated => {
            let event = ctx.repos.events.find(n.event_id.as_ref()?).await?;
            if event.start_ts < now {
                return None;
            }
            let club = ctx.repos.clubs.find(&event.club_id).await?;
            (
                format!("New event in {}", club.name),
                event.title.clone(),
                format!("/events/{}", event.id),
            )
        }
        NotificationType::NewsGeneral | NotificationType::NewsClub => {
            let news = ctx.repos.news.find(n.news_id.as_ref()?).await?;
            (news.title.clone(), news.body.clone(), format!("/news/{}", news.id))
        }
        NotificationType::ClubRequestPending => {
            let club = ctx.repos.clubs.find(n.club_id.as_ref()?).await?;
            let user = ctx.repos.users.find(n.user_id.as_ref()?).await?;
            (
                format!("Membership request for {}", club.name),
                format!("{} wants to join", user.name),
                format!("/clubs/{}/requests", club.id),
            )
        }
        NotificationType::ClubRequestAccepted => {
            let club = ctx.repos.clubs.find(n.club_id.as_ref()?).await?;
            (
                "Membership accepted".to_string(),
                format!("You are now a member of {}", club.name),
                format!("/clubs/{}", club.id),
            )
        }
        NotificationType::EventRequestPending => {
            let event = ctx.repos.events.find(n.event_id.as_ref()?).await?;
            let user = ctx.repos.users.find(n.user_id.as_ref()?).await?;
            (
                format!("Participation request for {}", event.title),
                format!("{} wants to participate", user.name),
                format!("/events/{}/requests", event.id),
            )
        }
        NotificationType::EventRequestAccepted => {
            let event = ctx.repos.events.find(n.event_id.as_ref()?).await?;
            (
                "Participation accepted".to_string(),
                format!("You are signed up for {}", event.title),
                format!("/events/{}", event.id),
            )
        }
    };

    Some(NotificationContent {
        id: n.id.clone(),
        title,
        body,
        category: n.notification_type,
        target_route,
        date: n.time,
    })
}

#[async_trait::async_trait]
impl UseCase for GetUnreadContentUseCase {
    type Response = Vec<NotificationContent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUnreadContent";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let unread = fetch_relevant(&self.user_id, ctx)
            .await
            .into_iter()
            .filter(|n| !n.is_read_by(&self.user_id))
            .collect::<Vec<_>>();

        let now = ctx.sys.get_timestamp_millis();
        let rendered = future::join_all(unread.iter().map(|n| render_content(n, now, ctx))).await;

        let mut content = rendered.into_iter().flatten().collect::<Vec<_>>();
        content.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(content)
    }
}
