use super::fetch::fetch_relevant;
use crate::shared::usecase::UseCase;
use klubbhus_notifier_domain::{Notification, ID};
use klubbhus_notifier_infra::NotifierContext;

/// All notification records relevant for the user under the enabled channels,
/// newest first. Read records are included; the unread subset is served by
/// `GetUnreadContentUseCase`.
#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let mut all = fetch_relevant(&self.user_id, ctx).await;
        all.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(all)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use klubbhus_notifier_domain::{Club, Notification, NotificationChannel, NotificationType};

    async fn insert_club_with_member(ctx: &NotifierContext, user_id: &ID) -> Club {
        let club = Club {
            id: Default::default(),
            name: "Chess club".into(),
            members: vec![user_id.clone()],
            admins: Vec::new(),
        };
        ctx.repos.clubs.insert(&club).await.unwrap();
        club
    }

    #[tokio::test]
    async fn unions_enabled_categories_newest_first() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();
        let club = insert_club_with_member(&ctx, &user_id).await;

        let general = Notification::new(NotificationType::NewsGeneral, 10);
        let mut club_news = Notification::new(NotificationType::NewsClub, 30);
        club_news.club_id = Some(club.id.clone());
        let mut accepted = Notification::new(NotificationType::ClubRequestAccepted, 20);
        accepted.user_id = Some(user_id.clone());
        accepted.club_id = Some(club.id.clone());
        for n in &[&general, &club_news, &accepted] {
            ctx.repos.notifications.insert(n).await.unwrap();
        }

        let res = execute(GetNotificationsUseCase { user_id }, &ctx)
            .await
            .unwrap();
        let ids = res.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids, vec![club_news.id, accepted.id, general.id]);
    }

    #[tokio::test]
    async fn skips_disabled_channels() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();
        insert_club_with_member(&ctx, &user_id).await;

        ctx.repos
            .preferences
            .set_bool(NotificationChannel::GeneralNews.pref_key(), false)
            .await
            .unwrap();
        let general = Notification::new(NotificationType::NewsGeneral, 10);
        ctx.repos.notifications.insert(&general).await.unwrap();

        let res = execute(GetNotificationsUseCase { user_id }, &ctx)
            .await
            .unwrap();
        assert!(res.is_empty());
    }

    #[tokio::test]
    async fn club_scoped_categories_only_cover_own_clubs() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();
        let club = insert_club_with_member(&ctx, &user_id).await;

        let mut own = Notification::new(NotificationType::EventCreated, 10);
        own.club_id = Some(club.id.clone());
        own.event_id = Some(ID::new());
        let mut foreign = Notification::new(NotificationType::EventCreated, 20);
        foreign.club_id = Some(ID::new());
        foreign.event_id = Some(ID::new());
        for n in &[&own, &foreign] {
            ctx.repos.notifications.insert(n).await.unwrap();
        }

        let res = execute(GetNotificationsUseCase { user_id }, &ctx)
            .await
            .unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, own.id);
    }

    #[tokio::test]
    async fn admin_categories_require_administered_parents() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();

        // A pending membership request exists but the user administers no
        // club, so the category short-circuits to nothing
        let mut pending = Notification::new(NotificationType::ClubRequestPending, 10);
        pending.club_id = Some(ID::new());
        pending.user_id = Some(ID::new());
        ctx.repos.notifications.insert(&pending).await.unwrap();

        let res = execute(GetNotificationsUseCase { user_id }, &ctx)
            .await
            .unwrap();
        assert!(res.is_empty());
    }
}
