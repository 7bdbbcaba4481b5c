use futures::future;
use klubbhus_notifier_domain::{Notification, NotificationType, ID};
use klubbhus_notifier_infra::NotifierContext;
use tracing::error;

/// The parent entities the category predicates are evaluated against: the
/// clubs the user belongs to, the clubs and events the user administers.
pub(crate) struct CategoryScope {
    pub member_clubs: Vec<ID>,
    pub admin_clubs: Vec<ID>,
    pub admin_events: Vec<ID>,
}

fn ok_or_empty<T>(res: anyhow::Result<Vec<T>>, what: &str) -> Vec<T> {
    match res {
        Ok(items) => items,
        Err(e) => {
            error!("Unable to fetch {}. Err: {:?}", what, e);
            Vec::new()
        }
    }
}

pub(crate) async fn load_scope(user_id: &ID, ctx: &NotifierContext) -> CategoryScope {
    let (member_clubs, admin_clubs, admin_events) = future::join3(
        ctx.repos.clubs.find_by_member(user_id),
        ctx.repos.clubs.find_by_admin(user_id),
        ctx.repos.events.find_by_admin(user_id),
    )
    .await;

    CategoryScope {
        member_clubs: ok_or_empty(member_clubs, "member clubs")
            .into_iter()
            .map(|c| c.id)
            .collect(),
        admin_clubs: ok_or_empty(admin_clubs, "administered clubs")
            .into_iter()
            .map(|c| c.id)
            .collect(),
        admin_events: ok_or_empty(admin_events, "administered events")
            .into_iter()
            .map(|e| e.id)
            .collect(),
    }
}

/// The categories whose channel the user has not switched off. A channel
/// without a stored preference counts as enabled.
pub(crate) async fn enabled_types(ctx: &NotifierContext) -> Vec<NotificationType> {
    let mut enabled = Vec::new();
    for t in NotificationType::all().iter() {
        let on = ctx
            .repos
            .preferences
            .get_bool(t.channel().pref_key())
            .await
            .unwrap_or(true);
        if on {
            enabled.push(*t);
        }
    }
    enabled
}

/// Fetches one category. A category whose parent set is empty short-circuits
/// without touching the remote store; a failed fetch degrades to an empty
/// list so the other categories still aggregate.
pub(crate) async fn fetch_category(
    t: NotificationType,
    user_id: &ID,
    scope: &CategoryScope,
    ctx: &NotifierContext,
) -> Vec<Notification> {
    let notifications = &ctx.repos.notifications;
    let res = match t {
        NotificationType::EventCreated | NotificationType::NewsClub => {
            if scope.member_clubs.is_empty() {
                return Vec::new();
            }
            notifications
                .find_by_type_for_clubs(t, &scope.member_clubs)
                .await
        }
        NotificationType::NewsGeneral => notifications.find_by_type(t).await,
        NotificationType::ClubRequestPending => {
            if scope.admin_clubs.is_empty() {
                return Vec::new();
            }
            notifications
                .find_by_type_for_clubs(t, &scope.admin_clubs)
                .await
        }
        NotificationType::EventRequestPending => {
            if scope.admin_events.is_empty() {
                return Vec::new();
            }
            notifications
                .find_by_type_for_events(t, &scope.admin_events)
                .await
        }
        NotificationType::ClubRequestAccepted | NotificationType::EventRequestAccepted => {
            notifications.find_by_type_for_user(t, user_id).await
        }
    };

    match res {
        Ok(items) => items,
        Err(e) => {
            error!("Unable to fetch {:?} notifications. Err: {:?}", t, e);
            Vec::new()
        }
    }
}

/// Union of all enabled categories for the user, fetched concurrently and
/// joined by category. Unsorted; callers decide the ranking.
pub(crate) async fn fetch_relevant(user_id: &ID, ctx: &NotifierContext) -> Vec<Notification> {
    let enabled = enabled_types(ctx).await;
    if enabled.is_empty() {
        return Vec::new();
    }

    let scope = load_scope(user_id, ctx).await;
    let fetches = enabled
        .into_iter()
        .map(|t| fetch_category(t, user_id, &scope, ctx))
        .collect::<Vec<_>>();

    future::join_all(fetches)
        .await
        .into_iter()
        .flatten()
        .collect()
}
