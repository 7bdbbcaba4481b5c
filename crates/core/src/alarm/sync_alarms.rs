use crate::error::NotifierError;
use crate::shared::usecase::UseCase;
use klubbhus_notifier_domain::{diff_alarms, AlarmDiff, ClubEvent, ReminderOffset, ID};
use klubbhus_notifier_infra::NotifierContext;
use tracing::{error, info, warn};

/// Reconciles the local alarm table and the armed wakes with the events the
/// user should currently be reminded about.
///
/// The remote event set is fetched once; a failed fetch abandons the whole
/// pass so stale data is never partially applied. Per-row store or scheduler
/// failures only skip that row.
#[derive(Debug)]
pub struct SyncAlarmsUseCase {
    pub user_id: ID,
}

#[derive(Debug, Default, PartialEq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    EventFetchFailed,
    AlarmStoreUnavailable,
}

impl From<UseCaseError> for NotifierError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

pub async fn enabled_offsets(ctx: &NotifierContext) -> Vec<ReminderOffset> {
    let mut offsets = Vec::new();
    for offset in &[ReminderOffset::OneHour, ReminderOffset::OneDay] {
        let enabled = ctx
            .repos
            .preferences
            .get_bool(offset.channel().pref_key())
            .await
            .unwrap_or(true);
        if enabled {
            offsets.push(*offset);
        }
    }
    offsets
}

async fn apply_diff(diff: AlarmDiff, report: &mut SyncReport, ctx: &NotifierContext) {
    for alarm in diff.to_delete {
        if let Err(e) = ctx.wake_scheduler.cancel(&alarm.scheduler_key()).await {
            error!("Unable to cancel wake for alarm {}. Err: {:?}", alarm.id, e);
            continue;
        }
        if ctx.repos.alarms.delete(&alarm.id).await.is_none() {
            warn!("Alarm {} was already removed from the local store", alarm.id);
        }
        report.deleted += 1;
    }

    for alarm in diff.to_create {
        if let Err(e) = ctx.repos.alarms.insert(&alarm).await {
            error!(
                "Unable to store alarm for event {}, skipping it. Err: {:?}",
                alarm.event_id, e
            );
            continue;
        }
        if let Err(e) = ctx
            .wake_scheduler
            .schedule(&alarm.scheduler_key(), alarm.remind_at(), &alarm.wake_payload())
            .await
        {
            // The row exists but will not fire; the next pass retries nothing
            // here, the wake is simply lost for this event
            error!("Unable to arm wake for alarm {}. Err: {:?}", alarm.id, e);
            continue;
        }
        report.created += 1;
    }

    for alarm in diff.to_update {
        if let Err(e) = ctx.wake_scheduler.cancel(&alarm.scheduler_key()).await {
            error!("Unable to cancel wake for alarm {}. Err: {:?}", alarm.id, e);
            continue;
        }
        if let Err(e) = ctx.repos.alarms.save(&alarm).await {
            error!("Unable to update alarm {}, skipping it. Err: {:?}", alarm.id, e);
            continue;
        }
        if let Err(e) = ctx
            .wake_scheduler
            .schedule(&alarm.scheduler_key(), alarm.remind_at(), &alarm.wake_payload())
            .await
        {
            error!("Unable to rearm wake for alarm {}. Err: {:?}", alarm.id, e);
            continue;
        }
        report.updated += 1;
    }
}

#[async_trait::async_trait]
impl UseCase for SyncAlarmsUseCase {
    type Response = SyncReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncAlarms";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let events = ctx.repos.events.find_all().await.map_err(|e| {
            error!("Unable to fetch events, abandoning alarm sync. Err: {:?}", e);
            UseCaseError::EventFetchFailed
        })?;
        let relevant: Vec<ClubEvent> = events
            .into_iter()
            .filter(|e| e.is_relevant_for(&self.user_id, now))
            .collect();

        let alarms = ctx.repos.alarms.find_all().await.map_err(|e| {
            error!("Unable to read local alarms, abandoning alarm sync. Err: {:?}", e);
            UseCaseError::AlarmStoreUnavailable
        })?;

        let mut report = SyncReport::default();
        for offset in enabled_offsets(ctx).await {
            let diff = diff_alarms(&relevant, &alarms, offset);
            apply_diff(diff, &mut report, ctx).await;
        }

        info!(
            "Alarm sync for user {}: {} created, {} updated, {} deleted",
            self.user_id, report.created, report.updated, report.deleted
        );
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use klubbhus_notifier_domain::{Alarm, NotificationChannel};
    use klubbhus_notifier_infra::{IEventRepo, ISys, InMemoryWakeScheduler, NotifierContext};
    use std::sync::Arc;

    const NOW: i64 = 1613862000000;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    struct TestContext {
        ctx: NotifierContext,
        scheduler: Arc<InMemoryWakeScheduler>,
        user_id: ID,
    }

    async fn setup() -> TestContext {
        let mut ctx = NotifierContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let scheduler = Arc::new(InMemoryWakeScheduler::new());
        ctx.wake_scheduler = scheduler.clone();

        TestContext {
            ctx,
            scheduler,
            user_id: ID::new(),
        }
    }

    fn future_event(participants: Vec<ID>, start_ts: i64) -> ClubEvent {
        ClubEvent {
            id: Default::default(),
            title: "Spring tournament".into(),
            start_ts,
            club_id: Default::default(),
            participants,
            likers: Vec::new(),
            admins: Vec::new(),
            created: NOW,
            updated: NOW,
        }
    }

    async fn set_channel(ctx: &NotifierContext, channel: NotificationChannel, enabled: bool) {
        ctx.repos
            .preferences
            .set_bool(channel.pref_key(), enabled)
            .await
            .unwrap();
    }

    async fn stored_alarms(ctx: &NotifierContext) -> Vec<Alarm> {
        ctx.repos.alarms.find_all().await.unwrap()
    }

    #[tokio::test]
    async fn arms_one_hour_alarm_and_updates_it_when_event_moves() {
        let TestContext {
            ctx,
            scheduler,
            user_id,
        } = setup().await;
        set_channel(&ctx, NotificationChannel::ReminderOneHour, true).await;
        set_channel(&ctx, NotificationChannel::ReminderOneDay, false).await;

        let event = future_event(vec![user_id.clone()], NOW + 1000 * 60 * 60 * 2);
        ctx.repos.events.insert(&event).await.unwrap();

        let report = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report, SyncReport { created: 1, updated: 0, deleted: 0 });

        let alarms = stored_alarms(&ctx).await;
        assert_eq!(alarms.len(), 1);
        assert_eq!(alarms[0].event_id, event.id);
        assert_eq!(alarms[0].offset, ReminderOffset::OneHour);
        let armed = scheduler.armed_for(&alarms[0].scheduler_key()).unwrap();
        assert_eq!(armed.fire_at, NOW + 1000 * 60 * 60);

        // The event gets postponed to only 30 minutes from now; the same
        // alarm row is moved, not duplicated, and now points into the past
        let mut moved = event.clone();
        moved.start_ts = NOW + 1000 * 60 * 30;
        ctx.repos.events.save(&moved).await.unwrap();

        let report = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report, SyncReport { created: 0, updated: 1, deleted: 0 });

        let alarms_after = stored_alarms(&ctx).await;
        assert_eq!(alarms_after.len(), 1);
        assert_eq!(alarms_after[0].id, alarms[0].id);
        let armed = scheduler.armed_for(&alarms_after[0].scheduler_key()).unwrap();
        assert_eq!(armed.fire_at, NOW - 1000 * 60 * 30);
    }

    #[tokio::test]
    async fn second_sync_without_remote_changes_does_nothing() {
        let TestContext {
            ctx,
            scheduler,
            user_id,
        } = setup().await;

        let event = future_event(vec![user_id.clone()], NOW + 1000 * 60 * 60 * 48);
        ctx.repos.events.insert(&event).await.unwrap();

        execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        let alarms = stored_alarms(&ctx).await;
        let schedule_calls = scheduler.schedule_calls();
        let cancel_calls = scheduler.cancel_calls();

        let report = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report, SyncReport::default());
        assert_eq!(stored_alarms(&ctx).await, alarms);
        assert_eq!(scheduler.schedule_calls(), schedule_calls);
        assert_eq!(scheduler.cancel_calls(), cancel_calls);
    }

    #[tokio::test]
    async fn keeps_at_most_one_alarm_per_event_and_offset() {
        let TestContext {
            ctx,
            scheduler,
            user_id,
        } = setup().await;

        let event = future_event(vec![user_id.clone()], NOW + 1000 * 60 * 60 * 48);
        ctx.repos.events.insert(&event).await.unwrap();

        for _ in 0..3 {
            execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
                .await
                .unwrap();
        }

        // Both offsets enabled by default: one alarm each, never more
        let mut offsets = stored_alarms(&ctx)
            .await
            .into_iter()
            .map(|a| {
                assert_eq!(a.event_id, event.id);
                a.offset
            })
            .collect::<Vec<_>>();
        offsets.sort_by_key(|o| o.delta_millis());
        assert_eq!(offsets, vec![ReminderOffset::OneHour, ReminderOffset::OneDay]);
        assert_eq!(scheduler.armed_count(), 2);
    }

    #[tokio::test]
    async fn deletes_alarms_when_user_no_longer_attends() {
        let TestContext {
            ctx,
            scheduler,
            user_id,
        } = setup().await;
        set_channel(&ctx, NotificationChannel::ReminderOneDay, false).await;

        let event = future_event(vec![user_id.clone()], NOW + 1000 * 60 * 60 * 48);
        ctx.repos.events.insert(&event).await.unwrap();
        execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(scheduler.armed_count(), 1);

        let mut left = event.clone();
        left.participants = Vec::new();
        ctx.repos.events.save(&left).await.unwrap();

        let report = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report, SyncReport { created: 0, updated: 0, deleted: 1 });
        assert!(stored_alarms(&ctx).await.is_empty());
        assert_eq!(scheduler.armed_count(), 0);
    }

    #[tokio::test]
    async fn past_events_never_get_alarms() {
        let TestContext { ctx, scheduler, user_id } = setup().await;

        let event = future_event(vec![user_id.clone()], NOW - 1);
        ctx.repos.events.insert(&event).await.unwrap();

        let report = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        assert_eq!(report, SyncReport::default());
        assert!(stored_alarms(&ctx).await.is_empty());
        assert_eq!(scheduler.armed_count(), 0);
    }

    struct FailingEventRepo;

    #[async_trait::async_trait]
    impl IEventRepo for FailingEventRepo {
        async fn insert(&self, _e: &ClubEvent) -> anyhow::Result<()> {
            Ok(())
        }
        async fn save(&self, _e: &ClubEvent) -> anyhow::Result<()> {
            Ok(())
        }
        async fn find(&self, _event_id: &ID) -> Option<ClubEvent> {
            None
        }
        async fn find_all(&self) -> anyhow::Result<Vec<ClubEvent>> {
            Err(anyhow::Error::msg("connection reset"))
        }
        async fn find_by_admin(&self, _user_id: &ID) -> anyhow::Result<Vec<ClubEvent>> {
            Ok(Vec::new())
        }
        async fn delete(&self, _event_id: &ID) -> Option<ClubEvent> {
            None
        }
    }

    #[tokio::test]
    async fn abandons_whole_pass_when_event_fetch_fails() {
        let TestContext {
            mut ctx,
            scheduler,
            user_id,
        } = setup().await;

        // An alarm armed by an earlier pass must survive a failed fetch
        let event = future_event(vec![user_id.clone()], NOW + 1000 * 60 * 60 * 48);
        ctx.repos.events.insert(&event).await.unwrap();
        execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx)
            .await
            .unwrap();
        let alarms_before = stored_alarms(&ctx).await;
        let schedule_calls = scheduler.schedule_calls();

        ctx.repos.events = Arc::new(FailingEventRepo);
        let res = execute(SyncAlarmsUseCase { user_id: user_id.clone() }, &ctx).await;
        assert!(res.is_err());
        assert_eq!(stored_alarms(&ctx).await, alarms_before);
        assert_eq!(scheduler.schedule_calls(), schedule_calls);
    }
}
