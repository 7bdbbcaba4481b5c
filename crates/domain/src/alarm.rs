use crate::event::ClubEvent;
use crate::notification::NotificationChannel;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How long before an event's start a reminder alarm should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderOffset {
    OneHour,
    OneDay,
}

impl ReminderOffset {
    pub fn delta_millis(&self) -> i64 {
        match self {
            Self::OneHour => 1000 * 60 * 60,
            Self::OneDay => 1000 * 60 * 60 * 24,
        }
    }

    /// Short tag used inside wake scheduler keys
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::OneDay => "1d",
        }
    }

    pub fn channel(&self) -> NotificationChannel {
        match self {
            Self::OneHour => NotificationChannel::ReminderOneHour,
            Self::OneDay => NotificationChannel::ReminderOneDay,
        }
    }
}

/// A locally stored reminder alarm for a single `(event, offset)` pair.
///
/// The event title and start time are denormalized into the alarm so a fired
/// wake can present the event without a remote fetch. They are refreshed on
/// every reconciliation pass when the remote event has changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: ID,
    pub event_id: ID,
    pub event_start_ts: i64,
    pub event_title: String,
    pub offset: ReminderOffset,
}

impl Alarm {
    pub fn new(event: &ClubEvent, offset: ReminderOffset) -> Self {
        Self {
            id: Default::default(),
            event_id: event.id.clone(),
            event_start_ts: event.start_ts,
            event_title: event.title.clone(),
            offset,
        }
    }

    /// The timestamp in millis at which the wake should fire
    pub fn remind_at(&self) -> i64 {
        self.event_start_ts - self.offset.delta_millis()
    }

    /// Key identifying this alarm towards the wake scheduler. Stable across
    /// updates of the same alarm row, so re-arming replaces the old wake.
    pub fn scheduler_key(&self) -> String {
        format!("{}:{}", self.id, self.offset.tag())
    }

    /// Same alarm row, refreshed with the event's current title and start
    pub fn with_event(&self, event: &ClubEvent) -> Self {
        Self {
            id: self.id.clone(),
            event_id: self.event_id.clone(),
            event_start_ts: event.start_ts,
            event_title: event.title.clone(),
            offset: self.offset,
        }
    }

    pub fn matches(&self, event: &ClubEvent) -> bool {
        self.event_start_ts == event.start_ts && self.event_title == event.title
    }

    pub fn wake_payload(&self) -> WakePayload {
        WakePayload {
            event_id: self.event_id.clone(),
            event_title: self.event_title.clone(),
            event_start_ts: self.event_start_ts,
            offset: self.offset,
        }
    }
}

impl Entity for Alarm {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Payload armed together with a wake and handed back when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WakePayload {
    pub event_id: ID,
    pub event_title: String,
    pub event_start_ts: i64,
    pub offset: ReminderOffset,
}

/// The minimal set of actions that makes the stored alarms for one offset
/// consistent with the currently relevant events.
#[derive(Debug, Default)]
pub struct AlarmDiff {
    pub to_delete: Vec<Alarm>,
    pub to_create: Vec<Alarm>,
    pub to_update: Vec<Alarm>,
}

impl AlarmDiff {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_create.is_empty() && self.to_update.is_empty()
    }
}

/// Diffs the stored alarms with the given offset against the relevant events.
///
/// - an alarm whose event is no longer relevant is deleted
/// - a relevant event without an alarm at this offset gets a new one
/// - an alarm whose event changed title or start time is updated in place,
///   keeping its id so the armed wake is replaced instead of duplicated
pub fn diff_alarms(relevant: &[ClubEvent], alarms: &[Alarm], offset: ReminderOffset) -> AlarmDiff {
    let events_by_id: HashMap<&ID, &ClubEvent> = relevant.iter().map(|e| (&e.id, e)).collect();

    let mut diff = AlarmDiff::default();
    let mut covered_events = Vec::new();
    for alarm in alarms.iter().filter(|a| a.offset == offset) {
        match events_by_id.get(&alarm.event_id) {
            None => diff.to_delete.push(alarm.clone()),
            Some(event) => {
                covered_events.push(alarm.event_id.clone());
                if !alarm.matches(event) {
                    diff.to_update.push(alarm.with_event(event));
                }
            }
        }
    }

    for event in relevant {
        if !covered_events.contains(&event.id) {
            diff.to_create.push(Alarm::new(event, offset));
        }
    }

    diff
}

#[cfg(test)]
mod test {
    use super::*;

    fn event(title: &str, start_ts: i64) -> ClubEvent {
        ClubEvent {
            id: Default::default(),
            title: title.into(),
            start_ts,
            club_id: Default::default(),
            participants: Vec::new(),
            likers: Vec::new(),
            admins: Vec::new(),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn creates_alarm_for_uncovered_event() {
        let e = event("Quiz night", 1000);
        let diff = diff_alarms(&[e.clone()], &[], ReminderOffset::OneHour);
        assert_eq!(diff.to_create.len(), 1);
        assert!(diff.to_update.is_empty());
        assert!(diff.to_delete.is_empty());
        assert_eq!(diff.to_create[0].event_id, e.id);
        assert_eq!(diff.to_create[0].offset, ReminderOffset::OneHour);
    }

    #[test]
    fn unchanged_event_produces_empty_diff() {
        let e = event("Quiz night", 1000);
        let alarm = Alarm::new(&e, ReminderOffset::OneDay);
        let diff = diff_alarms(&[e], &[alarm], ReminderOffset::OneDay);
        assert!(diff.is_empty());
    }

    #[test]
    fn deletes_alarm_for_dropped_event() {
        let e = event("Quiz night", 1000);
        let alarm = Alarm::new(&e, ReminderOffset::OneHour);
        let diff = diff_alarms(&[], &[alarm.clone()], ReminderOffset::OneHour);
        assert_eq!(diff.to_delete.len(), 1);
        assert_eq!(diff.to_delete[0].id, alarm.id);
        assert!(diff.to_create.is_empty());
    }

    #[test]
    fn updates_alarm_when_event_moved() {
        let mut e = event("Quiz night", 1000);
        let alarm = Alarm::new(&e, ReminderOffset::OneHour);
        e.start_ts = 2000;
        let diff = diff_alarms(&[e.clone()], &[alarm.clone()], ReminderOffset::OneHour);
        assert!(diff.to_create.is_empty());
        assert!(diff.to_delete.is_empty());
        assert_eq!(diff.to_update.len(), 1);
        // Same row, new time: the armed wake is replaced, not duplicated
        assert_eq!(diff.to_update[0].id, alarm.id);
        assert_eq!(diff.to_update[0].event_start_ts, 2000);
    }

    #[test]
    fn ignores_alarms_with_other_offsets() {
        let e = event("Quiz night", 1000);
        let alarm = Alarm::new(&e, ReminderOffset::OneDay);
        let diff = diff_alarms(&[e], &[alarm], ReminderOffset::OneHour);
        // The one day alarm is invisible to the one hour pass
        assert_eq!(diff.to_create.len(), 1);
        assert!(diff.to_delete.is_empty());
    }

    #[test]
    fn remind_at_subtracts_offset() {
        let e = event("Quiz night", 1000 * 60 * 60 * 2);
        let alarm = Alarm::new(&e, ReminderOffset::OneHour);
        assert_eq!(alarm.remind_at(), 1000 * 60 * 60);
    }
}
