mod alarm;
mod club;
mod date;
mod event;
mod news;
mod notification;
mod shared;
mod user;

pub use alarm::{diff_alarms, Alarm, AlarmDiff, ReminderOffset, WakePayload};
pub use club::Club;
pub use date::calendar_date;
pub use event::ClubEvent;
pub use news::NewsEntry;
pub use notification::{
    Alert, Notification, NotificationChannel, NotificationContent, NotificationType,
};
pub use shared::entity::{Entity, ID};
pub use user::User;
