mod alarm;
mod club;
mod event;
mod news;
mod notification;
mod preference;
mod shared;
mod user;

pub use alarm::{IAlarmRepo, InMemoryAlarmRepo};
pub use club::{IClubRepo, InMemoryClubRepo};
pub use event::{IEventRepo, InMemoryEventRepo};
pub use news::{INewsRepo, InMemoryNewsRepo};
pub use notification::{INotificationRepo, InMemoryNotificationRepo};
pub use preference::{IPreferenceRepo, InMemoryPreferenceRepo};
use std::sync::Arc;
pub use user::{IUserRepo, InMemoryUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub clubs: Arc<dyn IClubRepo>,
    pub news: Arc<dyn INewsRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub alarms: Arc<dyn IAlarmRepo>,
    pub preferences: Arc<dyn IPreferenceRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            clubs: Arc::new(InMemoryClubRepo::new()),
            news: Arc::new(InMemoryNewsRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            alarms: Arc::new(InMemoryAlarmRepo::new()),
            preferences: Arc::new(InMemoryPreferenceRepo::new()),
        }
    }
}
