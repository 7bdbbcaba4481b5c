mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    IAlarmRepo, IClubRepo, IEventRepo, INewsRepo, INotificationRepo, IPreferenceRepo, IUserRepo,
    InMemoryAlarmRepo, InMemoryClubRepo, InMemoryEventRepo, InMemoryNewsRepo,
    InMemoryNotificationRepo, InMemoryPreferenceRepo, InMemoryUserRepo, Repos,
};
pub use services::{
    ArmedWake, IAlertSink, IWakeScheduler, InMemoryAlertSink, InMemoryWakeScheduler,
    TracingAlertSink,
};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct NotifierContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub wake_scheduler: Arc<dyn IWakeScheduler>,
    pub alerts: Arc<dyn IAlertSink>,
}

impl NotifierContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            wake_scheduler: Arc::new(InMemoryWakeScheduler::new()),
            alerts: Arc::new(InMemoryAlertSink::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment.
///
/// The remote document store and the OS alarm manager are bound by the host
/// application; the standalone daemon runs against the in-memory stores and
/// delivers alerts through the log.
pub fn setup_context() -> NotifierContext {
    let mut ctx = NotifierContext::create_inmemory();
    ctx.alerts = Arc::new(TracingAlertSink {});
    ctx
}
