mod telemetry;

use klubbhus_notifier_core::NotifierService;
use klubbhus_notifier_infra::setup_context;
use std::sync::Arc;
use std::time::Duration;
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("klubbhus_notifier".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context();
    let user_id = context.config.daemon_user_id.clone();
    let resync_interval = Duration::from_secs(context.config.resync_interval_secs);

    let service = Arc::new(NotifierService::new(context));
    if let Err(e) = service.start(user_id.clone()) {
        error!("Unable to start notification poller: {:?}", e);
    }

    let resync_service = service.clone();
    let resync_job = tokio::spawn(async move {
        let mut interval = tokio::time::interval(resync_interval);
        loop {
            interval.tick().await;
            if let Err(e) = resync_service.resync(&user_id).await {
                error!("Alarm resync failed, next pass will retry: {:?}", e);
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    resync_job.abort();
    service.stop().await;
    Ok(())
}
