use std::{sync::Arc, time::Instant};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    dispatch::throttle::{CooldownStore, RateLimitStore},
    error::AppError,
};

/// Every 30 seconds.
const SWEEP_SCHEDULE: &str = "*/30 * * * * *";

/// Starts the throttle sweeper
///
/// Expired cooldowns and finished rate-limit windows are also cleared lazily when
/// their key is checked again; this job removes the ones that never are, so no
/// entry outlives its expiry by more than one sweep interval.
///
/// # Arguments
/// - `cooldowns`: Cooldown store shared with the dispatcher
/// - `rate_limits`: Rate-limit store shared with the dispatcher
pub async fn start_scheduler(
    cooldowns: Arc<CooldownStore>,
    rate_limits: Arc<RateLimitStore>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(SWEEP_SCHEDULE, move |_uuid, _lock| {
        let cooldowns = cooldowns.clone();
        let rate_limits = rate_limits.clone();

        Box::pin(async move {
            sweep(&cooldowns, &rate_limits, Instant::now()).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Throttle sweeper started");

    Ok(scheduler)
}

/// Removes every expired entry from both stores, returning how many were removed.
pub async fn sweep(cooldowns: &CooldownStore, rate_limits: &RateLimitStore, now: Instant) -> usize {
    let removed = cooldowns.sweep(now).await + rate_limits.sweep(now).await;

    if removed > 0 {
        tracing::debug!("Swept {} expired throttle entries", removed);
    }

    removed
}
