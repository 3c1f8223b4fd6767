//! Cooldown and rate-limit stores.
//!
//! Both stores are shared by every concurrent dispatch. Each check-and-update runs
//! under the store's lock, so a single key is never admitted twice by a race.
//! Expired entries are removed lazily on the next check for their key and in bulk by
//! the throttle sweeper job.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::dispatch::descriptor::{RateLimit, MAX_THROTTLE_DURATION};

/// When an entry started at `now` for `duration` expires, capped at the longest
/// supported throttle.
fn expiry(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration.min(MAX_THROTTLE_DURATION)).unwrap_or(now)
}

/// Identifies one throttled (handler, qualifier, subject) combination.
///
/// The qualifier is the matched custom ID for component handlers and `global`
/// otherwise. The subject is the actor ID for cooldowns and `<scope>-<id>` for rate
/// limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThrottleKey {
    pub handler: String,
    pub qualifier: String,
    pub subject: String,
}

impl ThrottleKey {
    pub fn new(handler: &str, qualifier: &str, subject: impl Into<String>) -> Self {
        Self {
            handler: handler.to_string(),
            qualifier: qualifier.to_string(),
            subject: subject.into(),
        }
    }
}

#[derive(Default)]
pub struct CooldownStore {
    entries: Mutex<HashMap<ThrottleKey, Instant>>,
}

impl CooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remaining wait if `key` is cooling down, otherwise starts a new
    /// cooldown of `duration` and returns `None`.
    pub async fn check_and_set(
        &self,
        key: ThrottleKey,
        duration: Duration,
        now: Instant,
    ) -> Option<Duration> {
        let mut entries = self.entries.lock().await;

        if let Some(expires_at) = entries.get(&key) {
            if now < *expires_at {
                return Some(*expires_at - now);
            }
        }

        entries.insert(key, expiry(now, duration));
        None
    }

    /// Removes entries that expired at or before `now`, returning how many were removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

#[derive(Default)]
pub struct RateLimitStore {
    entries: Mutex<HashMap<ThrottleKey, Window>>,
}

impl RateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one use against `key`, or returns the time until the window resets if
    /// the limit is already reached.
    ///
    /// A window opens on the first use and resets lazily once `now` passes it.
    pub async fn check(&self, key: ThrottleKey, limit: &RateLimit, now: Instant) -> Option<Duration> {
        let mut entries = self.entries.lock().await;

        let window = entries.entry(key).or_insert(Window {
            count: 0,
            reset_at: expiry(now, limit.window),
        });

        if now >= window.reset_at {
            window.count = 0;
            window.reset_at = expiry(now, limit.window);
        }

        if window.count >= limit.max {
            return Some(window.reset_at - now);
        }

        window.count += 1;
        None
    }

    /// Removes windows that ended at or before `now`, returning how many were removed.
    pub async fn sweep(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, window| window.reset_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::descriptor::RateLimitScope;

    fn key(subject: &str) -> ThrottleKey {
        ThrottleKey::new("ping", "global", subject)
    }

    fn limit(max: u32, window_ms: u64) -> RateLimit {
        RateLimit {
            max,
            window: Duration::from_millis(window_ms),
            scope: RateLimitScope::User,
        }
    }

    #[tokio::test]
    async fn cooldown_blocks_until_expiry() {
        let store = CooldownStore::new();
        let start = Instant::now();
        let cooldown = Duration::from_secs(3);

        assert!(store.check_and_set(key("1"), cooldown, start).await.is_none());

        let remaining = store
            .check_and_set(key("1"), cooldown, start + Duration::from_secs(1))
            .await;
        assert_eq!(remaining, Some(Duration::from_secs(2)));

        let after = store
            .check_and_set(key("1"), cooldown, start + Duration::from_secs(3))
            .await;
        assert!(after.is_none());
    }

    #[tokio::test]
    async fn cooldown_is_per_subject() {
        let store = CooldownStore::new();
        let now = Instant::now();

        assert!(store.check_and_set(key("1"), Duration::from_secs(3), now).await.is_none());
        assert!(store.check_and_set(key("2"), Duration::from_secs(3), now).await.is_none());
    }

    #[tokio::test]
    async fn rate_limit_rejects_after_max_and_resets() {
        let store = RateLimitStore::new();
        let limit = limit(3, 1000);
        let start = Instant::now();

        for offset in 0..3 {
            let now = start + Duration::from_millis(offset * 100);
            assert!(store.check(key("1"), &limit, now).await.is_none());
        }

        let rejected = store
            .check(key("1"), &limit, start + Duration::from_millis(400))
            .await;
        assert_eq!(rejected, Some(Duration::from_millis(600)));

        let reset = store
            .check(key("1"), &limit, start + Duration::from_millis(1000))
            .await;
        assert!(reset.is_none());
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_entries() {
        let cooldowns = CooldownStore::new();
        let rate_limits = RateLimitStore::new();
        let now = Instant::now();

        cooldowns.check_and_set(key("1"), Duration::from_secs(1), now).await;
        cooldowns.check_and_set(key("2"), Duration::from_secs(10), now).await;
        rate_limits.check(key("1"), &limit(1, 1000), now).await;

        let later = now + Duration::from_secs(2);
        assert_eq!(cooldowns.sweep(later).await, 1);
        assert_eq!(cooldowns.len().await, 1);
        assert_eq!(rate_limits.sweep(later).await, 1);
        assert_eq!(rate_limits.len().await, 0);
    }

    #[tokio::test]
    async fn oversized_durations_are_capped() {
        let cooldowns = CooldownStore::new();
        let rate_limits = RateLimitStore::new();
        let now = Instant::now();
        let forever = RateLimit {
            max: 1,
            window: Duration::MAX,
            scope: RateLimitScope::User,
        };

        assert!(cooldowns.check_and_set(key("1"), Duration::MAX, now).await.is_none());
        let remaining = cooldowns.check_and_set(key("1"), Duration::MAX, now).await;
        assert_eq!(remaining, Some(MAX_THROTTLE_DURATION));

        assert!(rate_limits.check(key("1"), &forever, now).await.is_none());
        let retry_after = rate_limits.check(key("1"), &forever, now).await;
        assert_eq!(retry_after, Some(MAX_THROTTLE_DURATION));
    }
}
