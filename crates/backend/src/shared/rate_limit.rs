//! Sliding-window rate limiting for the upload endpoints.
//!
//! Fixed time buckets: a caller's counter lives under the key
//! `{token}_{floor(now / interval)}`, so a new window starts a fresh entry
//! without explicit expiry bookkeeping. State is process-local; a
//! multi-instance deployment under-enforces the limit (documented
//! limitation, see DESIGN.md).

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitOptions {
    /// Window length.
    pub interval: Duration,
    /// Calls allowed per token per window.
    pub max_requests_per_interval: u32,
}

impl Default for RateLimitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            max_requests_per_interval: 10,
        }
    }
}

/// Outcome of one `check` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitOutcome {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Epoch milliseconds at which the caller's current window closes.
    pub reset_ms: u64,
}

#[derive(Debug)]
struct WindowRecord {
    count: u32,
    reset_ms: u64,
}

/// One independent limiter per call site; each owns its own store.
#[derive(Debug)]
pub struct RateLimiter {
    options: RateLimitOptions,
    store: Mutex<HashMap<String, WindowRecord>>,
}

impl RateLimiter {
    pub fn new(options: RateLimitOptions) -> Self {
        Self {
            options,
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Count one call for `token` and report whether it is still within
    /// the window's budget. The call that crosses the limit is counted
    /// too, so sustained hammering keeps the counter pinned above the
    /// limit instead of resetting early.
    pub fn check(&self, token: &str) -> RateLimitOutcome {
        self.check_at(token, now_epoch_ms())
    }

    fn check_at(&self, token: &str, now_ms: u64) -> RateLimitOutcome {
        let interval_ms = self.options.interval.as_millis().max(1) as u64;
        let bucket = now_ms / interval_ms;
        let reset_ms = now_ms.div_ceil(interval_ms) * interval_ms;
        let key = format!("{}_{}", token, bucket);

        let mut store = self
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let count = {
            let record = store
                .entry(key)
                .or_insert(WindowRecord { count: 0, reset_ms });
            record.count += 1;
            record.count
        };

        // Lazy sweep: drop every entry whose window closed more than one
        // full interval ago. Cost is proportional to the store size and
        // paid on each check.
        store.retain(|_, record| record.reset_ms + interval_ms >= now_ms);

        let limit = self.options.max_requests_per_interval;
        RateLimitOutcome {
            success: count <= limit,
            limit,
            remaining: limit.saturating_sub(count),
            reset_ms,
        }
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
