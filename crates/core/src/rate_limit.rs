//! Fixed-window request rate limiting (PRD-31).
//!
//! Bounds how often a given actor may invoke a sensitive action (e.g.
//! document submission) within a rolling window. Keys are caller-constructed
//! (e.g. `"submit:" + email`) and the caller is responsible for prefixing
//! them per action so distinct rate-limit domains cannot collide.
//!
//! State is in-memory and process-local: the hosting application constructs
//! one limiter at startup and shares it via `Arc`. Counters live for the
//! process lifetime; there is no expiry sweep. The clock is injected so
//! window-expiry behaviour is deterministically testable.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the current wall-clock time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Production clock backed by [`SystemTime`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Counter state for one key.
///
/// `count` only grows within `[window start, reset_at_ms]`; it restarts at 1
/// on the first call strictly after `reset_at_ms`.
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    reset_at_ms: i64,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Slots left in the current window after this call.
    pub remaining: u64,
    /// Seconds until the window resets; present only on rejected calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
}

/// Fixed-window rate limiter keyed by caller-supplied identifiers.
///
/// The read-compare-write sequence for a key runs as one critical section
/// under a single mutex, so two concurrent callers cannot both take the
/// last slot. Each call is O(1) and never suspends.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    clock: Box<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter with the given clock.
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock: Box::new(clock),
        }
    }

    /// Create a limiter backed by the system wall clock.
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    /// Count a request against `key` and decide whether to admit it.
    ///
    /// The first call for a key (or the first call after its window has
    /// expired) starts a fresh window of `window_ms` with `count = 1`. A
    /// call at the exact reset instant still belongs to the old window.
    /// Rejected calls consume a slot too, so a continuous burst stays
    /// blocked until the window expires instead of re-arming it.
    pub fn check_and_consume(
        &self,
        key: &str,
        limit: u64,
        window_ms: i64,
    ) -> Result<RateLimitDecision, CoreError> {
        if limit == 0 {
            return Err(CoreError::Validation(
                "Rate limit must be greater than zero".to_string(),
            ));
        }
        if window_ms <= 0 {
            return Err(CoreError::Validation(
                "Rate limit window must be greater than zero".to_string(),
            ));
        }

        let now = self.clock.now_millis();
        let mut windows = self.windows.lock();

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at_ms: now + window_ms,
        });

        // Strict comparison: the window is still active at the boundary
        // instant itself.
        if now > window.reset_at_ms {
            window.count = 0;
            window.reset_at_ms = now + window_ms;
        }

        window.count += 1;

        if window.count > limit {
            let remaining_ms = window.reset_at_ms - now;
            Ok(RateLimitDecision {
                allowed: false,
                remaining: 0,
                retry_after_seconds: Some(((remaining_ms + 999) / 1000) as u64),
            })
        } else {
            Ok(RateLimitDecision {
                allowed: true,
                remaining: limit - window.count,
                retry_after_seconds: None,
            })
        }
    }

    /// Forget all state for `key`; the next call behaves as first-ever.
    pub fn clear(&self, key: &str) {
        self.windows.lock().remove(key);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
