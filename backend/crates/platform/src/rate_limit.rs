//! Login Attempt Tracking
//!
//! Per-client failed-login counter with lockout. State is process-local
//! and in-memory: it does not survive restarts and is not shared across
//! server instances. Acceptable for a single-process deployment; a
//! multi-instance deployment would need a shared store behind the same
//! interface.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Lockout configuration
#[derive(Debug, Clone)]
pub struct LockoutConfig {
    /// Failed attempts allowed before lockout
    pub max_attempts: u32,
    /// How long a locked-out client must wait
    pub lockout_window: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_window: Duration::from_secs(15 * 60),
        }
    }
}

/// Result of a pre-login lockout check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptCheck {
    /// Client may attempt a login
    Allowed,
    /// Client is locked out; retry after the given duration
    LockedOut { retry_after: Duration },
}

impl AttemptCheck {
    /// Remaining wait in whole minutes, rounded up (for user messages)
    pub fn minutes_remaining(&self) -> u64 {
        match self {
            AttemptCheck::Allowed => 0,
            AttemptCheck::LockedOut { retry_after } => retry_after.as_secs().div_ceil(60),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AttemptState {
    count: u32,
    last_attempt: Instant,
}

/// Tracks failed login attempts per client identifier.
///
/// The identifier is the client IP (see `client::ClientInfo`). Checks
/// must run before credential verification so a locked-out client
/// cannot probe passwords during the window.
#[derive(Debug)]
pub struct LoginAttemptTracker {
    config: LockoutConfig,
    attempts: Mutex<HashMap<String, AttemptState>>,
}

impl LoginAttemptTracker {
    pub fn new(config: LockoutConfig) -> Self {
        Self {
            config,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether this client may attempt a login.
    ///
    /// Once the lockout window has fully elapsed the counter resets and
    /// the client starts fresh.
    pub fn check(&self, key: &str) -> AttemptCheck {
        let mut attempts = self.attempts.lock().expect("attempt map poisoned");

        let Some(state) = attempts.get(key).copied() else {
            return AttemptCheck::Allowed;
        };

        if state.count < self.config.max_attempts {
            return AttemptCheck::Allowed;
        }

        let elapsed = state.last_attempt.elapsed();
        if elapsed < self.config.lockout_window {
            return AttemptCheck::LockedOut {
                retry_after: self.config.lockout_window - elapsed,
            };
        }

        // Lockout expired, reset the counter
        attempts.insert(
            key.to_string(),
            AttemptState {
                count: 0,
                last_attempt: Instant::now(),
            },
        );

        AttemptCheck::Allowed
    }

    /// Record a failed login attempt.
    pub fn record_failure(&self, key: &str) {
        let mut attempts = self.attempts.lock().expect("attempt map poisoned");
        let count = attempts.get(key).map(|s| s.count).unwrap_or(0);
        attempts.insert(
            key.to_string(),
            AttemptState {
                count: count + 1,
                last_attempt: Instant::now(),
            },
        );
    }

    /// Reset the counter after a successful login.
    pub fn reset(&self, key: &str) {
        let mut attempts = self.attempts.lock().expect("attempt map poisoned");
        attempts.remove(key);
    }

    /// Current failure count for a client (diagnostics/tests).
    pub fn failure_count(&self, key: &str) -> u32 {
        self.attempts
            .lock()
            .expect("attempt map poisoned")
            .get(key)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(max: u32, window: Duration) -> LoginAttemptTracker {
        LoginAttemptTracker::new(LockoutConfig {
            max_attempts: max,
            lockout_window: window,
        })
    }

    #[test]
    fn test_allowed_below_threshold() {
        let t = tracker(5, Duration::from_secs(900));
        for _ in 0..4 {
            t.record_failure("1.2.3.4");
        }
        assert_eq!(t.check("1.2.3.4"), AttemptCheck::Allowed);
    }

    #[test]
    fn test_locked_out_at_threshold() {
        let t = tracker(5, Duration::from_secs(900));
        for _ in 0..5 {
            t.record_failure("1.2.3.4");
        }
        assert!(matches!(
            t.check("1.2.3.4"),
            AttemptCheck::LockedOut { .. }
        ));
        // The 6th attempt is rejected no matter what the password is;
        // callers never reach credential verification.
    }

    #[test]
    fn test_lockout_is_per_client() {
        let t = tracker(5, Duration::from_secs(900));
        for _ in 0..5 {
            t.record_failure("1.2.3.4");
        }
        assert_eq!(t.check("5.6.7.8"), AttemptCheck::Allowed);
    }

    #[test]
    fn test_reset_on_success() {
        let t = tracker(5, Duration::from_secs(900));
        for _ in 0..4 {
            t.record_failure("1.2.3.4");
        }
        t.reset("1.2.3.4");
        assert_eq!(t.failure_count("1.2.3.4"), 0);
        assert_eq!(t.check("1.2.3.4"), AttemptCheck::Allowed);
    }

    #[test]
    fn test_window_expiry_resets_counter() {
        let t = tracker(2, Duration::from_millis(10));
        t.record_failure("1.2.3.4");
        t.record_failure("1.2.3.4");
        assert!(matches!(
            t.check("1.2.3.4"),
            AttemptCheck::LockedOut { .. }
        ));

        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(t.check("1.2.3.4"), AttemptCheck::Allowed);
        assert_eq!(t.failure_count("1.2.3.4"), 0);
    }

    #[test]
    fn test_minutes_remaining_rounds_up() {
        let check = AttemptCheck::LockedOut {
            retry_after: Duration::from_secs(61),
        };
        assert_eq!(check.minutes_remaining(), 2);

        let check = AttemptCheck::LockedOut {
            retry_after: Duration::from_secs(60),
        };
        assert_eq!(check.minutes_remaining(), 1);

        assert_eq!(AttemptCheck::Allowed.minutes_remaining(), 0);
    }
}
