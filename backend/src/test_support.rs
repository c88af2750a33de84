//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Signing secret used by test token codecs.
pub const TEST_JWT_SECRET: &[u8] = b"healthspire-test-secret-with-32-bytes!";

/// Clock frozen at a fixed instant.
///
/// # Examples
/// ```
/// use backend::test_support::FixedClock;
/// use mockable::Clock;
///
/// let clock = FixedClock::reference();
/// assert_eq!(clock.utc(), FixedClock::reference().utc());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock at 2026-03-01T09:00:00Z, the reference instant for tests.
    pub fn reference() -> Self {
        Self(
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    /// Reference clock shifted by `days` (negative for the past).
    pub fn days_from_reference(days: i64) -> Self {
        let Self(base) = Self::reference();
        Self(base + TimeDelta::days(days))
    }

    /// Erase into the shared clock handle used by adapters.
    pub fn shared(self) -> Arc<dyn Clock> {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
