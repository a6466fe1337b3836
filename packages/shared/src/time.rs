//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Local, Utc};

/// Format used for event timestamps rendered to clients.
pub const CLOCK_TIME_FORMAT: &str = "%H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current wall-clock time in the server's local time zone
    fn now(&self) -> DateTime<Local>;

    /// Current time rendered as `HH:MM:SS`
    fn clock_time(&self) -> String {
        format_clock_time(&self.now())
    }
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Render a local time as `HH:MM:SS`
pub fn format_clock_time(time: &DateTime<Local>) -> String {
    time.format(CLOCK_TIME_FORMAT).to_string()
}

/// Get current Unix timestamp (milliseconds)
pub fn get_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}
