//! Injected sources of time and identity.
//!
//! Services never read the system clock or generate randomness directly, so
//! tests can pin both.

use chrono::{Local, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub trait Clock: Send + Sync {
    /// Current local calendar date
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|noon| noon.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

/// Produces identifiers for new transactions. Ids must never repeat.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Ids of the form `<millis base36><sequence base36>-<random>`.
///
/// The time prefix keeps ids roughly ordered by creation, the sequence
/// separates ids created within the same millisecond.
pub struct TimestampIdGenerator {
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl TimestampIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sequence: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> String {
        let millis = self.clock.now_millis().max(0) as u64;
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let random = Uuid::new_v4().simple().to_string();
        format!("{}{}-{}", to_base36(millis), to_base36(sequence), &random[..8])
    }
}

/// Predictable ids (`tx-1`, `tx-2`, ...) for tests and fixtures
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("tx-{}", n)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
