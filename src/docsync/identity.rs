//! # Identity and Timestamps
//!
//! Every entry minted by this crate gets two things from the outside world: a
//! fresh unique ID and the current wall-clock time. Both are process-wide
//! resources, so they sit behind two small capability traits:
//!
//! - [`IdGenerator`]: produces unique identifiers ([`UuidGenerator`] in production)
//! - [`Clock`]: reads the current time ([`SystemClock`] in production)
//!
//! Constructors in [`crate::model`] take these through an
//! [`EntryFactory`](crate::model::EntryFactory), which lets tests swap in the
//! deterministic fakes from [`fixtures`].
//!
//! ## Timestamp Format
//!
//! `ModifiedClient` and friends are RFC3339 strings in UTC with nanosecond
//! precision, always nine fractional digits and a `Z` suffix:
//!
//! ```text
//! 2024-03-09T17:04:11.123456789Z
//! ```
//!
//! Fixed width means two stamps from the same clock compare correctly as plain
//! strings.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh entry IDs.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUIDs in hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &T {
    fn new_id(&self) -> String {
        (**self).new_id()
    }
}

pub fn new_unique_id() -> String {
    UuidGenerator.new_id()
}

pub fn current_timestamp() -> String {
    format_timestamp(SystemClock.now())
}

/// Always nine fractional digits. Other clients may send the trimmed form
/// (`...:11.5Z`, or no fraction at all); [`parse_timestamp`] accepts both, but
/// compare parsed instants rather than strings when the source is unknown.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parses a wire timestamp back into a UTC instant.
pub fn parse_timestamp(value: &str) -> crate::error::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| crate::error::DocsyncError::InvalidTimestamp(format!("{value}: {e}")))
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::TimeDelta;
    use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

    /// Always reports the same instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Advances by `step` on every read, starting at `start`.
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        step: TimeDelta,
        ticks: AtomicI32,
    }

    impl SteppingClock {
        pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
            Self {
                start,
                step,
                ticks: AtomicI32::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + self.step * tick
        }
    }

    /// Yields `{prefix}-1`, `{prefix}-2`, ...
    #[derive(Debug)]
    pub struct SequentialIds {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIds {
        pub fn new(prefix: &str) -> Self {
            Self {
                prefix: prefix.to_string(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn new_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{}", self.prefix, n)
        }
    }

    pub fn instant(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("fixture timestamp must be valid RFC3339")
            .with_timezone(&Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn generated_ids_are_uuids() {
        let id = new_unique_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, new_unique_id());
    }

    #[test]
    fn timestamps_have_nanosecond_precision() {
        let stamp = format_timestamp(instant("2024-03-09T17:04:11.5Z"));
        assert_eq!(stamp, "2024-03-09T17:04:11.500000000Z");
    }

    #[test]
    fn current_timestamp_round_trips() {
        let stamp = current_timestamp();
        assert!(stamp.ends_with('Z'));
        assert!(parse_timestamp(&stamp).is_ok());
    }

    #[test]
    fn trimmed_fractions_parse_to_the_same_instant() {
        let ours = format_timestamp(instant("2024-03-09T17:04:11.5Z"));
        let trimmed = "2024-03-09T17:04:11.5Z";
        assert_ne!(ours, trimmed);
        assert_eq!(
            parse_timestamp(&ours).unwrap(),
            parse_timestamp(trimmed).unwrap()
        );
        assert_eq!(
            format_timestamp(parse_timestamp("2024-03-09T17:04:11Z").unwrap()),
            "2024-03-09T17:04:11.000000000Z"
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn stepping_clock_advances() {
        let clock = SteppingClock::new(instant("2024-01-01T00:00:00Z"), TimeDelta::seconds(2));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, TimeDelta::seconds(2));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new("doc");
        assert_eq!(ids.new_id(), "doc-1");
        assert_eq!(ids.new_id(), "doc-2");
    }
}
