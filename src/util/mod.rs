//! Utility functions module
//!
//! Duration formatting for the UI and serde helpers shared by the
//! result and config models.

use std::time::Duration;

/// Format a duration as a short human-readable string
///
/// # Examples
/// ```
/// use quizbird::util::format_duration;
///
/// assert_eq!(format_duration(std::time::Duration::from_secs(9)), "9s");
/// assert_eq!(format_duration(std::time::Duration::from_secs(75)), "1m 15s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total < 60 {
        format!("{}s", total)
    } else {
        format!("{}m {}s", total / 60, total % 60)
    }
}

/// Whole seconds remaining, rounded up, for countdown displays.
/// 9.2s left renders as "10" only at 9.2 > 9, i.e. ceil(9.2) = 10.
pub fn countdown_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs_f64();
    secs.ceil() as u64
}

/// Serde helpers for `std::time::Duration` stored as nanoseconds
pub mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_nanos().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u128::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_countdown_rounds_up() {
        assert_eq!(countdown_secs(Duration::from_millis(9200)), 10);
        assert_eq!(countdown_secs(Duration::from_secs(9)), 9);
        assert_eq!(countdown_secs(Duration::ZERO), 0);
    }
}
