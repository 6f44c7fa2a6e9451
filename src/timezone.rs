//! Resolves canonical timezone names to UTC offsets.
//!
//! Expense dates default to "today" in the configured timezone, so handlers
//! need the current offset rather than the server's system timezone.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g.
/// "Asia/Ho_Chi_Minh". Returns `None` if the name is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod timezone_tests {
    use time::UtcOffset;

    use super::get_local_offset;

    #[test]
    fn resolves_utc() {
        let offset = get_local_offset("Etc/UTC");

        assert_eq!(offset, Some(UtcOffset::UTC));
    }

    #[test]
    fn resolves_fixed_offset_timezone() {
        // Indochina Time has no daylight saving, so the offset is stable.
        let offset = get_local_offset("Asia/Ho_Chi_Minh");

        assert_eq!(offset, UtcOffset::from_hms(7, 0, 0).ok());
    }

    #[test]
    fn unknown_name_returns_none() {
        let offset = get_local_offset("Neverland/Second_Star");

        assert_eq!(offset, None);
    }
}
