//! Build timestamps.
//!
//! Requires `std`.

//---------------------------------------------------------------------------------------------------- Use
use chrono::{DateTime, Utc};

//---------------------------------------------------------------------------------------------------- Const
/// The environment variable used for reproducible builds.
///
/// See <https://reproducible-builds.org/specs/source-date-epoch/>.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

//---------------------------------------------------------------------------------------------------- Public API
#[inline]
/// Format a timestamp as `yyMMdd`, the short date appended to build identifiers.
///
/// ```rust
/// # use yumebox_helper::time::*;
/// // October 20th 2023 - 10:18:30 PM
/// let time = from_unix(1697840310).unwrap();
/// assert_eq!(yymmdd(time), "231020");
/// ```
pub fn yymmdd(time: DateTime<Utc>) -> String {
    time.format("%y%m%d").to_string()
}

#[inline]
/// Convert a UNIX timestamp into a [`DateTime`].
///
/// Returns [`None`] if the timestamp is out of range.
pub const fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Parse the value of [`SOURCE_DATE_EPOCH`].
///
/// Returns [`None`] if the value is not a valid UNIX timestamp.
pub fn parse_source_date_epoch(value: &str) -> Option<DateTime<Utc>> {
    value.trim().parse::<i64>().ok().and_then(from_unix)
}

/// Read [`SOURCE_DATE_EPOCH`] from the environment.
///
/// Returns [`None`] if it is unset or invalid.
pub fn source_date_epoch() -> Option<DateTime<Utc>> {
    std::env::var(SOURCE_DATE_EPOCH)
        .ok()
        .as_deref()
        .and_then(parse_source_date_epoch)
}

/// The time this build is happening at.
///
/// This is [`source_date_epoch`] if set and valid, else the current UTC time.
pub fn build_time() -> DateTime<Utc> {
    source_date_epoch().unwrap_or_else(Utc::now)
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn yymmdd_pads() {
        // 2001-02-03
        let time = from_unix(981_158_400).unwrap();
        assert_eq!(yymmdd(time), "010203");

        assert_eq!(yymmdd(from_unix(0).unwrap()), "700101");
    }

    #[test]
    fn parse_epoch() {
        let time = parse_source_date_epoch(" 1697840310\n").unwrap();
        assert_eq!(time.timestamp(), 1_697_840_310);

        assert_eq!(parse_source_date_epoch(""), None);
        assert_eq!(parse_source_date_epoch("yesterday"), None);
        assert_eq!(parse_source_date_epoch(&i64::MAX.to_string()), None);
    }

    #[test]
    fn const_from_unix() {
        const EPOCH: Option<DateTime<Utc>> = from_unix(0);
        assert_eq!(EPOCH.unwrap().timestamp(), 0);
    }
}
