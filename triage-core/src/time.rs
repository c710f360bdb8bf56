//! Time utilities: calendar-date parsing and timezone-aware "today".

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an ISO calendar date like "2026-02-20".
///
/// Only the zero-padded `YYYY-MM-DD` form is accepted; chrono alone would
/// also take "2026-3-8" or a leading sign.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    let padded = s.len() == 10
        && s.bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !padded {
        bail!("invalid calendar date '{s}': expected YYYY-MM-DD");
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid calendar date '{s}': {e}"))
}

/// Current calendar date in an IANA tz like "America/Chicago".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Current calendar date in the host's local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calendar_date() {
        let d = parse_calendar_date("2026-02-20").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert!(parse_calendar_date("02/20/2026").is_err());
        assert!(parse_calendar_date("2026-02-30").is_err());
    }

    #[test]
    fn test_parse_calendar_date_requires_padding() {
        assert!(parse_calendar_date("2026-3-8").is_err());
        assert!(parse_calendar_date("+2026-03-08").is_err());
        assert!(parse_calendar_date(" 2026-03-08").is_err());
        assert!(parse_calendar_date("2026-03-08").is_ok());
    }

    #[test]
    fn test_today_in_rejects_unknown_zone() {
        assert!(today_in("Mars/Olympus_Mons").is_err());
        assert!(today_in("America/Chicago").is_ok());
    }
}
