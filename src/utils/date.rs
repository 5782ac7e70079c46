//! Calendar date utilities without timezone dependencies.
//!
//! Articles carry plain `YYYY-MM-DD` dates; this module parses, validates,
//! and formats them for display and for the sitemap.

use anyhow::{Result, bail};

/// A calendar date (no time-of-day component)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[allow(dead_code)]
impl Date {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse from "YYYY-MM-DD". Longer strings (RFC 3339 timestamps from
    /// feed endpoints) are accepted by reading the leading date part.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();

        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        // Anything after the date part must be a time separator
        if bytes.len() > 10 && bytes[10] != b'T' && bytes[10] != b' ' {
            return None;
        }

        let date = Self::new(year, month, day);
        date.validate().ok()?;
        Some(date)
    }

    pub fn validate(self) -> Result<()> {
        let Self { year, month, day } = self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as ISO 8601: `YYYY-MM-DD` (sitemap lastmod).
    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format for display: `Jan 15, 2024`.
    pub fn human(self) -> String {
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        format!(
            "{} {}, {}",
            MONTHS[(self.month - 1) as usize],
            self.day,
            self.year
        )
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let date = Date::parse("2024-01-15").unwrap();
        assert_eq!(date, Date::new(2024, 1, 15));
    }

    #[test]
    fn test_parse_rfc3339_prefix() {
        // Feed endpoints return full timestamps; the date part is enough
        let date = Date::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(date, Date::new(2024, 6, 15));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Date::parse("2024-13-01"), None);
        assert_eq!(Date::parse("2024-02-30"), None);
        assert_eq!(Date::parse("2024/01/15"), None);
        assert_eq!(Date::parse("20240115"), None);
        assert_eq!(Date::parse("2024-01"), None);
        assert_eq!(Date::parse("2024-01-15x"), None);
    }

    #[test]
    fn test_leap_year() {
        assert!(Date::parse("2024-02-29").is_some());
        assert!(Date::parse("2023-02-29").is_none());
        assert!(Date::parse("2000-02-29").is_some()); // divisible by 400
        assert!(Date::parse("1900-02-29").is_none()); // divisible by 100 but not 400
    }

    #[test]
    fn test_to_iso() {
        assert_eq!(Date::new(2024, 1, 5).to_iso(), "2024-01-05");
    }

    #[test]
    fn test_human() {
        assert_eq!(Date::new(2024, 1, 15).human(), "Jan 15, 2024");
        assert_eq!(Date::new(2023, 12, 1).human(), "Dec 1, 2023");
    }
}
