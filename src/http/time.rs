//! Time coercion module
//!
//! Turns the various time representations a handler may hold into a single
//! UTC instant, and converts instants to and from HTTP-date strings.

use crate::error::{FreshnessError, Result};
use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use std::time::SystemTime;

/// RFC 1123 (preferred HTTP-date) layout
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";
/// RFC 1123 layout after the weekday
const RFC1123_DATE: &str = "%d %b %Y %H:%M:%S GMT";
/// Obsolete RFC 850 layout after the weekday
const RFC850_DATE: &str = "%d-%b-%y %H:%M:%S GMT";
/// ANSI C `asctime()` layouts after the weekday, space-padded and two-digit day
const ASCTIME_DATES: [&str; 2] = ["%b %e %H:%M:%S %Y", "%b %d %H:%M:%S %Y"];

/// A time-like value that can serve as a freshness timestamp
#[derive(Debug, Clone, PartialEq)]
pub enum TimeLike {
    /// Seconds since the Unix epoch
    EpochSeconds(i64),
    /// Absolute UTC instant
    Instant(DateTime<Utc>),
    /// Absolute instant in the local zone
    Local(DateTime<Local>),
    /// Date-time carrying an explicit offset
    Zoned(DateTime<FixedOffset>),
    /// Calendar date without time of day
    CalendarDate(NaiveDate),
    SystemTime(SystemTime),
    /// Anything else, parsed on demand
    FreeText(String),
}

impl From<i64> for TimeLike {
    fn from(secs: i64) -> Self {
        Self::EpochSeconds(secs)
    }
}

impl From<DateTime<Utc>> for TimeLike {
    fn from(time: DateTime<Utc>) -> Self {
        Self::Instant(time)
    }
}

impl From<DateTime<Local>> for TimeLike {
    fn from(time: DateTime<Local>) -> Self {
        Self::Local(time)
    }
}

impl From<DateTime<FixedOffset>> for TimeLike {
    fn from(time: DateTime<FixedOffset>) -> Self {
        Self::Zoned(time)
    }
}

impl From<NaiveDate> for TimeLike {
    fn from(date: NaiveDate) -> Self {
        Self::CalendarDate(date)
    }
}

impl From<SystemTime> for TimeLike {
    fn from(time: SystemTime) -> Self {
        Self::SystemTime(time)
    }
}

impl From<&str> for TimeLike {
    fn from(text: &str) -> Self {
        Self::FreeText(text.to_string())
    }
}

impl From<String> for TimeLike {
    fn from(text: String) -> Self {
        Self::FreeText(text)
    }
}

impl TimeLike {
    /// Coerce to an absolute instant
    ///
    /// # Examples
    /// ```
    /// use http_freshness::http::time::TimeLike;
    /// let t = TimeLike::from(784_111_777_i64).to_instant().unwrap();
    /// assert_eq!(t.timestamp(), 784_111_777);
    /// ```
    pub fn to_instant(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Instant(time) => Ok(*time),
            Self::Local(time) => Ok(time.with_timezone(&Utc)),
            Self::SystemTime(time) => Ok(DateTime::<Utc>::from(*time)),
            Self::Zoned(time) => Ok(truncate_subsec(time.with_timezone(&Utc))),
            Self::CalendarDate(date) => {
                local_midnight(*date).ok_or_else(|| invalid(&date.to_string()))
            }
            Self::EpochSeconds(secs) => {
                DateTime::from_timestamp(*secs, 0).ok_or_else(|| invalid(&secs.to_string()))
            }
            Self::FreeText(text) => {
                parse_free_text(text).ok_or_else(|| invalid(&format!("{text:?}")))
            }
        }
    }
}

/// Coerce any time-like value to an absolute instant
pub fn coerce_to_instant(value: impl Into<TimeLike>) -> Result<DateTime<Utc>> {
    value.into().to_instant()
}

/// Format an instant as an RFC 1123 HTTP-date
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use http_freshness::http::time::http_date;
/// let t = Utc.with_ymd_and_hms(2009, 6, 8, 8, 50, 17).unwrap();
/// assert_eq!(http_date(&t), "Mon, 08 Jun 2009 08:50:17 GMT");
/// ```
pub fn http_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Utc).format(RFC1123_FORMAT).to_string()
}

/// Parse an HTTP-date in any of its three permitted layouts
///
/// The weekday name is required but not checked against the date.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let naive = if let Some((weekday, rest)) = value.split_once(", ") {
        if !is_weekday_name(weekday) {
            return None;
        }
        [RFC1123_DATE, RFC850_DATE]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(rest, format).ok())
    } else {
        let (weekday, rest) = value.split_once(' ')?;
        if !is_weekday_name(weekday) {
            return None;
        }
        ASCTIME_DATES
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(rest, format).ok())
    };
    naive.map(|naive| naive.and_utc())
}

fn is_weekday_name(name: &str) -> bool {
    name.len() >= 3 && name.bytes().all(|b| b.is_ascii_alphabetic())
}

fn invalid(description: &str) -> FreshnessError {
    FreshnessError::InvalidTimestamp(format!("unable to convert {description} to a time value"))
}

fn truncate_subsec(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_nanosecond(0).unwrap_or(time)
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    match Local.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        LocalResult::Single(time) | LocalResult::Ambiguous(time, _) => {
            Some(time.with_timezone(&Utc))
        }
        LocalResult::None => None,
    }
}

fn parse_free_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Some(time) = parse_http_date(text) {
        return Some(time);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = DateTime::parse_from_rfc2822(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|time| time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(local_midnight)
}
