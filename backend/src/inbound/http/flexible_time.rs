//! Lenient date and instant parsing for request bodies.
//!
//! Clients send birth dates and visit times in a handful of common layouts.
//! Dates accept ISO order with `-`, `/` or `.` separators and day-first order
//! with the same separators. Instants accept RFC 3339, a bare date, or a
//! local date-time with an optional `Z`, `+HH:MM`, `+HHMM` or `+HH` offset.
//! Date-times without an offset are read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y",
];

const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Input that matches none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlexibleTimeError {
    #[error("failed to parse date from input string: {input}")]
    Date { input: String },
    #[error("failed to parse instant from input string: {input}")]
    Instant { input: String },
}

/// Parse a calendar date in any accepted layout.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use petclinic::inbound::http::flexible_time::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 12).expect("valid date");
/// assert_eq!(parse_date("12.03.2024"), Ok(expected));
/// assert_eq!(parse_date("2024/03/12"), Ok(expected));
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, FlexibleTimeError> {
    let trimmed = input.trim();
    // chrono's %Y accepts short years; every layout here is exactly 10 chars.
    if trimmed.len() == 10 {
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }
    }
    Err(FlexibleTimeError::Date {
        input: input.to_owned(),
    })
}

/// Parse an instant in any accepted layout, normalised to UTC.
///
/// # Examples
/// ```
/// use petclinic::inbound::http::flexible_time::parse_instant;
///
/// let instant = parse_instant("2024-03-12T09:30+0100").expect("valid instant");
/// assert_eq!(instant.to_rfc3339(), "2024-03-12T08:30:00+00:00");
/// ```
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, FlexibleTimeError> {
    let trimmed = input.trim();
    let invalid = || FlexibleTimeError::Instant {
        input: input.to_owned(),
    };

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    if !trimmed.contains('T') {
        let date = parse_iso_date(trimmed).ok_or_else(invalid)?;
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    let (local, offset) = split_offset(trimmed).ok_or_else(invalid)?;
    let naive = LOCAL_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
        .ok_or_else(invalid)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or_else(invalid)
}

fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    if input.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Split `2024-03-12T09:30+01:00` into the local part and its offset.
fn split_offset(input: &str) -> Option<(&str, FixedOffset)> {
    if let Some(local) = input.strip_suffix('Z') {
        return Some((local, FixedOffset::east_opt(0)?));
    }
    let time_start = input.find('T')?;
    match input[time_start..].rfind(['+', '-']) {
        Some(relative) => {
            let at = time_start + relative;
            Some((&input[..at], parse_offset(&input[at..])?))
        }
        None => Some((input, FixedOffset::east_opt(0)?)),
    }
}

/// Parse `+HH:MM`, `+HHMM` or `+HH`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits = digits.replacen(':', "", 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits.get(..2)?.parse::<i32>().ok()?,
            digits.get(2..)?.parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 18 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
