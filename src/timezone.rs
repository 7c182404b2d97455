//! Local date lookups for a configured canonical timezone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{Error, month::MonthKey};

/// The current UTC offset of `canonical_timezone`, `None` if the timezone is unknown.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if the timezone is not a known canonical name.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone).ok_or_else(|| {
        tracing::error!("could not get local time offset from timezone {canonical_timezone}");
        Error::InvalidTimezoneError(canonical_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

/// The current month in `canonical_timezone`.
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if the timezone is not a known canonical name.
pub fn current_month(canonical_timezone: &str) -> Result<MonthKey, Error> {
    local_today(canonical_timezone).map(MonthKey::of)
}

/// The month named by an optional `YYYY-MM` query value, or the current month
/// when no value (or an empty one) is given.
///
/// # Errors
///
/// Returns [Error::InvalidInput] if the value is not a valid month and
/// [Error::InvalidTimezoneError] if the current month cannot be determined.
pub fn month_or_current(month: Option<&str>, canonical_timezone: &str) -> Result<MonthKey, Error> {
    match month.map(str::trim) {
        Some(text) if !text.is_empty() => text.parse(),
        _ => current_month(canonical_timezone),
    }
}
