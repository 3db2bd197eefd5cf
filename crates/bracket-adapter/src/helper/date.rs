//! `Time` helper.

use bracket_engine::HelperError;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::{Helper, arg, unknown_method};

/// Calendar date input (`2024-03-01`).
const DATE_INPUT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Weekday and month prefix (`Fri, Mar`).
const NICE_PREFIX: &[FormatItem<'static>] =
    format_description!("[weekday repr:short], [month repr:short]");

/// Time of day suffix (`14:05`).
const NICE_TIME: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Date formatting.
///
/// `nice(date)` renders `2006-01-02` as `Mon, Jan 2nd 2006`. RFC 3339
/// timestamps also get the time of day: `Mon, Jan 2nd 2006, 15:04`.
pub struct TimeHelper;

impl Helper for TimeHelper {
    fn name(&self) -> &str {
        "Time"
    }

    fn call(&self, method: &str, args: &[&str]) -> Result<String, HelperError> {
        match method {
            "nice" => nice(arg(self.name(), args, 0)?.trim()),
            _ => Err(unknown_method(self.name(), method)),
        }
    }
}

fn nice(value: &str) -> Result<String, HelperError> {
    if let Ok(date) = Date::parse(value, DATE_INPUT) {
        return nice_date(date);
    }
    let timestamp = OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| invalid(format!("{value:?} is not a date: {e}")))?;
    let clock = timestamp
        .time()
        .format(NICE_TIME)
        .map_err(|e| invalid(e.to_string()))?;
    Ok(format!("{}, {clock}", nice_date(timestamp.date())?))
}

fn nice_date(date: Date) -> Result<String, HelperError> {
    let prefix = date.format(NICE_PREFIX).map_err(|e| invalid(e.to_string()))?;
    let day = date.day();
    Ok(format!("{prefix} {day}{} {}", ordinal_suffix(day), date.year()))
}

fn ordinal_suffix(day: u8) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn invalid(message: String) -> HelperError {
    HelperError::InvalidArgument {
        helper: "Time".to_owned(),
        message,
    }
}
