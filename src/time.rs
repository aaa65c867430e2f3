//! # Calendar dates and Julian days
//!
//! Gregorian calendar ↔ Julian day conversions on the UTC scale, built on
//! [`hifitime::Epoch`]. Days carry their fraction (`1.5` is noon of the first).
//!
//! The proleptic Gregorian calendar is used for every date; no Julian-calendar
//! correction is applied before 1582.
use hifitime::{Epoch, TimeScale, Unit};
use std::str::FromStr;

use crate::conics_errors::ConicsError;
use crate::constants::{JulianDay, MJD};

/// A calendar date with fractional day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    /// Day of month including the fraction of day (`1.0 ≤ day < 32.0`).
    pub day: f64,
    /// `YYYY-MM-DD`
    pub label: String,
}

/// Julian day of a Gregorian calendar date (UTC).
///
/// Arguments
/// -----------------
/// * `year` – Calendar year.
/// * `month` – Month, 1–12.
/// * `day` – Day of month with its fraction, e.g. `1.5` for noon.
///
/// Return
/// ----------
/// * The Julian day, or `ConicsError::InvalidCalendarDate` when the date does
///   not exist (month 13, February 30, ...) or the day is not finite.
pub fn julian_day_from_calendar(year: i32, month: u8, day: f64) -> Result<JulianDay, ConicsError> {
    if !day.is_finite() || !(1.0..32.0).contains(&day) {
        return Err(ConicsError::InvalidCalendarDate(format!(
            "day {day} out of range for {year}-{month:02}"
        )));
    }

    let whole_day = day.trunc() as u8;
    let fraction = day.fract();

    let midnight = Epoch::maybe_from_gregorian(year, month, whole_day, 0, 0, 0, 0, TimeScale::UTC)
        .map_err(|e| {
            ConicsError::InvalidCalendarDate(format!("{year}-{month:02}-{whole_day:02}: {e}"))
        })?;

    Ok((midnight + Unit::Day * fraction).to_jde_utc_days())
}

/// Parse `YYYY MM DD.FFFFF` into a Julian day.
pub fn julian_day_from_str(date_str: &str) -> Result<JulianDay, ConicsError> {
    let parts: Vec<&str> = date_str.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(ConicsError::InvalidCalendarDate(format!(
            "'{date_str}': expected YYYY MM DD.FFFFF"
        )));
    }

    let invalid = |what: &str| ConicsError::InvalidCalendarDate(format!("'{date_str}': invalid {what}"));
    let year = i32::from_str(parts[0]).map_err(|_| invalid("year"))?;
    let month = u8::from_str(parts[1]).map_err(|_| invalid("month"))?;
    let day = f64::from_str(parts[2]).map_err(|_| invalid("day"))?;

    julian_day_from_calendar(year, month, day)
}

/// Gregorian calendar date (UTC) of a Julian day.
///
/// The epoch is rounded to the nearest millisecond before being split into
/// calendar fields, so that `2451545.0` gives exactly `2000-01-01.5`.
pub fn calendar_from_julian_day(jd: JulianDay) -> CalendarDate {
    let epoch = Epoch::from_jde_utc(jd).round(Unit::Millisecond * 1.0);
    let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();

    let seconds = hour as f64 * 3600.0 + minute as f64 * 60.0 + second as f64 + nanos as f64 * 1e-9;

    CalendarDate {
        year,
        month,
        day: day as f64 + seconds / 86400.0,
        label: format!("{year:04}-{month:02}-{day:02}"),
    }
}

/// Modified Julian date → Julian day.
pub fn mjd_to_jd(mjd: MJD) -> JulianDay {
    Epoch::from_mjd_utc(mjd).to_jde_utc_days()
}

/// Julian day → modified Julian date.
pub fn jd_to_mjd(jd: JulianDay) -> MJD {
    Epoch::from_jde_utc(jd).to_mjd_utc_days()
}
