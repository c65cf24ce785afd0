//! The host local-time seam.
//!
//! Conversions need two host services: break an instant into local calendar fields, and
//! compose (possibly denormalized) fields back into an instant. Both can fail on hosts
//! whose calendar facility covers a bounded date range, which is why the trait also
//! carries a capability query for the guest epoch (1904).

/// Local calendar fields for one instant.
///
/// `month` is 1-12 and `day` is normally 1-31, but [`HostCalendar::compose`] accepts
/// out-of-range `day` (and any `year`) and normalizes, mktime-style; offset application
/// depends on that. `yday` is the 0-based day of year and is ignored by `compose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub min: i32,
    pub sec: i32,
    pub yday: i32,
}

impl LocalDateTime {
    /// Midnight at the start of the given day.
    pub fn midnight(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            min: 0,
            sec: 0,
            yday: 0,
        }
    }
}

/// A host facility for local calendar time.
pub trait HostCalendar {
    /// Breaks `instant` (seconds since 1970-01-01 00:00 UTC) into local calendar fields.
    ///
    /// Returns `None` if the host cannot represent the instant.
    fn breakdown(&self, instant: i64) -> Option<LocalDateTime>;

    /// Composes local calendar fields into an instant, normalizing denormalized fields.
    ///
    /// Returns `None` if the host cannot represent the resulting date.
    fn compose(&self, fields: &LocalDateTime) -> Option<i64>;

    /// Whether `compose` can represent dates as early as 1904-01-01.
    ///
    /// Hosts that can't (e.g. a 32-bit or Windows-style `mktime`) get the documented
    /// workaround: compose 1971-01-01 instead and shift back by a fixed constant.
    fn spans_guest_epoch(&self) -> bool;
}

const SECS_PER_DAY: i64 = 86_400;

/// Days from 1970-01-01 to `year`-`month`-01 in the proleptic Gregorian calendar.
///
/// Standard civil-date arithmetic (Howard Hinnant's `days_from_civil`), with the
/// day-of-month folded in separately by the callers so denormalized days normalize for
/// free.
fn days_from_civil_month(year: i64, month: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of the above: (year, month, day) for a day count relative to 1970-01-01.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (if month <= 2 { y + 1 } else { y }, month, day)
}

/// Deterministic proleptic-Gregorian UTC calendar.
///
/// Full range, no timezone or DST dependence. This is the calendar of choice for tests
/// and for hosts without a usable local-time facility; a machine configured with it
/// simply shows the guest UTC wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcCalendar;

impl HostCalendar for UtcCalendar {
    fn breakdown(&self, instant: i64) -> Option<LocalDateTime> {
        let days = instant.div_euclid(SECS_PER_DAY);
        let secs_of_day = instant.rem_euclid(SECS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        let year_i32 = i32::try_from(year).ok()?;
        let yday = days - days_from_civil_month(year, 1);
        Some(LocalDateTime {
            year: year_i32,
            month: month as i32,
            day: day as i32,
            hour: (secs_of_day / 3600) as i32,
            min: (secs_of_day / 60 % 60) as i32,
            sec: (secs_of_day % 60) as i32,
            yday: yday as i32,
        })
    }

    fn compose(&self, fields: &LocalDateTime) -> Option<i64> {
        let days = days_from_civil_month(i64::from(fields.year), i64::from(fields.month))
            .checked_add(i64::from(fields.day) - 1)?;
        let day_secs = days.checked_mul(SECS_PER_DAY)?;
        let tod = i64::from(fields.sec) + 60 * (i64::from(fields.min) + 60 * i64::from(fields.hour));
        day_secs.checked_add(tod)
    }

    fn spans_guest_epoch(&self) -> bool {
        true
    }
}

#[cfg(unix)]
pub use self::libc_impl::LibcCalendar;

#[cfg(unix)]
mod libc_impl {
    use super::{HostCalendar, LocalDateTime};
    use std::mem::MaybeUninit;

    /// Host local time via `localtime_r`/`mktime`.
    ///
    /// `mktime` is invoked with `tm_isdst = -1` so the C library resolves DST itself,
    /// and it performs the field normalization [`HostCalendar::compose`] promises.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LibcCalendar;

    impl HostCalendar for LibcCalendar {
        fn breakdown(&self, instant: i64) -> Option<LocalDateTime> {
            let t = libc::time_t::try_from(instant).ok()?;
            let mut tm = MaybeUninit::<libc::tm>::uninit();
            // SAFETY: `t` and `tm` are valid for the duration of the call; localtime_r
            // writes `tm` fully before returning non-null.
            let res = unsafe { libc::localtime_r(&t, tm.as_mut_ptr()) };
            if res.is_null() {
                return None;
            }
            // SAFETY: non-null return means `tm` was initialized.
            let tm = unsafe { tm.assume_init() };
            Some(LocalDateTime {
                year: tm.tm_year + 1900,
                month: tm.tm_mon + 1,
                day: tm.tm_mday,
                hour: tm.tm_hour,
                min: tm.tm_min,
                sec: tm.tm_sec,
                yday: tm.tm_yday,
            })
        }

        fn compose(&self, fields: &LocalDateTime) -> Option<i64> {
            // SAFETY: libc::tm is a plain-old-data struct; all-zero is a valid value.
            let mut tm: libc::tm = unsafe { std::mem::zeroed() };
            tm.tm_year = fields.year.checked_sub(1900)?;
            tm.tm_mon = fields.month - 1;
            tm.tm_mday = fields.day;
            tm.tm_hour = fields.hour;
            tm.tm_min = fields.min;
            tm.tm_sec = fields.sec;
            tm.tm_isdst = -1;
            // SAFETY: `tm` is a valid, exclusively borrowed tm value.
            let out = unsafe { libc::mktime(&mut tm) };
            // -1 is mktime's failure sentinel. It shadows the one legitimate instant one
            // second before the epoch; the C original has the same blind spot.
            if out == -1 {
                return None;
            }
            Some(out as i64)
        }

        fn spans_guest_epoch(&self) -> bool {
            // A 64-bit time_t reaches 1904 (and far beyond); a 32-bit one stops at 1901
            // in theory but many C libraries refuse pre-1970 mktime results, so take the
            // shifted path there.
            std::mem::size_of::<libc::time_t>() >= 8
        }
    }
}
