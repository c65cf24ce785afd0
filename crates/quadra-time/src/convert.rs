use thiserror::Error;

use crate::calendar::{HostCalendar, LocalDateTime};

/// The guest epoch year: Mac time 0 is 1904-01-01 00:00 local time.
pub const MAC_EPOCH_YEAR: i32 = 1904;

/// Seconds from 1904-01-01 to 1970-01-01 (17 leap days in between).
pub const MAC_EPOCH_TO_UNIX_EPOCH_SECS: i64 = 2_082_844_800;

/// Seconds from 1904-01-01 to 1971-01-01, the shifted reference year used on hosts
/// whose calendar facility cannot compose a 1904 date.
pub const SECS_1904_TO_1971: i64 = 2_114_380_800;

/// User-configured calendar shift, in years and days.
///
/// The guest observes a calendar shifted this far *forward* of the host's: a positive
/// `year_offset` makes host 1999 look like guest 2000 minus a year, without touching the
/// host clock. Sourced by the embedder (preferences, CLI, ...) and passed in explicitly;
/// conversion never consults global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockOffsets {
    pub year_offset: i32,
    pub day_offset: i32,
}

impl ClockOffsets {
    pub const ZERO: ClockOffsets = ClockOffsets {
        year_offset: 0,
        day_offset: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The host calendar facility cannot represent the date needed for conversion.
    #[error("host calendar cannot represent the requested date")]
    UnrepresentableDate,
}

pub type Result<T> = std::result::Result<T, TimeError>;

/// Converts a host instant to Mac time (seconds since 1904-01-01 00:00 local).
///
/// An instant the host cannot break down (its "invalid time" case) yields 0 rather than
/// propagating garbage. The year offset is applied to the broken-down year and clamped
/// so the result never precedes the guest epoch; the day offset is clamped so it cannot
/// push the day count negative. By construction the result is never a pre-1904 date.
///
/// Day counting is done here with exact proleptic-Gregorian leap arithmetic instead of
/// composing through the host calendar again: the offset year may be outside the range
/// the host facility accepts, and the forward direction must not fail.
pub fn to_mac_time<C: HostCalendar>(cal: &C, offsets: ClockOffsets, instant: i64) -> u32 {
    let Some(local) = cal.breakdown(instant) else {
        return 0;
    };

    let year = (i64::from(local.year) + i64::from(offsets.year_offset))
        .max(i64::from(MAC_EPOCH_YEAR));

    // Leap days before `year` minus leap days before the epoch year, with the /100 and
    // /400 century corrections (floor divisions).
    let a4 = year / 4 - i64::from(year % 4 == 0);
    let b4 = i64::from(MAC_EPOCH_YEAR) / 4 - 1; // 1904 is itself a leap year
    let a100 = a4.div_euclid(25);
    let b100 = b4.div_euclid(25);
    let a400 = a100.div_euclid(4);
    let b400 = b100.div_euclid(4);
    let leap_days = (a4 - b4) - (a100 - b100) + (a400 - b400);

    let days = i64::from(local.yday) + 365 * (year - i64::from(MAC_EPOCH_YEAR)) + leap_days;

    // A positive residual here means the day offset points before the epoch; limit it to
    // the days actually available so the result lands on the epoch day, not before it.
    let mut day_shift = -i64::from(offsets.day_offset);
    if day_shift > 0 && day_shift > days {
        day_shift = days;
    }

    let secs = i64::from(local.sec)
        + 60 * (i64::from(local.min)
            + 60 * (i64::from(local.hour) + 24 * (days - day_shift)));
    secs as u32
}

/// Converts Mac time back to a host instant.
///
/// The reference instant is local midnight, 1904-01-01. Hosts whose calendar facility
/// spans the guest epoch compose that date directly; the rest compose 1971-01-01 and
/// subtract [`SECS_1904_TO_1971`]. Composing a representable near-epoch date and
/// shifting by a known constant sidesteps the host's range limit without hand-rolling
/// local-time arithmetic. If even the reference date won't compose, the conversion
/// fails; there is no honest instant to return.
///
/// Offset application is best-effort: the provisional instant is re-broken into local
/// fields, shifted, and recomposed, but if the shifted date is unrepresentable the
/// unadjusted instant is kept and a diagnostic is logged. A bad offset preference must
/// degrade the displayed date, never break time itself.
pub fn to_host_time<C: HostCalendar>(
    cal: &C,
    offsets: ClockOffsets,
    mac_time: u32,
) -> Result<i64> {
    let reference = if cal.spans_guest_epoch() {
        cal.compose(&LocalDateTime::midnight(MAC_EPOCH_YEAR, 1, 1))
            .ok_or(TimeError::UnrepresentableDate)?
    } else {
        cal.compose(&LocalDateTime::midnight(1971, 1, 1))
            .ok_or(TimeError::UnrepresentableDate)?
            - SECS_1904_TO_1971
    };

    let mut out = reference + i64::from(mac_time);

    if !offsets.is_zero() {
        match cal.breakdown(out) {
            Some(mut fields) => {
                fields.year = fields.year.saturating_sub(offsets.year_offset);
                fields.day = fields.day.saturating_sub(offsets.day_offset);
                match cal.compose(&fields) {
                    Some(adjusted) => out = adjusted,
                    None => {
                        tracing::warn!(
                            mac_time,
                            year_offset = offsets.year_offset,
                            day_offset = offsets.day_offset,
                            "offset-shifted date is not representable; keeping unshifted instant"
                        );
                    }
                }
            }
            None => {
                tracing::warn!(
                    mac_time,
                    "cannot break provisional instant into local time; keeping unshifted instant"
                );
            }
        }
    }

    Ok(out)
}
