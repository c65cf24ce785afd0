//! Host wall-clock <-> Mac time conversion.
//!
//! The guest counts seconds from its own epoch, 1904-01-01 00:00 **local** time, in an
//! unsigned 32-bit value; the host counts signed seconds from 1970-01-01. Conversion is
//! calendar arithmetic, not a constant shift: the guest epoch is anchored to local
//! midnight, and user-configurable year/day offsets let the guest observe a shifted
//! calendar without touching the real host clock.
//!
//! The host's local-time facility sits behind the [`HostCalendar`] trait so production
//! code can use the platform's `localtime_r`/`mktime` ([`LibcCalendar`]) while tests run
//! against the deterministic, timezone-free [`UtcCalendar`].

mod calendar;
mod convert;

pub use calendar::{HostCalendar, LocalDateTime, UtcCalendar};
#[cfg(unix)]
pub use calendar::LibcCalendar;
pub use convert::{
    to_host_time, to_mac_time, ClockOffsets, Result, TimeError,
    MAC_EPOCH_TO_UNIX_EPOCH_SECS, MAC_EPOCH_YEAR, SECS_1904_TO_1971,
};
