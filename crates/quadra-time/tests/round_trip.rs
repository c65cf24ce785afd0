//! Round-trip properties of the host <-> Mac time conversion.
//!
//! All properties run against the deterministic [`UtcCalendar`] so they hold regardless
//! of the machine's timezone database.

use proptest::prelude::*;

use quadra_time::{
    to_host_time, to_mac_time, ClockOffsets, HostCalendar, LocalDateTime, TimeError,
    UtcCalendar, MAC_EPOCH_TO_UNIX_EPOCH_SECS, SECS_1904_TO_1971,
};

/// Latest host instant whose Mac time still fits in u32.
const MAX_HOST_INSTANT: i64 = u32::MAX as i64 - MAC_EPOCH_TO_UNIX_EPOCH_SECS;

proptest! {
    // Host -> guest -> host is the identity for zero offsets, over the whole span the
    // u32 guest value can express (1904 .. 2040).
    #[test]
    fn host_round_trip_zero_offsets(instant in -MAC_EPOCH_TO_UNIX_EPOCH_SECS..=MAX_HOST_INSTANT) {
        let mac = to_mac_time(&UtcCalendar, ClockOffsets::ZERO, instant);
        let back = to_host_time(&UtcCalendar, ClockOffsets::ZERO, mac).unwrap();
        prop_assert_eq!(back, instant);
    }

    // Guest -> host -> guest is exact for every u32 guest value.
    #[test]
    fn mac_round_trip_zero_offsets(mac in any::<u32>()) {
        let host = to_host_time(&UtcCalendar, ClockOffsets::ZERO, mac).unwrap();
        prop_assert_eq!(to_mac_time(&UtcCalendar, ClockOffsets::ZERO, host), mac);
    }

    // Offsets pulling the calendar backwards are the ones that could land before the
    // epoch; the year clamp and day-count clamp must prevent that for any magnitude.
    // (Forward offsets cannot precede the epoch, they can only wrap the u32 far in the
    // future, which mirrors the 32-bit guest representation.) Round-trip equality is
    // deliberately NOT asserted here; it does not hold under offsets.
    #[test]
    fn backward_offsets_never_precede_the_epoch(
        instant in -MAC_EPOCH_TO_UNIX_EPOCH_SECS..=MAX_HOST_INSTANT,
        year_offset in i32::MIN..=0,
        day_offset in -10_000_000i32..=0,
    ) {
        let offsets = ClockOffsets { year_offset, day_offset };
        let mac = to_mac_time(&UtcCalendar, offsets, instant);
        // With non-positive offsets the clamped day count never exceeds the unshifted
        // one, so the u32 cannot have wrapped and the decode below is meaningful.
        let date = UtcCalendar
            .breakdown(-MAC_EPOCH_TO_UNIX_EPOCH_SECS + i64::from(mac))
            .unwrap();
        prop_assert!(date.year >= 1904);
        // Fully collapsed offsets pin the date to the epoch day itself.
        let collapsed = to_mac_time(
            &UtcCalendar,
            ClockOffsets { year_offset: i32::MIN, day_offset: i32::MIN + 1 },
            instant,
        );
        prop_assert!(collapsed < 86_400);
    }
}

/// A calendar with a Windows-style range limit: it refuses to compose any pre-1970
/// date, forcing the 1971 reference indirection.
struct Post1970Calendar;

impl HostCalendar for Post1970Calendar {
    fn breakdown(&self, instant: i64) -> Option<LocalDateTime> {
        UtcCalendar.breakdown(instant)
    }

    fn compose(&self, fields: &LocalDateTime) -> Option<i64> {
        UtcCalendar.compose(fields).filter(|&t| t >= 0)
    }

    fn spans_guest_epoch(&self) -> bool {
        false
    }
}

#[test]
fn shifted_reference_path_matches_direct_path() {
    for mac in [0u32, 1, 86_400, 2_082_844_800, u32::MAX] {
        let direct = to_host_time(&UtcCalendar, ClockOffsets::ZERO, mac).unwrap();
        let shifted = to_host_time(&Post1970Calendar, ClockOffsets::ZERO, mac).unwrap();
        assert_eq!(direct, shifted, "mac_time={mac}");
    }
}

#[test]
fn shifted_reference_constant_is_1971() {
    // The workaround constant must equal what the direct path computes for 1971-01-01.
    let ref_1971 = UtcCalendar
        .compose(&LocalDateTime::midnight(1971, 1, 1))
        .unwrap();
    assert_eq!(ref_1971 - SECS_1904_TO_1971, -MAC_EPOCH_TO_UNIX_EPOCH_SECS);
}

#[test]
fn range_limited_host_without_1971_fails_cleanly() {
    // If even the shifted reference date cannot be composed, conversion reports an
    // error instead of inventing an instant.
    struct Hopeless;

    impl HostCalendar for Hopeless {
        fn breakdown(&self, instant: i64) -> Option<LocalDateTime> {
            UtcCalendar.breakdown(instant)
        }

        fn compose(&self, _fields: &LocalDateTime) -> Option<i64> {
            None
        }

        fn spans_guest_epoch(&self) -> bool {
            false
        }
    }

    assert_eq!(
        to_host_time(&Hopeless, ClockOffsets::ZERO, 0).unwrap_err(),
        TimeError::UnrepresentableDate
    );
}
