use crate::SECTOR_SIZE;

/// Total file size of a DiskCopy 4.2 400K floppy image (84-byte header + payload).
pub const DISKCOPY_400K_SIZE: u64 = 419_284;
/// Total file size of a DiskCopy 4.2 800K floppy image.
pub const DISKCOPY_800K_SIZE: u64 = 838_484;

const DISKCOPY_HEADER_LEN: u64 = 84;

/// Where payload data begins within an image file, and how many payload bytes follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskLayout {
    pub start_byte: u64,
    pub real_size: u64,
}

/// Classify a disk image's header offset and payload size from its total byte size.
///
/// The two DiskCopy magic sizes identify a 400K/800K floppy dump with an 84-byte header;
/// the payload is rounded down to a whole number of sectors. Anything else is treated as
/// a raw image with a short header of `total_size % 512` bytes (0..511).
///
/// Detection is a pure function of the size. `header_bytes` (the first bytes of the
/// file) is accepted for API symmetry with format sniffers that do inspect content; the
/// magic-size branch does not currently look at it.
pub fn detect_layout(total_size: u64, header_bytes: &[u8]) -> DiskLayout {
    let _ = header_bytes;
    if total_size == DISKCOPY_400K_SIZE || total_size == DISKCOPY_800K_SIZE {
        return DiskLayout {
            start_byte: DISKCOPY_HEADER_LEN,
            real_size: (total_size - DISKCOPY_HEADER_LEN) & !(SECTOR_SIZE - 1),
        };
    }
    let start_byte = total_size % SECTOR_SIZE;
    DiskLayout {
        start_byte,
        real_size: total_size - start_byte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diskcopy_magic_sizes() {
        // 419284 - 84 = 419200 (800 data sectors plus per-sector tag bytes), floored to
        // a sector multiple: 818 sectors.
        assert_eq!(
            detect_layout(DISKCOPY_400K_SIZE, &[]),
            DiskLayout {
                start_byte: 84,
                real_size: 418_816,
            }
        );
        assert_eq!(
            detect_layout(DISKCOPY_800K_SIZE, &[]),
            DiskLayout {
                start_byte: 84,
                real_size: 838_144,
            }
        );
    }

    #[test]
    fn sector_aligned_image_has_no_header() {
        // 1440K raw floppy image.
        assert_eq!(
            detect_layout(1_474_560, &[]),
            DiskLayout {
                start_byte: 0,
                real_size: 1_474_560,
            }
        );
    }

    #[test]
    fn stray_bytes_become_the_header() {
        assert_eq!(
            detect_layout(1_474_561, &[]),
            DiskLayout {
                start_byte: 1,
                real_size: 1_474_560,
            }
        );
        assert_eq!(
            detect_layout(1_474_560 + 511, &[]),
            DiskLayout {
                start_byte: 511,
                real_size: 1_474_560,
            }
        );
    }

    #[test]
    fn detection_ignores_header_contents() {
        let garbage = [0xFFu8; 256];
        assert_eq!(
            detect_layout(DISKCOPY_400K_SIZE, &garbage),
            detect_layout(DISKCOPY_400K_SIZE, &[])
        );
    }
}
