#![forbid(unsafe_code)]

//! Disk-image layout detection and the media mount chain.
//!
//! Classic Mac disk images come in a handful of ad-hoc shapes: DiskCopy 4.2 floppy dumps
//! with an 84-byte proprietary header, and raw images that may carry a short (sub-sector)
//! header of whatever a capture tool prepended. There is no embedded metadata to go by,
//! so detection works from the total byte size alone.

mod layout;
mod mount;

pub use layout::{detect_layout, DiskLayout, DISKCOPY_400K_SIZE, DISKCOPY_800K_SIZE};
pub use mount::{MediaBackend, MountChain};

/// Sector size used by all supported media.
pub const SECTOR_SIZE: u64 = 512;
