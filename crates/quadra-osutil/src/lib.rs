#![forbid(unsafe_code)]

//! Mac OS utility operations over guest-resident data structures.
//!
//! The classic Mac OS keeps its bookkeeping (queue headers, the drive queue, low-memory
//! globals) inside guest memory at documented offsets. This crate walks and patches
//! those structures through the [`quadra_guest_mem::GuestMemory`] seam; it never owns
//! the records it touches.

mod debug;
mod drives;
mod queue;

use thiserror::Error;

pub use debug::{debug_util, AdbInterruptSink, DebugSelector};
pub use drives::{find_free_drive_number, DRIVE_QUEUE_HDR, DRV_STS_QDRIVE, DRV_STS_QLINK};
pub use queue::{enqueue, QELEM_LINK, QHDR_HEAD, QHDR_TAIL};

use quadra_guest_mem::GuestMemoryError;

/// Mac OS `paramErr` result code, reported to the guest for unknown selectors.
pub const PARAM_ERR: i16 = -50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OsUtilError {
    #[error(transparent)]
    Memory(#[from] GuestMemoryError),

    /// The guest invoked a dispatcher selector outside the known table. This is a
    /// normal, expected code path; it maps to `paramErr` on the guest side.
    #[error("unknown debug selector {0:#x}")]
    UnknownSelector(u32),
}

impl OsUtilError {
    /// The Mac OS result code the guest should observe for this error.
    pub fn os_err_code(&self) -> i16 {
        match self {
            // Memory violations have no guest-visible code; the dispatcher contract only
            // defines paramErr. Report paramErr for both.
            OsUtilError::Memory(_) => PARAM_ERR,
            OsUtilError::UnknownSelector(_) => PARAM_ERR,
        }
    }
}

pub type Result<T> = std::result::Result<T, OsUtilError>;
