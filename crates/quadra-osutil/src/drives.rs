use quadra_guest_mem::GuestMemory;

use crate::queue::{QELEM_LINK, QHDR_HEAD};
use crate::Result;

/// Low-memory global `DrvQHdr`: the header of the system drive queue.
pub const DRIVE_QUEUE_HDR: u32 = 0x308;

/// `DrvSts.qLink` offset. Drive queue links point at this field, not at the record base.
pub const DRV_STS_QLINK: u32 = 6;
/// `DrvSts.dQDrive` offset: the 16-bit drive number.
pub const DRV_STS_QDRIVE: u32 = 12;

fn is_drive_number_free<M: GuestMemory>(mem: &M, num: i32) -> Result<bool> {
    let mut elem = mem.read_u32_be(DRIVE_QUEUE_HDR + QHDR_HEAD)?;
    while elem != 0 {
        let record = elem.wrapping_sub(DRV_STS_QLINK);
        if i32::from(mem.read_u16_be(record.wrapping_add(DRV_STS_QDRIVE))?) == num {
            return Ok(false);
        }
        elem = mem.read_u32_be(elem.wrapping_add(QELEM_LINK))?;
    }
    Ok(true)
}

/// Returns the smallest drive number >= `starting` not present in the drive queue.
///
/// Each collision restarts the scan from the queue head. Worst case is O(n*k), but the
/// drive queue holds a handful of mounted volumes in practice, so the naive rescan beats
/// carrying a de-duplication set.
pub fn find_free_drive_number<M: GuestMemory>(mem: &M, starting: i32) -> Result<i32> {
    let mut num = starting;
    while !is_drive_number_free(mem, num)? {
        num += 1;
    }
    Ok(num)
}
