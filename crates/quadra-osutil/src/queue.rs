use quadra_guest_mem::{GuestAddr, GuestMemory};

use crate::Result;

/// `QElem.qLink` offset: the next-element pointer (0 terminates the list).
pub const QELEM_LINK: u32 = 0;
/// `QHdr.qHead` offset within a queue header.
pub const QHDR_HEAD: u32 = 2;
/// `QHdr.qTail` offset within a queue header.
pub const QHDR_TAIL: u32 = 6;

/// Appends the queue element at `elem` to the tail of the list rooted at `list`.
///
/// The element becomes the new end of list (its link is cleared first). An empty list
/// (zero tail) gets both head and tail pointed at `elem`; otherwise the old tail's link
/// is patched and only the tail field moves. The caller guarantees `elem` refers to a
/// valid, otherwise-unlinked record; no allocation happens here.
pub fn enqueue<M: GuestMemory>(mem: &mut M, elem: GuestAddr, list: GuestAddr) -> Result<()> {
    mem.write_u32_be(elem.wrapping_add(QELEM_LINK), 0)?;
    let tail = mem.read_u32_be(list.wrapping_add(QHDR_TAIL))?;
    if tail == 0 {
        mem.write_u32_be(list.wrapping_add(QHDR_HEAD), elem)?;
    } else {
        mem.write_u32_be(tail.wrapping_add(QELEM_LINK), elem)?;
    }
    mem.write_u32_be(list.wrapping_add(QHDR_TAIL), elem)?;
    Ok(())
}
