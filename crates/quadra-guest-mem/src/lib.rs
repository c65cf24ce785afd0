#![forbid(unsafe_code)]

//! Guest (emulated Macintosh) memory abstraction.
//!
//! The emulated 68k address space is a plain byte array owned by the machine; OS-utility
//! code addresses it with 32-bit guest offsets and **big-endian** typed accessors, never
//! with native pointers or `repr(C)` structs. Keeping the accessor seam explicit lets
//! bounds-checked builds catch bad guest addresses instead of silently corrupting host
//! memory.

use std::fmt;

use thiserror::Error;

/// An offset into the guest address space.
pub type GuestAddr = u32;

/// Errors returned by [`GuestMemory`] backends.
///
/// An out-of-range access is a contract violation by the guest (or by the code computing
/// the address), surfaced as an error rather than undefined behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuestMemoryError {
    #[error("guest memory access out of range: addr={addr:#x} len={len} size={size:#x}")]
    OutOfRange {
        addr: GuestAddr,
        len: usize,
        size: u32,
    },
}

pub type Result<T> = std::result::Result<T, GuestMemoryError>;

/// Byte-addressed guest memory with big-endian typed helpers.
///
/// All multi-byte accessors are big-endian: the guest is a 68k Mac and every OS data
/// structure this workspace touches (queue headers, drive queue elements, low-memory
/// globals) is stored big-endian.
pub trait GuestMemory {
    /// Size of the guest address space in bytes.
    fn size(&self) -> u32;

    /// Reads bytes from guest memory into `dst`.
    fn read_into(&self, addr: GuestAddr, dst: &mut [u8]) -> Result<()>;

    /// Writes bytes from `src` into guest memory.
    fn write_from(&mut self, addr: GuestAddr, src: &[u8]) -> Result<()>;

    fn read_u8(&self, addr: GuestAddr) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_into(addr, &mut buf)?;
        Ok(buf[0])
    }

    fn read_u16_be(&self, addr: GuestAddr) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_into(addr, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_u32_be(&self, addr: GuestAddr) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(addr, &mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn write_u8(&mut self, addr: GuestAddr, value: u8) -> Result<()> {
        self.write_from(addr, &[value])
    }

    fn write_u16_be(&mut self, addr: GuestAddr, value: u16) -> Result<()> {
        self.write_from(addr, &value.to_be_bytes())
    }

    fn write_u32_be(&mut self, addr: GuestAddr, value: u32) -> Result<()> {
        self.write_from(addr, &value.to_be_bytes())
    }
}

/// `Vec<u8>`-backed guest memory.
///
/// This is the storage used by the machine itself and by unit tests; devices and
/// OS-utility code only see the [`GuestMemory`] trait.
pub struct VecGuestMemory {
    bytes: Vec<u8>,
}

impl VecGuestMemory {
    /// Creates a zero-filled guest memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn checked_range(&self, addr: GuestAddr, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(GuestMemoryError::OutOfRange {
                addr,
                len,
                size: self.bytes.len() as u32,
            })?;
        Ok(start..end)
    }
}

impl fmt::Debug for VecGuestMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecGuestMemory")
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl GuestMemory for VecGuestMemory {
    fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    fn read_into(&self, addr: GuestAddr, dst: &mut [u8]) -> Result<()> {
        let range = self.checked_range(addr, dst.len())?;
        dst.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write_from(&mut self, addr: GuestAddr, src: &[u8]) -> Result<()> {
        let range = self.checked_range(addr, src.len())?;
        self.bytes[range].copy_from_slice(src);
        Ok(())
    }
}
