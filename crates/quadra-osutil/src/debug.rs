use crate::{OsUtilError, Result};

/// External ADB interrupt collaborator, poked by the debugger poll selector.
pub trait AdbInterruptSink {
    fn signal_adb_interrupt(&mut self);
}

/// Selectors understood by the `DebugUtil` trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSelector {
    GetMax,
    Enter,
    Exit,
    Poll,
}

impl DebugSelector {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(DebugSelector::GetMax),
            1 => Some(DebugSelector::Enter),
            2 => Some(DebugSelector::Exit),
            3 => Some(DebugSelector::Poll),
            _ => None,
        }
    }
}

/// `DebugUtil` trap dispatcher.
///
/// `GetMax` reports the highest implemented selector; `Enter`/`Exit` are accepted
/// no-ops; `Poll` signals a pending ADB interrupt. No state is retained between calls.
/// Unknown selectors return [`OsUtilError::UnknownSelector`] (`paramErr` to the guest).
pub fn debug_util<S: AdbInterruptSink>(selector: u32, adb: &mut S) -> Result<u32> {
    match DebugSelector::from_raw(selector) {
        Some(DebugSelector::GetMax) => Ok(3),
        Some(DebugSelector::Enter) | Some(DebugSelector::Exit) => Ok(0),
        Some(DebugSelector::Poll) => {
            adb.signal_adb_interrupt();
            Ok(0)
        }
        None => Err(OsUtilError::UnknownSelector(selector)),
    }
}
