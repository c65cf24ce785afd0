/// A storage back end (floppy, generic disk, optical) that may claim a media handle.
///
/// `try_mount` returns `true` if the backend recognized the media and mounted it. The
/// handle type is left to the embedder; the chain only needs to pass it along.
pub trait MediaBackend<H> {
    /// Backend name, for diagnostics.
    fn name(&self) -> &'static str;

    fn try_mount(&mut self, handle: &H) -> bool;
}

/// Fixed-priority media mount chain.
///
/// Backends are tried in registration order (floppy, then generic disk, then optical on
/// a stock machine); the first to accept wins. Media that no backend recognizes is left
/// unmounted, which is a no-op, not an error: the user may simply have inserted
/// something the machine has no driver for.
pub struct MountChain<H> {
    backends: Vec<Box<dyn MediaBackend<H>>>,
}

impl<H> MountChain<H> {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Appends a backend at the end of the priority order.
    pub fn push(&mut self, backend: Box<dyn MediaBackend<H>>) {
        self.backends.push(backend);
    }

    /// Offers `handle` to each backend in priority order.
    ///
    /// Returns `true` if some backend mounted the media.
    pub fn mount_volume(&mut self, handle: &H) -> bool {
        for backend in &mut self.backends {
            if backend.try_mount(handle) {
                tracing::debug!(backend = backend.name(), "media mounted");
                return true;
            }
        }
        tracing::debug!("no backend claimed media; leaving unmounted");
        false
    }
}

impl<H> Default for MountChain<H> {
    fn default() -> Self {
        Self::new()
    }
}
