// filepath: src/frame.rs
//! Frame callback bookkeeping
//!
//! At most one `wl_surface.frame` request may be outstanding. Resize-driven
//! redraws and frame-driven redraws both ask for the next frame, and the
//! guard keeps them from stacking callbacks.

/// What caused a present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Configure,
    Rescale,
    Frame,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    requested: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the caller should issue a frame request now
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.requested += 1;
        true
    }

    /// Mark the outstanding callback as delivered
    pub fn complete(&mut self) {
        self.pending = false;
    }

    /// Decide whether a present caused by `wake` should ask for another
    /// frame callback. A `Frame` wake consumes the outstanding callback
    /// first; other wakes only request when none is outstanding.
    pub fn on_present(&mut self, wake: Wake, animates: bool) -> bool {
        if wake == Wake::Frame {
            self.complete();
        }
        animates && self.request()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of frame requests issued
    pub fn requested(&self) -> u64 {
        self.requested
    }
}
