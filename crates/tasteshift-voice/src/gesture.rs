use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide "the user has interacted" flag.
///
/// Set once by the first click, touch, key press or scroll and never
/// cleared. Audio is refused until it is set.
#[derive(Debug, Clone, Default)]
pub struct GestureFlag(Arc<AtomicBool>);

impl GestureFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the gesture. Returns `true` only for the call that set it.
    pub fn mark(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
