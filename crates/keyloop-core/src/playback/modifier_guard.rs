use crate::{InputInjector, KeyDirection, MODIFIER_GUARD_SET};

use std::sync::Arc;

use tracing::debug;

/// RAII guard that releases shift, control and alt (both sides) when dropped.
///
/// A playback interrupted between a recorded modifier press and its release
/// would otherwise leave that modifier held system-wide. The guard lives for
/// the whole playback, so completion, cancellation and task abort all end in
/// a release.
///
/// Release is best-effort: a failure is ignored, and the OS resets modifier
/// state on the user's next physical key press anyway.
pub struct ModifierGuard {
    injector: Arc<dyn InputInjector>,
}

impl ModifierGuard {
    /// Arm a guard that will release through `injector`.
    pub fn new(injector: Arc<dyn InputInjector>) -> Self {
        Self { injector }
    }

    /// Release every guarded modifier now.
    pub fn release_all(&self) {
        for key in MODIFIER_GUARD_SET {
            let _ = self.injector.key(key, KeyDirection::Release);
        }
        debug!("Guarded modifiers released");
    }
}

impl Drop for ModifierGuard {
    fn drop(&mut self) {
        self.release_all();
    }
}
