use crate::{CoreResult, Key, MouseButton};

/// Direction of a synthetic key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    /// Key down.
    Press,
    /// Key up.
    Release,
}

/// The system's input-injection surface.
///
/// Implementations must not block for long: the scheduler calls them from
/// an async task between timed waits.
pub trait InputInjector: Send + Sync {
    /// Warp the pointer to an absolute screen position.
    fn move_to(&self, x: i32, y: i32) -> CoreResult<()>;

    /// Press and release a mouse button at the current pointer position.
    fn click(&self, button: MouseButton) -> CoreResult<()>;

    /// Press or release a key.
    fn key(&self, key: Key, direction: KeyDirection) -> CoreResult<()>;
}
