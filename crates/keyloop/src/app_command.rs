use keyloop_core::Action;

/// Commands delivered to the main application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// A hotkey action arrived through the trigger channel.
    Action {
        /// The action to dispatch.
        action: Action,
    },
    /// Request application shutdown.
    Shutdown,
}
