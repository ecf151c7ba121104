#[allow(clippy::module_inception)]
mod session;
mod session_state;

pub use {
    session::{Session, StopOutcome},
    session_state::SessionState,
};
