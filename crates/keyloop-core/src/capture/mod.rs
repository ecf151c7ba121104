mod capturer;
pub(crate) mod event_store;

pub use {capturer::Capturer, event_store::EventStore};
