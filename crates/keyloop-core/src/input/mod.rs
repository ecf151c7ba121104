mod event;
mod key;
mod sequence;

pub use {
    event::{Event, EventKind, MouseButton},
    key::{Key, KeyParseError, MODIFIER_GUARD_SET, NamedKey},
    sequence::Sequence,
};
