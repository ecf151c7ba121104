mod json_sequence_store;
mod sequence_store;

pub use {
    json_sequence_store::{JsonSequenceStore, SEQUENCE_EXTENSION},
    sequence_store::{DEFAULT_SEQUENCE_NAME, SequenceStore},
};
