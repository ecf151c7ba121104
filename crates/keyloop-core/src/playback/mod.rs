mod injector;
mod loop_controller;
mod modifier_guard;
mod scheduler;

pub use {
    injector::{InputInjector, KeyDirection},
    loop_controller::{DEFAULT_LOOP_INTERVAL, LoopController, LoopMode, LoopReport},
    modifier_guard::ModifierGuard,
    scheduler::{DEFAULT_SLICE, PlaybackOutcome, PlaybackScheduler, sleep_until_sliced},
};
