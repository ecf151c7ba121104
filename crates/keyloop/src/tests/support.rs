#![allow(clippy::unwrap_used)]

use crate::config::Config;

use keyloop_core::{CoreResult, InputInjector, Key, KeyDirection, MouseButton};

use std::sync::{Arc, Mutex};

/// Injector that only remembers what it was asked to do.
#[derive(Default)]
pub(crate) struct TestInjector {
    moves: Mutex<Vec<(i32, i32)>>,
    keys: Mutex<Vec<(Key, KeyDirection)>>,
}

impl TestInjector {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn moves(&self) -> Vec<(i32, i32)> {
        self.moves.lock().unwrap().clone()
    }

    pub(crate) fn released(&self) -> Vec<Key> {
        self.keys
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, direction)| *direction == KeyDirection::Release)
            .map(|(key, _)| *key)
            .collect()
    }
}

impl InputInjector for TestInjector {
    fn move_to(&self, x: i32, y: i32) -> CoreResult<()> {
        self.moves.lock().unwrap().push((x, y));
        Ok(())
    }

    fn click(&self, _button: MouseButton) -> CoreResult<()> {
        Ok(())
    }

    fn key(&self, key: Key, direction: KeyDirection) -> CoreResult<()> {
        self.keys.lock().unwrap().push((key, direction));
        Ok(())
    }
}

/// Defaults with short intervals so tests do not wait on the clock.
pub(crate) fn fast_config() -> Config {
    let mut config = Config::default();
    config.signals.poll_interval_ms = 10;
    config.playback.loop_interval_ms = 20;
    config.playback.slice_ms = 10;
    config.listener.enabled = false;
    config
}
