mod capturer;
mod hotkey_listener;
mod keybind_watcher;
mod pause_gate;
mod support;
mod trigger_channel;
mod trigger_poller;
