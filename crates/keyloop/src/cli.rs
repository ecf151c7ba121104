// Command-line interface definitions for keyloop.

use keyloop_core::Action;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "keyloop")]
#[command(author, version, about = "Record input once, replay it on a loop")]
#[command(long_about = "
Keyloop records pointer and keyboard input and replays it with the original
timing, once or on a loop. A separate hotkey listener process drives it
through trigger files, so the recorder needs no focus.

DEFAULT HOTKEYS:
  shift_l + r   start recording
  shift_l + q   stop recording or playback
  shift_l + s   start looping playback
  shift_l + e   stop looping playback
  ctrl + esc    stop the hotkey listener
")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the recorder with hotkeys (default if no command specified)
    Run {
        /// Saved sequence to make active at startup
        #[arg(long, value_name = "NAME")]
        sequence: Option<String>,
    },

    /// Hotkey listener process (started by `run`)
    Listener {
        /// Directory for trigger files and the pause marker
        #[arg(long, value_name = "DIR")]
        signal_dir: PathBuf,

        /// Keybind JSON file
        #[arg(long, value_name = "FILE")]
        keybinds: PathBuf,

        /// How often to check the keybind file for changes
        #[arg(long, value_name = "MS")]
        check_interval_ms: Option<u64>,
    },

    /// Play a saved sequence once in the foreground (Ctrl+C cancels)
    Play {
        /// Sequence name
        name: String,
    },

    /// Send an action to a running recorder
    Trigger {
        /// start_record, stop, play_task or end_task
        action: Action,
    },

    /// Suspend or resume hotkeys
    Pause {
        #[command(subcommand)]
        action: PauseAction,
    },

    /// Manage saved sequences
    Sequences {
        #[command(subcommand)]
        action: SequencesAction,
    },

    /// Show or change hotkeys
    Keybinds {
        #[command(subcommand)]
        action: KeybindsAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    /// Suspend hotkeys
    Enter,
    /// Resume hotkeys
    Exit,
    /// Print whether hotkeys are suspended
    Status,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SequencesAction {
    /// List saved sequences
    List,
    /// Delete a saved sequence
    Delete {
        /// Sequence name
        name: String,
    },
    /// Rename a saved sequence
    Rename {
        /// Current name
        from: String,
        /// New name
        to: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum KeybindsAction {
    /// Print the current bindings
    Show,
    /// Bind an action to a modifier + key chord
    Set {
        /// start_record, stop, play_task or end_task
        action: Action,
        /// Held key, e.g. shift_l, ctrl_r, alt_l
        modifier: String,
        /// Key completing the chord, e.g. r, f5, space
        key: String,
    },
    /// Restore the default bindings
    Reset,
}
