use crate::cli::{Cli, Commands, KeybindsAction, PauseAction, SequencesAction};

use keyloop_core::Action;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// WHAT: The clap definition passes clap's own consistency checks
/// WHY: Conflicting flags only surface at runtime otherwise
#[test]
fn given_cli_definition_when_debug_asserted_then_valid() {
    // Given/When/Then: clap validates the derived command
    Cli::command().debug_assert();
}

/// WHAT: No subcommand parses to None so the recorder runs by default
/// WHY: `keyloop` alone should start the recorder
#[test]
#[allow(clippy::unwrap_used)]
fn given_no_arguments_when_parsed_then_no_command() {
    // Given/When: Parsing a bare invocation
    let cli = Cli::try_parse_from(["keyloop"]).unwrap();

    // Then: No command and no config override
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
}

/// WHAT: Action names on the command line use their on-disk spelling
/// WHY: `keyloop trigger play_task` must write the same file a hotkey would
#[test]
#[allow(clippy::unwrap_used)]
fn given_action_name_when_trigger_parsed_then_action_matches() {
    // Given/When: Parsing a trigger command
    let cli = Cli::try_parse_from(["keyloop", "trigger", "play_task"]).unwrap();

    // Then: The action is parsed
    assert!(matches!(
        cli.command,
        Some(Commands::Trigger {
            action: Action::PlayTask
        })
    ));
}

/// WHAT: Unknown action names are rejected by the parser
/// WHY: A typo must not silently do nothing
#[test]
fn given_unknown_action_when_trigger_parsed_then_error() {
    // Given/When: Parsing a trigger with a bad action
    let result = Cli::try_parse_from(["keyloop", "trigger", "rewind"]);

    // Then: Parsing fails
    assert!(result.is_err());
}

/// WHAT: The global --config flag is accepted after a subcommand
/// WHY: Every subcommand resolves paths from the same config
#[test]
#[allow(clippy::unwrap_used)]
fn given_config_after_subcommand_when_parsed_then_config_set() {
    // Given/When: Parsing with --config after the subcommand
    let cli =
        Cli::try_parse_from(["keyloop", "sequences", "list", "--config", "/tmp/k.toml"]).unwrap();

    // Then: Both the subcommand and the path are captured
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
    assert!(matches!(
        cli.command,
        Some(Commands::Sequences {
            action: SequencesAction::List
        })
    ));
}

/// WHAT: keybinds set takes action, modifier and key positionally
/// WHY: Keeps the rebind command short enough to type
#[test]
#[allow(clippy::unwrap_used)]
fn given_keybinds_set_when_parsed_then_parts_captured() {
    // Given/When: Parsing a rebind
    let cli = Cli::try_parse_from(["keyloop", "keybinds", "set", "stop", "ctrl_l", "q"]).unwrap();

    // Then: All three parts are present
    assert!(matches!(
        cli.command,
        Some(Commands::Keybinds {
            action: KeybindsAction::Set {
                action: Action::Stop,
                ref modifier,
                ref key,
            },
        }) if modifier == "ctrl_l" && key == "q"
    ));
}

/// WHAT: The listener subcommand takes its paths as flags
/// WHY: The supervisor builds exactly these arguments
#[test]
#[allow(clippy::unwrap_used)]
fn given_listener_flags_when_parsed_then_paths_captured() {
    // Given/When: Parsing the arguments the supervisor passes
    let cli = Cli::try_parse_from([
        "keyloop",
        "listener",
        "--signal-dir",
        "/tmp/signals",
        "--keybinds",
        "/tmp/keybinds.json",
        "--check-interval-ms",
        "250",
    ])
    .unwrap();

    // Then: Every flag is captured
    assert!(matches!(
        cli.command,
        Some(Commands::Listener {
            ref signal_dir,
            ref keybinds,
            check_interval_ms: Some(250),
        }) if signal_dir == &PathBuf::from("/tmp/signals")
            && keybinds == &PathBuf::from("/tmp/keybinds.json")
    ));
}

/// WHAT: pause accepts enter, exit and status
/// WHY: Each maps to one PauseGate operation
#[test]
#[allow(clippy::unwrap_used)]
fn given_pause_status_when_parsed_then_status_action() {
    // Given/When: Parsing pause status
    let cli = Cli::try_parse_from(["keyloop", "pause", "status"]).unwrap();

    // Then: The status action is selected
    assert!(matches!(
        cli.command,
        Some(Commands::Pause {
            action: PauseAction::Status
        })
    ));
}
