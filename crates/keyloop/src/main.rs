//! Keyloop: record pointer and keyboard input once, replay it on a loop,
//! driven by global hotkeys from a separate listener process.

mod app;
mod app_command;
mod cli;
mod commands;
mod config;
mod enigo_injector;
mod error;
mod input_hook;
mod key_mapping;
mod listener_process;
mod listener_supervisor;
mod shutdown_signal;
mod startup_gate;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    enigo_injector::EnigoInjector,
    error::{AppError, Result as AppResult},
    listener_supervisor::ListenerSupervisor,
    startup_gate::StartupGate,
};

use crate::cli::Cli;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "keyloop=debug,keyloop_core=debug";

/// Application entry point.
fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(commands::dispatch(cli)) {
        error!(error = %e, "keyloop failed");
        std::process::exit(1);
    }
}
