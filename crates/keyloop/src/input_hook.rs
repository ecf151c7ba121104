//! Global input hooks.
//!
//! `rdev::listen` blocks its thread for the life of the process and offers no
//! way to stop it, so each hook gets a dedicated thread that simply ends with
//! the process.

use crate::{
    AppError, AppResult,
    key_mapping::{button_from_rdev, from_rdev},
};

use keyloop_core::{Capturer, EventKind};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicI32, Ordering},
    },
    thread,
};

use error_location::ErrorLocation;
use rdev::EventType;
use tracing::{error, info, trace};

/// Start a hook thread delivering every raw event to `callback`.
#[track_caller]
pub(crate) fn spawn_hook<F>(name: &str, callback: F) -> AppResult<()>
where
    F: FnMut(rdev::Event) + Send + 'static,
{
    let thread_name = name.to_string();
    thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            info!(hook = %thread_name, "Input hook installed");
            if let Err(e) = rdev::listen(callback) {
                error!(hook = %thread_name, error = ?e, "Input hook stopped");
            }
        })
        .map_err(|e| AppError::InputHookFailed {
            reason: format!("Failed to start {} thread: {}", name, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}

/// Feed pointer and keyboard events into `capturer` for the life of the
/// process. The capturer's armed flag decides what is kept.
#[track_caller]
pub(crate) fn spawn_capture_hook(capturer: Arc<Capturer>) -> AppResult<()> {
    // Clicks carry the last position a move reported.
    let mouse_x = AtomicI32::new(0);
    let mouse_y = AtomicI32::new(0);

    spawn_hook("keyloop-capture", move |event: rdev::Event| {
        let kind = match event.event_type {
            EventType::MouseMove { x, y } => {
                let (x, y) = (x as i32, y as i32);
                mouse_x.store(x, Ordering::Relaxed);
                mouse_y.store(y, Ordering::Relaxed);
                Some(EventKind::Move { x, y })
            }
            EventType::ButtonPress(button) => button_from_rdev(button).map(|button| EventKind::Click {
                x: mouse_x.load(Ordering::Relaxed),
                y: mouse_y.load(Ordering::Relaxed),
                button,
            }),
            EventType::KeyPress(key) => from_rdev(key).map(|key| EventKind::KeyDown { key }),
            EventType::KeyRelease(key) => from_rdev(key).map(|key| EventKind::KeyUp { key }),
            EventType::ButtonRelease(_) | EventType::Wheel { .. } => None,
        };

        match kind {
            Some(kind) => {
                capturer.record(kind);
            }
            None => trace!(event = ?event.event_type, "Input not recorded"),
        }
    })
}
