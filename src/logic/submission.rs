// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Simulated hand-off of a validated registration to a backend.
//!
//! There is no real endpoint: the record is logged (secrets masked) and the
//! worker blocks for a fixed delay to mimic network latency. Nothing here
//! re-validates the data, so a real backend must enforce the same rules.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::models::registration::Registration;

/// Simulated round-trip time of a submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Encode the loggable JSON body for a registration (passwords masked).
///
/// # Errors
///
/// Returns an error when the record cannot be serialized.
pub fn log_payload(registration: &Registration) -> Result<String> {
    serde_json::to_string(&registration.redacted())
        .context("Failed to encode registration for logging")
}

/// Hand a validated registration to the (simulated) backend and wait `delay`.
///
/// The wait always happens, even if logging the payload fails.
///
/// # Errors
///
/// Returns the payload encoding error after the delay has elapsed.
pub fn submit(registration: &Registration, delay: Duration) -> Result<()> {
    let payload = log_payload(registration);
    if let Ok(body) = &payload {
        tracing::info!(payload = %body, "submitting registration");
    }

    thread::sleep(delay);

    tracing::info!(
        email = registration.email(),
        ?delay,
        "registration submission finished"
    );
    payload.map(|_| ())
}
