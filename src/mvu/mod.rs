// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::time::Duration;

use crate::logic::submission::{self, SUBMIT_DELAY};
use crate::models::registration::Registration;
use crate::ui::components::registration_form::{
    self, RegistrationFormCommand, RegistrationFormModel, RegistrationFormMsg,
};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Registration form state.
    pub form: RegistrationFormModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Set when `status` reports an error.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
pub enum Msg {
    Form(RegistrationFormMsg),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    SubmitRegistration {
        registration: Registration,
        delay: Duration,
    },
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::DismissError => {
            model.error = None;
            model.status = None;
        }
        Msg::Form(m) => {
            let mut form_cmds = Vec::new();
            if let Some(event) = registration_form::update(&mut model.form, m, &mut form_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in form_cmds {
                match c {
                    RegistrationFormCommand::Submit(registration) => {
                        cmds.push(Command::SubmitRegistration {
                            registration,
                            delay: SUBMIT_DELAY,
                        })
                    }
                }
            }
        }
    }
}

/// Execute a command synchronously (on a worker thread) and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::SubmitRegistration {
            registration,
            delay,
        } => {
            // The simulated backend cannot reject; the form always completes.
            if let Err(err) = submission::submit(&registration, delay) {
                tracing::warn!(error = %err, "registration submission reported an error");
            }
            Msg::Form(RegistrationFormMsg::SubmissionFinished)
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
        model.status = Some(message);
    } else {
        model.status = Some(message);
        model.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registration::Field;
    use crate::ui::components::registration_form::FormPhase;

    fn edit(model: &mut AppModel, field: Field, value: &str) {
        let mut cmds = Vec::new();
        update(
            model,
            Msg::Form(RegistrationFormMsg::FieldChanged(field, value.into())),
            &mut cmds,
        );
        assert!(cmds.is_empty(), "editing should not enqueue commands");
    }

    fn fill_valid(model: &mut AppModel) {
        edit(model, Field::FirstName, "Ada");
        edit(model, Field::LastName, "Lovelace");
        edit(model, Field::Email, "ada@example.com");
        edit(model, Field::Age, "18");
        edit(model, Field::Password, "analytical");
        edit(model, Field::ConfirmPassword, "analytical");
    }

    #[test]
    fn submit_request_enqueues_and_completes() {
        let mut model = AppModel::default();
        fill_valid(&mut model);

        let mut cmds = Vec::new();
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);

        assert_eq!(cmds.len(), 1, "submit should enqueue command");
        assert_eq!(model.form.phase(), FormPhase::Submitting);

        let cmd = match cmds.pop().unwrap() {
            Command::SubmitRegistration { registration, delay } => {
                assert_eq!(delay, SUBMIT_DELAY);
                Command::SubmitRegistration {
                    registration,
                    delay: Duration::ZERO,
                }
            }
        };
        let msg = run_command(cmd);
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(cmds2.is_empty());
        assert!(model.error.is_none());
        assert_eq!(model.status.as_deref(), Some("Registration submitted."));
        assert_eq!(model.form.phase(), FormPhase::Idle);
        assert!(model.form.draft().is_blank());
    }

    #[test]
    fn invalid_submit_sets_error_without_command() {
        let mut model = AppModel::default();
        fill_valid(&mut model);
        edit(&mut model, Field::Email, "nope");

        let mut cmds = Vec::new();
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);

        assert!(cmds.is_empty());
        assert_eq!(model.error.as_deref(), Some("Please fix 1 invalid field(s)."));
        assert_eq!(model.form.errors().get(Field::Email), Some("Invalid email"));
        assert_eq!(model.form.phase(), FormPhase::Idle);
    }

    #[test]
    fn successful_submit_clears_previous_error() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);
        assert!(model.error.is_some());

        fill_valid(&mut model);
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);

        assert!(model.error.is_none());
        assert_eq!(model.status.as_deref(), Some("Submitting registration…"));
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn pending_commands_can_track_submission_flow() {
        let mut model = AppModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);

        // UI increments when dispatching commands to the worker.
        model.pending_commands += cmds.len();
        assert_eq!(model.pending_commands, 1);

        // Simulate worker response and UI decrement.
        let mut cmds2 = Vec::new();
        update(
            &mut model,
            Msg::Form(RegistrationFormMsg::SubmissionFinished),
            &mut cmds2,
        );
        model.pending_commands = model.pending_commands.saturating_sub(1);

        assert_eq!(model.pending_commands, 0);
        assert!(!model.form.is_submitting());
    }

    #[test]
    fn dismiss_error_clears_feedback() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Form(RegistrationFormMsg::SubmitRequested), &mut cmds);

        update(&mut model, Msg::DismissError, &mut cmds);

        assert!(model.error.is_none());
        assert!(model.status.is_none());
    }
}
