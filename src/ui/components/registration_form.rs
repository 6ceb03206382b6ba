// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration form component: draft state, inline errors, and the submit lifecycle.

use eframe::egui;

use crate::models::registration::{
    Field, FieldErrors, Registration, RegistrationDraft, validate, validate_field,
};
use crate::ui::components::{InputKind, labeled_input};

/// Where the form is in its submit lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Inputs editable; submit triggers validation.
    #[default]
    Idle,
    /// A validated record is being handed off; inputs are locked.
    Submitting,
}

/// UI model for the registration form, kept free of side effects.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RegistrationFormModel {
    draft: RegistrationDraft,
    errors: FieldErrors,
    phase: FormPhase,
}

impl RegistrationFormModel {
    #[allow(dead_code)]
    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    #[allow(dead_code)]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }
}

/// Messages emitted by the form view (and by the submission worker).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationFormMsg {
    FieldChanged(Field, String),
    SubmitRequested,
    SubmissionFinished,
}

/// Side effects requested by the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationFormCommand {
    Submit(Registration),
}

/// User-facing feedback surfaced to the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationFormEvent {
    pub message: String,
    pub is_error: bool,
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(
    model: &mut RegistrationFormModel,
    msg: RegistrationFormMsg,
    cmds: &mut Vec<RegistrationFormCommand>,
) -> Option<RegistrationFormEvent> {
    match msg {
        RegistrationFormMsg::FieldChanged(field, value) => {
            if model.is_submitting() {
                return None;
            }
            model.draft.set(field, value);
            // Live validation only touches the edited field.
            model
                .errors
                .set(field, validate_field(&model.draft, field));
            None
        }
        RegistrationFormMsg::SubmitRequested => {
            if model.is_submitting() {
                return None;
            }
            match validate(&model.draft) {
                Ok(registration) => {
                    model.errors.clear();
                    model.phase = FormPhase::Submitting;
                    tracing::debug!("registration validated, starting submission");
                    cmds.push(RegistrationFormCommand::Submit(registration));
                    Some(RegistrationFormEvent {
                        message: "Submitting registration…".into(),
                        is_error: false,
                    })
                }
                Err(errors) => {
                    let count = errors.len();
                    let fields: Vec<&str> = errors.iter().map(|(f, _)| f.key()).collect();
                    tracing::debug!(invalid = count, ?fields, "registration rejected by validation");
                    model.errors = errors;
                    Some(RegistrationFormEvent {
                        message: format!("Please fix {count} invalid field(s)."),
                        is_error: true,
                    })
                }
            }
        }
        RegistrationFormMsg::SubmissionFinished => {
            if !model.is_submitting() {
                return None;
            }
            model.draft = RegistrationDraft::default();
            model.errors.clear();
            model.phase = FormPhase::Idle;
            Some(RegistrationFormEvent {
                message: "Registration submitted.".into(),
                is_error: false,
            })
        }
    }
}

/// Render the form and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &RegistrationFormModel) -> Vec<RegistrationFormMsg> {
    let mut msgs = Vec::new();
    let enabled = !model.is_submitting();

    for field in Field::ALL {
        let outcome = labeled_input(
            ui,
            field.label(),
            input_kind(field),
            model.draft.value(field),
            model.errors.get(field),
            enabled,
        );
        if let Some(value) = outcome.changed {
            msgs.push(RegistrationFormMsg::FieldChanged(field, value));
        }
        if outcome.submitted {
            msgs.push(RegistrationFormMsg::SubmitRequested);
        }
        ui.add_space(4.0);
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let label = match model.phase() {
            FormPhase::Idle => "Submit",
            FormPhase::Submitting => "Submitting...",
        };
        let button = egui::Button::new(label).min_size(egui::vec2(280.0, 0.0));
        if ui.add_enabled(enabled, button).clicked() {
            msgs.push(RegistrationFormMsg::SubmitRequested);
        }
        if model.is_submitting() {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });

    msgs
}

fn input_kind(field: Field) -> InputKind {
    match field {
        Field::FirstName | Field::LastName => InputKind::Text,
        Field::Email => InputKind::Email,
        Field::Age => InputKind::Number,
        Field::Password | Field::ConfirmPassword => InputKind::Password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_valid(model: &mut RegistrationFormModel) {
        let values = [
            (Field::FirstName, "Al"),
            (Field::LastName, "Turing"),
            (Field::Email, "al@example.com"),
            (Field::Age, "41"),
            (Field::Password, "enigma42"),
            (Field::ConfirmPassword, "enigma42"),
        ];
        let mut cmds = Vec::new();
        for (field, value) in values {
            update(
                model,
                RegistrationFormMsg::FieldChanged(field, value.into()),
                &mut cmds,
            );
        }
        assert!(cmds.is_empty(), "editing should not enqueue commands");
    }

    #[test]
    fn valid_submit_locks_form_and_enqueues_submission() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);

        let mut cmds = Vec::new();
        let event = update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds)
            .expect("event expected");

        assert!(!event.is_error);
        assert_eq!(model.phase(), FormPhase::Submitting);
        assert!(model.errors().is_empty());
        assert_eq!(cmds.len(), 1);
        let RegistrationFormCommand::Submit(registration) = &cmds[0];
        assert_eq!(registration.first_name(), "Al");
        assert_eq!(registration.age(), 41);
    }

    #[test]
    fn invalid_submit_stays_idle_with_errors() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();
        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::Age, "17".into()),
            &mut cmds,
        );

        let event = update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds)
            .expect("event expected");

        assert!(event.is_error);
        assert_eq!(event.message, "Please fix 1 invalid field(s).");
        assert!(cmds.is_empty());
        assert_eq!(model.phase(), FormPhase::Idle);
        assert_eq!(model.errors().get(Field::Age), Some("Age>=18"));
    }

    #[test]
    fn empty_submit_reports_every_field() {
        let mut model = RegistrationFormModel::default();
        let mut cmds = Vec::new();

        update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds);

        assert!(cmds.is_empty());
        assert_eq!(model.errors().len(), Field::ALL.len());
    }

    #[test]
    fn password_mismatch_flags_confirmation_only() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();
        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::Password, "secret1".into()),
            &mut cmds,
        );
        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::ConfirmPassword, "secret2".into()),
            &mut cmds,
        );

        update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds);

        let errors: Vec<_> = model.errors().iter().collect();
        assert_eq!(
            errors,
            vec![(Field::ConfirmPassword, "Passwords don't match")]
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn live_validation_updates_only_edited_field() {
        let mut model = RegistrationFormModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::FirstName, "A".into()),
            &mut cmds,
        );
        assert_eq!(
            model.errors().get(Field::FirstName),
            Some("String must contain at least 2 character(s)")
        );
        assert_eq!(model.errors().len(), 1);

        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::FirstName, "Al".into()),
            &mut cmds,
        );
        assert!(model.errors().is_empty());
    }

    #[test]
    fn edits_and_resubmits_ignored_while_submitting() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds);
        cmds.clear();

        let again = update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds);
        update(
            &mut model,
            RegistrationFormMsg::FieldChanged(Field::FirstName, "Bob".into()),
            &mut cmds,
        );

        assert!(again.is_none());
        assert!(cmds.is_empty());
        assert_eq!(model.draft().first_name, "Al");
    }

    #[test]
    fn finished_submission_resets_form() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, RegistrationFormMsg::SubmitRequested, &mut cmds);

        let event = update(&mut model, RegistrationFormMsg::SubmissionFinished, &mut cmds)
            .expect("event expected");

        assert_eq!(event.message, "Registration submitted.");
        assert_eq!(model.phase(), FormPhase::Idle);
        assert!(model.draft().is_blank());
        assert!(model.errors().is_empty());
    }

    #[test]
    fn stray_completion_while_idle_is_ignored() {
        let mut model = RegistrationFormModel::default();
        fill_valid(&mut model);
        let mut cmds = Vec::new();

        let event = update(&mut model, RegistrationFormMsg::SubmissionFinished, &mut cmds);

        assert!(event.is_none());
        assert_eq!(model.draft().last_name, "Turing");
    }
}
