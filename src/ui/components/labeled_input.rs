// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Labeled single-line input with its validation error rendered beneath it.

use eframe::egui;

/// Kind of data an input collects; drives masking and hint text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Password,
}

impl InputKind {
    fn hint(self) -> &'static str {
        match self {
            InputKind::Text => "",
            InputKind::Email => "name@example.com",
            InputKind::Number => "e.g., 18",
            InputKind::Password => "At least 6 characters",
        }
    }
}

/// What happened to the input during this frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// New text when the user edited the input.
    pub changed: Option<String>,
    /// Enter was pressed while the input had focus.
    pub submitted: bool,
}

/// Draw `label`, the input, and `error` (if any) stacked vertically.
pub fn labeled_input(
    ui: &mut egui::Ui,
    label: &str,
    kind: InputKind,
    value: &str,
    error: Option<&str>,
    enabled: bool,
) -> InputOutcome {
    let mut outcome = InputOutcome::default();

    ui.vertical(|ui| {
        ui.label(format!("{label}:"));

        let mut buffer = value.to_owned();
        let edit = egui::TextEdit::singleline(&mut buffer)
            .password(kind == InputKind::Password)
            .hint_text(kind.hint())
            .desired_width(280.0);
        let response = ui.add_enabled(enabled, edit);

        if response.changed() {
            outcome.changed = Some(buffer);
        }
        outcome.submitted =
            response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter));

        if let Some(message) = error {
            ui.label(
                egui::RichText::new(message)
                    .small()
                    .color(ui.visuals().error_fg_color),
            );
        }
    });

    outcome
}
