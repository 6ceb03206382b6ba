// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the registration form.
//! Handles layout, the status bar, and wiring to the submission workers.

pub mod components;

use eframe::egui;

use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::registration_form;

/// Stateful egui application hosting the registration form.
pub struct RegisterApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl RegisterApp {
    /// Build the app and spawn command workers that wake `ctx` when they finish.
    pub fn new(ctx: egui::Context) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
            });
        }
        tracing::debug!(workers = threads, "command workers started");

        Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for RegisterApp {
    /// Drives a single UI frame.
    ///
    /// Drains worker results into the inbox, applies inbox messages to the MVU
    /// model (dispatching any resulting commands to the workers), then renders
    /// the top bar, status bar, and the form. Messages produced while
    /// rendering are handled on the next frame, which is requested right away.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Messages are applied in the order they were produced.
        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                } else {
                    tracing::error!("command workers are gone; command dropped");
                }
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "{} Register",
                    egui_phosphor::regular::USER_PLUS
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.set_max_width(320.0);
                    let form_msgs = registration_form::view(ui, &self.model.form);
                    self.inbox.extend(form_msgs.into_iter().map(Msg::Form));
                });
            });
        });

        if needs_follow_up_frame(&self.inbox) {
            ctx.request_repaint();
        }
    }
}

impl RegisterApp {
    /// Render latest status/error message when present.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        let Some(text) = self.model.status.clone() else {
            return;
        };
        let display = if self.model.pending_commands > 0 {
            format!("{}  ({} working…)", text, self.model.pending_commands)
        } else {
            text
        };
        let color = if self.model.error.is_some() {
            ui.visuals().error_fg_color
        } else {
            egui::Color32::from_gray(68)
        };

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(display).color(color));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
            if self.model.error.is_some()
                && ui
                    .small_button(egui_phosphor::regular::X)
                    .on_hover_text("Dismiss")
                    .clicked()
            {
                self.inbox.push(Msg::DismissError);
            }
        });
    }
}

/// Messages produced while rendering must be applied without waiting for input.
fn needs_follow_up_frame(inbox: &[Msg]) -> bool {
    !inbox.is_empty()
}
