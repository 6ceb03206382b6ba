// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod labeled_input;
pub mod registration_form;

pub use labeled_input::{InputKind, labeled_input};
