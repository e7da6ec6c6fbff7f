//! Prescription upload form, used on the landing page and on its own screen.

use egui::{self, RichText};
use pharmacy_types::upload::{PrescriptionFile, UploadState};

use super::{back_home, primary_button, secondary_button, UiAction};
use crate::theme::*;

const STEPS: [&str; 3] = ["Upload clear image", "Pharmacist verifies", "Delivery to Doorstep"];

/// Dedicated upload screen.
pub fn upload_page(ui: &mut egui::Ui, upload_state: &UploadState, notice: Option<&str>) -> Vec<UiAction> {
    let mut actions = Vec::new();
    back_home(ui, &mut actions);
    ui.add_space(8.0);
    actions.extend(upload_form(ui, upload_state, notice));
    actions
}

pub fn upload_form(ui: &mut egui::Ui, upload_state: &UploadState, notice: Option<&str>) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Upload Prescription").color(TEXT_PRIMARY).strong().size(24.0));
        ui.label(
            RichText::new(
                "Upload a clear photo of your doctor's prescription. \
                 Our pharmacists will verify and process your order.",
            )
            .color(TEXT_SECONDARY),
        );
    });
    ui.add_space(12.0);

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .stroke(egui::Stroke::new(1.5, BORDER))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            match upload_state.file() {
                Some(file) => selected_file(ui, file, &mut actions),
                None => ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").color(ACCENT).size(36.0));
                    if secondary_button(ui, "Select a file").clicked() {
                        actions.push(UiAction::PickFile);
                    }
                    ui.label(
                        RichText::new("Supported: JPG, PNG, PDF, or drop the file onto this page")
                            .color(TEXT_SECONDARY)
                            .small(),
                    );
                }).inner,
            }
        });

    if let Some(notice) = notice {
        ui.label(RichText::new(notice).color(ERROR));
    }
    ui.add_space(8.0);

    match upload_state {
        UploadState::Success { reference, .. } => {
            egui::Frame::default()
                .fill(SUCCESS_BG)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(PANEL_PADDING)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new("✔ Prescription uploaded successfully! We will contact you shortly.")
                                .color(SUCCESS)
                                .strong(),
                        );
                        let short = reference.simple().to_string();
                        ui.label(
                            RichText::new(format!("Reference: {}", &short[..8]))
                                .color(SUCCESS)
                                .small(),
                        );
                    });
                });
        }
        UploadState::Uploading { .. } => {
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Uploading...").color(TEXT_SECONDARY));
                });
            });
        }
        UploadState::Idle | UploadState::Selected { .. } => {
            ui.vertical_centered(|ui| {
                let enabled = matches!(upload_state, UploadState::Selected { .. });
                if primary_button(ui, enabled, "Submit Prescription").clicked() {
                    if let Some(file) = upload_state.file() {
                        log::debug!("Submit requested for {}", file.name);
                    }
                    actions.push(UiAction::SubmitPrescription);
                }
            });
        }
    }

    ui.add_space(12.0);
    ui.columns(STEPS.len(), |columns| {
        for (i, (column, step)) in columns.iter_mut().zip(STEPS).enumerate() {
            column.vertical_centered(|ui| {
                ui.label(RichText::new(format!("{}", i + 1)).color(INFO).strong().size(18.0));
                ui.label(RichText::new(step).color(TEXT_SECONDARY).small());
            });
        }
    });

    actions
}

fn selected_file(ui: &mut egui::Ui, file: &PrescriptionFile, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("📄").size(32.0));
        ui.vertical(|ui| {
            ui.label(RichText::new(&file.name).color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new(format!("{} • {}", file.kind.label(), file.size_label()))
                    .color(TEXT_SECONDARY)
                    .small(),
            );
            ui.hyperlink_to(
                RichText::new("Open preview").color(INFO).small(),
                file.preview.as_str(),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(RichText::new("✖").color(ERROR))
                .on_hover_text("Remove file")
                .clicked()
            {
                actions.push(UiAction::ClearFile);
            }
        });
    });
}
