//! Landing page — hero, feature grid, store teaser and the embedded
//! prescription upload section.

use egui::{self, Align, RichText};
use pharmacy_types::upload::UploadState;
use pharmacy_types::view::ViewState;

use super::{primary_button, secondary_button, shop, upload, UiAction};
use crate::state::UiState;
use crate::theme::*;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "🩺",
        "Pharmacist Verified",
        "Every order is reviewed by a licensed pharmacist for safety and interactions.",
    ),
    (
        "🚚",
        "Fast Delivery",
        "Quick home delivery within Kathmandu Valley and express options for nearby districts.",
    ),
    (
        "💊",
        "EasyCare 365",
        "Automated refills for chronic conditions so you never run out of medicine.",
    ),
];

pub fn home_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    upload_state: &UploadState,
    scroll_to_upload: bool,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    hero(ui, &mut actions);
    ui.add_space(32.0);
    feature_grid(ui);
    ui.add_space(32.0);
    shop::coming_soon(ui, false, &mut actions);
    ui.add_space(32.0);

    let section = egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            actions.extend(upload::upload_form(
                ui,
                upload_state,
                state.upload_notice.as_deref(),
            ));
        })
        .response;
    state.upload_section_rendered = true;
    if scroll_to_upload {
        section.scroll_to_me(Some(Align::Min));
    }

    actions
}

fn hero(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(egui::Margin::same(32))
        .show(ui, |ui| {
            ui.label(
                RichText::new("Medicines, delivered")
                    .color(TEXT_PRIMARY)
                    .strong()
                    .size(36.0),
            );
            ui.label(
                RichText::new("safely to your doorstep.")
                    .color(ACCENT)
                    .strong()
                    .size(36.0),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new(
                    "Easy Health Care connects you to licensed pharmacies for fast, verified, \
                     and safe medicine delivery. Upload your prescription or shop OTC essentials today.",
                )
                .color(TEXT_SECONDARY)
                .size(16.0),
            );
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if primary_button(ui, true, "Upload Prescription").clicked() {
                    actions.push(UiAction::RequestUpload);
                }
                if secondary_button(ui, "Shop Medicines").clicked() {
                    actions.push(UiAction::Navigate(ViewState::Shop));
                }
            });
        });
}

fn feature_grid(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("WHY CHOOSE US").color(ACCENT).strong().small());
        ui.label(
            RichText::new("A better way to get your healthcare")
                .color(TEXT_PRIMARY)
                .strong()
                .size(26.0),
        );
    });
    ui.add_space(12.0);
    ui.columns(FEATURES.len(), |columns| {
        for (column, (icon, title, body)) in columns.iter_mut().zip(FEATURES) {
            column.label(RichText::new(icon).size(28.0));
            column.label(RichText::new(title).color(TEXT_PRIMARY).strong().size(17.0));
            column.label(RichText::new(body).color(TEXT_SECONDARY));
        }
    });
}
