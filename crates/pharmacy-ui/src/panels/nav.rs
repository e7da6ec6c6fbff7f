//! Top navigation bar: logo, screen links and the cart badge.

use egui::{self, Align, Layout, RichText};
use pharmacy_types::view::ViewState;

use super::UiAction;
use crate::theme::*;

pub fn nav_bar(ui: &mut egui::Ui, current: ViewState, cart_units: u32) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        let logo = ui.add(
            egui::Label::new(
                RichText::new("✚ EasyHealth")
                    .color(ACCENT)
                    .strong()
                    .size(20.0),
            )
            .sense(egui::Sense::click()),
        );
        if logo.clicked() {
            actions.push(UiAction::Navigate(ViewState::Home));
        }

        ui.add_space(16.0);

        for view in [ViewState::Home, ViewState::Shop] {
            if ui.selectable_label(current == view, view.label()).clicked() {
                actions.push(UiAction::Navigate(view));
            }
        }
        if ui
            .selectable_label(current == ViewState::Upload, ViewState::Upload.label())
            .clicked()
        {
            actions.push(UiAction::RequestUpload);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let label = if cart_units > 0 {
                format!("🛒 Cart ({})", cart_units)
            } else {
                "🛒 Cart".to_string()
            };
            if ui
                .selectable_label(current == ViewState::CartPage, label)
                .clicked()
            {
                actions.push(UiAction::Navigate(ViewState::CartPage));
            }
            ui.label(RichText::new("📞 Call a pharmacist").color(TEXT_SECONDARY).small());
        });
    });

    actions
}
