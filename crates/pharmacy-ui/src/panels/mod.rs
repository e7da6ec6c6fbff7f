//! Screens and widgets. Each returns the actions the user triggered;
//! the app layer applies them to the cart, router and controllers.

pub mod nav;
pub mod home;
pub mod shop;
pub mod upload;
pub mod cart;
pub mod chat;

use egui::{RichText, Vec2};
use pharmacy_types::product::Product;
use pharmacy_types::view::ViewState;

use crate::theme::*;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(ViewState),
    /// "Upload Prescription" pressed where the in-page section may be visible
    RequestUpload,
    AddToCart(Product),
    RemoveFromCart(String),
    PickFile,
    ClearFile,
    SubmitPrescription,
    SendChat,
}

pub(crate) fn primary_button(ui: &mut egui::Ui, enabled: bool, label: &str) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(label).color(TEXT_ON_ACCENT).strong())
            .fill(if enabled { ACCENT } else { BG_SURFACE })
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(160.0, 36.0)),
    )
}

pub(crate) fn secondary_button(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(label).color(ACCENT).strong())
            .fill(ACCENT_SOFT)
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(160.0, 36.0)),
    )
}

pub(crate) fn back_home(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
    if ui
        .link(RichText::new("← Back to Home").color(TEXT_SECONDARY).strong())
        .clicked()
    {
        actions.push(UiAction::Navigate(ViewState::Home));
    }
}
