//! Shop screen — the store is not open yet, so this is the "coming soon"
//! page plus a short list of essentials that can already go in the cart.

use egui::{self, RichText};
use pharmacy_core::cart::Cart;
use pharmacy_types::product::{format_price, Product};
use pharmacy_types::view::ViewState;

use super::{back_home, primary_button, UiAction};
use crate::theme::*;

const HIGHLIGHTS: [(&str, &str, &str); 3] = [
    ("💊", "Complete Range", "Access to a full inventory of prescription and OTC medications."),
    ("🛡", "100% Authentic", "Directly sourced from authorized distributors with quality assurance."),
    ("🚚", "Express Delivery", "Fast doorstep delivery with real-time tracking integration."),
];

pub fn shop_panel(ui: &mut egui::Ui, cart: &Cart, products: &[Product]) -> Vec<UiAction> {
    let mut actions = Vec::new();
    back_home(ui, &mut actions);
    coming_soon(ui, true, &mut actions);
    ui.add_space(24.0);
    featured_essentials(ui, cart, products, &mut actions);
    actions
}

/// Store teaser. On its own page the upload button switches screens;
/// embedded on the landing page it asks for the in-page section instead.
pub fn coming_soon(ui: &mut egui::Ui, is_page: bool, actions: &mut Vec<UiAction>) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("🏪").size(56.0));
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Pharmacy Store").color(TEXT_PRIMARY).strong().size(32.0));
            ui.label(RichText::new("Coming Soon").color(ACCENT).strong().size(32.0));
        });
        ui.add_space(8.0);
        ui.label(
            RichText::new(
                "We are building a comprehensive digital pharmacy experience. Soon you will be able \
                 to browse thousands of OTC medicines, wellness products, and medical devices directly from our app.",
            )
            .color(TEXT_SECONDARY)
            .size(16.0),
        );
    });
    ui.add_space(16.0);

    ui.columns(HIGHLIGHTS.len(), |columns| {
        for (column, (icon, title, body)) in columns.iter_mut().zip(HIGHLIGHTS) {
            egui::Frame::default()
                .fill(BG_SECONDARY)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(PANEL_PADDING)
                .show(column, |ui| {
                    ui.label(RichText::new(icon).size(24.0));
                    ui.label(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.label(RichText::new(body).color(TEXT_SECONDARY).small());
                });
        }
    });
    ui.add_space(16.0);

    egui::Frame::default()
        .fill(ACCENT_SOFT)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Need Medicine Urgently?").color(TEXT_PRIMARY).strong());
                    ui.label(
                        RichText::new("You can still upload your prescription for immediate processing.")
                            .color(TEXT_SECONDARY),
                    );
                });
                if primary_button(ui, true, "Upload Prescription").clicked() {
                    actions.push(if is_page {
                        UiAction::Navigate(ViewState::Upload)
                    } else {
                        UiAction::RequestUpload
                    });
                }
            });
        });
}

fn featured_essentials(
    ui: &mut egui::Ui,
    cart: &Cart,
    products: &[Product],
    actions: &mut Vec<UiAction>,
) {
    ui.label(RichText::new("Everyday essentials").color(TEXT_PRIMARY).strong().size(20.0));
    ui.label(RichText::new("Available for early orders").color(TEXT_SECONDARY).small());
    ui.add_space(8.0);

    for product in products {
        egui::Frame::default()
            .stroke(egui::Stroke::new(1.0, BORDER))
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&product.name).color(TEXT_PRIMARY).strong());
                        ui.label(RichText::new(&product.category).color(TEXT_SECONDARY).small());
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let in_cart = cart.quantity_of(&product.id);
                        let label = if in_cart > 0 {
                            format!("Add another ({} in cart)", in_cart)
                        } else {
                            "Add to cart".to_string()
                        };
                        if primary_button(ui, true, &label).clicked() {
                            log::debug!("Add to cart: {}", product.id);
                            actions.push(UiAction::AddToCart(product.clone()));
                        }
                        ui.label(
                            RichText::new(format_price(u64::from(product.price)))
                                .color(TEXT_PRIMARY)
                                .strong(),
                        );
                    });
                });
            });
        ui.add_space(4.0);
    }
}
