//! Cart screen: line items and subtotal, or an empty state.

use egui::{self, Align, Layout, RichText};
use pharmacy_core::cart::Cart;
use pharmacy_types::product::{format_price, CartItem};
use pharmacy_types::view::ViewState;

use super::{back_home, primary_button, UiAction};
use crate::theme::*;

pub fn cart_panel(ui: &mut egui::Ui, cart: &Cart) -> Vec<UiAction> {
    let mut actions = Vec::new();
    back_home(ui, &mut actions);
    ui.label(RichText::new("Shopping Cart").color(TEXT_PRIMARY).strong().size(28.0));
    ui.add_space(12.0);

    if cart.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("🛒").size(48.0).color(TEXT_SECONDARY));
            ui.label(RichText::new("No items").color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new("Get started by adding some items to your cart.")
                    .color(TEXT_SECONDARY)
                    .small(),
            );
            ui.add_space(8.0);
            if primary_button(ui, true, "Continue Shopping").clicked() {
                actions.push(UiAction::Navigate(ViewState::Shop));
            }
        });
        return actions;
    }

    for item in cart.items() {
        line_item(ui, item, &mut actions);
        ui.separator();
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Subtotal").color(TEXT_PRIMARY).strong());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(RichText::new(format_price(cart.total())).color(TEXT_PRIMARY).strong());
        });
    });
    ui.label(
        RichText::new("Shipping and taxes calculated at checkout.")
            .color(TEXT_SECONDARY)
            .small(),
    );
    ui.add_space(8.0);
    // no order backend yet
    primary_button(ui, false, "Checkout").on_disabled_hover_text("Online checkout opens with the store");

    actions
}

fn line_item(ui: &mut egui::Ui, item: &CartItem, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(&item.product.name).color(TEXT_PRIMARY).strong());
            ui.label(RichText::new(&item.product.category).color(TEXT_SECONDARY).small());
            ui.label(RichText::new(format!("Qty: {}", item.quantity)).color(TEXT_SECONDARY));
        });
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.link(RichText::new("Remove").color(ACCENT)).clicked() {
                actions.push(UiAction::RemoveFromCart(item.product.id.clone()));
            }
            ui.label(RichText::new(format_price(item.line_total())).color(TEXT_PRIMARY).strong());
        });
    });
}
