//! Floating chat widget with its launcher button.

use egui::{self, Align, Align2, Layout, RichText, ScrollArea, Vec2};
use pharmacy_core::chat::ChatWidget;
use pharmacy_types::message::ChatMessage;

use super::UiAction;
use crate::theme::*;

/// Render the launcher and, when open, the chat window.
/// Returns `SendChat` when the user submits the draft.
pub fn chat_widget(ctx: &egui::Context, widget: &mut ChatWidget, status: &str) -> Option<UiAction> {
    egui::Area::new(egui::Id::new("chat_launcher"))
        .anchor(Align2::RIGHT_BOTTOM, [-24.0, -24.0])
        .show(ctx, |ui| {
            let icon = if widget.is_open() { "✖" } else { "💬" };
            let launcher = ui
                .add(
                    egui::Button::new(RichText::new(icon).size(24.0).color(TEXT_ON_ACCENT))
                        .fill(ACCENT)
                        .corner_radius(PILL_ROUNDING)
                        .min_size(Vec2::splat(56.0)),
                )
                .on_hover_text("Chat with Pharmacist");
            if launcher.clicked() {
                widget.toggle();
            }
        });

    if !widget.is_open() {
        return None;
    }

    let mut submitted = None;
    egui::Window::new("AI Pharmacist")
        .id(egui::Id::new("chat_window"))
        .anchor(Align2::RIGHT_BOTTOM, [-24.0, -96.0])
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .fixed_size([360.0, 460.0])
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(PANEL_PADDING)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(RichText::new("🤖 AI Pharmacist").color(TEXT_ON_ACCENT).strong());
                    ui.label(RichText::new(status).color(ACCENT_SOFT).small());
                });

            ScrollArea::vertical()
                .max_height(330.0)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for message in widget.messages() {
                        render_message(ui, message);
                        ui.add_space(4.0);
                    }
                    if widget.is_pending() {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("● ● ●").color(TEXT_SECONDARY));
                        });
                    }
                });

            ui.separator();

            ui.horizontal(|ui| {
                let input = egui::TextEdit::singleline(widget.draft_mut())
                    .hint_text("Ask about medicines...")
                    .desired_width(ui.available_width() - 70.0);
                let response = ui.add(input);

                let can_send = !widget.draft().trim().is_empty() && !widget.is_pending();
                let send = ui.add_enabled(
                    can_send,
                    egui::Button::new(RichText::new("Send").color(TEXT_ON_ACCENT))
                        .fill(if can_send { ACCENT } else { BG_SURFACE })
                        .corner_radius(PILL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                );

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (enter && can_send) || send.clicked() {
                    log::debug!("Chat send requested ({} chars)", widget.draft().trim().len());
                    submitted = Some(UiAction::SendChat);
                    response.request_focus();
                }
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let (layout, fill, color) = if message.is_user() {
        (Layout::right_to_left(Align::TOP), ACCENT, TEXT_ON_ACCENT)
    } else {
        (Layout::left_to_right(Align::TOP), BG_SURFACE, TEXT_PRIMARY)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(260.0);
                ui.label(RichText::new(&message.text).color(color));
                ui.label(
                    RichText::new(message.timestamp.format("%H:%M").to_string())
                        .color(if message.is_user() { ACCENT_SOFT } else { TEXT_SECONDARY })
                        .small(),
                );
            });
    });
}
