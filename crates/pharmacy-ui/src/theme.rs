//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(248, 250, 252);
pub const BG_SURFACE: Color32 = Color32::from_rgb(241, 245, 249);
pub const BORDER: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(15, 23, 42);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(100, 116, 139);
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;
pub const ACCENT: Color32 = Color32::from_rgb(13, 148, 136);
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(204, 251, 241);
pub const SUCCESS: Color32 = Color32::from_rgb(21, 128, 61);
pub const SUCCESS_BG: Color32 = Color32::from_rgb(240, 253, 244);
pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
pub const INFO: Color32 = Color32::from_rgb(37, 99, 235);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(10);
pub const PILL_ROUNDING: CornerRadius = CornerRadius::same(255);
pub const PANEL_PADDING: Vec2 = Vec2::new(16.0, 12.0);
pub const CONTENT_WIDTH: f32 = 880.0;

/// Apply the light storefront theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_PRIMARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;
    style.visuals.window_stroke = Stroke::new(1.0, BORDER);

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_fill = ACCENT_SOFT;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_ON_ACCENT);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.3);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 8.0);
    style.spacing.button_padding = Vec2::new(14.0, 8.0);

    ctx.set_style(style);
}
