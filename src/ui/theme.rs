use egui::{Color32, FontFamily, FontId, Margin, Stroke, TextStyle};

use crate::row_view::PillTone;

pub const WINDOW_FILL: Color32 = Color32::from_rgb(241, 245, 249);
pub const PANEL_FILL: Color32 = Color32::from_rgb(255, 255, 255);
pub const CARD_BG: Color32 = Color32::from_rgb(255, 255, 255);
pub const CARD_BORDER: Color32 = Color32::from_rgb(226, 232, 240);
pub const TEXT_STRONG: Color32 = Color32::from_rgb(30, 41, 59);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139);

pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(37, 99, 235); // blue
pub const ACCENT_DARK: Color32 = Color32::from_rgb(30, 41, 59); // slate
pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(16, 185, 129); // emerald
pub const ACCENT_WARN: Color32 = Color32::from_rgb(249, 115, 22); // orange
pub const ACCENT_DANGER: Color32 = Color32::from_rgb(239, 68, 68); // red
pub const ACCENT_DIST: Color32 = Color32::from_rgb(147, 51, 234); // purple

pub const ROW_EDIT_BG: Color32 = Color32::from_rgb(239, 246, 255); // blue-50
pub const ROW_NEW_BG: Color32 = Color32::from_rgb(240, 253, 244); // green-50

pub fn apply_hub_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.window_fill = PANEL_FILL;
    visuals.panel_fill = WINDOW_FILL;
    visuals.faint_bg_color = Color32::from_rgb(248, 250, 252);
    visuals.extreme_bg_color = Color32::from_rgb(255, 255, 255);
    visuals.selection.bg_fill = ACCENT_PRIMARY.linear_multiply(0.35);
    visuals.hyperlink_color = ACCENT_PRIMARY;
    visuals.button_frame = true;
    visuals.window_stroke = Stroke::new(1.0, CARD_BORDER);
    visuals.override_text_color = Some(TEXT_STRONG);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.menu_margin = Margin::same(8);
    style.spacing.window_margin = Margin::same(16);
    style.text_styles.insert(
        TextStyle::Heading,
        FontId::new(20.0, FontFamily::Proportional),
    );
    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    style.text_styles.insert(
        TextStyle::Button,
        FontId::new(14.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        TextStyle::Monospace,
        FontId::new(12.5, FontFamily::Monospace),
    );
    style.visuals = visuals;
    ctx.set_style(style);
}

/// Background and text colors for a status pill.
pub fn pill_colors(tone: PillTone) -> (Color32, Color32) {
    match tone {
        PillTone::Done => (
            Color32::from_rgb(209, 250, 229),
            Color32::from_rgb(4, 120, 87),
        ),
        PillTone::Pending => (
            Color32::from_rgb(255, 237, 213),
            Color32::from_rgb(234, 88, 12),
        ),
        PillTone::Neutral => (
            Color32::from_rgb(241, 245, 249),
            Color32::from_rgb(71, 85, 105),
        ),
    }
}

pub fn accent_button(label: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(label.to_owned()).strong().color(Color32::WHITE))
        .fill(fill)
        .corner_radius(6.0)
}
