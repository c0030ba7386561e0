use egui::{Context, CornerRadius, RichText, Stroke};

use crate::multi::{self, MultiField};
use crate::ui::app_state::AppState;
use crate::ui::theme::{CARD_BG, CARD_BORDER, TEXT_MUTED};

/// Checkbox popover for the comma-joined multi-value fields. It only lives
/// while its row is in edit mode; clicking anywhere else dismisses it.
pub fn render(state: &mut AppState, ctx: &Context) {
    let Some((row, field, trigger)) = state
        .popover
        .as_ref()
        .map(|p| (p.row, p.field, p.trigger))
    else {
        return;
    };

    if !state.grid.is_editing(row) {
        state.popover = None;
        return;
    }

    let options = match field {
        MultiField::Host => state.grid.catalog.hosts.clone(),
        MultiField::Platform => state.grid.catalog.platforms.clone(),
    };
    let current = match field {
        MultiField::Host => state.grid.edit_buffer.host.clone(),
        MultiField::Platform => state.grid.edit_buffer.platform.clone(),
    };

    let mut toggled: Option<String> = None;
    let mut close = false;

    let area = egui::Area::new(egui::Id::new("multi_popover"))
        .order(egui::Order::Foreground)
        .fixed_pos(trigger.left_bottom() + egui::vec2(0.0, 4.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(CARD_BG)
                .stroke(Stroke::new(1.0, CARD_BORDER))
                .corner_radius(CornerRadius::same(6))
                .show(ui, |ui| {
                    ui.set_min_width(140.0);
                    ui.label(
                        RichText::new(format!("选择{}", field.label()))
                            .color(TEXT_MUTED)
                            .small(),
                    );
                    if options.is_empty() {
                        ui.label(RichText::new("暂无可选项").color(TEXT_MUTED).small());
                    }
                    for option in &options {
                        let mut checked = multi::has_token(&current, option);
                        if ui.checkbox(&mut checked, option.as_str()).clicked() {
                            toggled = Some(option.clone());
                        }
                    }
                    ui.separator();
                    if ui.small_button("完成").clicked() {
                        close = true;
                    }
                });
        });

    if let Some(value) = toggled {
        state.toggle_popover_value(field, &value);
    }

    let clicked_outside = ctx.input(|i| {
        i.pointer.any_pressed()
            && i.pointer
                .interact_pos()
                .is_some_and(|pos| !area.response.rect.contains(pos) && !trigger.contains(pos))
    });
    if close || clicked_outside {
        state.popover = None;
    }
}
