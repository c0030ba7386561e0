use egui::{Align2, Context, RichText};

use crate::ui::app_state::AppState;
use crate::ui::theme::{self, ACCENT_PRIMARY, TEXT_MUTED};

/// Options editor. Each field is the comma-joined list backing one dropdown;
/// the server address is the only local setting.
pub fn render(state: &mut AppState, ctx: &Context) {
    if state.settings.is_none() {
        return;
    }

    let mut open = true;
    let mut save = false;

    egui::Window::new("系统设置")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(420.0)
        .show(ctx, |ui| {
            let Some(draft) = state.settings.as_mut() else {
                return;
            };

            ui.label(
                RichText::new("多个值用英文逗号分隔")
                    .color(TEXT_MUTED)
                    .small(),
            );
            ui.add_space(4.0);

            for (label, value) in [
                ("主播列表", &mut draft.hosts),
                ("类型列表", &mut draft.categories),
                ("视类列表", &mut draft.video_types),
                ("平台列表", &mut draft.platforms),
            ] {
                ui.label(RichText::new(label).strong().small());
                ui.add(
                    egui::TextEdit::multiline(value)
                        .desired_rows(2)
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(4.0);
            }

            ui.separator();
            ui.label(RichText::new("服务器地址").strong().small());
            ui.add(
                egui::TextEdit::singleline(&mut draft.server_url)
                    .hint_text(crate::prefs::DEFAULT_SERVER_URL)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add(theme::accent_button("保存", ACCENT_PRIMARY))
                    .clicked()
                {
                    save = true;
                }
                if ui.button("取消").clicked() {
                    state.settings = None;
                }
            });
        });

    if save {
        state.save_settings();
    } else if !open {
        state.settings = None;
    }
}
