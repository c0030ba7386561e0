use egui::{CornerRadius, Margin, RichText, Stroke, Ui};

use crate::ui::app_state::AppState;
use crate::ui::theme::{self, ACCENT_PRIMARY, CARD_BG, CARD_BORDER, TEXT_MUTED};

const FIELD_WIDTH: f32 = 150.0;

pub fn render(state: &mut AppState, ui: &mut Ui) {
    egui::Frame::default()
        .fill(CARD_BG)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(14, 12))
        .show(ui, |ui| {
            let catalog = state.grid.catalog.clone();

            ui.horizontal_wrapped(|ui| {
                labeled_text(ui, "标题", &mut state.grid.query.title, "按标题模糊匹配");
                labeled_text(ui, "备注", &mut state.grid.query.remark, "按备注模糊匹配");
                labeled_combo(ui, "编号", &mut state.grid.query.product_id, &catalog.product_ids);
                labeled_combo(ui, "类型", &mut state.grid.query.category, &catalog.categories);
                labeled_combo(ui, "视类", &mut state.grid.query.video_type, &catalog.video_types);
                labeled_combo(ui, "主播", &mut state.grid.query.host, &catalog.hosts);
                labeled_combo(ui, "状态", &mut state.grid.query.status, &catalog.statuses);
                labeled_combo(ui, "平台", &mut state.grid.query.platform, &catalog.platforms);
            });

            ui.horizontal_wrapped(|ui| {
                labeled_text(
                    ui,
                    "完成起",
                    &mut state.grid.query.finish_start,
                    "yyyy-MM-dd HH:mm",
                );
                labeled_text(
                    ui,
                    "完成止",
                    &mut state.grid.query.finish_end,
                    "yyyy-MM-dd HH:mm",
                );
                labeled_text(
                    ui,
                    "发布起",
                    &mut state.grid.query.publish_start,
                    "yyyy-MM-dd HH:mm",
                );
                labeled_text(
                    ui,
                    "发布止",
                    &mut state.grid.query.publish_end,
                    "yyyy-MM-dd HH:mm",
                );

                ui.add_space(8.0);
                if ui
                    .add(theme::accent_button("执行查询", ACCENT_PRIMARY))
                    .clicked()
                {
                    state.apply_filters();
                }
                if ui.button("重置条件").clicked() {
                    state.reset_filters();
                }
            });
        });
    ui.add_space(8.0);
}

fn labeled_text(ui: &mut Ui, label: &str, value: &mut String, hint: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(TEXT_MUTED).small());
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width(FIELD_WIDTH),
        );
    });
}

fn labeled_combo(ui: &mut Ui, label: &str, value: &mut String, options: &[String]) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(TEXT_MUTED).small());
        let display = if value.is_empty() { "全部" } else { value.as_str() };
        egui::ComboBox::from_id_salt(("filter", label))
            .selected_text(display.to_owned())
            .width(110.0)
            .show_ui(ui, |ui| {
                if ui.selectable_label(value.is_empty(), "全部").clicked() {
                    value.clear();
                }
                for option in options {
                    if ui
                        .selectable_label(value == option, option.as_str())
                        .clicked()
                    {
                        *value = option.clone();
                    }
                }
            });
    });
}
