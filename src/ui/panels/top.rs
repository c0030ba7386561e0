use egui::{Context, RichText};

use crate::ui::app_state::{AppState, View};
use crate::ui::theme::{self, ACCENT_DARK, ACCENT_PRIMARY, ACCENT_SUCCESS, PANEL_FILL, TEXT_MUTED};

pub fn render(state: &mut AppState, ctx: &Context) {
    egui::TopBottomPanel::top("hub_header")
        .frame(
            egui::Frame::default()
                .fill(PANEL_FILL)
                .inner_margin(egui::Margin::symmetric(16, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("VideoHub").heading().strong());
                ui.label(RichText::new("视频库存管理").color(TEXT_MUTED).small());

                ui.add_space(16.0);
                view_tab(state, ui, View::Dashboard, "数据看板");
                view_tab(state, ui, View::Inventory, "库存明细");
                view_tab(state, ui, View::Products, "产品监控");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.view == View::Inventory {
                        if ui
                            .add(theme::accent_button("新增一行", ACCENT_SUCCESS))
                            .clicked()
                        {
                            state.add_row();
                        }
                        if ui.add(theme::accent_button("设置", ACCENT_DARK)).clicked() {
                            state.open_settings();
                        }
                        let filter_label = if state.filter_panel_open {
                            "收起筛选"
                        } else if state.grid.query.has_active_filters() {
                            "筛选 ●"
                        } else {
                            "筛选"
                        };
                        if ui
                            .add(theme::accent_button(filter_label, ACCENT_PRIMARY))
                            .clicked()
                        {
                            state.filter_panel_open = !state.filter_panel_open;
                        }

                        let search = egui::TextEdit::singleline(&mut state.grid.query.keyword)
                            .hint_text("全局搜索...")
                            .desired_width(200.0);
                        let response = ui.add(search);
                        if response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        {
                            state.apply_filters();
                        }
                    }
                });
            });
        });
}

fn view_tab(state: &mut AppState, ui: &mut egui::Ui, view: View, label: &str) {
    let selected = state.view == view;
    let text = if selected {
        RichText::new(label).strong().color(ACCENT_PRIMARY)
    } else {
        RichText::new(label).color(TEXT_MUTED)
    };
    if ui.selectable_label(selected, text).clicked() && !selected {
        state.switch_view(view);
    }
}
