use egui::{Color32, CornerRadius, Margin, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::api::types::{DashboardData, NamedCount};
use crate::ui::app_state::AppState;
use crate::ui::theme::{
    ACCENT_DANGER, ACCENT_DIST, ACCENT_PRIMARY, ACCENT_SUCCESS, ACCENT_WARN, CARD_BG,
    CARD_BORDER, TEXT_MUTED, TEXT_STRONG,
};

pub fn render(state: &mut AppState, ui: &mut Ui) {
    let Some(data) = state.dashboard.clone() else {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label(RichText::new("看板数据加载中...").color(TEXT_MUTED));
        });
        return;
    };

    egui::ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .show(ui, |ui| {
            kpi_cards(ui, &data);
            ui.add_space(12.0);

            dim_switcher(state, ui);
            ui.add_space(6.0);
            ui.columns(3, |cols| {
                rollup_card(&mut cols[0], "主播产出", &data.hosts, ACCENT_PRIMARY);
                rollup_card(&mut cols[1], "类型分布", &data.types, ACCENT_SUCCESS);
                rollup_card(&mut cols[2], "平台分布", &data.plats, ACCENT_DIST);
            });

            ui.add_space(12.0);
            matrix_card(ui, &data);
        });
}

fn kpi_cards(ui: &mut Ui, data: &DashboardData) {
    let kpi = &data.kpi;
    let cards: [(&str, u64, Color32); 7] = [
        ("视频总量", kpi.total, ACCENT_PRIMARY),
        ("已分发", kpi.dist_total, ACCENT_DIST),
        ("待发布", kpi.pending, ACCENT_WARN),
        ("今日入库", kpi.today_in, ACCENT_SUCCESS),
        ("今日出库", kpi.today_out, ACCENT_DANGER),
        ("本月入库", kpi.month_in, ACCENT_SUCCESS),
        ("本月出库", kpi.month_out, ACCENT_DANGER),
    ];

    ui.horizontal_wrapped(|ui| {
        for (label, value, accent) in cards {
            egui::Frame::default()
                .fill(CARD_BG)
                .stroke(Stroke::new(1.0, CARD_BORDER))
                .corner_radius(CornerRadius::same(8))
                .inner_margin(Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.set_min_width(110.0);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(label).color(TEXT_MUTED).small());
                        ui.label(
                            RichText::new(value.to_string())
                                .heading()
                                .strong()
                                .color(accent),
                        );
                    });
                });
        }
    });
}

fn dim_switcher(state: &mut AppState, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("统计口径").color(TEXT_MUTED).small());
        for (dim, label) in [("day", "日"), ("week", "周"), ("month", "月")] {
            let selected = state.dashboard_dim == dim;
            if ui.selectable_label(selected, label).clicked() && !selected {
                state.launch_dashboard(dim);
            }
        }
    });
}

fn rollup_card(ui: &mut Ui, title: &str, entries: &[NamedCount], accent: Color32) {
    egui::Frame::default()
        .fill(CARD_BG)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong().color(TEXT_STRONG));
            ui.add_space(4.0);
            if entries.is_empty() {
                ui.label(RichText::new("暂无数据").color(TEXT_MUTED).small());
                return;
            }
            let max = entries.iter().map(|e| e.value).max().unwrap_or(1).max(1);
            for entry in entries {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&entry.name).small());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(entry.value.to_string())
                                .small()
                                .strong()
                                .color(accent),
                        );
                    });
                });
                let fraction = entry.value as f32 / max as f32;
                let (rect, _) = ui
                    .allocate_exact_size(egui::vec2(ui.available_width(), 4.0), egui::Sense::hover());
                ui.painter().rect_filled(
                    rect,
                    CornerRadius::same(2),
                    ui.visuals().faint_bg_color,
                );
                let mut bar = rect;
                bar.set_width(rect.width() * fraction);
                ui.painter()
                    .rect_filled(bar, CornerRadius::same(2), accent);
                ui.add_space(4.0);
            }
        });
}

fn matrix_card(ui: &mut Ui, data: &DashboardData) {
    egui::Frame::default()
        .fill(CARD_BG)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.label(RichText::new("状态流转统计").strong().color(TEXT_STRONG));
            ui.add_space(6.0);
            if data.matrix.is_empty() {
                ui.label(RichText::new("暂无数据").color(TEXT_MUTED).small());
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .column(Column::initial(140.0).at_least(100.0))
                .column(Column::remainder())
                .column(Column::remainder())
                .column(Column::remainder())
                .column(Column::remainder())
                .header(22.0, |mut header| {
                    for label in ["状态", "今日", "本周", "本月", "今年"] {
                        header.col(|ui| {
                            ui.label(RichText::new(label).strong().small());
                        });
                    }
                })
                .body(|mut body| {
                    for row in &data.matrix {
                        body.row(22.0, |mut table_row| {
                            table_row.col(|ui| {
                                ui.label(RichText::new(&row.name).small());
                            });
                            for value in [row.day, row.week, row.month, row.year] {
                                table_row.col(|ui| {
                                    ui.label(RichText::new(value.to_string()).small().monospace());
                                });
                            }
                        });
                    }
                });
        });
}
