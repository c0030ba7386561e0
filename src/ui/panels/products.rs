use egui::{Color32, CornerRadius, Margin, RichText, Sense, Stroke, Ui};

use crate::api::types::ProductStat;
use crate::ui::app_state::AppState;
use crate::ui::theme::{
    ACCENT_DANGER, ACCENT_PRIMARY, ACCENT_SUCCESS, ACCENT_WARN, CARD_BG, CARD_BORDER,
    TEXT_MUTED, TEXT_STRONG,
};

const CARD_WIDTH: f32 = 210.0;

pub fn render(state: &mut AppState, ui: &mut Ui) {
    let Some(stats) = state.products.clone() else {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label(RichText::new("产品统计加载中...").color(TEXT_MUTED));
        });
        return;
    };

    if stats.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("暂无产品数据").color(TEXT_MUTED));
        });
        return;
    }

    let mut jump_to: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("products_scroll")
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for stat in &stats {
                    if product_card(ui, stat).clicked() {
                        jump_to = Some(stat.name.clone());
                    }
                }
            });
        });

    if let Some(product_id) = jump_to {
        state.open_inventory_with_product(&product_id);
    }
}

fn stock_badge(stat: &ProductStat) -> (&'static str, Color32) {
    if stat.pending == 0 && stat.total > 0 {
        ("已完结", ACCENT_SUCCESS)
    } else if stat.pending > 5 {
        ("库存积压", ACCENT_DANGER)
    } else if stat.total < 3 {
        ("库存偏低", ACCENT_WARN)
    } else {
        ("库存正常", ACCENT_PRIMARY)
    }
}

fn product_card(ui: &mut Ui, stat: &ProductStat) -> egui::Response {
    let (badge, accent) = stock_badge(stat);
    let pct = stat.completion_pct();

    let inner = egui::Frame::default()
        .fill(CARD_BG)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&stat.name).strong().color(TEXT_STRONG));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::Frame::default()
                        .fill(accent.linear_multiply(0.15))
                        .corner_radius(CornerRadius::same(8))
                        .inner_margin(Margin::symmetric(6, 2))
                        .show(ui, |ui| {
                            ui.label(RichText::new(badge).small().color(accent));
                        });
                });
            });
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("总数 {}", stat.total)).small());
                ui.label(
                    RichText::new(format!("待发布 {}", stat.pending))
                        .small()
                        .color(TEXT_MUTED),
                );
            });
            ui.add_space(4.0);

            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), 6.0),
                Sense::hover(),
            );
            ui.painter()
                .rect_filled(rect, CornerRadius::same(3), ui.visuals().faint_bg_color);
            let mut bar = rect;
            bar.set_width(rect.width() * (pct as f32 / 100.0));
            ui.painter().rect_filled(bar, CornerRadius::same(3), accent);

            ui.label(
                RichText::new(format!("完成率 {pct}%"))
                    .small()
                    .color(TEXT_MUTED),
            );
        });

    inner
        .response
        .interact(Sense::click())
        .on_hover_text("点击查看该编号的库存明细")
}
