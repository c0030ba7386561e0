use egui::{Align2, Context, CornerRadius, RichText};
use tracing::warn;

use crate::ui::app_state::AppState;
use crate::ui::theme::{self, ACCENT_DANGER, TEXT_MUTED};
use crate::ui::thumbnails::{self, PREVIEW_MAX_HEIGHT, PREVIEW_MAX_WIDTH};

pub fn render(state: &mut AppState, ctx: &Context) {
    delete_confirm(state, ctx);
    image_preview(state, ctx);
}

fn delete_confirm(state: &mut AppState, ctx: &Context) {
    let Some(id) = state.confirm_delete else {
        return;
    };

    let mut open = true;
    let mut decided = false;

    egui::Window::new("删除确认")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("确认删除记录 #{id} 吗？"));
            ui.label(RichText::new("删除后无法恢复。").color(TEXT_MUTED).small());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add(theme::accent_button("删除", ACCENT_DANGER))
                    .clicked()
                {
                    decided = true;
                }
                if ui.button("取消").clicked() {
                    state.confirm_delete = None;
                }
            });
        });

    if decided {
        state.confirm_delete = None;
        state.launch_delete(id);
    } else if !open {
        state.confirm_delete = None;
    }
}

fn image_preview(state: &mut AppState, ctx: &Context) {
    let Some(url) = state.preview_image.clone() else {
        return;
    };

    state.thumbnails.request(&url, ctx, &state.runtime);

    let mut open = true;
    egui::Window::new("图片预览")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if let Some(thumb) = state.thumbnails.texture(&url) {
                let size =
                    thumbnails::fit_size(thumb.size, PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT);
                ui.add(
                    egui::Image::new((thumb.texture.id(), size))
                        .corner_radius(CornerRadius::same(6)),
                );
            } else if state.thumbnails.is_failed(&url) {
                ui.label(RichText::new("图片加载失败").color(TEXT_MUTED));
            } else {
                ui.add_space(24.0);
                ui.spinner();
                ui.add_space(24.0);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("在浏览器中打开").clicked() {
                    if let Err(err) = open::that(&url) {
                        warn!("failed to open browser: {err}");
                    }
                }
                if ui.button("关闭").clicked() {
                    state.preview_image = None;
                }
            });
        });

    if !open {
        state.preview_image = None;
    }
}
