use egui::{Color32, CornerRadius, RichText, Sense, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::api::types::{RowId, VideoRecord};
use crate::grid::EditBuffer;
use crate::multi::{self, MultiField};
use crate::row_view::{self, Cell, COLUMNS};
use crate::ui::app_state::{AppState, RowAction};
use crate::ui::theme::{
    self, ACCENT_DANGER, ACCENT_PRIMARY, ROW_EDIT_BG, ROW_NEW_BG, TEXT_MUTED,
};
use crate::ui::thumbnails::CELL_THUMB;

const ROW_HEIGHT: f32 = 48.0;
const HEADER_HEIGHT: f32 = 26.0;

pub fn render(state: &mut AppState, ui: &mut Ui) {
    let records = state.grid.records.clone();

    if state.grid_loading && records.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.spinner();
            ui.label(RichText::new("数据加载中...").color(TEXT_MUTED));
        });
        return;
    }

    let editing = state.grid.editing;
    let mut actions: Vec<RowAction> = Vec::new();
    let mut sort_clicked: Option<&'static str> = None;
    let mut rects: Vec<(RowId, egui::Rect)> = Vec::new();
    let scroll_top = std::mem::take(&mut state.scroll_to_top);

    let table_height = ui.available_height() - 40.0;
    egui::ScrollArea::horizontal()
        .id_salt("inventory_hscroll")
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .sense(Sense::click())
                .min_scrolled_height(table_height.max(120.0))
                .max_scroll_height(table_height.max(120.0))
                .column(Column::exact(52.0)) // 图
                .column(Column::initial(80.0).at_least(60.0)) // 编号
                .column(Column::initial(220.0).at_least(160.0).clip(true)) // 视频标题
                .column(Column::initial(72.0)) // 类型
                .column(Column::initial(132.0)) // 完成时间
                .column(Column::initial(72.0)) // 视类
                .column(Column::initial(120.0)) // 主播
                .column(Column::initial(88.0)) // 状态
                .column(Column::initial(120.0)) // 平台
                .column(Column::initial(132.0)) // 发布时间
                .column(Column::initial(150.0).clip(true)) // 备注
                .column(Column::exact(150.0)); // 操作
            if scroll_top {
                builder = builder.scroll_to_row(0, Some(egui::Align::TOP));
            }

            builder
                .header(HEADER_HEIGHT, |mut header| {
                    for &(label, sort_key) in COLUMNS {
                        header.col(|ui| {
                            if sort_key.is_empty() {
                                ui.label(RichText::new(label).strong().small());
                            } else {
                                let text = RichText::new(format!("{label} ⇅")).strong().small();
                                if ui
                                    .add(egui::Label::new(text).sense(Sense::click()))
                                    .clicked()
                                {
                                    sort_clicked = Some(sort_key);
                                }
                            }
                        });
                    }
                })
                .body(|mut body| {
                    for record in &records {
                        let row_id = record.row_id();
                        let is_editing = editing == Some(row_id);
                        body.row(ROW_HEIGHT, |mut row| {
                            let mut union: Option<egui::Rect> = None;
                            let mut track = |rect: egui::Rect| {
                                union = Some(match union {
                                    Some(u) => u.union(rect),
                                    None => rect,
                                });
                            };

                            if is_editing {
                                edit_row(state, &mut row, row_id, &mut actions, &mut track);
                            } else {
                                browse_row(state, &mut row, record, &mut actions, &mut track);
                            }

                            if let Some(rect) = union {
                                rects.push((row_id, rect));
                            }
                        });
                    }
                });
        });

    pagination_bar(state, ui);

    state.row_rects = rects;
    if let Some(column) = sort_clicked {
        state.sort_by_column(column);
    }
    for action in actions {
        state.handle_row_action(action);
    }
}

fn row_tint(record_is_new: bool, is_editing: bool) -> Option<Color32> {
    if record_is_new {
        Some(ROW_NEW_BG)
    } else if is_editing {
        Some(ROW_EDIT_BG)
    } else {
        None
    }
}

fn paint_cell_bg(ui: &mut Ui, tint: Option<Color32>) {
    if let Some(color) = tint {
        ui.painter()
            .rect_filled(ui.max_rect().expand(2.0), CornerRadius::ZERO, color);
    }
}

fn browse_row(
    state: &mut AppState,
    row: &mut egui_extras::TableRow<'_, '_>,
    record: &VideoRecord,
    actions: &mut Vec<RowAction>,
    track: &mut impl FnMut(egui::Rect),
) {
    let row_id = record.row_id();
    let tint = row_tint(record.is_new, false);

    for cell in row_view::browse_cells(record) {
        let (rect, response) = row.col(|ui| {
            paint_cell_bg(ui, tint);
            match &cell {
                Cell::Text(text) => {
                    ui.label(text);
                }
                Cell::Mono(text) => {
                    ui.label(RichText::new(text).monospace().small());
                }
                Cell::Pills(pills) => {
                    pill_strip(ui, pills);
                }
                Cell::Image(url) => {
                    if let Some(url) = url {
                        if thumbnail(state, ui, url).clicked() {
                            actions.push(RowAction::PreviewImage(url.clone()));
                        }
                    } else {
                        placeholder_thumb(ui);
                    }
                }
            }
        });
        track(rect);
        if response.double_clicked() {
            actions.push(RowAction::Edit(row_id));
        }
    }

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        ui.horizontal(|ui| {
            if small_button(ui, "编辑", ACCENT_PRIMARY).clicked() {
                actions.push(RowAction::Edit(row_id));
            }
            if let RowId::Persisted(_) = row_id {
                if small_button(ui, "删除", ACCENT_DANGER).clicked() {
                    actions.push(RowAction::Delete(row_id));
                }
            }
        });
    });
    track(rect);
}

fn edit_row(
    state: &mut AppState,
    row: &mut egui_extras::TableRow<'_, '_>,
    row_id: RowId,
    actions: &mut Vec<RowAction>,
    track: &mut impl FnMut(egui::Rect),
) {
    let tint = row_tint(matches!(row_id, RowId::New), true);
    let catalog = state.grid.catalog.clone();
    let staged_image = state.grid.edit_buffer.image_url.clone();

    // 图: staged preview plus the upload trigger
    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        ui.vertical(|ui| {
            if !staged_image.is_empty() {
                let _ = thumbnail(state, ui, &staged_image);
            }
            if ui.small_button("换图").clicked() {
                actions.push(RowAction::TriggerUpload(row_id));
            }
        });
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        text_cell(ui, &mut state.grid.edit_buffer.product_id, "编号");
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        text_cell(ui, &mut state.grid.edit_buffer.title, "视频标题");
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        combo_cell(ui, "edit_category", &mut state.grid.edit_buffer.category, &catalog.categories);
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        text_cell(ui, &mut state.grid.edit_buffer.finish_time, "yyyy-MM-dd HH:mm");
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        combo_cell(ui, "edit_video_type", &mut state.grid.edit_buffer.video_type, &catalog.video_types);
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        multi_trigger(ui, row_id, MultiField::Host, &state.grid.edit_buffer, actions);
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        combo_cell(ui, "edit_status", &mut state.grid.edit_buffer.status, &catalog.statuses);
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        multi_trigger(ui, row_id, MultiField::Platform, &state.grid.edit_buffer, actions);
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        text_cell(ui, &mut state.grid.edit_buffer.publish_time, "yyyy-MM-dd HH:mm");
    });
    track(rect);

    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        text_cell(ui, &mut state.grid.edit_buffer.remark, "备注");
    });
    track(rect);

    let saving = state.saving;
    let (rect, _) = row.col(|ui| {
        paint_cell_bg(ui, tint);
        ui.horizontal(|ui| {
            let save = ui.add_enabled(
                !saving,
                egui::Button::new(RichText::new("保存").small().color(Color32::WHITE))
                    .fill(theme::ACCENT_SUCCESS)
                    .corner_radius(4.0),
            );
            if save.clicked() {
                actions.push(RowAction::Save(row_id));
            }
            if ui.small_button("取消").clicked() {
                actions.push(RowAction::Cancel(row_id));
            }
        });
    });
    track(rect);
}

fn text_cell(ui: &mut Ui, value: &mut String, hint: &str) {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(ui.available_width()),
    );
}

fn combo_cell(ui: &mut Ui, salt: &str, value: &mut String, options: &[String]) {
    let display = if value.is_empty() { "选择" } else { value.as_str() };
    egui::ComboBox::from_id_salt(salt)
        .selected_text(display.to_owned())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            if ui.selectable_label(value.is_empty(), "(空)").clicked() {
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
}

fn multi_trigger(
    ui: &mut Ui,
    row_id: RowId,
    field: MultiField,
    buffer: &EditBuffer,
    actions: &mut Vec<RowAction>,
) {
    let value = match field {
        MultiField::Host => &buffer.host,
        MultiField::Platform => &buffer.platform,
    };
    let selected = multi::split_tokens(value);
    let label = if selected.is_empty() {
        format!("选择{}", field.label())
    } else {
        selected.join(", ")
    };
    let response = ui.add(
        egui::Button::new(RichText::new(label).small())
            .corner_radius(4.0)
            .min_size(Vec2::new(ui.available_width(), 22.0)),
    );
    if response.clicked() {
        actions.push(RowAction::OpenMulti {
            row: row_id,
            field,
            trigger: response.rect,
        });
    }
}

fn pill_strip(ui: &mut Ui, pills: &[row_view::Pill]) {
    if pills.is_empty() {
        ui.label(RichText::new("—").color(TEXT_MUTED));
        return;
    }
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(4.0, 2.0);
        for pill in pills {
            let (bg, fg) = theme::pill_colors(pill.tone);
            egui::Frame::default()
                .fill(bg)
                .corner_radius(CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(6, 2))
                .show(ui, |ui| {
                    ui.label(RichText::new(&pill.text).small().color(fg));
                });
        }
    });
}

fn thumbnail(state: &mut AppState, ui: &mut Ui, url: &str) -> egui::Response {
    let resolved = state.client.resolve_asset(url);
    state
        .thumbnails
        .request(&resolved, ui.ctx(), &state.runtime);

    if let Some(thumb) = state.thumbnails.texture(&resolved) {
        let size = crate::ui::thumbnails::fit_size(thumb.size, CELL_THUMB, CELL_THUMB);
        ui.add(
            egui::Image::new((thumb.texture.id(), size))
                .corner_radius(CornerRadius::same(4))
                .sense(Sense::click()),
        )
        .on_hover_text("点击预览")
    } else if state.thumbnails.is_failed(&resolved) {
        placeholder_thumb(ui)
    } else {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::splat(CELL_THUMB), Sense::click());
        ui.painter()
            .rect_filled(rect, CornerRadius::same(4), ui.visuals().faint_bg_color);
        ui.put(rect, egui::Spinner::new().size(14.0));
        response
    }
}

fn placeholder_thumb(ui: &mut Ui) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(CELL_THUMB), Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(4), ui.visuals().faint_bg_color);
    ui.painter().rect_stroke(
        rect,
        CornerRadius::same(4),
        Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        egui::StrokeKind::Inside,
    );
    response
}

fn small_button(ui: &mut Ui, label: &str, color: Color32) -> egui::Response {
    ui.add(
        egui::Button::new(RichText::new(label).small().color(Color32::WHITE))
            .fill(color)
            .corner_radius(4.0),
    )
}

fn pagination_bar(state: &mut AppState, ui: &mut Ui) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(state.grid.page_info()).color(TEXT_MUTED).small());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let next_ok = state.grid.page_for_delta(1).is_some();
            let prev_ok = state.grid.page_for_delta(-1).is_some();
            if ui.add_enabled(next_ok, egui::Button::new("下一页")).clicked() {
                state.change_page(1);
            }
            if ui.add_enabled(prev_ok, egui::Button::new("上一页")).clicked() {
                state.change_page(-1);
            }
            if state.grid_loading {
                ui.spinner();
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_tint_keys_off_the_new_flag() {
        let placeholder = VideoRecord::synthesized();
        assert_eq!(row_tint(placeholder.is_new, false), Some(ROW_NEW_BG));

        let persisted = VideoRecord {
            id: Some(7),
            ..VideoRecord::default()
        };
        assert_eq!(row_tint(persisted.is_new, false), None);
        assert_eq!(row_tint(persisted.is_new, true), Some(ROW_EDIT_BG));
    }
}
