use std::time::{Duration, Instant};

use egui::{Align2, Color32, Context, RichText, Stroke};

use crate::ui::theme::{ACCENT_DANGER, ACCENT_PRIMARY, ACCENT_SUCCESS, CARD_BG, CARD_BORDER};

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn accent(self) -> Color32 {
        match self {
            ToastKind::Info => ACCENT_PRIMARY,
            ToastKind::Success => ACCENT_SUCCESS,
            ToastKind::Error => ACCENT_DANGER,
        }
    }
}

pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(text: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: Instant::now() + TOAST_LIFETIME,
        }
    }
}

pub fn prune(toasts: &mut Vec<Toast>) {
    let now = Instant::now();
    toasts.retain(|toast| toast.expires_at > now);
}

pub fn render(toasts: &[Toast], ctx: &Context) {
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toast_area"))
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.vertical(|ui| {
                for toast in toasts.iter().rev() {
                    egui::Frame::popup(ui.style())
                        .fill(CARD_BG)
                        .stroke(Stroke::new(1.0, CARD_BORDER))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                let (rect, _) = ui.allocate_exact_size(
                                    egui::vec2(3.0, 18.0),
                                    egui::Sense::hover(),
                                );
                                ui.painter().rect_filled(rect, 2.0, toast.kind.accent());
                                ui.label(RichText::new(&toast.text).small());
                            });
                        });
                    ui.add_space(4.0);
                }
            });
        });

    // keep repainting so expired toasts disappear without input
    ctx.request_repaint_after(Duration::from_millis(200));
}
