pub mod app_state;
pub mod panels;
pub mod theme;
pub mod thumbnails;
pub mod toasts;

pub use app_state::AppState;

use app_state::View;

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();
        self.thumbnails.update(ctx);
        self.handle_dropped_files(ctx);
        toasts::prune(&mut self.toasts);

        panels::top::render(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Dashboard => panels::dashboard::render(self, ui),
            View::Inventory => {
                if self.filter_panel_open {
                    panels::filter_bar::render(self, ui);
                }
                panels::table::render(self, ui);
            }
            View::Products => panels::products::render(self, ui),
        });

        panels::popover::render(self, ctx);
        panels::settings::render(self, ctx);
        panels::dialogs::render(self, ctx);
        toasts::render(&self.toasts, ctx);
    }
}
