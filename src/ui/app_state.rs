use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::api::types::{DashboardData, OptionCatalog, ProductStat, RowId, VideoPage};
use crate::grid::{CancelOutcome, GridState, UploadOutcome};
use crate::multi::{self, MultiField};
use crate::prefs::{self, Prefs};
use crate::ui::thumbnails::ThumbnailCache;
use crate::ui::toasts::{Toast, ToastKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Inventory,
    Products,
}

/// Completion of a network task, delivered back to the UI thread.
pub enum NetMessage {
    Options(Result<OptionCatalog, String>),
    Page {
        epoch: u64,
        result: Result<VideoPage, String>,
    },
    Saved(Result<(), String>),
    Deleted,
    Uploaded {
        target: RowId,
        result: Result<String, String>,
    },
    ImagePersisted {
        id: i64,
        url: String,
        result: Result<(), String>,
    },
    SettingsSaved(Result<(), String>),
    Dashboard(Result<DashboardData, String>),
    ProductStats(Result<Vec<ProductStat>, String>),
}

/// Every interaction a grid row can emit, dispatched through one handler.
pub enum RowAction {
    Edit(RowId),
    Cancel(RowId),
    Save(RowId),
    Delete(RowId),
    PreviewImage(String),
    TriggerUpload(RowId),
    OpenMulti {
        row: RowId,
        field: MultiField,
        trigger: egui::Rect,
    },
}

pub struct PopoverState {
    pub row: RowId,
    pub field: MultiField,
    pub trigger: egui::Rect,
}

pub struct SettingsDraft {
    pub hosts: String,
    pub categories: String,
    pub video_types: String,
    pub platforms: String,
    pub server_url: String,
}

pub struct AppState {
    pub prefs: Prefs,
    pub client: ApiClient,
    pub runtime: Runtime,
    tx: Sender<NetMessage>,
    rx: Receiver<NetMessage>,

    pub view: View,
    pub grid: GridState,
    pub grid_loading: bool,
    pub saving: bool,
    inventory_started: bool,
    pub filter_panel_open: bool,
    pub scroll_to_top: bool,
    /// Row hit-test rects from the last table frame, for drop targeting.
    pub row_rects: Vec<(RowId, egui::Rect)>,

    pub toasts: Vec<Toast>,
    pub popover: Option<PopoverState>,
    pub confirm_delete: Option<i64>,
    pub preview_image: Option<String>,
    pub settings: Option<SettingsDraft>,

    pub dashboard: Option<DashboardData>,
    pub dashboard_dim: &'static str,
    pub products: Option<Vec<ProductStat>>,

    pub thumbnails: ThumbnailCache,
}

impl AppState {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        super::theme::apply_hub_theme(&cc.egui_ctx);

        let prefs = prefs::load_or_default();
        let client = ApiClient::new(&prefs.server_url);
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to start tokio runtime");
        let (tx, rx) = mpsc::channel();

        let mut state = Self {
            prefs,
            client,
            runtime,
            tx,
            rx,
            view: View::Dashboard,
            grid: GridState::new(),
            grid_loading: false,
            saving: false,
            inventory_started: false,
            filter_panel_open: false,
            scroll_to_top: false,
            row_rects: Vec::new(),
            toasts: Vec::new(),
            popover: None,
            confirm_delete: None,
            preview_image: None,
            settings: None,
            dashboard: None,
            dashboard_dim: "day",
            products: None,
            thumbnails: ThumbnailCache::new(),
        };
        state.launch_dashboard(state.dashboard_dim);
        state
    }

    pub fn notify(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast::new(text, kind));
    }

    // --- view switching --------------------------------------------------

    pub fn switch_view(&mut self, view: View) {
        self.view = view;
        self.popover = None;
        match view {
            View::Dashboard => self.launch_dashboard(self.dashboard_dim),
            View::Products => self.launch_product_stats(),
            View::Inventory => self.ensure_inventory_started(),
        }
    }

    fn ensure_inventory_started(&mut self) {
        if self.inventory_started {
            return;
        }
        self.inventory_started = true;
        self.launch_options();
        self.launch_load(1, None);
    }

    /// Product card navigation: jump to the grid pre-filtered by product id.
    pub fn open_inventory_with_product(&mut self, product_id: &str) {
        self.inventory_started = true;
        self.view = View::Inventory;
        self.filter_panel_open = true;
        self.grid.query.reset_filters();
        self.grid.query.product_id = product_id.to_owned();
        if self.grid.catalog.product_ids.is_empty() {
            self.launch_options();
        }
        self.launch_load(1, None);
    }

    // --- network launches ------------------------------------------------

    pub fn launch_options(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_options().await.map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::Options(result));
        });
    }

    pub fn launch_load(&mut self, page: u64, sort_by: Option<&str>) {
        let epoch = self.grid.begin_load(page, sort_by);
        self.grid_loading = true;
        let params = self.grid.query.params();
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_videos(&params).await.map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::Page { epoch, result });
        });
    }

    fn reload_current_page(&mut self) {
        let page = self.grid.query.page;
        self.launch_load(page, None);
    }

    pub fn apply_filters(&mut self) {
        self.launch_load(1, None);
    }

    pub fn reset_filters(&mut self) {
        self.grid.query.reset_filters();
        self.launch_load(1, None);
    }

    pub fn change_page(&mut self, delta: i64) {
        if let Some(target) = self.grid.page_for_delta(delta) {
            self.launch_load(target, None);
        }
    }

    pub fn sort_by_column(&mut self, column: &str) {
        self.launch_load(1, Some(column));
    }

    fn launch_save(&mut self, id: RowId) {
        if self.saving {
            return;
        }
        self.saving = true;
        let fields = self.grid.save_fields(id);
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.save_video(fields).await.map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::Saved(result));
        });
    }

    pub fn launch_delete(&mut self, id: i64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            // fire-and-forget; the follow-up reload shows the truth
            if let Err(err) = client.delete_video(id).await {
                warn!("delete request failed: {err}");
            }
            let _ = tx.send(NetMessage::Deleted);
        });
    }

    pub fn launch_upload(&mut self, target: RowId, path: PathBuf) {
        self.notify("正在上传图片...", ToastKind::Info);
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = match std::fs::read(&path) {
                Ok(bytes) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "upload.png".to_owned());
                    client
                        .upload_image(name, bytes)
                        .await
                        .map_err(|e| e.to_string())
                }
                Err(err) => Err(err.to_string()),
            };
            let _ = tx.send(NetMessage::Uploaded { target, result });
        });
    }

    fn launch_persist_image(&mut self, id: i64, url: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let fields = vec![("id", id.to_string()), ("image_url", url.clone())];
            let result = client.save_video(fields).await.map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::ImagePersisted { id, url, result });
        });
    }

    pub fn launch_dashboard(&mut self, dim: &'static str) {
        self.dashboard_dim = dim;
        let client = self.client.clone();
        let tx = self.tx.clone();
        let dim = dim.to_owned();
        self.runtime.spawn(async move {
            let result = client.fetch_dashboard(&dim).await.map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::Dashboard(result));
        });
    }

    pub fn launch_product_stats(&mut self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client
                .fetch_product_stats()
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(NetMessage::ProductStats(result));
        });
    }

    // --- row actions -----------------------------------------------------

    pub fn handle_row_action(&mut self, action: RowAction) {
        match action {
            RowAction::Edit(id) => {
                self.popover = None;
                self.grid.begin_edit(id);
            }
            RowAction::Cancel(id) => {
                self.popover = None;
                if let CancelOutcome::ReloadNeeded = self.grid.cancel_edit(id) {
                    self.reload_current_page();
                }
            }
            RowAction::Save(id) => {
                self.popover = None;
                self.launch_save(id);
            }
            RowAction::Delete(id) => {
                if let RowId::Persisted(id) = id {
                    self.confirm_delete = Some(id);
                }
            }
            RowAction::PreviewImage(url) => {
                self.preview_image = Some(self.client.resolve_asset(&url));
            }
            RowAction::TriggerUpload(target) => self.pick_upload_file(target),
            RowAction::OpenMulti { row, field, trigger } => {
                self.popover = Some(PopoverState { row, field, trigger });
            }
        }
    }

    pub fn add_row(&mut self) {
        if self.grid.add_row() {
            self.scroll_to_top = true;
        } else {
            self.notify("已有一行未保存的新增记录", ToastKind::Info);
        }
    }

    fn pick_upload_file(&mut self, target: RowId) {
        let picked = native_dialog::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .show_open_single_file();
        match picked {
            Ok(Some(path)) => self.launch_upload(target, path),
            Ok(None) => {}
            Err(err) => {
                error!("file dialog failed: {err}");
                self.notify("无法打开文件选择器", ToastKind::Error);
            }
        }
    }

    pub fn toggle_popover_value(&mut self, field: MultiField, value: &str) {
        let slot = self.grid.edit_buffer.multi_value_mut(field);
        *slot = multi::toggle_token(slot, value);
    }

    // --- settings --------------------------------------------------------

    pub fn open_settings(&mut self) {
        let catalog = &self.grid.catalog;
        self.settings = Some(SettingsDraft {
            hosts: catalog.hosts.join(","),
            categories: catalog.categories.join(","),
            video_types: catalog.video_types.join(","),
            platforms: catalog.platforms.join(","),
            server_url: self.prefs.server_url.clone(),
        });
        if catalog.hosts.is_empty() && catalog.categories.is_empty() {
            self.launch_options();
        }
    }

    pub fn save_settings(&mut self) {
        let Some(draft) = self.settings.take() else {
            return;
        };

        let server_url = draft.server_url.trim().to_owned();
        if !server_url.is_empty() && server_url != self.prefs.server_url {
            self.prefs.server_url = server_url;
            self.client = ApiClient::new(&self.prefs.server_url);
            if let Err(err) = prefs::save(&self.prefs) {
                error!("failed to save prefs: {err}");
                self.notify("本地配置保存失败", ToastKind::Error);
            }
            info!(server = %self.prefs.server_url, "server url updated");
        }

        let catalog = &self.grid.catalog;
        let mut changed: Vec<(&'static str, String)> = Vec::new();
        for (key, value, current) in [
            ("hosts", &draft.hosts, catalog.hosts.join(",")),
            ("categories", &draft.categories, catalog.categories.join(",")),
            ("video_types", &draft.video_types, catalog.video_types.join(",")),
            ("platforms", &draft.platforms, catalog.platforms.join(",")),
        ] {
            if value.trim() != current {
                changed.push((key, value.trim().to_owned()));
            }
        }

        if changed.is_empty() {
            self.notify("配置未变更", ToastKind::Info);
            return;
        }

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let mut result = Ok(());
            for (key, value) in changed {
                if let Err(err) = client.save_setting(key, &value).await {
                    result = Err(err.to_string());
                    break;
                }
            }
            let _ = tx.send(NetMessage::SettingsSaved(result));
        });
    }

    // --- message pump ----------------------------------------------------

    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.apply_message(message);
        }
    }

    fn apply_message(&mut self, message: NetMessage) {
        match message {
            NetMessage::Options(Ok(catalog)) => self.grid.replace_catalog(catalog),
            NetMessage::Options(Err(err)) => {
                error!("options load failed: {err}");
                self.notify("选项加载失败", ToastKind::Error);
            }
            NetMessage::Page { epoch, result } => {
                self.grid_loading = false;
                match result {
                    Ok(page) => {
                        if !self.grid.apply_page(epoch, page) {
                            info!(epoch, "discarded stale page response");
                        }
                    }
                    Err(err) => {
                        error!("page load failed: {err}");
                        self.notify("数据加载失败", ToastKind::Error);
                    }
                }
            }
            NetMessage::Saved(Ok(())) => {
                self.saving = false;
                self.notify("保存成功", ToastKind::Success);
                self.grid.finish_save();
                self.reload_current_page();
            }
            NetMessage::Saved(Err(err)) => {
                self.saving = false;
                error!("save failed: {err}");
                self.notify("保存失败", ToastKind::Error);
            }
            NetMessage::Deleted => {
                self.notify("已删除", ToastKind::Success);
                self.reload_current_page();
            }
            NetMessage::Uploaded { target, result } => match result {
                Ok(url) => {
                    self.thumbnails.forget(&self.client.resolve_asset(&url));
                    match self.grid.reconcile_upload(target, &url) {
                        UploadOutcome::Staged => {
                            self.notify("图片上传成功", ToastKind::Success)
                        }
                        UploadOutcome::Persist { id } => self.launch_persist_image(id, url),
                        UploadOutcome::Stale => {
                            warn!(%target, "upload finished for a discarded row")
                        }
                    }
                }
                Err(err) => {
                    error!("upload failed: {err}");
                    self.notify("上传失败", ToastKind::Error);
                }
            },
            NetMessage::ImagePersisted { id, url, result } => match result {
                Ok(()) => {
                    self.grid.apply_persisted_image(id, &url);
                    self.notify("图片上传成功", ToastKind::Success);
                }
                Err(err) => {
                    error!(id, "image persist failed: {err}");
                    self.notify("图片保存失败", ToastKind::Error);
                }
            },
            NetMessage::SettingsSaved(Ok(())) => {
                self.notify("配置已保存", ToastKind::Success);
                self.launch_options();
            }
            NetMessage::SettingsSaved(Err(err)) => {
                error!("settings save failed: {err}");
                self.notify("配置保存失败", ToastKind::Error);
            }
            NetMessage::Dashboard(Ok(data)) => self.dashboard = Some(data),
            NetMessage::Dashboard(Err(err)) => {
                error!("dashboard load failed: {err}");
                self.notify("看板数据加载失败", ToastKind::Error);
            }
            NetMessage::ProductStats(Ok(stats)) => self.products = Some(stats),
            NetMessage::ProductStats(Err(err)) => {
                error!("product stats load failed: {err}");
                self.notify("产品统计加载失败", ToastKind::Error);
            }
        }
    }

    /// Routes a drop to the row under the pointer. Only the first dropped
    /// file counts; one drop maps to one image slot.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.view != View::Inventory {
            return;
        }
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = first_dropped_path(&dropped) else {
            return;
        };
        let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) else {
            return;
        };
        let Some(target) = self
            .row_rects
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id)
        else {
            return;
        };
        self.launch_upload(target, path);
    }
}

fn first_dropped_path(dropped: &[egui::DroppedFile]) -> Option<PathBuf> {
    dropped.iter().find_map(|file| file.path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(path: Option<&str>) -> egui::DroppedFile {
        egui::DroppedFile {
            path: path.map(PathBuf::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_multi_file_drop_uploads_only_the_first() {
        let files = [dropped(Some("/tmp/a.png")), dropped(Some("/tmp/b.png"))];
        assert_eq!(
            first_dropped_path(&files),
            Some(PathBuf::from("/tmp/a.png"))
        );
    }

    #[test]
    fn test_drop_without_paths_is_ignored() {
        assert_eq!(first_dropped_path(&[]), None);
        assert_eq!(first_dropped_path(&[dropped(None)]), None);
        // a pathless entry ahead of a real file must not swallow the drop
        assert_eq!(
            first_dropped_path(&[dropped(None), dropped(Some("/tmp/c.png"))]),
            Some(PathBuf::from("/tmp/c.png"))
        );
    }
}
