//! Inventory grid controller: owns the cached page of records, the single
//! edit slot, pagination bookkeeping and upload reconciliation. All state
//! mutation funnels through these methods; the panels only read.

use crate::api::types::{OptionCatalog, RowId, VideoPage, VideoRecord, clean};
use crate::multi::MultiField;
use crate::query::VideoQuery;

/// Owned input values for the row currently in edit mode. Nothing here is
/// written back to the record cache until an explicit save succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub product_id: String,
    pub title: String,
    pub category: String,
    pub finish_time: String,
    pub video_type: String,
    pub host: String,
    pub status: String,
    pub platform: String,
    pub publish_time: String,
    pub remark: String,
    pub image_url: String,
}

impl EditBuffer {
    pub fn from_record(record: &VideoRecord) -> Self {
        Self {
            product_id: clean(record.product_id.as_deref()).to_owned(),
            title: clean(record.title.as_deref()).to_owned(),
            category: clean(record.category.as_deref()).to_owned(),
            finish_time: clean(record.finish_time.as_deref()).to_owned(),
            video_type: clean(record.video_type.as_deref()).to_owned(),
            host: clean(record.host.as_deref()).to_owned(),
            status: clean(record.status.as_deref()).to_owned(),
            platform: clean(record.platform.as_deref()).to_owned(),
            publish_time: clean(record.publish_time.as_deref()).to_owned(),
            remark: clean(record.remark.as_deref()).to_owned(),
            image_url: clean(record.image_url.as_deref()).to_owned(),
        }
    }

    /// Field-name keyed form values for `/api/video/save`. Date-time inputs
    /// are normalized to the space-separated wire representation.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("product_id", self.product_id.clone()),
            ("title", self.title.clone()),
            ("category", self.category.clone()),
            ("finish_time", normalize_time(&self.finish_time)),
            ("video_type", self.video_type.clone()),
            ("host", self.host.clone()),
            ("status", self.status.clone()),
            ("platform", self.platform.clone()),
            ("publish_time", normalize_time(&self.publish_time)),
            ("remark", self.remark.clone()),
            ("image_url", self.image_url.clone()),
        ]
    }

    pub fn multi_value_mut(&mut self, field: MultiField) -> &mut String {
        match field {
            MultiField::Host => &mut self.host,
            MultiField::Platform => &mut self.platform,
        }
    }
}

fn normalize_time(value: &str) -> String {
    value.replace('T', " ")
}

pub enum CancelOutcome {
    /// Edit state cleared; the cached record renders unmodified.
    Closed,
    /// The synthesized placeholder was dropped; reload so nothing stale
    /// lingers client-side.
    ReloadNeeded,
}

pub enum UploadOutcome {
    /// URL staged into the open edit buffer; persisted only on save.
    Staged,
    /// Target row is in browse mode: persist `id` + `image_url` now.
    Persist { id: i64 },
    /// Target no longer exists (placeholder discarded mid-upload).
    Stale,
}

pub struct GridState {
    pub records: Vec<VideoRecord>,
    pub catalog: OptionCatalog,
    pub query: VideoQuery,
    pub total: u64,
    pub total_pages: u64,
    pub editing: Option<RowId>,
    pub edit_buffer: EditBuffer,
    load_epoch: u64,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}

impl GridState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            catalog: OptionCatalog::default(),
            query: VideoQuery::default(),
            total: 0,
            total_pages: 0,
            editing: None,
            edit_buffer: EditBuffer::default(),
            load_epoch: 0,
        }
    }

    // --- loading & pagination -------------------------------------------

    /// Prepares a load of `page` and returns the epoch the response must
    /// carry. Earlier in-flight responses become stale immediately.
    pub fn begin_load(&mut self, page: u64, sort_by: Option<&str>) -> u64 {
        self.query.page = page.max(1);
        if let Some(sort) = sort_by {
            self.query.sort_by = sort.to_owned();
        }
        self.load_epoch += 1;
        self.load_epoch
    }

    /// Replaces the cache wholesale. Returns false (cache untouched) for
    /// responses that were overtaken by a newer load or by view teardown.
    pub fn apply_page(&mut self, epoch: u64, page: VideoPage) -> bool {
        if epoch != self.load_epoch {
            return false;
        }
        self.records = page.items;
        self.total = page.total;
        self.total_pages = page.total_pages;
        self.query.page = page.page.max(1);
        if let Some(editing) = self.editing {
            if !self.records.iter().any(|r| r.row_id() == editing) {
                self.editing = None;
                self.edit_buffer = EditBuffer::default();
            }
        }
        true
    }

    /// Target page for a relative move, or None when it would go out of
    /// `[1, total_pages]` (pagination buttons disable on None).
    pub fn page_for_delta(&self, delta: i64) -> Option<u64> {
        let target = self.query.page as i64 + delta;
        if target >= 1 && target <= self.total_pages as i64 {
            Some(target as u64)
        } else {
            None
        }
    }

    pub fn page_info(&self) -> String {
        format!(
            "共 {} 条 · {}/{} 页",
            self.total,
            self.query.page,
            self.total_pages.max(1)
        )
    }

    // --- edit state ------------------------------------------------------

    pub fn is_editing(&self, id: RowId) -> bool {
        self.editing == Some(id)
    }

    pub fn record(&self, id: RowId) -> Option<&VideoRecord> {
        self.records.iter().find(|r| r.row_id() == id)
    }

    /// Opens `id` for editing, discarding any other row's in-progress edits.
    /// A synthesized placeholder abandoned this way is removed outright: the
    /// whole row is an unsaved edit.
    pub fn begin_edit(&mut self, id: RowId) {
        if self.editing == Some(id) {
            return;
        }
        // an unknown target must not disturb the current edit state
        let Some(record) = self.record(id) else {
            return;
        };
        let buffer = EditBuffer::from_record(record);
        if self.editing == Some(RowId::New) && id != RowId::New {
            self.records.retain(|r| r.row_id() != RowId::New);
        }
        self.edit_buffer = buffer;
        self.editing = Some(id);
    }

    pub fn cancel_edit(&mut self, id: RowId) -> CancelOutcome {
        if self.editing == Some(id) {
            self.editing = None;
            self.edit_buffer = EditBuffer::default();
        }
        if id == RowId::New {
            self.records.retain(|r| r.row_id() != RowId::New);
            CancelOutcome::ReloadNeeded
        } else {
            CancelOutcome::Closed
        }
    }

    /// Prepends a blank synthesized row and opens it for editing. Refused
    /// while one unsaved placeholder already exists.
    pub fn add_row(&mut self) -> bool {
        if self.records.iter().any(|r| r.row_id() == RowId::New) {
            return false;
        }
        self.records.insert(0, VideoRecord::synthesized());
        self.edit_buffer = EditBuffer::default();
        self.editing = Some(RowId::New);
        true
    }

    /// Form payload for saving `id`; the `id` field is omitted for the
    /// synthesized row so the server assigns one.
    pub fn save_fields(&self, id: RowId) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(12);
        if let RowId::Persisted(id) = id {
            fields.push(("id", id.to_string()));
        }
        fields.extend(self.edit_buffer.form_fields());
        fields
    }

    /// Successful save: edit state cleared unconditionally; the caller
    /// reloads so the server-assigned record replaces any placeholder.
    pub fn finish_save(&mut self) {
        self.editing = None;
        self.edit_buffer = EditBuffer::default();
    }

    // --- upload reconciliation ------------------------------------------

    /// Routes a completed upload by the edit state at completion time, not
    /// at drop time: editing the target stages the URL, browse mode asks
    /// for an immediate persist of `id` + `image_url` only.
    pub fn reconcile_upload(&mut self, target: RowId, url: &str) -> UploadOutcome {
        if self.editing == Some(target) {
            self.edit_buffer.image_url = url.to_owned();
            return UploadOutcome::Staged;
        }
        match target {
            RowId::Persisted(id) => UploadOutcome::Persist { id },
            RowId::New => UploadOutcome::Stale,
        }
    }

    /// Applies a browse-mode image persist that the server acknowledged.
    pub fn apply_persisted_image(&mut self, id: i64, url: &str) {
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.row_id() == RowId::Persisted(id))
        {
            record.image_url = Some(url.to_owned());
        }
    }

    // --- catalog ---------------------------------------------------------

    pub fn replace_catalog(&mut self, catalog: OptionCatalog) {
        self.catalog = catalog;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> VideoRecord {
        VideoRecord {
            id: Some(id),
            product_id: Some(format!("P-{id}")),
            title: Some(format!("title {id}")),
            host: Some("Alice, Bob".to_owned()),
            status: Some("待发布".to_owned()),
            ..VideoRecord::default()
        }
    }

    fn page(ids: &[i64], total: u64, page_no: u64, total_pages: u64) -> VideoPage {
        VideoPage {
            items: ids.iter().copied().map(record).collect(),
            total,
            page: page_no,
            total_pages,
        }
    }

    fn loaded_grid(ids: &[i64]) -> GridState {
        let mut grid = GridState::new();
        let epoch = grid.begin_load(1, None);
        assert!(grid.apply_page(epoch, page(ids, ids.len() as u64, 1, 1)));
        grid
    }

    #[test]
    fn test_at_most_one_row_in_edit_mode() {
        let mut grid = loaded_grid(&[1, 2, 3]);
        grid.begin_edit(RowId::Persisted(1));
        grid.begin_edit(RowId::Persisted(2));
        grid.begin_edit(RowId::Persisted(3));
        grid.cancel_edit(RowId::Persisted(3));
        grid.begin_edit(RowId::Persisted(2));

        let editing: Vec<_> = grid
            .records
            .iter()
            .filter(|r| grid.is_editing(r.row_id()))
            .collect();
        assert_eq!(editing.len(), 1);
        assert_eq!(grid.editing, Some(RowId::Persisted(2)));
    }

    #[test]
    fn test_switching_edit_targets_discards_buffer() {
        let mut grid = loaded_grid(&[1, 2]);
        grid.begin_edit(RowId::Persisted(1));
        grid.edit_buffer.title = "mutated but never saved".to_owned();
        grid.begin_edit(RowId::Persisted(2));
        assert_eq!(grid.edit_buffer.title, "title 2");
        // cache is untouched by abandoned edits
        assert_eq!(
            grid.record(RowId::Persisted(1)).unwrap().title.as_deref(),
            Some("title 1")
        );
    }

    #[test]
    fn test_cancel_new_drops_placeholder_and_requests_reload() {
        let mut grid = loaded_grid(&[1]);
        assert!(grid.add_row());
        assert!(matches!(
            grid.cancel_edit(RowId::New),
            CancelOutcome::ReloadNeeded
        ));
        assert!(grid.records.iter().all(|r| r.row_id() != RowId::New));
        assert_eq!(grid.editing, None);

        // the follow-up reload must not resurrect it either
        let epoch = grid.begin_load(1, None);
        grid.apply_page(epoch, page(&[1], 1, 1, 1));
        assert!(grid.records.iter().all(|r| r.row_id() != RowId::New));
    }

    #[test]
    fn test_cancel_existing_row_keeps_cache() {
        let mut grid = loaded_grid(&[7]);
        grid.begin_edit(RowId::Persisted(7));
        grid.edit_buffer.remark = "draft".to_owned();
        assert!(matches!(
            grid.cancel_edit(RowId::Persisted(7)),
            CancelOutcome::Closed
        ));
        assert_eq!(grid.editing, None);
        assert!(grid.record(RowId::Persisted(7)).unwrap().remark.is_none());
    }

    #[test]
    fn test_second_add_row_is_refused() {
        let mut grid = loaded_grid(&[1]);
        assert!(grid.add_row());
        assert!(!grid.add_row());
        let placeholders = grid
            .records
            .iter()
            .filter(|r| r.row_id() == RowId::New)
            .count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn test_begin_edit_unknown_target_leaves_state_alone() {
        let mut grid = loaded_grid(&[1]);
        grid.add_row();
        grid.edit_buffer.title = "draft".to_owned();

        grid.begin_edit(RowId::Persisted(999));

        // placeholder and its open edit survive the bogus target
        assert_eq!(grid.editing, Some(RowId::New));
        assert!(grid.records.iter().any(|r| r.row_id() == RowId::New));
        assert_eq!(grid.edit_buffer.title, "draft");
    }

    #[test]
    fn test_begin_edit_elsewhere_removes_placeholder() {
        let mut grid = loaded_grid(&[5]);
        grid.add_row();
        grid.begin_edit(RowId::Persisted(5));
        assert!(grid.records.iter().all(|r| r.row_id() != RowId::New));
        assert_eq!(grid.editing, Some(RowId::Persisted(5)));
    }

    #[test]
    fn test_save_fields_omit_id_for_new_row() {
        let mut grid = loaded_grid(&[]);
        grid.add_row();
        grid.edit_buffer.title = "fresh".to_owned();
        grid.edit_buffer.publish_time = "2026-08-20T10:30".to_owned();
        let fields = grid.save_fields(RowId::New);
        assert!(fields.iter().all(|(k, _)| *k != "id"));
        assert!(
            fields
                .iter()
                .any(|(k, v)| *k == "publish_time" && v == "2026-08-20 10:30")
        );

        grid.finish_save();
        assert_eq!(grid.editing, None);
    }

    #[test]
    fn test_save_fields_carry_id_for_persisted_row() {
        let mut grid = loaded_grid(&[9]);
        grid.begin_edit(RowId::Persisted(9));
        let fields = grid.save_fields(RowId::Persisted(9));
        assert_eq!(fields[0], ("id", "9".to_owned()));
    }

    #[test]
    fn test_page_bounds() {
        let mut grid = GridState::new();
        let epoch = grid.begin_load(1, None);
        grid.apply_page(epoch, page(&[1], 120, 1, 2));

        assert_eq!(grid.total_pages, 2);
        assert_eq!(grid.page_for_delta(1), Some(2));
        assert_eq!(grid.page_for_delta(-1), None);

        let epoch = grid.begin_load(2, None);
        grid.apply_page(epoch, page(&[2], 120, 2, 2));
        assert_eq!(grid.page_for_delta(1), None);
        assert_eq!(grid.page_for_delta(-1), Some(1));
    }

    #[test]
    fn test_stale_epoch_response_is_discarded() {
        let mut grid = GridState::new();
        let first = grid.begin_load(1, None);
        let second = grid.begin_load(2, None);

        // the slower page-2 request resolves first
        assert!(grid.apply_page(second, page(&[20], 120, 2, 2)));
        // the page-1 response arrives late and must not clobber the cache
        assert!(!grid.apply_page(first, page(&[10], 120, 1, 2)));
        assert_eq!(grid.records[0].id, Some(20));
        assert_eq!(grid.query.page, 2);
    }

    #[test]
    fn test_upload_into_editing_row_stages_only() {
        let mut grid = loaded_grid(&[4]);
        grid.begin_edit(RowId::Persisted(4));
        let outcome = grid.reconcile_upload(RowId::Persisted(4), "/assets/previews/x.png");
        assert!(matches!(outcome, UploadOutcome::Staged));
        assert_eq!(grid.edit_buffer.image_url, "/assets/previews/x.png");
        // cache unchanged until save
        assert!(grid.record(RowId::Persisted(4)).unwrap().image_url.is_none());
    }

    #[test]
    fn test_upload_into_browse_row_persists_once() {
        let mut grid = loaded_grid(&[4, 5]);
        grid.begin_edit(RowId::Persisted(5));
        let outcome = grid.reconcile_upload(RowId::Persisted(4), "/assets/previews/y.png");
        let UploadOutcome::Persist { id } = outcome else {
            panic!("expected persist directive");
        };
        assert_eq!(id, 4);
        // buffer belongs to row 5 and must stay untouched
        assert!(grid.edit_buffer.image_url.is_empty());

        grid.apply_persisted_image(4, "/assets/previews/y.png");
        assert_eq!(
            grid.record(RowId::Persisted(4)).unwrap().image_url.as_deref(),
            Some("/assets/previews/y.png")
        );
    }

    #[test]
    fn test_upload_for_discarded_placeholder_is_stale() {
        let mut grid = loaded_grid(&[1]);
        grid.add_row();
        grid.cancel_edit(RowId::New);
        assert!(matches!(
            grid.reconcile_upload(RowId::New, "/assets/z.png"),
            UploadOutcome::Stale
        ));
    }

    #[test]
    fn test_reload_clears_vanished_edit_target() {
        let mut grid = loaded_grid(&[1, 2]);
        grid.begin_edit(RowId::Persisted(2));
        let epoch = grid.begin_load(1, None);
        grid.apply_page(epoch, page(&[1, 3], 2, 1, 1));
        assert_eq!(grid.editing, None);
    }

    #[test]
    fn test_edit_buffer_cleans_null_like_values() {
        let record = VideoRecord {
            id: Some(1),
            remark: Some("nan".to_owned()),
            category: Some("None".to_owned()),
            title: Some("kept".to_owned()),
            ..VideoRecord::default()
        };
        let buffer = EditBuffer::from_record(&record);
        assert_eq!(buffer.remark, "");
        assert_eq!(buffer.category, "");
        assert_eq!(buffer.title, "kept");
    }
}
