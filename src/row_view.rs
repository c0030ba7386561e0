//! Pure browse-mode row renderer: maps a cached record to a structured cell
//! list with no side effects, so the table panel stays a dumb consumer and
//! the mapping is testable without a UI.

use crate::api::types::{VideoRecord, clean};
use crate::multi::split_tokens;

/// Status tokens carrying the "done" marker read as positive, the "pending"
/// marker as warning; everything else is neutral.
pub const DONE_MARKER: &str = "已";
pub const PENDING_MARKER: &str = "待";

/// Column layout shared by the header row and the cell builder: label plus
/// the server-side sort key (empty = not sortable).
pub const COLUMNS: &[(&str, &str)] = &[
    ("图", ""),
    ("编号", "product_id"),
    ("视频标题", "title"),
    ("类型", "category"),
    ("完成时间", "finish_time"),
    ("视类", "video_type"),
    ("主播", "host"),
    ("状态", "status"),
    ("平台", "platform"),
    ("发布时间", "publish_time"),
    ("备注", "remark"),
    ("操作", ""),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillTone {
    Done,
    Pending,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub text: String,
    pub tone: PillTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Mono(String),
    Pills(Vec<Pill>),
    /// None renders the built-in placeholder thumbnail.
    Image(Option<String>),
}

pub fn status_tone(token: &str) -> PillTone {
    if token.contains(DONE_MARKER) {
        PillTone::Done
    } else if token.contains(PENDING_MARKER) {
        PillTone::Pending
    } else {
        PillTone::Neutral
    }
}

fn pills(raw: Option<&str>, toned: bool) -> Vec<Pill> {
    split_tokens(clean(raw))
        .into_iter()
        .map(|token| {
            let tone = if toned {
                status_tone(&token)
            } else {
                PillTone::Neutral
            };
            Pill { text: token, tone }
        })
        .collect()
}

fn image_cell(raw: Option<&str>) -> Cell {
    let url = clean(raw);
    if url.is_empty() || url.contains("default") {
        Cell::Image(None)
    } else {
        Cell::Image(Some(url.to_owned()))
    }
}

/// One cell per data column of [`COLUMNS`] (the trailing action column is
/// the table's concern). Null-like values come out as empty text.
pub fn browse_cells(record: &VideoRecord) -> Vec<Cell> {
    vec![
        image_cell(record.image_url.as_deref()),
        Cell::Mono(clean(record.product_id.as_deref()).to_owned()),
        Cell::Text(clean(record.title.as_deref()).to_owned()),
        Cell::Pills(pills(record.category.as_deref(), false)),
        Cell::Mono(clean(record.finish_time.as_deref()).to_owned()),
        Cell::Pills(pills(record.video_type.as_deref(), false)),
        Cell::Pills(pills(record.host.as_deref(), false)),
        Cell::Pills(pills(record.status.as_deref(), true)),
        Cell::Pills(pills(record.platform.as_deref(), false)),
        Cell::Mono(clean(record.publish_time.as_deref()).replace('T', " ")),
        Cell::Text(clean(record.remark.as_deref()).to_owned()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tones() {
        assert_eq!(status_tone("已发布"), PillTone::Done);
        assert_eq!(status_tone("待发布"), PillTone::Pending);
        assert_eq!(status_tone("拍摄中"), PillTone::Neutral);
    }

    #[test]
    fn test_browse_cells_render_pills_and_fallbacks() {
        let record = VideoRecord {
            id: Some(1),
            host: Some("Alice, Bob，Carol".to_owned()),
            status: Some("已发布, 待发布".to_owned()),
            remark: Some("nan".to_owned()),
            publish_time: Some("2026-08-01T12:00".to_owned()),
            ..VideoRecord::default()
        };
        let cells = browse_cells(&record);
        assert_eq!(cells.len(), COLUMNS.len() - 1);

        let Cell::Pills(hosts) = &cells[6] else {
            panic!("host column should be pills");
        };
        assert_eq!(hosts.len(), 3);
        assert!(hosts.iter().all(|p| p.tone == PillTone::Neutral));

        let Cell::Pills(statuses) = &cells[7] else {
            panic!("status column should be pills");
        };
        assert_eq!(statuses[0].tone, PillTone::Done);
        assert_eq!(statuses[1].tone, PillTone::Pending);

        assert_eq!(cells[10], Cell::Text(String::new()));
        assert_eq!(cells[9], Cell::Mono("2026-08-01 12:00".to_owned()));
    }

    #[test]
    fn test_image_cell_placeholder_rules() {
        assert_eq!(image_cell(None), Cell::Image(None));
        assert_eq!(image_cell(Some("/assets/default.png")), Cell::Image(None));
        assert_eq!(
            image_cell(Some("/assets/previews/p.png")),
            Cell::Image(Some("/assets/previews/p.png".to_owned()))
        );
    }

    #[test]
    fn test_browse_cells_are_pure() {
        let record = VideoRecord {
            id: Some(2),
            title: Some("repeatable".to_owned()),
            ..VideoRecord::default()
        };
        assert_eq!(browse_cells(&record), browse_cells(&record));
    }
}
