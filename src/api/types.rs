use serde::{Deserialize, Serialize};

/// Identity of a grid row: either a server-assigned record id or the one
/// client-synthesized row that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowId {
    New,
    Persisted(i64),
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::New => write!(f, "new"),
            RowId::Persisted(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoRecord {
    pub id: Option<i64>,
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub video_type: Option<String>,
    pub host: Option<String>,
    pub status: Option<String>,
    pub platform: Option<String>,
    pub finish_time: Option<String>,
    pub publish_time: Option<String>,
    pub remark: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub is_new: bool,
}

impl VideoRecord {
    pub fn row_id(&self) -> RowId {
        match self.id {
            Some(id) => RowId::Persisted(id),
            None => RowId::New,
        }
    }

    /// Blank placeholder for the "add row" action.
    pub fn synthesized() -> Self {
        Self {
            is_new: true,
            ..Self::default()
        }
    }
}

/// Upstream data passed through an Excel importer; empty cells arrive as
/// `"nan"` or `"None"` strings, which render the same as absent values.
pub fn clean(raw: Option<&str>) -> &str {
    match raw {
        Some(s) if !s.is_empty() && s != "nan" && s != "None" => s,
        _ => "",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoPage {
    pub items: Vec<VideoRecord>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionCatalog {
    pub categories: Vec<String>,
    pub video_types: Vec<String>,
    pub hosts: Vec<String>,
    pub statuses: Vec<String>,
    pub platforms: Vec<String>,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    pub kpi: DashboardKpi,
    pub matrix: Vec<MatrixRow>,
    pub hosts: Vec<NamedCount>,
    pub types: Vec<NamedCount>,
    pub plats: Vec<NamedCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardKpi {
    pub total: u64,
    pub dist_total: u64,
    pub pending: u64,
    pub today_in: u64,
    pub today_out: u64,
    pub month_in: u64,
    pub month_out: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatrixRow {
    pub name: String,
    pub day: u64,
    pub week: u64,
    pub month: u64,
    pub year: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductStat {
    pub name: String,
    pub total: u64,
    pub pending: u64,
}

impl ProductStat {
    pub fn completion_pct(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        (self.total - self.pending.min(self.total)) * 100 / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_passes_real_values() {
        assert_eq!(clean(Some("球服")), "球服");
        assert_eq!(clean(Some("A-102")), "A-102");
    }

    #[test]
    fn test_clean_drops_null_like_values() {
        assert_eq!(clean(None), "");
        assert_eq!(clean(Some("")), "");
        assert_eq!(clean(Some("nan")), "");
        assert_eq!(clean(Some("None")), "");
    }

    #[test]
    fn test_record_row_id() {
        let mut record = VideoRecord::default();
        assert_eq!(record.row_id(), RowId::New);
        record.id = Some(42);
        assert_eq!(record.row_id(), RowId::Persisted(42));
    }

    #[test]
    fn test_page_parses_partial_payload() {
        let page: VideoPage = serde_json::from_str(
            r#"{"items":[{"id":5,"title":"demo","host":"Alice, Bob"}],"total":1,"page":1,"total_pages":1}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].row_id(), RowId::Persisted(5));
        assert_eq!(page.items[0].host.as_deref(), Some("Alice, Bob"));
        assert!(page.items[0].category.is_none());
    }

    #[test]
    fn test_completion_pct() {
        let stat = ProductStat {
            name: "A".into(),
            total: 4,
            pending: 1,
        };
        assert_eq!(stat.completion_pct(), 75);
        let empty = ProductStat::default();
        assert_eq!(empty.completion_pct(), 0);
    }
}
