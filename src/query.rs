/// Fixed page size; the backend caps pages at this size as well.
pub const PAGE_SIZE: u64 = 100;

pub const DEFAULT_SORT: &str = "id";

/// Filter, sort and pagination state for the inventory grid. Mutated only by
/// explicit user actions (apply/reset filters, change page, sort); edit
/// operations never touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    pub page: u64,
    pub sort_by: String,
    pub keyword: String,
    pub product_id: String,
    pub title: String,
    pub remark: String,
    pub host: String,
    pub status: String,
    pub category: String,
    pub video_type: String,
    pub platform: String,
    pub finish_start: String,
    pub finish_end: String,
    pub publish_start: String,
    pub publish_end: String,
}

impl Default for VideoQuery {
    fn default() -> Self {
        Self {
            page: 1,
            sort_by: DEFAULT_SORT.to_owned(),
            keyword: String::new(),
            product_id: String::new(),
            title: String::new(),
            remark: String::new(),
            host: String::new(),
            status: String::new(),
            category: String::new(),
            video_type: String::new(),
            platform: String::new(),
            finish_start: String::new(),
            finish_end: String::new(),
            publish_start: String::new(),
            publish_end: String::new(),
        }
    }
}

impl VideoQuery {
    /// Full request parameter set. Every key is always present, unset
    /// filters as empty strings; the backend relies on the fixed shape.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", PAGE_SIZE.to_string()),
            ("sort_by", self.sort_by.clone()),
            ("keyword", self.keyword.clone()),
            ("product_id", self.product_id.clone()),
            ("title", self.title.clone()),
            ("remark", self.remark.clone()),
            ("host", self.host.clone()),
            ("status", self.status.clone()),
            ("category", self.category.clone()),
            ("video_type", self.video_type.clone()),
            ("platform", self.platform.clone()),
            ("finish_start", self.finish_start.clone()),
            ("finish_end", self.finish_end.clone()),
            ("publish_start", self.publish_start.clone()),
            ("publish_end", self.publish_end.clone()),
        ]
    }

    /// Clears every filter field and rewinds to page 1. Sort order survives.
    pub fn reset_filters(&mut self) {
        let sort_by = std::mem::take(&mut self.sort_by);
        *self = Self {
            sort_by,
            ..Self::default()
        };
    }

    pub fn has_active_filters(&self) -> bool {
        !(self.keyword.is_empty()
            && self.product_id.is_empty()
            && self.title.is_empty()
            && self.remark.is_empty()
            && self.host.is_empty()
            && self.status.is_empty()
            && self.category.is_empty()
            && self.video_type.is_empty()
            && self.platform.is_empty()
            && self.finish_start.is_empty()
            && self.finish_end.is_empty()
            && self.publish_start.is_empty()
            && self.publish_end.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_always_carry_every_key() {
        let query = VideoQuery::default();
        let params = query.params();
        assert_eq!(params.len(), 16);
        for key in [
            "page",
            "size",
            "sort_by",
            "keyword",
            "product_id",
            "title",
            "remark",
            "host",
            "status",
            "category",
            "video_type",
            "platform",
            "finish_start",
            "finish_end",
            "publish_start",
            "publish_end",
        ] {
            assert!(params.iter().any(|(k, _)| *k == key), "missing {key}");
        }
    }

    #[test]
    fn test_params_carry_exactly_the_set_filters() {
        let mut query = VideoQuery::default();
        query.status = "待发布".to_owned();
        query.host = "Alice".to_owned();
        let params = query.params();

        let value = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(value("page"), "1");
        assert_eq!(value("size"), "100");
        assert_eq!(value("status"), "待发布");
        assert_eq!(value("host"), "Alice");

        let non_empty: Vec<&str> = params
            .iter()
            .filter(|(k, v)| !v.is_empty() && !matches!(*k, "page" | "size" | "sort_by"))
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(non_empty, vec!["host", "status"]);
    }

    #[test]
    fn test_reset_filters_keeps_sort_and_rewinds() {
        let mut query = VideoQuery::default();
        query.page = 3;
        query.sort_by = "finish_time".to_owned();
        query.keyword = "jersey".to_owned();
        query.publish_start = "2026-01-01".to_owned();
        query.reset_filters();

        assert_eq!(query.page, 1);
        assert_eq!(query.sort_by, "finish_time");
        assert!(!query.has_active_filters());
    }
}
