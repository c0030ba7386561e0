pub mod types;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

use types::{DashboardData, OptionCatalog, ProductStat, UploadResponse, VideoPage};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin client over the VideoHub REST surface. Cheap to clone; every UI
/// task gets its own copy.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// The backend hands out server-relative asset paths (`/assets/...`).
    pub fn resolve_asset(&self, url: &str) -> String {
        if url.starts_with('/') {
            self.url(url)
        } else {
            url.to_owned()
        }
    }

    pub async fn fetch_options(&self) -> ApiResult<OptionCatalog> {
        let resp = self.http.get(self.url("/api/options")).send().await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_videos(&self, params: &[(&'static str, String)]) -> ApiResult<VideoPage> {
        let resp = self
            .http
            .get(self.url("/api/videos"))
            .query(params)
            .send()
            .await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    pub async fn save_video(&self, fields: Vec<(&'static str, String)>) -> ApiResult<()> {
        let mut form = Form::new();
        for (key, value) in fields {
            form = form.text(key, value);
        }
        let resp = self
            .http
            .post(self.url("/api/video/save"))
            .multipart(form)
            .send()
            .await?;
        ok_status(&resp)
    }

    /// Fire-and-forget: the response status is not inspected.
    pub async fn delete_video(&self, id: i64) -> ApiResult<()> {
        self.http
            .delete(self.url(&format!("/api/video/{id}")))
            .send()
            .await?;
        Ok(())
    }

    pub async fn upload_image(&self, file_name: String, bytes: Vec<u8>) -> ApiResult<String> {
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part("file", part);
        let resp = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        ok_status(&resp)?;
        let parsed: UploadResponse = resp.json().await?;
        Ok(parsed.url)
    }

    pub async fn save_setting(&self, key: &str, value: &str) -> ApiResult<()> {
        let resp = self
            .http
            .post(self.url("/api/settings"))
            .form(&[("key", key), ("value", value)])
            .send()
            .await?;
        ok_status(&resp)
    }

    pub async fn fetch_dashboard(&self, dim: &str) -> ApiResult<DashboardData> {
        let resp = self
            .http
            .get(self.url("/api/dashboard"))
            .query(&[("dim", dim)])
            .send()
            .await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_product_stats(&self) -> ApiResult<Vec<ProductStat>> {
        let resp = self.http.get(self.url("/api/product_stats")).send().await?;
        ok_status(&resp)?;
        Ok(resp.json().await?)
    }
}

fn ok_status(resp: &reqwest::Response) -> ApiResult<()> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(resp.status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://127.0.0.1:8000/ ");
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(client.url("/api/options"), "http://127.0.0.1:8000/api/options");
    }

    #[test]
    fn test_resolve_asset() {
        let client = ApiClient::new("http://nas.local:8000");
        assert_eq!(
            client.resolve_asset("/assets/previews/a.png"),
            "http://nas.local:8000/assets/previews/a.png"
        );
        assert_eq!(
            client.resolve_asset("https://cdn.example/a.png"),
            "https://cdn.example/a.png"
        );
    }
}
