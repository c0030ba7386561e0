use std::collections::HashMap;
use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use directories::ProjectDirs;
use egui::{ColorImage, Context, ImageData, TextureHandle, TextureOptions, Vec2};
use tokio::runtime::Runtime;
use tracing::warn;

pub const CELL_THUMB: f32 = 36.0;
pub const PREVIEW_MAX_WIDTH: f32 = 560.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 420.0;

/// Texture cache for record preview images, keyed by the resolved image
/// URL. Fetches go through the shared runtime; decoded bytes are mirrored
/// to disk so a restart does not refetch the whole grid.
pub struct ThumbnailCache {
    entries: HashMap<String, ThumbnailState>,
    client: reqwest::Client,
    tx: Sender<ThumbnailMessage>,
    rx: Receiver<ThumbnailMessage>,
    disk_dir: PathBuf,
}

enum ThumbnailState {
    Loading,
    Ready { texture: TextureHandle, size: Vec2 },
    Failed,
}

pub struct ThumbnailRef {
    pub texture: TextureHandle,
    pub size: Vec2,
}

struct ThumbnailMessage {
    url: String,
    payload: Result<ThumbnailPayload, String>,
}

struct ThumbnailPayload {
    image: ColorImage,
    bytes: Vec<u8>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let disk_dir = ProjectDirs::from("com", "yourname", "VideoHub")
            .map(|proj| proj.config_dir().join("thumbnails"))
            .unwrap_or_else(|| PathBuf::from("thumbnails"));
        if let Err(err) = fs::create_dir_all(&disk_dir) {
            warn!("failed to create thumbnail cache dir: {err}");
        }
        Self {
            entries: HashMap::new(),
            client: reqwest::Client::new(),
            tx,
            rx,
            disk_dir,
        }
    }

    /// Ensures a fetch is underway (or already done) for `url`.
    pub fn request(&mut self, url: &str, ctx: &Context, runtime: &Runtime) {
        if url.is_empty() || self.entries.contains_key(url) {
            return;
        }

        if let Some(cached) = load_from_disk(&self.disk_dir, url) {
            let [w, h] = cached.size;
            let size = Vec2::new(w as f32, h as f32);
            let texture = ctx.load_texture(
                format!("thumb://{url}"),
                ImageData::from(cached),
                TextureOptions::LINEAR,
            );
            self.entries
                .insert(url.to_owned(), ThumbnailState::Ready { texture, size });
            return;
        }

        self.entries.insert(url.to_owned(), ThumbnailState::Loading);
        ctx.request_repaint();

        let tx = self.tx.clone();
        let client = self.client.clone();
        let url_owned = url.to_owned();
        runtime.spawn(async move {
            let payload = fetch_image(client, &url_owned).await;
            let _ = tx.send(ThumbnailMessage {
                url: url_owned,
                payload,
            });
        });
    }

    /// Drains finished fetches; called once per frame.
    pub fn update(&mut self, ctx: &Context) {
        while let Ok(message) = self.rx.try_recv() {
            let state = match message.payload {
                Ok(payload) => {
                    let [w, h] = payload.image.size;
                    let size = Vec2::new(w as f32, h as f32);
                    let texture = ctx.load_texture(
                        format!("thumb://{}", message.url),
                        ImageData::from(payload.image),
                        TextureOptions::LINEAR,
                    );
                    if let Err(err) = persist_to_disk(&self.disk_dir, &message.url, &payload.bytes)
                    {
                        warn!("failed to persist thumbnail: {err}");
                    }
                    ThumbnailState::Ready { texture, size }
                }
                Err(err) => {
                    warn!(url = %message.url, "thumbnail fetch failed: {err}");
                    ThumbnailState::Failed
                }
            };
            self.entries.insert(message.url, state);
            ctx.request_repaint();
        }
    }

    /// A staged or persisted upload replaced the URL for a row; drop any
    /// failed entry so the new URL gets a fresh attempt.
    pub fn forget(&mut self, url: &str) {
        self.entries.remove(url);
    }

    pub fn texture(&self, url: &str) -> Option<ThumbnailRef> {
        match self.entries.get(url)? {
            ThumbnailState::Ready { texture, size } => Some(ThumbnailRef {
                texture: texture.clone(),
                size: *size,
            }),
            _ => None,
        }
    }

    pub fn is_failed(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(ThumbnailState::Failed))
    }
}

/// Scales `size` down to fit the box, never up.
pub fn fit_size(size: Vec2, max_width: f32, max_height: f32) -> Vec2 {
    if size.x <= max_width && size.y <= max_height {
        return size;
    }
    let scale = (max_width / size.x).min(max_height / size.y);
    Vec2::new(size.x * scale, size.y * scale)
}

async fn fetch_image(client: reqwest::Client, url: &str) -> Result<ThumbnailPayload, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let bytes = response.bytes().await.map_err(|err| err.to_string())?;
    let buffer = bytes.to_vec();
    let image = decode_image(&buffer)?;
    Ok(ThumbnailPayload {
        image,
        bytes: buffer,
    })
}

fn decode_image(bytes: &[u8]) -> Result<ColorImage, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let image = image.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = image.into_vec();
    Ok(ColorImage::from_rgba_unmultiplied(size, &pixels))
}

fn cache_paths(base: &Path, url: &str) -> (PathBuf, PathBuf) {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    let key = format!("{:016x}", hasher.finish());
    (base.join(format!("{key}.bin")), base.join(format!("{key}.url")))
}

fn load_from_disk(base: &Path, url: &str) -> Option<ColorImage> {
    let (image_path, url_path) = cache_paths(base, url);
    let stored_url = fs::read_to_string(url_path).ok()?;
    if stored_url.trim() != url {
        return None;
    }
    let bytes = fs::read(image_path).ok()?;
    decode_image(&bytes).ok()
}

fn persist_to_disk(base: &Path, url: &str, bytes: &[u8]) -> std::io::Result<()> {
    fs::create_dir_all(base)?;
    let (image_path, url_path) = cache_paths(base, url);
    fs::write(&image_path, bytes)?;
    fs::write(&url_path, url)?;
    Ok(())
}
