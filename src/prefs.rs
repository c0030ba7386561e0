use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Client-side preferences. The backend is the durable store for everything
/// else; only the way to reach it lives on disk here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Prefs {
    pub server_url: String,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
        }
    }
}

pub fn load_or_default() -> Prefs {
    let path = prefs_path();
    let mut prefs = if let Ok(bytes) = fs::read(&path) {
        serde_json::from_slice::<Prefs>(&bytes).unwrap_or_default()
    } else {
        Prefs::default()
    };
    if prefs.server_url.trim().is_empty() {
        prefs.server_url = DEFAULT_SERVER_URL.to_owned();
    }
    prefs
}

pub fn save(p: &Prefs) -> std::io::Result<()> {
    let path = prefs_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_vec_pretty(p)?)
}

fn prefs_path() -> PathBuf {
    let proj = ProjectDirs::from("com", "yourname", "VideoHub").expect("no project dirs");
    proj.config_dir().join("prefs.json")
}
