use crate::sequence::InferOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Still-image extensions a sample file may have (case-insensitive)
    #[serde(default = "default_image_formats")]
    pub image_formats: Vec<String>,

    /// Movie extensions dropped from the end of a user-supplied output name
    #[serde(default = "default_video_formats")]
    pub video_formats: Vec<String>,

    /// Characters stripped around the counter when deriving an output name
    #[serde(default = "default_special_chars")]
    pub special_chars: Vec<char>,

    /// Reject names with more than one changing number
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Compare against every sibling instead of a sample
    #[serde(default)]
    pub full_scan: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_formats: default_image_formats(),
            video_formats: default_video_formats(),
            special_chars: default_special_chars(),
            strict: true,
            full_scan: false,
        }
    }
}

fn default_image_formats() -> Vec<String> {
    ["BMP", "GIF", "JPG", "JPEG", "PNG", "TIF", "TIFF", "TGA"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_video_formats() -> Vec<String> {
    ["AVI", "MKV", "MOV", "MP4", "MPG", "MPEG", "WEBM", "WMV"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_special_chars() -> Vec<char> {
    vec!['.', ',', '/', '\\', '+', '-', '_', '|', '>', '<', '*', '%']
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from .sequin/config.toml in the current directory if it exists
    pub fn load() -> Result<Self> {
        match std::env::current_dir() {
            Ok(cwd) => Self::load_from_dir(&cwd),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load config from `<dir>/.sequin/config.toml`, defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".sequin").join("config.toml");
        if config_path.exists() {
            return Self::load_from_path(&config_path);
        }
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Uppercased image extensions accepted for a sample file
    pub fn allowed_extensions(&self) -> Vec<String> {
        normalize(&self.image_formats)
    }

    /// Every supported media extension, images then videos
    pub fn media_extensions(&self) -> Vec<String> {
        let mut all = normalize(&self.image_formats);
        all.extend(normalize(&self.video_formats));
        all
    }

    pub fn infer_options(&self) -> InferOptions {
        InferOptions {
            strict: self.strict,
            full_scan: self.full_scan,
        }
    }
}

fn normalize(formats: &[String]) -> Vec<String> {
    formats
        .iter()
        .map(|f| f.trim_start_matches('.').to_uppercase())
        .collect()
}
