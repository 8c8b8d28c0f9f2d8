use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Built once at startup and passed by reference to the clients that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini credential. Missing is not fatal at startup, but every evaluation will fail.
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    /// No timeout beyond the transport default when unset.
    pub gemini_timeout_secs: Option<u64>,
    /// Directory holding the pdfium shared library. Falls back to the system library.
    pub pdfium_library_path: Option<String>,
    pub render_width_px: u32,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            gemini_timeout_secs: None,
            pdfium_library_path: None,
            render_width_px: 1240,
            jpeg_quality: 85,
            max_upload_bytes: 10 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let jpeg_quality: u8 = parse_var("JPEG_QUALITY", optional_env("JPEG_QUALITY"))?
            .unwrap_or(defaults.jpeg_quality);
        if !(1..=100).contains(&jpeg_quality) {
            anyhow::bail!("JPEG_QUALITY must be between 1 and 100, got {jpeg_quality}");
        }

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_api_base),
            gemini_timeout_secs: parse_var(
                "GEMINI_TIMEOUT_SECS",
                optional_env("GEMINI_TIMEOUT_SECS"),
            )?,
            pdfium_library_path: optional_env("PDFIUM_LIBRARY_PATH"),
            render_width_px: parse_var("RENDER_WIDTH_PX", optional_env("RENDER_WIDTH_PX"))?
                .unwrap_or(defaults.render_width_px),
            jpeg_quality,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", optional_env("MAX_UPLOAD_BYTES"))?
                .unwrap_or(defaults.max_upload_bytes),
            port: parse_var("PORT", optional_env("PORT"))?.unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Reads a variable, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|value| {
        value
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'"))
    })
    .transpose()
}
