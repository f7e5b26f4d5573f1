use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
const SETTINGS_FILE: &str = "cart.toml";

/// Runtime settings for the cart system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CartSettings {
    /// Storefront API root. `None` runs against the bundled in-memory catalog.
    pub api_base_url: Option<String>,
    pub storage_path: PathBuf,
    pub storage_key: String,
    pub channel_capacity: usize,
    pub request_timeout_ms: u64,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            storage_path: PathBuf::from("./data/cart.json"),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            channel_capacity: 32,
            request_timeout_ms: 5000,
        }
    }
}

impl CartSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Defaults, then `cart.toml` when present, then `CART__*` environment variables.
pub fn load_settings() -> anyhow::Result<CartSettings> {
    let settings = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => parse_settings(&raw).with_context(|| format!("invalid {SETTINGS_FILE}"))?,
        Err(_) => CartSettings::default(),
    };
    apply_env_overrides(settings, |name: &str| std::env::var(name).ok())
}

fn parse_settings(raw: &str) -> anyhow::Result<CartSettings> {
    Ok(toml::from_str(raw)?)
}

fn apply_env_overrides(
    mut settings: CartSettings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<CartSettings> {
    if let Some(v) = var("CART__API_BASE_URL") {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = var("CART__STORAGE_PATH") {
        settings.storage_path = PathBuf::from(v);
    }
    if let Some(v) = var("CART__STORAGE_KEY") {
        settings.storage_key = v;
    }
    if let Some(v) = var("CART__CHANNEL_CAPACITY") {
        settings.channel_capacity = v
            .parse::<usize>()
            .with_context(|| format!("CART__CHANNEL_CAPACITY is not a number: {v}"))?;
    }
    if let Some(v) = var("CART__REQUEST_TIMEOUT_MS") {
        settings.request_timeout_ms = v
            .parse::<u64>()
            .with_context(|| format!("CART__REQUEST_TIMEOUT_MS is not a number: {v}"))?;
    }

    if settings.api_base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
        settings.api_base_url = None;
    }
    anyhow::ensure!(settings.channel_capacity > 0, "channel_capacity must be positive");
    Ok(settings)
}
