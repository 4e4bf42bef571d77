//! Swatter preferences
//!
//! Two persisted fields: head shape and color. Stored as JSON in
//! LocalStorage, separately from the best score. Anything malformed falls
//! back to the defaults; startup never fails on bad data.

use serde::{Deserialize, Serialize};

/// Swatter head shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SwatterShape {
    #[default]
    Round,
    Square,
}

impl SwatterShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwatterShape::Round => "round",
            SwatterShape::Square => "square",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "round" => Some(SwatterShape::Round),
            "square" => Some(SwatterShape::Square),
            _ => None,
        }
    }
}

/// User-chosen swatter appearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "type")]
    pub shape: SwatterShape,
    /// Hex-like color string, e.g. "#60a5fa"
    pub color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape: SwatterShape::Round,
            color: "#60a5fa".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "komari_swatter";

    /// Parse a stored blob, discarding anything that does not validate.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str::<Settings>(json)
            .map(Settings::sanitized)
            .unwrap_or_default()
    }

    /// Keep the shape, but reject colors that are not hex-like.
    fn sanitized(mut self) -> Self {
        if !self.color.starts_with('#') {
            self.color = Settings::default().color;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json(&json);
            }
        }

        log::info!("Using default swatter settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Swatter settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
