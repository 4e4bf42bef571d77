//! Persisted best score
//!
//! A single scalar in LocalStorage, read once at startup and written
//! whenever the live score beats it. Stored as a plain decimal string;
//! anything unparseable reads as zero.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "komari_best_score";

/// Parse a stored value, treating malformed data as no record.
pub fn parse(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Load the best score from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            return parse(&raw);
        }
    }
    0
}

/// Save the best score to LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("Best score saved: {}", score);
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
