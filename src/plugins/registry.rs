//! Process-wide overlay registry
//!
//! Embedding code that needs to find an overlay by key registers it here explicitly.
//! Entries live until they are unregistered; detaching an overlay does not remove it.

use crate::{plugins::heatmap::overlay::HeatmapOverlay, prelude::HashMap, Error, Result};
use once_cell::sync::Lazy;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

pub type SharedOverlay = Arc<Mutex<HeatmapOverlay>>;

static REGISTRY: Lazy<Mutex<HashMap<String, SharedOverlay>>> =
    Lazy::new(|| Mutex::new(HashMap::default()));

static NEXT_ANONYMOUS: AtomicU64 = AtomicU64::new(1);

fn registry() -> MutexGuard<'static, HashMap<String, SharedOverlay>> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers `overlay` under `key`; fails if the key is taken
pub fn register(key: impl Into<String>, overlay: SharedOverlay) -> Result<()> {
    let key = key.into();
    let mut registry = registry();
    if registry.contains_key(&key) {
        return Err(Error::Registry(format!("key `{key}` is already registered")));
    }
    log::debug!("registered heatmap overlay `{}`", key);
    registry.insert(key, overlay);
    Ok(())
}

/// Registers `overlay` under a generated key and returns it
pub fn register_anonymous(overlay: SharedOverlay) -> String {
    let mut registry = registry();
    loop {
        let key = format!("heatmap-{}", NEXT_ANONYMOUS.fetch_add(1, Ordering::Relaxed));
        if !registry.contains_key(&key) {
            log::debug!("registered heatmap overlay `{}`", key);
            registry.insert(key.clone(), overlay);
            return key;
        }
    }
}

pub fn get(key: &str) -> Option<SharedOverlay> {
    registry().get(key).cloned()
}

pub fn unregister(key: &str) -> Option<SharedOverlay> {
    let removed = registry().remove(key);
    if removed.is_some() {
        log::debug!("unregistered heatmap overlay `{}`", key);
    }
    removed
}

/// Keys currently registered, sorted
pub fn keys() -> Vec<String> {
    let mut keys: Vec<String> = registry().keys().cloned().collect();
    keys.sort();
    keys
}
