//! Configuration loading and persistence.
//!
//! Handles the TOML config file (~/.config/courtline/config.toml): global
//! court selections at the top level, then `[player1]`, `[player2]` and
//! `[display]` tables.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub use courtline::CourtlineConfig;

// ---------------------------------------------------------------------------
// Persistence I/O
// ---------------------------------------------------------------------------

/// Returns `~/.config/courtline/config.toml`.
pub fn default_config_path() -> PathBuf {
    let dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("courtline");
    dir.join("config.toml")
}

/// Load persisted config from disk. If the file does not exist, creates it
/// with all-defaults and returns that. A file that fails to parse is left
/// alone and defaults are used for this run.
pub fn load(path: &Path) -> CourtlineConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<CourtlineConfig>(&contents) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("failed to parse {}: {e}", path.display());
                CourtlineConfig::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let defaults = CourtlineConfig::default();
            tracing::info!("no config file found, creating {}", path.display());
            save_to(path, &defaults);
            defaults
        }
        Err(e) => {
            tracing::warn!("failed to read {}: {e}", path.display());
            CourtlineConfig::default()
        }
    }
}

/// Write config to a specific path. Creates parent dirs if needed. Never panics.
pub fn save_to(path: &Path, config: &CourtlineConfig) {
    if let Some(dir) = path.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        tracing::warn!("failed to create config dir {}: {e}", dir.display());
        return;
    }
    match toml::to_string_pretty(config) {
        Ok(contents) => {
            if let Err(e) = std::fs::write(path, contents) {
                tracing::warn!("failed to write {}: {e}", path.display());
            }
        }
        Err(e) => {
            tracing::warn!("failed to serialize config: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Cached config
// ---------------------------------------------------------------------------

/// Cached configuration backed by a TOML file.
///
/// The GUI's save hook calls `replace` on every settings change; reads are
/// a clone under the read lock.
pub struct SystemConfig {
    path: PathBuf,
    inner: RwLock<CourtlineConfig>,
}

impl SystemConfig {
    /// Load config from disk (or create defaults) and cache it.
    pub fn new(path: PathBuf) -> Self {
        let config = load(&path);
        Self {
            path,
            inner: RwLock::new(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone the current cached config.
    pub fn snapshot(&self) -> CourtlineConfig {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Replace the cached config and persist it. Skips the write when
    /// nothing changed.
    pub fn replace(&self, new: CourtlineConfig) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if *guard == new {
            return;
        }
        *guard = new;
        save_to(&self.path, &guard);
    }
}
