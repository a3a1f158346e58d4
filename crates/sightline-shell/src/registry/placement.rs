//! Persisted window placement, keyed by surface name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sightline_common::Placement;
use tracing::{debug, warn};

/// Window placement that survives restarts.
///
/// Backed by a small JSON document (`{"main": {"x": .., "y": .., ..}}`).
/// Every change is written through immediately; write failures are logged
/// and never interrupt the window that moved.
#[derive(Debug, Default)]
pub struct PlacementStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Placement>,
}

impl PlacementStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "placement file is corrupt, ignoring");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read placement file");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), count = entries.len(), "placement store opened");
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<Placement> {
        self.entries.get(name).copied()
    }

    /// Record a placement and write it through.
    pub fn save(&mut self, name: &str, placement: Placement) {
        if self.entries.get(name) == Some(&placement) {
            return;
        }
        self.entries.insert(name.to_string(), placement);
        if let Err(e) = self.flush() {
            warn!(surface = %name, error = %e, "failed to persist placement");
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        // Write to a sibling and rename so a crash never leaves half a file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)
    }
}

/// Decide where a surface opens.
///
/// A saved placement is used only if it still overlaps one of the given
/// monitors; with no monitor information it is trusted as-is.
pub fn restore(saved: Option<Placement>, monitors: &[Placement]) -> Option<Placement> {
    let saved = saved?;
    if monitors.is_empty() || monitors.iter().any(|m| saved.overlaps(m)) {
        Some(saved)
    } else {
        None
    }
}
