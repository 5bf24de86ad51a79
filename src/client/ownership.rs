/**
 * Ownership Tracking
 *
 * Remembers which share links were created from this machine, persisted as a
 * JSON slug list in the user's config directory. The creator of a link can
 * always edit it, private or not, without entering a password.
 *
 * The file is advisory, not a credential: losing it downgrades the user to
 * ordinary viewer/editor access, it never locks anyone out of public links.
 */

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Set of slugs created from this machine
#[derive(Debug, Clone, Default)]
pub struct OwnershipSet {
    slugs: BTreeSet<String>,
    path: Option<PathBuf>,
}

impl OwnershipSet {
    /// Load the ownership set from the default config location
    ///
    /// Resolves to `<config_dir>/jsonshare/owned_links.json`. A missing
    /// config directory yields an in-memory-only set.
    pub fn load_default() -> Self {
        match dirs::config_dir() {
            Some(base) => Self::load_from(base.join("jsonshare").join("owned_links.json")),
            None => {
                tracing::warn!("[Ownership] No config directory, ownership will not persist");
                Self::default()
            }
        }
    }

    /// Load from a specific file path
    ///
    /// A missing or unreadable file starts an empty set; corrupt contents are
    /// discarded rather than failing the session.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slugs = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeSet<String>>(&raw) {
                Ok(slugs) => slugs,
                Err(e) => {
                    tracing::warn!("[Ownership] Discarding corrupt ownership file: {}", e);
                    BTreeSet::new()
                }
            },
            Err(_) => BTreeSet::new(),
        };

        Self {
            slugs,
            path: Some(path),
        }
    }

    /// Record a slug as owned and persist the set
    pub fn remember(&mut self, slug: &str) {
        if !self.slugs.insert(slug.to_string()) {
            return;
        }
        self.persist();
    }

    /// Whether this machine created the given link
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    /// Number of remembered links
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Whether no links are remembered
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = self.write_to(path) {
            tracing::warn!("[Ownership] Failed to persist ownership set: {}", e);
        }
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&self.slugs)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remember_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owned_links.json");

        let mut set = OwnershipSet::load_from(&path);
        assert!(set.is_empty());
        set.remember("abc123");
        set.remember("def456");
        set.remember("abc123"); // idempotent

        let reloaded = OwnershipSet::load_from(&path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("abc123"));
        assert!(reloaded.contains("def456"));
        assert!(!reloaded.contains("ghi789"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("owned_links.json");
        std::fs::write(&path, "not json at all").unwrap();

        let set = OwnershipSet::load_from(&path);
        assert!(set.is_empty());
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let set = OwnershipSet::load_from(dir.path().join("nope.json"));
        assert!(set.is_empty());
    }
}
