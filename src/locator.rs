//! Manifest discovery.
//!
//! A project may carry several manifests at once (a lock file next to its
//! descriptor, or files for two ecosystems). The first match in
//! [`ManifestFile::ALL`] order always wins.

use crate::model::{Manifest, ManifestFile};
use std::path::Path;

/// Returns the highest-priority known manifest directly inside `dir`.
///
/// Returns `None` if none of the known manifest files exist.
pub fn locate_manifest(dir: &Path) -> Option<Manifest> {
    locate_in(dir, &ManifestFile::ALL)
}

/// Returns the first of `candidates` present as a file directly inside `dir`.
///
/// Only existence is checked; file contents are never read. The returned
/// path is absolute when the current directory can be resolved.
pub fn locate_in(dir: &Path, candidates: &[ManifestFile]) -> Option<Manifest> {
    candidates.iter().find_map(|kind| {
        let path = dir.join(kind.file_name());
        if !path.is_file() {
            return None;
        }
        let path = std::path::absolute(&path).unwrap_or(path);
        Some(Manifest { kind: *kind, path })
    })
}
