//! Skill directory discovery for CLI path arguments.

use skillcheck_core::DiscoveryConfig;
use skillcheck_skills::SKILL_FILE_NAME;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Resolve CLI paths into skill directories.
///
/// A path that directly holds `SKILL.md` is used as-is. Anything else is
/// walked for nested skills; when nothing is found the path is kept so the
/// checker reports it as missing.
pub fn discover<P: AsRef<Path>>(paths: &[P], config: &DiscoveryConfig) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.join(SKILL_FILE_NAME).is_file() {
            dirs.push(path.to_path_buf());
            continue;
        }

        let found = walk(path, config);
        if found.is_empty() {
            debug!("No skills below {}", path.display());
            dirs.push(path.to_path_buf());
        } else {
            debug!("Found {} skills below {}", found.len(), path.display());
            dirs.extend(found);
        }
    }

    dirs
}

fn walk(root: &Path, config: &DiscoveryConfig) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(config.max_depth)
        .follow_links(config.follow_links)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() && entry.path().join(SKILL_FILE_NAME).is_file())
        .map(|entry| entry.into_path())
        .collect();

    found.sort();
    found
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
