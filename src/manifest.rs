//! Package manifest discovery and version extraction
//!
//! Finds the `package.json` that carries the version to transition and reads
//! its `version` field.

use std::collections::{HashSet, VecDeque};
use std::fs::{self, DirEntry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde_json::Value;

use crate::config::ManifestConfig;
use crate::error::{NextVersionError, Result};

/// Manifest file name searched for during discovery
pub const MANIFEST_FILE_NAME: &str = "package.json";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled exclude globs, matched against paths relative to the search root
struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    fn new(globs: &[String]) -> Result<Self> {
        let patterns = globs
            .iter()
            .map(|g| {
                Pattern::new(g).map_err(|e| {
                    NextVersionError::config(format!("Invalid exclude pattern '{}': {}", g, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ExcludeSet { patterns })
    }

    fn is_file_excluded(&self, relative: &Path) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
    }

    /// A directory is pruned when everything beneath it would be excluded
    fn is_dir_excluded(&self, relative: &Path) -> bool {
        self.is_file_excluded(&relative.join("-"))
    }
}

/// Locates the shallowest `package.json` under `root`.
///
/// Directories are visited breadth-first in sorted order, so ties at the same
/// depth resolve to the lexicographically smallest path. Symlinked directories
/// are only entered when `config.follow_symlinks` is set. Subdirectories that
/// cannot be read for lack of permission are skipped.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the manifest
/// * `Err` - If `root` cannot be read, an exclude glob is invalid, or no manifest exists
pub fn find_package_json(root: &Path, config: &ManifestConfig) -> Result<PathBuf> {
    let excludes = ExcludeSet::new(&config.exclude)?;
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<(PathBuf, usize)> = VecDeque::new();
    let mut best: Option<(usize, PathBuf)> = None;

    visited.insert(fs::canonicalize(root)?);
    queue.push_back((PathBuf::new(), 0));

    while let Some((relative, depth)) = queue.pop_front() {
        if let Some((best_depth, _)) = &best {
            if depth >= *best_depth {
                break;
            }
        }

        let mut entries = match read_entries(&root.join(&relative)) {
            Ok(entries) => entries,
            // unreadable subdirectories are skipped; the root itself must be readable
            Err(e) if depth > 0 && e.kind() == ErrorKind::PermissionDenied => continue,
            Err(e) => return Err(e.into()),
        };
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let child = relative.join(entry.file_name());
            let absolute = root.join(&child);
            let file_type = entry.file_type()?;

            let (is_dir, is_file) = if file_type.is_symlink() {
                match fs::metadata(&absolute) {
                    Ok(meta) => (meta.is_dir() && config.follow_symlinks, meta.is_file()),
                    // dangling link
                    Err(_) => (false, false),
                }
            } else {
                (file_type.is_dir(), file_type.is_file())
            };

            if is_file && entry.file_name() == MANIFEST_FILE_NAME {
                if excludes.is_file_excluded(&child) {
                    continue;
                }
                let candidate = (depth + 1, child);
                best = match best {
                    Some(current) if current <= candidate => Some(current),
                    _ => Some(candidate),
                };
            } else if is_dir && !excludes.is_dir_excluded(&child) {
                if visited.insert(fs::canonicalize(&absolute)?) {
                    queue.push_back((child, depth + 1));
                }
            }
        }
    }

    best.map(|(_, relative)| root.join(relative)).ok_or_else(|| {
        NextVersionError::manifest(format!(
            "No {} found under {}",
            MANIFEST_FILE_NAME,
            root.display()
        ))
    })
}

fn read_entries(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    fs::read_dir(dir)?.collect()
}

/// Reads the `version` field of a package manifest.
pub fn read_version(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| {
        NextVersionError::manifest(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let document: Value = serde_json::from_str(&content)?;

    match document.get("version") {
        Some(Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(NextVersionError::manifest(format!(
            "Field 'version' in {} is not a string: {}",
            path.display(),
            other
        ))),
        None => Err(NextVersionError::manifest(format!(
            "No 'version' field in {}",
            path.display()
        ))),
    }
}

/// Resolves the manifest to read.
///
/// An explicit path is joined onto the workspace root; otherwise discovery runs
/// from the workspace root.
pub fn resolve_manifest(
    workspace: &Path,
    explicit_path: Option<&str>,
    config: &ManifestConfig,
) -> Result<PathBuf> {
    match explicit_path {
        Some(path) if !path.is_empty() => {
            let manifest = workspace.join(path);
            if !manifest.is_file() {
                return Err(NextVersionError::manifest(format!(
                    "Manifest not found: {}",
                    manifest.display()
                )));
            }
            Ok(manifest)
        }
        _ => find_package_json(workspace, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, relative: &str, version: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!(r#"{{"name": "pkg", "version": "{}"}}"#, version)).unwrap();
        path
    }

    #[test]
    fn test_find_root_manifest() {
        let dir = TempDir::new().unwrap();
        let expected = write_manifest(dir.path(), "package.json", "1.0.0");
        write_manifest(dir.path(), "packages/a/package.json", "2.0.0");

        let found = find_package_json(dir.path(), &ManifestConfig::default()).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_shallowest_then_sorted() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "b/deep/package.json", "1.0.0");
        write_manifest(dir.path(), "b/package.json", "1.0.0");
        let expected = write_manifest(dir.path(), "a/package.json", "1.0.0");

        let found = find_package_json(dir.path(), &ManifestConfig::default()).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_node_modules_excluded() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "node_modules/dep/package.json", "9.9.9");
        let expected = write_manifest(dir.path(), "app/src/package.json", "1.0.0");

        let found = find_package_json(dir.path(), &ManifestConfig::default()).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_custom_exclude_file() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "legacy/package.json", "0.1.0");
        let expected = write_manifest(dir.path(), "x/y/package.json", "1.0.0");

        let config = ManifestConfig {
            exclude: vec!["legacy/package.json".to_string()],
            ..ManifestConfig::default()
        };
        let found = find_package_json(dir.path(), &config).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let dir = TempDir::new().unwrap();
        let config = ManifestConfig {
            exclude: vec!["[".to_string()],
            ..ManifestConfig::default()
        };
        assert!(find_package_json(dir.path(), &config).is_err());
    }

    #[test]
    fn test_no_manifest() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        let err = find_package_json(dir.path(), &ManifestConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No package.json found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_respects_follow_flag() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        write_manifest(outside.path(), "package.json", "3.0.0");
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        let found = find_package_json(dir.path(), &ManifestConfig::default()).unwrap();
        assert_eq!(found, dir.path().join("linked/package.json"));

        let config = ManifestConfig {
            follow_symlinks: false,
            ..ManifestConfig::default()
        };
        assert!(find_package_json(dir.path(), &config).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("a_locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        let expected = write_manifest(dir.path(), "b/package.json", "1.0.0");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = find_package_json(dir.path(), &ManifestConfig::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.unwrap(), expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("a/loop")).unwrap();

        assert!(find_package_json(dir.path(), &ManifestConfig::default()).is_err());
    }

    #[test]
    fn test_read_version() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(dir.path(), "package.json", "1.2.3-rc.4");
        assert_eq!(read_version(&path).unwrap(), "1.2.3-rc.4");
    }

    #[test]
    fn test_read_version_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "pkg"}"#).unwrap();

        let err = read_version(&path).unwrap_err();
        assert!(err.to_string().contains("No 'version' field"));
    }

    #[test]
    fn test_read_version_not_a_string() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"version": 3}"#).unwrap();

        assert!(read_version(&path).is_err());
    }

    #[test]
    fn test_read_version_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_version(&path).unwrap_err();
        assert!(matches!(err, NextVersionError::Json(_)));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = TempDir::new().unwrap();
        write_manifest(dir.path(), "package.json", "1.0.0");
        let expected = write_manifest(dir.path(), "sub/package.json", "2.0.0");

        let found =
            resolve_manifest(dir.path(), Some("sub/package.json"), &ManifestConfig::default())
                .unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_resolve_explicit_path_missing() {
        let dir = TempDir::new().unwrap();
        let result = resolve_manifest(dir.path(), Some("nope.json"), &ManifestConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_empty_path_falls_back_to_discovery() {
        let dir = TempDir::new().unwrap();
        let expected = write_manifest(dir.path(), "package.json", "1.0.0");
        let found = resolve_manifest(dir.path(), Some(""), &ManifestConfig::default()).unwrap();
        assert_eq!(found, expected);
    }
}
