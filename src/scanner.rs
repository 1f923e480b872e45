//! build.zig.zon discovery and URL extraction
//!
//! Finds manifest files under a project root and pulls the raw URL string out
//! of every `.url = "..."` line. Quote characters are stripped; the trailing
//! ZON list comma is left attached because the dependency recognizers expect
//! it (see [`crate::source::GithubCommit`]).

use crate::error::ScanError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the Zig dependency manifest
pub const ZON_FILENAME: &str = "build.zig.zon";

// `.url = "git://github.com/acme/widget#abc123",`
static URL_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\.url\s*=\s*(.*)$").unwrap());

/// A raw dependency URL together with the manifest it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedUrl {
    /// Manifest file the URL was extracted from
    pub file: PathBuf,
    /// Raw URL string, quotes stripped, declaration comma kept
    pub url: String,
}

/// Find all build.zig.zon files under `root`
///
/// Non-recursive mode requires `root/build.zig.zon` to exist. Recursive mode
/// walks the whole tree and returns every manifest found, sorted by path for
/// deterministic output.
pub fn find_zon_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    if recursive {
        let mut files = Vec::new();
        walk(root, &mut files)?;
        files.sort();
        Ok(files)
    } else {
        let zon = root.join(ZON_FILENAME);
        if !zon.exists() {
            return Err(ScanError::ZonNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(vec![zon])
    }
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::read_error(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ScanError::read_error(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::read_error(entry.path(), e))?;

        // Symlinks are skipped so a link cycle cannot recurse forever.
        if file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        if file_type.is_dir() {
            walk(&path, files)?;
        } else if path.file_name().is_some_and(|name| name == ZON_FILENAME) {
            files.push(path);
        }
    }

    Ok(())
}

/// Extract raw dependency URLs from manifest content
pub fn extract_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| URL_LINE_RE.captures(line))
        .map(|captures| captures[1].replace('"', ""))
        .collect()
}

/// Scan the project tree and collect every declared dependency URL
pub fn scan(root: &Path, recursive: bool) -> Result<Vec<ScannedUrl>, ScanError> {
    let mut scanned = Vec::new();

    for file in find_zon_files(root, recursive)? {
        let content = fs::read_to_string(&file).map_err(|e| ScanError::read_error(&file, e))?;
        for url in extract_urls(&content) {
            scanned.push(ScannedUrl {
                file: file.clone(),
                url,
            });
        }
    }

    Ok(scanned)
}
