//! Recursive file enumeration, grounded on `refaktor-core::scanner`'s use of
//! `ignore::WalkBuilder`: gitignore-aware, hidden files skipped by default,
//! narrowed to text files and (optionally) an extension allow-list.

use content_inspector::{inspect, ContentType};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds a `GlobSet` matching `*.ext` for each extension in `extensions`.
/// An empty list matches every file.
pub fn build_extension_filter(extensions: &[String]) -> Result<Option<GlobSet>, globset::Error> {
    if extensions.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        builder.add(Glob::new(&format!("*.{ext}"))?);
    }
    Ok(Some(builder.build()?))
}

/// Walks `root` recursively (honoring `.gitignore`), yielding text files
/// that pass `extensions` (if given). Binary files are detected by content,
/// not extension, and always skipped.
pub fn walk_files(root: &Path, recursive: bool, extensions: &Option<GlobSet>) -> Vec<PathBuf> {
    if !recursive {
        return if root.is_file() { vec![root.to_path_buf()] } else { Vec::new() };
    }

    let mut files = Vec::new();
    let mut builder = WalkBuilder::new(root);
    builder.git_ignore(true).git_global(true).git_exclude(true).hidden(true);

    for entry in builder.build() {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(set) = extensions {
            if !set.is_match(path) {
                continue;
            }
        }
        if is_text_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files
}

fn is_text_file(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => {
            let sample_len = bytes.len().min(8192);
            !matches!(inspect(&bytes[..sample_len]), ContentType::BINARY)
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn non_recursive_returns_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        fs::write(&file, "fn main() {}").unwrap();
        let files = walk_files(&file, false, &None);
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn recursive_walk_finds_nested_text_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("sub/b.rs"), "fn helper() {}").unwrap();
        let files = walk_files(dir.path(), true, &None);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn extension_filter_excludes_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("a.txt"), "notes").unwrap();
        let filter = build_extension_filter(&["rs".to_string()]).unwrap();
        let files = walk_files(dir.path(), true, &filter);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.rs"));
    }

    #[test]
    fn binary_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), [0u8, 159, 146, 150]).unwrap();
        let files = walk_files(dir.path(), true, &None);
        assert!(files.is_empty());
    }
}
