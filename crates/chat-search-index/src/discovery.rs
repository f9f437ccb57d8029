//! File discovery for chat export JSON files

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::source::FsSourceFile;

/// Find all `.json` files under `dir`, sorted by path
pub fn find_export_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.to_ascii_lowercase().ends_with(".json") {
                    files.push(path.to_path_buf());
                }
            }
        }
    }

    files.sort();
    files
}

/// Discover export files and wrap them as source files
pub fn export_sources(dir: &Path) -> Vec<FsSourceFile> {
    find_export_files(dir)
        .into_iter()
        .map(FsSourceFile::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceFile;
    use std::fs;

    #[test]
    fn test_find_export_files_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_export_files(tmp.path()).is_empty());
    }

    #[test]
    fn test_find_export_files_filters_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("nested");
        fs::create_dir_all(&nested).unwrap();

        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(nested.join("a.JSON"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

        let files = find_export_files(tmp.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].to_string_lossy().ends_with("b.json"));
        assert!(files[1].to_string_lossy().ends_with("a.JSON"));
    }

    #[test]
    fn test_find_export_files_nonexistent_dir() {
        assert!(find_export_files(Path::new("/nonexistent/path")).is_empty());
    }

    #[test]
    fn test_export_sources_use_file_names() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("chat.json"), "{}").unwrap();

        let sources = export_sources(tmp.path());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name(), "chat.json");
    }
}
