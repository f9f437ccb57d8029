//! File handles the index reads export payloads from

use async_trait::async_trait;
use std::path::PathBuf;

/// A file that can be read as a whole
///
/// `name` doubles as the display name and the provenance key of every
/// record produced from the file.
#[async_trait]
pub trait SourceFile: Send + Sync {
    fn name(&self) -> &str;

    async fn read_text(&self) -> std::io::Result<String>;
}

/// A file on disk
#[derive(Debug, Clone)]
pub struct FsSourceFile {
    path: PathBuf,
    name: String,
}

impl FsSourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, name }
    }
}

#[async_trait]
impl SourceFile for FsSourceFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// A file held in memory
#[derive(Debug, Clone)]
pub struct MemorySourceFile {
    name: String,
    text: String,
}

impl MemorySourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl SourceFile for MemorySourceFile {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_text(&self) -> std::io::Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_fs_source_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chat.json");
        fs::write(&path, r#"{"chat_history":[]}"#).unwrap();

        let file = FsSourceFile::new(&path);
        assert_eq!(file.name(), "chat.json");
        assert_eq!(file.read_text().await.unwrap(), r#"{"chat_history":[]}"#);
    }

    #[tokio::test]
    async fn test_fs_source_missing_file_errors() {
        let file = FsSourceFile::new("/nonexistent/chat.json");
        assert!(file.read_text().await.is_err());
    }

    #[tokio::test]
    async fn test_memory_source() {
        let file = MemorySourceFile::new("a.json", "{}");
        assert_eq!(file.name(), "a.json");
        assert_eq!(file.read_text().await.unwrap(), "{}");
    }
}
