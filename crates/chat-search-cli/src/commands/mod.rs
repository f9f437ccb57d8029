//! CLI command implementations

pub mod path;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use chat_search_index::{export_sources, IndexStore, NameOverrides};
use std::path::Path;

use crate::cli::Cli;

/// Read a JSON object of conversation id -> display name
pub fn load_name_overrides(path: &Path) -> Result<NameOverrides> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read names file: {}", path.display()))?;
    let overrides = serde_json::from_str(&text)
        .with_context(|| format!("Names file is not a JSON object of strings: {}", path.display()))?;
    Ok(overrides)
}

/// Build the index over every export file in the configured directory
pub async fn load_index(cli: &Cli) -> Result<IndexStore> {
    let overrides = match &cli.names {
        Some(path) => load_name_overrides(path)?,
        None => NameOverrides::new(),
    };

    let files = export_sources(&cli.dir);
    if files.is_empty() {
        tracing::warn!(dir = %cli.dir.display(), "No export files found");
    }

    let mut store = IndexStore::new();
    store.rebuild(&files, None, None, &overrides).await;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_name_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("names.json");
        fs::write(&path, r#"{"conv-1": "Renamed", "conv-2": ""}"#).unwrap();

        let overrides = load_name_overrides(&path).unwrap();
        assert_eq!(overrides.get("conv-1").map(String::as_str), Some("Renamed"));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_load_name_overrides_rejects_bad_shape() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("names.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(load_name_overrides(&path).is_err());
        assert!(load_name_overrides(&tmp.path().join("missing.json")).is_err());
    }
}
