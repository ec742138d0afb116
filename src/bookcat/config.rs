use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RECORDS_DIR: &str = "records";
const DEFAULT_OUTPUT_DIR: &str = "pdf";

/// Catalog layout, stored in `<root>/config.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Where record files live, relative to the catalog root unless absolute
    #[serde(default = "default_records_dir")]
    pub records_dir: PathBuf,

    /// Where exported PDFs are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_records_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RECORDS_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            records_dir: default_records_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| CatalogError::persistence(&config_path, e))?;
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(config)
    }

    pub fn records_path(&self, root: &Path) -> PathBuf {
        root.join(&self.records_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.records_dir, PathBuf::from("records"));
        assert_eq!(config.output_dir, PathBuf::from("pdf"));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = CatalogConfig::load(dir.path()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "records_dir": "books", "output_dir": "out/pdf" }"#,
        )
        .unwrap();

        let loaded = CatalogConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.records_path(dir.path()), dir.path().join("books"));
        assert_eq!(loaded.output_dir, PathBuf::from("out/pdf"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"output_dir":"prints"}"#).unwrap();

        let config = CatalogConfig::load(dir.path()).unwrap();
        assert_eq!(config.records_dir, PathBuf::from("records"));
        assert_eq!(config.output_path(dir.path()), dir.path().join("prints"));
    }

    #[test]
    fn test_absolute_paths_win_over_root() {
        let config = CatalogConfig {
            records_dir: PathBuf::from("/var/books"),
            output_dir: PathBuf::from("pdf"),
        };
        assert_eq!(
            config.records_path(Path::new("/home/me")),
            PathBuf::from("/var/books")
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{").unwrap();
        assert!(matches!(
            CatalogConfig::load(dir.path()),
            Err(CatalogError::Serialization(_))
        ));
    }
}
