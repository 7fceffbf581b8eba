use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::contract::{DATABASE_NAME, DATABASE_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PetsConfig {
    pub database: Option<String>,
    pub version: Option<i64>,
}

impl PetsConfig {
    /// Database path: explicit flag, then config, then `.pets/shelter.db` under `base`
    pub fn database_path(&self, flag: Option<&Path>, base: &Path) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(base))
    }

    pub fn schema_version(&self) -> i64 {
        self.version.unwrap_or(DATABASE_VERSION)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("pets.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".pets").join(DATABASE_NAME)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PetsConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PetsConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PetsConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_precedence() {
        let base = Path::new("/srv/shelter");
        let config = PetsConfig {
            database: Some("from-config.db".to_string()),
            version: None,
        };

        assert_eq!(
            config.database_path(Some(Path::new("flag.db")), base),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.database_path(None, base), PathBuf::from("from-config.db"));
        assert_eq!(
            PetsConfig::default().database_path(None, base),
            PathBuf::from("/srv/shelter/.pets/shelter.db")
        );
        assert_eq!(PetsConfig::default().schema_version(), DATABASE_VERSION);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.toml");
        let config = PetsConfig {
            database: Some("data/shelter.db".to_string()),
            version: Some(2),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("data/shelter.db"));
        assert_eq!(loaded.version, Some(2));

        assert!(load_config(Some(&dir.path().join("missing.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_load_config_reports_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path())).unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("shelter.db");
        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
