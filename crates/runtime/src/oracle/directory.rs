//! Oracle reading a local snapshot of the data service.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use gacha_core::{CharacterRecord, RateConfig, RateTable};

use super::{CharacterDict, CommonConfig, GachaOracle, OracleError};

/// Student list as published: either an array or an object keyed by id.
#[derive(Deserialize)]
#[serde(untagged)]
enum StudentsDocument {
    List(Vec<CharacterRecord>),
    Keyed(HashMap<String, CharacterRecord>),
}

/// Oracle backed by a directory snapshot of the data service.
///
/// # Directory Layout
///
/// ```text
/// {root}/
///   ├── common.json      region list with `current_gacha` banners
///   ├── students.json    character records (`Id`, `StarGrade`, `DevName`)
///   ├── gacha.json       rate config (`base` / `up`)
///   └── images/...       assets, addressed by their data-service path
/// ```
///
/// Files are read on every call; the snapshot itself is maintained by
/// whatever syncs it from the remote service.
#[derive(Clone, Debug)]
pub struct DirectoryOracle {
    root: PathBuf,
}

impl DirectoryOracle {
    pub const COMMON_FILE: &'static str = "common.json";
    pub const STUDENTS_FILE: &'static str = "students.json";
    pub const RATES_FILE: &'static str = "gacha.json";

    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    async fn read(&self, relative: &Path) -> Result<Vec<u8>, OracleError> {
        let path = self.root.join(relative);
        tokio::fs::read(&path)
            .await
            .map_err(|source| OracleError::Io { path, source })
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, OracleError> {
        let bytes = self.read(Path::new(file)).await?;
        serde_json::from_slice(&bytes).map_err(|source| OracleError::Malformed {
            document: file.to_string(),
            source,
        })
    }
}

/// Asset paths must stay inside the snapshot root.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[async_trait]
impl GachaOracle for DirectoryOracle {
    async fn common_config(&self) -> Result<CommonConfig, OracleError> {
        self.read_json(Self::COMMON_FILE).await
    }

    async fn characters(&self) -> Result<CharacterDict, OracleError> {
        let document: StudentsDocument = self.read_json(Self::STUDENTS_FILE).await?;
        let records: Vec<CharacterRecord> = match document {
            StudentsDocument::List(records) => records,
            StudentsDocument::Keyed(records) => records.into_values().collect(),
        };

        tracing::debug!("Loaded {} character records", records.len());

        Ok(records
            .into_iter()
            .map(|record| (record.id, record))
            .collect())
    }

    async fn rate_table(&self) -> Result<RateTable, OracleError> {
        let config: RateConfig = self.read_json(Self::RATES_FILE).await?;
        Ok(RateTable::try_from(&config)?)
    }

    async fn fetch_asset(&self, path: &str) -> Result<Vec<u8>, OracleError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if !is_contained(relative) {
            return Err(OracleError::AssetNotFound(path.to_string()));
        }

        match self.read(relative).await {
            Err(OracleError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Err(OracleError::AssetNotFound(path.to_string()))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use gacha_core::{CharacterId, Rarity};
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn snapshot() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "common.json",
            r#"{"regions": [
                {"name": "jp", "current_gacha": [{"characters": [1], "start": 0, "end": 100}]},
                {"name": "global"}
            ]}"#,
        );
        write(
            root,
            "students.json",
            r#"[{"Id": 1, "StarGrade": 3, "DevName": "Aru", "Name": "Aru"},
                {"Id": 2, "StarGrade": 1, "DevName": "Mutsuki"}]"#,
        );
        write(
            root,
            "gacha.json",
            r#"{"base": {"1": {"chance": 0.785, "char": [2]},
                         "2": {"chance": 0.185, "char": []},
                         "3": {"chance": 0.03, "char": [1]}},
                "up": {"3": {"chance": 0.007}}}"#,
        );
        write(root, "images/portrait.webp", "bytes");
        temp_dir
    }

    #[tokio::test]
    async fn reads_snapshot_documents() {
        let dir = snapshot();
        let oracle = DirectoryOracle::new(dir.path());

        let common = oracle.common_config().await.unwrap();
        assert_eq!(common.regions.len(), 2);
        assert_eq!(common.regions[0].current_gacha[0].pickup, vec![CharacterId(1)]);
        assert!(common.regions[1].current_gacha.is_empty());

        let characters = oracle.characters().await.unwrap();
        assert_eq!(characters[&CharacterId(1)].rarity(), Some(Rarity::Three));

        let rates = oracle.rate_table().await.unwrap();
        assert_eq!(rates.pickup(Rarity::Three).unwrap().chance, 0.007);
    }

    #[tokio::test]
    async fn accepts_keyed_student_document() {
        let dir = snapshot();
        write(
            dir.path(),
            "students.json",
            r#"{"7": {"Id": 7, "StarGrade": 2, "DevName": "Serika"}}"#,
        );
        let characters = DirectoryOracle::new(dir.path()).characters().await.unwrap();
        assert_eq!(characters[&CharacterId(7)].dev_name, "Serika");
    }

    #[tokio::test]
    async fn fetches_assets_inside_root_only() {
        let dir = snapshot();
        let oracle = DirectoryOracle::new(dir.path());

        assert_eq!(oracle.fetch_asset("images/portrait.webp").await.unwrap(), b"bytes");
        assert!(matches!(
            oracle.fetch_asset("images/missing.webp").await,
            Err(OracleError::AssetNotFound(_))
        ));
        assert!(matches!(
            oracle.fetch_asset("../secret").await,
            Err(OracleError::AssetNotFound(_))
        ));
    }

    #[tokio::test]
    async fn malformed_document_names_the_file() {
        let dir = snapshot();
        write(dir.path(), "gacha.json", "{");
        let err = DirectoryOracle::new(dir.path()).rate_table().await.unwrap_err();
        assert!(matches!(err, OracleError::Malformed { ref document, .. } if document == "gacha.json"));
    }
}
