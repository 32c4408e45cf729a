//! JSON-file storage
//!
//! Two documents live in the data directory:
//! - `sync.json`: settings and the API key (kept private to the owner on Unix)
//! - `local.json`: enhancement history
//!
//! Every write goes to a temporary file that is renamed over the target.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use craft_core::{EnhancementResult, Error, Result, Storage, UserSettings};

use crate::prepend_bounded;

const SYNC_FILE: &str = "sync.json";
const LOCAL_FILE: &str = "local.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SyncDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<UserSettings>,
    #[serde(rename = "groqApiKey", default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalDocument {
    #[serde(default)]
    history: Vec<EnhancementResult>,
}

/// Storage backed by JSON files in a directory
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open (and create if needed) the data directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        debug!(dir = %dir.display(), "Opened file storage");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sync_path(&self) -> PathBuf {
        self.dir.join(SYNC_FILE)
    }

    fn local_path(&self) -> PathBuf {
        self.dir.join(LOCAL_FILE)
    }

    async fn read_sync(&self) -> Result<SyncDocument> {
        read_document(&self.sync_path()).await
    }

    async fn write_sync(&self, document: &SyncDocument) -> Result<()> {
        write_document(&self.sync_path(), document, true).await
    }

    async fn read_local(&self) -> Result<LocalDocument> {
        read_document(&self.local_path()).await
    }
}

/// Read a JSON document, treating a missing file as empty
async fn read_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(Error::Io(e)),
    };

    // The message deliberately leaves out the file contents: they may hold the key
    serde_json::from_str(&content).map_err(|e| {
        Error::Storage(format!(
            "{} is not valid storage JSON (line {}, column {})",
            path.display(),
            e.line(),
            e.column()
        ))
    })
}

async fn write_document<T: Serialize>(path: &Path, document: &T, private: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp_path = path.with_extension("json.tmp");

    // The mode only applies on create, so a leftover temp file must go first
    match fs::remove_file(&tmp_path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    if private {
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = private;

    let mut file = options.open(&tmp_path).await?;
    file.write_all(json.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[async_trait]
impl Storage for FileStorage {
    async fn settings(&self) -> Result<UserSettings> {
        let _guard = self.lock.lock().await;
        Ok(self.read_sync().await?.settings.unwrap_or_default())
    }

    async fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_sync().await?;
        document.settings = Some(settings.clone());
        self.write_sync(&document).await
    }

    async fn history(&self) -> Result<Vec<EnhancementResult>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_local().await?.history)
    }

    async fn push_history(&self, entry: EnhancementResult, max_items: usize) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_local().await?;
        prepend_bounded(&mut document.history, entry, max_items);
        write_document(&self.local_path(), &document, false).await
    }

    async fn api_key(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_sync().await?.api_key)
    }

    async fn save_api_key(&self, api_key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_sync().await?;
        document.api_key = Some(api_key.to_string());
        self.write_sync(&document).await
    }

    async fn remove_api_key(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_sync().await?;
        document.api_key = None;
        self.write_sync(&document).await
    }
}
