//! JSON document storage
//!
//! All notes live in one pretty-printed JSON array on disk

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;

use crate::notes::Note;

use super::Error;
use super::Result;
use super::Storage;

/// Storage backed by a single JSON document
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Location of the document
    path: Arc<PathBuf>,
}

impl JsonFile {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document when there is none yet
    pub async fn initialize(&self) -> Result<()> {
        if fs::try_exists(self.path()).await.map_err(Error::Read)? {
            return Ok(());
        }

        if let Some(parent) = self.path().parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(Error::Write)?;
        }

        tracing::info!("Creating empty notes document");

        self.save(&[]).await
    }

    /// Sibling file the document is written to before it is moved into place
    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self
            .path()
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        file_name.push(".tmp");

        self.path().with_file_name(file_name)
    }
}

impl Storage for JsonFile {
    async fn load(&self) -> Result<Vec<Note>> {
        let contents = match fs::read(self.path()).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Read(err)),
        };

        serde_json::from_slice(&contents).map_err(Error::Corrupt)
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        let contents = serde_json::to_vec_pretty(notes).map_err(Error::Serialize)?;

        let temporary_path = self.temporary_path();

        fs::write(&temporary_path, contents)
            .await
            .map_err(Error::Write)?;

        fs::rename(&temporary_path, self.path())
            .await
            .map_err(Error::Write)
    }
}
