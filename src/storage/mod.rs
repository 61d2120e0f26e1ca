//! All things related to the storage of notes
//!
//! The whole collection is loaded, changed and saved again for every request

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::notes_path;
use crate::notes::Note;

pub use json_file::JsonFile;
#[cfg(test)]
pub use memory::Memory;

mod json_file;
#[cfg(test)]
mod memory;

/// Storage configuration
pub enum Config {
    /// Detect the location of the notes document from the environment
    DetectConfig,

    /// Use a notes document at an existing location
    ExistingFile(PathBuf),
}

/// Setup the storage
///
/// Makes sure the notes document exists
pub async fn setup(config: Config) -> Result<Store<JsonFile>> {
    let path = match config {
        Config::DetectConfig => notes_path(),
        Config::ExistingFile(path) => path,
    };

    tracing::info!("Using notes document: {}", path.display());

    let storage = JsonFile::new(path);
    storage.initialize().await?;

    Ok(Store::new(storage))
}

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// Stored notes could not be read
    #[error("Could not read notes: {0}")]
    Read(#[source] std::io::Error),

    /// Stored notes are not a valid list of notes
    #[error("Stored notes are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// Notes could not be turned into a document
    #[error("Could not serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Notes could not be written
    #[error("Could not write notes: {0}")]
    Write(#[source] std::io::Error),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage of the complete note collection
pub trait Storage: Clone + Send + Sync + 'static {
    /// Load all notes, an empty collection when nothing is stored yet
    fn load(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Replace all stored notes
    fn save(&self, notes: &[Note]) -> impl Future<Output = Result<()>> + Send;
}

/// The note store
///
/// Every interaction with the storage happens while holding a single lock, concurrent
/// requests of this process can not overwrite each others changes. Other processes using
/// the same storage are not guarded against.
#[derive(Clone, Debug)]
pub struct Store<S> {
    storage: S,
    lock: Arc<Mutex<()>>,
}

impl<S> Store<S>
where
    S: Storage,
{
    /// Create a store around a storage
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read all notes
    pub async fn read(&self) -> Result<Vec<Note>> {
        let _guard = self.lock.lock().await;

        self.storage.load().await
    }

    /// Load all notes, change them and save them again
    ///
    /// Nothing is saved when `mutate` fails, its error is returned as is.
    pub async fn update<T, E, F>(&self, mutate: F) -> core::result::Result<T, E>
    where
        F: FnOnce(&mut Vec<Note>) -> core::result::Result<T, E>,
        E: From<Error>,
    {
        let _guard = self.lock.lock().await;

        let mut notes = self.storage.load().await?;

        let value = mutate(&mut notes)?;

        self.storage.save(&notes).await?;

        Ok(value)
    }
}
