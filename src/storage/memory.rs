//! Memory storage
//!
//! Keeps the notes around as long as the storage itself, used to test the store

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::notes::Note;

use super::Result;
use super::Storage;

/// An in-memory storage
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All notes in storage
    notes: Arc<Mutex<Vec<Note>>>,

    /// How many times the notes were saved
    saves: Arc<Mutex<usize>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves so far
    pub async fn saves(&self) -> usize {
        *self.saves.lock().await
    }
}

impl Storage for Memory {
    async fn load(&self) -> Result<Vec<Note>> {
        Ok(self.notes.lock().await.clone())
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        *self.notes.lock().await = notes.to_vec();
        *self.saves.lock().await += 1;

        Ok(())
    }
}
