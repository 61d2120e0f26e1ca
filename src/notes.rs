//! Notes, the only thing Carevo shares
//!
//! Everything here works on the in-memory collection; persisting it is up to the store

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Identifier of a note, assigned on creation
pub type NoteId = u64;

/// Category a note ends up in when none is given
pub const DEFAULT_CATEGORY: &str = "recent";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Read `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_default_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|category| category.unwrap_or_else(default_category))
}

/// A single shareable note
///
/// Stored documents may miss optional fields or hold `null` for them, those are read with
/// their defaults. Fields this service does not know about are kept in `extra` and written
/// back untouched.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Note {
    pub id: NoteId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subtitle: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,

    /// URL of the cover image
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tag: String,

    /// Where the actual content lives
    #[serde(default, deserialize_with = "null_as_default")]
    pub drive_link: String,

    /// Free-form, only used for exact filtering
    #[serde(default = "default_category", deserialize_with = "null_as_default_category")]
    pub category: String,

    /// Kept in line with `liked_by` by [`Note::toggle_like`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub starred: bool,

    /// Users currently liking the note, absent until the first like
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked_by: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Values to create a note
///
/// Required fields are already validated, defaults are applied by [`Note::new`]
#[derive(Debug, Default)]
pub struct NewNote {
    pub title: String,
    pub drive_link: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
    pub likes: Option<i64>,
    pub starred: Option<bool>,
}

impl Note {
    /// Create a note with the given ID, filling in the defaults
    pub fn new(id: NoteId, values: NewNote) -> Self {
        Self {
            id,
            title: values.title,
            subtitle: values.subtitle.unwrap_or_default(),
            author: values.author.unwrap_or_default(),
            image: values.image.unwrap_or_default(),
            tag: values.tag.unwrap_or_default(),
            drive_link: values.drive_link,
            category: values.category.unwrap_or_else(default_category),
            likes: values.likes.unwrap_or_default(),
            starred: values.starred.unwrap_or_default(),
            liked_by: None,
            extra: Map::new(),
        }
    }

    /// Toggle the like of a user
    ///
    /// Returns whether the user likes the note afterwards, `None` when the like count can
    /// not change any further. The note is left untouched in that case.
    pub fn toggle_like(&mut self, user_id: &str) -> Option<bool> {
        let position = self
            .liked_by
            .as_ref()
            .and_then(|liked_by| liked_by.iter().position(|liker| liker == user_id));

        let likes = match position {
            Some(_) => self.likes.checked_sub(1)?,
            None => self.likes.checked_add(1)?,
        };

        let liked_by = self.liked_by.get_or_insert_with(Vec::new);
        self.likes = likes;

        if let Some(position) = position {
            liked_by.remove(position);

            Some(false)
        } else {
            liked_by.push(user_id.to_string());

            Some(true)
        }
    }

    /// Set the starred state, or flip it when no explicit state is given
    pub fn star(&mut self, starred: Option<bool>) -> bool {
        self.starred = starred.unwrap_or(!self.starred);

        self.starred
    }

    /// Does the note match an already lowercased search query
    ///
    /// Looks for the query in the title, subtitle and author
    pub fn matches(&self, query: &str) -> bool {
        [&self.title, &self.subtitle, &self.author]
            .iter()
            .any(|field| field.to_lowercase().contains(query))
    }
}

/// Next available ID: one past the highest ID in use, starting at 1
pub fn next_id(notes: &[Note]) -> NoteId {
    notes.iter().map(|note| note.id).max().unwrap_or(0) + 1
}

/// Find a note by its ID
pub fn find_mut(notes: &mut [Note], id: NoteId) -> Option<&mut Note> {
    notes.iter_mut().find(|note| note.id == id)
}

/// Normalize a search query, `None` when there is nothing to search for
pub fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim().to_lowercase();

    if query.is_empty() { None } else { Some(query) }
}
