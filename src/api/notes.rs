//! Notes API endpoints
//!
//! Listing, searching, creating, liking and starring notes

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::notes::NewNote;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::find_mut;
use crate::notes::next_id;
use crate::notes::normalize_query;
use crate::storage::Storage;
use crate::storage::Store;

use super::CurrentUser;
use super::Error;
use super::Form;
use super::OptionalForm;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::parse_likes;
use super::parse_starred;

#[derive(Debug, Deserialize)]
pub struct ListParameters {
    category: Option<String>,
}

/// List all notes
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:5000/api/notes?category=trending'
/// ```
///
/// The category has to match exactly, an empty category lists all notes
pub async fn list<S: Storage>(
    Extension(store): Extension<Store<S>>,
    QueryParameters(parameters): QueryParameters<ListParameters>,
) -> Result<Success<Vec<Note>>, Error> {
    let mut notes = store.read().await?;

    if let Some(category) = parameters.category.filter(|category| !category.is_empty()) {
        tracing::debug!("Filtering notes on category: {category}");

        notes.retain(|note| note.category == category);
    }

    Ok(Success::ok(notes))
}

#[derive(Debug, Deserialize)]
pub struct SearchParameters {
    q: Option<String>,
}

/// Search notes on title, subtitle and author, ignoring case
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:5000/api/search?q=algebra'
/// ```
///
/// Nothing is found without a query
pub async fn search<S: Storage>(
    Extension(store): Extension<Store<S>>,
    QueryParameters(parameters): QueryParameters<SearchParameters>,
) -> Result<Success<Vec<Note>>, Error> {
    let Some(query) = parameters.q.as_deref().and_then(normalize_query) else {
        return Ok(Success::ok(Vec::new()));
    };

    tracing::debug!("Searching notes for: {query}");

    let mut notes = store.read().await?;
    notes.retain(|note| note.matches(&query));

    Ok(Success::ok(notes))
}

/// Get a single note
///
/// Request:
/// ```sh
/// curl -v http://localhost:5000/api/notes/1
/// ```
pub async fn single<S: Storage>(
    Extension(store): Extension<Store<S>>,
    PathParameters(note_id): PathParameters<NoteId>,
) -> Result<Success<Note>, Error> {
    store
        .read()
        .await?
        .into_iter()
        .find(|note| note.id == note_id)
        .map(Success::ok)
        .ok_or_else(note_not_found)
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteForm {
    title: Option<String>,
    drive_link: Option<String>,
    subtitle: Option<String>,
    author: Option<String>,
    image: Option<String>,
    tag: Option<String>,
    category: Option<String>,
    likes: Option<Value>,
    starred: Option<Value>,
}

impl CreateNoteForm {
    /// Read the form from a JSON object
    ///
    /// Only objects are accepted, serde would otherwise take an array as the fields in order
    fn from_object(object: Map<String, Value>) -> Result<Self, Error> {
        serde_json::from_value(Value::Object(object))
            .map_err(|err| Error::bad_request("Data error").with_description(err))
    }

    /// Validate the form into the values of a new note
    fn into_new_note(self) -> Result<NewNote, Error> {
        let (Some(title), Some(drive_link)) = (self.title, self.drive_link) else {
            return Err(Error::bad_request("Missing required fields")
                .with_description("`title` and `drive_link` are required"));
        };

        Ok(NewNote {
            title,
            drive_link,
            subtitle: self.subtitle,
            author: self.author,
            image: self.image,
            tag: self.tag,
            category: self.category,
            likes: self.likes.as_ref().map(parse_likes).transpose()?,
            starred: self.starred.as_ref().map(parse_starred).transpose()?,
        })
    }
}

/// Create a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     http://localhost:5000/api/notes \
///     -d '{ "title": "Linear Algebra", "drive_link": "https://drive.example.com/la" }'
/// ```
///
/// The note gets the next free ID, optional fields get their defaults
pub async fn create<S: Storage>(
    Extension(store): Extension<Store<S>>,
    Form(form): Form<Map<String, Value>>,
) -> Result<Success<Note>, Error> {
    let values = CreateNoteForm::from_object(form)?.into_new_note()?;

    let note = store
        .update(|notes| {
            let note = Note::new(next_id(notes), values);
            notes.push(note.clone());

            Ok::<_, Error>(note)
        })
        .await?;

    tracing::debug!("Created note {}: {}", note.id, note.title);

    Ok(Success::created(note))
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    id: NoteId,
    likes: i64,
    liked: bool,
}

/// Toggle the like of the current user
///
/// Request:
/// ```sh
/// curl -v -X POST -H 'User-ID: user123' http://localhost:5000/api/notes/1/like
/// ```
///
/// `liked` tells whether the user likes the note after toggling
pub async fn like<S: Storage>(
    Extension(store): Extension<Store<S>>,
    PathParameters(note_id): PathParameters<NoteId>,
    current_user: CurrentUser,
) -> Result<Success<LikeResponse>, Error> {
    let response = store
        .update(|notes| {
            let note = find_mut(notes, note_id).ok_or_else(note_not_found)?;
            let liked = note
                .toggle_like(&current_user)
                .ok_or_else(|| Error::bad_request("Likes of the note are out of range"))?;

            Ok::<_, Error>(LikeResponse {
                id: note.id,
                likes: note.likes,
                liked,
            })
        })
        .await?;

    tracing::debug!(
        "User {} toggled like on note {note_id}, liked: {}",
        &*current_user,
        response.liked
    );

    Ok(Success::ok(response))
}

#[derive(Debug, Serialize)]
pub struct StarResponse {
    id: NoteId,
    starred: bool,
}

/// Set or toggle the starred state of a note
///
/// Request:
/// ```sh
/// curl -v -X POST -H 'Content-Type: application/json' \
///     http://localhost:5000/api/notes/1/star \
///     -d '{ "starred": true }'
/// ```
///
/// Without a JSON body containing `starred` the state is flipped
pub async fn star<S: Storage>(
    Extension(store): Extension<Store<S>>,
    PathParameters(note_id): PathParameters<NoteId>,
    OptionalForm(form): OptionalForm<Map<String, Value>>,
) -> Result<Success<StarResponse>, Error> {
    let starred = form
        .as_ref()
        .and_then(|form| form.get("starred"))
        .map(parse_starred)
        .transpose()?;

    let response = store
        .update(|notes| {
            let note = find_mut(notes, note_id).ok_or_else(note_not_found)?;

            Ok::<_, Error>(StarResponse {
                id: note.id,
                starred: note.star(starred),
            })
        })
        .await?;

    tracing::debug!("Note {note_id} starred: {}", response.starred);

    Ok(Success::ok(response))
}

fn note_not_found() -> Error {
    Error::not_found("Note not found")
}
