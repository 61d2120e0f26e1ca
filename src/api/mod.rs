//! All API endpoint setup

use axum::Router;
use axum::routing::get;
use axum::routing::post;

pub use current_user::CurrentUser;
pub use request::Form;
pub use request::OptionalForm;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use request::parse_likes;
pub use request::parse_starred;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod current_user;
mod notes;
mod request;
mod response;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let notes = Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route("/{note}", get(notes::single::<S>))
        .route("/{note}/like", post(notes::like::<S>))
        .route("/{note}/star", post(notes::star::<S>));

    Router::new()
        .nest("/notes", notes)
        .route("/search", get(notes::search::<S>))
}
