//! The root!
//!
//! A friendly welcome, and a JSON answer for everything that does not exist

use serde::Serialize;

use crate::api::Error;
use crate::api::Success;

const WELCOME_MESSAGE: &str = "Welcome to the Carevo notes API!";

#[derive(Debug, Serialize)]
pub struct Welcome {
    message: &'static str,
}

/// The root!
pub async fn root() -> Success<Welcome> {
    Success::ok(Welcome {
        message: WELCOME_MESSAGE,
    })
}

/// All requests without a matching route end up here
pub async fn not_found() -> Error {
    Error::not_found("Resource not found")
}
