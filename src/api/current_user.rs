//! Current user
//!
//! Clients identify themselves with the `User-ID` header, it is taken at face value

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers;
use axum_extra::headers::Header;

use crate::api::Error;

static USER_ID: HeaderName = HeaderName::from_static("user-id");

/// The `User-ID` header
///
/// Needs a non-empty value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserId(String);

impl Header for UserId {
    fn name() -> &'static HeaderName {
        &USER_ID
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let value = value.to_str().map_err(|_| headers::Error::invalid())?;

        if value.is_empty() {
            return Err(headers::Error::invalid());
        }

        Ok(Self(value.to_string()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

/// The user doing the request
#[derive(Clone, Debug)]
pub struct CurrentUser {
    id: String,
}

impl Deref for CurrentUser {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(UserId(id)) = TypedHeader::<UserId>::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::bad_request("`User-ID` header is required"))?;

        Ok(Self { id })
    }
}
