//! API request helpers

use std::convert::Infallible;

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Error;

/// Coerce the likes of a new note into an integer
///
/// Accepts integers, finite floats (truncated), booleans and strings holding an integer
///
/// ```rust
/// let likes = serde_json::json!(" 12 ");
/// assert_eq!(parse_likes(&likes).unwrap(), 12)
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn parse_likes(likes: &Value) -> Result<i64, Error> {
    let invalid = || Error::bad_request("Invalid value for `likes`");

    match likes {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .map(f64::trunc)
                    .filter(|likes| (i64::MIN as f64..i64::MAX as f64).contains(likes))
                    .map(|likes| likes as i64)
            })
            .ok_or_else(invalid),
        Value::Bool(likes) => Ok(i64::from(*likes)),
        Value::String(likes) => likes
            .trim()
            .parse::<i64>()
            .map_err(|err| invalid().with_description(err)),
        _ => Err(invalid()),
    }
}

/// Coerce a starred state into a boolean
///
/// Accepts booleans, `null`, numbers (non-zero is starred) and the strings
/// `true`, `false`, `1`, `0` and the empty string
///
/// ```rust
/// let starred = serde_json::json!("TRUE");
/// assert!(parse_starred(&starred).unwrap())
/// ```
pub fn parse_starred(starred: &Value) -> Result<bool, Error> {
    let invalid = || Error::bad_request("Invalid value for `starred`");

    match starred {
        Value::Bool(starred) => Ok(*starred),
        Value::Null => Ok(false),
        Value::Number(number) => number
            .as_f64()
            .map(|starred| starred != 0.0)
            .ok_or_else(invalid),
        Value::String(starred) => match starred.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(err))
            }
            JsonRejection::JsonSyntaxError(err) => {
                let description = std::error::Error::source(&err)
                    .map_or_else(|| err.to_string(), ToString::to_string);

                Err(Error::bad_request("JSON syntax error").with_description(description))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

/// JSON extractor for bodies that may be left out
///
/// Anything that is not a JSON body of the right shape counts as no body at all
pub struct OptionalForm<F>(pub Option<F>);

impl<S, F> FromRequest<S> for OptionalForm<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        Ok(OptionalForm(json.ok().map(|Json(form)| form)))
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            // only numeric IDs are routed to notes, anything else does not exist
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::not_found("Note not found").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}

fn parse_query<Q>(query: Result<Query<Q>, QueryRejection>) -> Result<Q, Error> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(err) => Err(Error::bad_request("Invalid query parameter").with_description(err)),
    }
}

/// Wrapper for the query string extractor
pub struct QueryParameters<Q>(pub Q);

impl<S, Q> FromRequestParts<S> for QueryParameters<Q>
where
    S: Send + Sync,
    Q: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<Q>::from_request_parts(parts, state).await;

        parse_query(query).map(QueryParameters)
    }
}
