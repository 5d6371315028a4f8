//! Requester identity and the login gate.
//!
//! The authentication collaborator in front of this service puts the signed-in user's id
//! in the `x-user-id` header. Handlers that only need to know who is asking take
//! [`CurrentUser`]; handlers that must not run for anonymous visitors take
//! [`RequireUser`], whose rejection is a redirect to the login page carrying the original
//! destination.

use super::Outcome;
use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};
use std::convert::Infallible;
use tracing::debug;

/// Header carrying the authenticated user id.
pub const USER_HEADER: &str = "x-user-id";
/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// The requester, if signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Option<String>);

/// A signed-in requester. Anonymous requests are redirected to [`LOGIN_PATH`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireUser(pub String);

fn requester(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|user| !user.is_empty())
        .map(str::to_string)
}

/// Percent-encodes a destination for the `next` query parameter.
fn encode_next(next: &str) -> String {
    let mut encoded = String::with_capacity(next.len());
    for byte in next.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(char::from(byte));
            }
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}

/// Redirect to the login page that returns to `next` afterwards.
#[must_use]
pub fn login_redirect(next: &str) -> Outcome {
    Outcome::Redirect {
        to: format!("{LOGIN_PATH}?next={}", encode_next(next)),
        message: None,
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(requester(&parts.headers)))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = Outcome;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = requester(&parts.headers) {
            return Ok(Self(user));
        }
        let next = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), |pq| pq.as_str());
        debug!("Anonymous request to {} sent to login", next);
        Err(login_redirect(next))
    }
}
