use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};

use crate::application::error::HttpError;
use crate::domain::entities::AuthorRecord;

use super::HttpState;

/// The acting author, resolved from the trusted header the authenticating
/// proxy sets. Handlers take this as an explicit argument; no author-only
/// action reads the actor from anywhere else.
#[derive(Debug, Clone)]
pub struct CurrentAuthor(pub AuthorRecord);

impl FromRequestParts<HttpState> for CurrentAuthor {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HttpState,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(state.user_header.as_ref())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let Some(username) = username else {
            return Err(HttpError::new(
                "infra::http::auth",
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                format!("request is missing the `{}` header", state.user_header),
            ));
        };

        match state.authors.ensure_author(username).await {
            Ok(author) => Ok(Self(author)),
            Err(err) => Err(HttpError::from_error(
                "infra::http::auth",
                StatusCode::INTERNAL_SERVER_ERROR,
                "Author lookup failed",
                &err,
            )),
        }
    }
}
