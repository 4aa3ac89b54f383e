use axum::http::StatusCode;

use crate::application::{error::HttpError, posts::PostServiceError};
use crate::infra::http::repo_error_to_http;

pub(super) fn post_error(source: &'static str, err: PostServiceError) -> HttpError {
    match err {
        PostServiceError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            "post not found",
        ),
        PostServiceError::NotOwner { actor } => HttpError::new(
            source,
            StatusCode::FORBIDDEN,
            "You do not own this post",
            format!("author `{actor}` is not the owner"),
        ),
        PostServiceError::Repo(repo) => repo_error_to_http(source, repo),
    }
}
