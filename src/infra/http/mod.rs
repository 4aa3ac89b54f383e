mod auth;
mod middleware;
mod posts;

pub use auth::CurrentAuthor;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    middleware as axum_middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::application::{
    authors::AuthorService,
    error::{ErrorReport, HttpError},
    posts::PostService,
    repos::{HealthRepo, RepoError},
};
use crate::domain::posts::ContentLimits;

use middleware::{log_responses, set_request_context};

/// Request header an HTML-over-the-wire client sends to ask for header-based
/// redirects instead of conventional ones.
const HX_REQUEST_HEADER: &str = "hx-request";
const HX_REDIRECT_HEADER: &str = "hx-redirect";

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub authors: Arc<AuthorService>,
    pub health: Arc<dyn HealthRepo>,
    pub limits: ContentLimits,
    /// Name of the trusted header the authenticating proxy sets.
    pub user_header: Arc<str>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(posts::post_list))
        .route("/post/{id}/", get(posts::post_detail))
        .route("/post/new/", get(posts::new_post_form).post(posts::create_post))
        .route(
            "/post/{id}/edit",
            get(posts::edit_post_form).post(posts::update_post),
        )
        .route(
            "/post/{id}/edit-fragment/",
            get(posts::edit_post_fragment).post(posts::update_post_fragment),
        )
        .route("/post/{id}/cancel-fragment/", get(posts::cancel_post_fragment))
        .route("/post/{id}/delete/", post(posts::delete_post))
        .route("/post/{id}/publish/", post(posts::publish_post))
        .route("/drafts/", get(posts::draft_list))
        .route("/_health/db", get(db_health))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

/// Where a successful mutation sends the client next. Handlers produce the
/// intent; the wire format is decided here, once.
#[derive(Debug, Clone)]
pub struct RedirectIntent {
    location: String,
}

impl RedirectIntent {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Translate a redirect intent for the requesting client: capability-flagged
/// requests get an empty success response with the target in a header,
/// everyone else gets a conventional redirect.
pub(crate) fn respond_with_redirect(headers: &HeaderMap, intent: RedirectIntent) -> Response {
    if wants_header_redirect(headers) {
        let value = match HeaderValue::from_str(&intent.location) {
            Ok(value) => value,
            Err(err) => {
                return HttpError::from_error(
                    "infra::http::respond_with_redirect",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Redirect target could not be encoded",
                    &err,
                )
                .into_response();
            }
        };

        let mut response = StatusCode::NO_CONTENT.into_response();
        response.headers_mut().insert(HX_REDIRECT_HEADER, value);
        return response;
    }

    Redirect::to(&intent.location).into_response()
}

fn wants_header_redirect(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Map a repository error to a consistent HTTP error response.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::Duplicate { constraint } => {
            HttpError::new(source, StatusCode::CONFLICT, "Duplicate record", constraint)
        }
        RepoError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            "resource not found",
        ),
        RepoError::InvalidInput { message } => {
            HttpError::new(source, StatusCode::BAD_REQUEST, "Invalid input", message)
        }
        RepoError::Timeout => HttpError::new(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Database timeout",
            "Database timeout",
        ),
        RepoError::Persistence(message) => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Persistence error",
            message,
        ),
    }
}

async fn db_health(State(state): State<HttpState>) -> Response {
    match state.health.ping().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error("infra::http::db_health", StatusCode::SERVICE_UNAVAILABLE, &err)
                .attach(&mut response);
            response
        }
    }
}
