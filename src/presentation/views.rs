use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostFormErrors, format_human_date, format_human_datetime};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = ErrorPageView {
        heading: "Not found".to_string(),
        message: "The post you are looking for does not exist.".to_string(),
    };
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct PostCardView {
    pub id: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub published_label: String,
}

impl PostCardView {
    pub fn from_record(post: &PostRecord) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            text: post.text.clone(),
            author: post.author_username.clone(),
            published_label: post
                .published_at
                .map(format_human_date)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct PostListView {
    pub posts: Vec<PostCardView>,
}

impl PostListView {
    pub fn from_records(posts: &[PostRecord]) -> Self {
        Self {
            posts: posts.iter().map(PostCardView::from_record).collect(),
        }
    }
}

#[derive(Clone)]
pub struct DraftCardView {
    pub id: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub created_label: String,
}

impl DraftCardView {
    pub fn from_record(post: &PostRecord) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            text: post.text.clone(),
            author: post.author_username.clone(),
            created_label: format_human_date(post.created_at),
        }
    }
}

#[derive(Clone)]
pub struct DraftListView {
    pub drafts: Vec<DraftCardView>,
}

impl DraftListView {
    pub fn from_records(posts: &[PostRecord]) -> Self {
        Self {
            drafts: posts.iter().map(DraftCardView::from_record).collect(),
        }
    }
}

#[derive(Clone)]
pub struct PostDetailView {
    pub id: String,
    pub title: String,
    pub text: String,
    pub author: String,
    pub created_label: String,
    pub published_label: Option<String>,
}

impl PostDetailView {
    pub fn from_record(post: &PostRecord) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            text: post.text.clone(),
            author: post.author_username.clone(),
            created_label: format_human_datetime(post.created_at),
            published_label: post.published_at.map(format_human_datetime),
        }
    }
}

#[derive(Clone)]
pub struct PostFormView {
    pub heading: String,
    pub action_href: String,
    pub cancel_href: Option<String>,
    /// Whether the form offers an explicit save-as-draft action. The
    /// full-page editor republishes on every save, so it does not.
    pub allow_draft: bool,
    pub title_value: String,
    pub text_value: String,
    pub title_errors: Vec<String>,
    pub text_errors: Vec<String>,
}

impl PostFormView {
    pub fn empty(heading: impl Into<String>, action_href: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            action_href: action_href.into(),
            cancel_href: None,
            allow_draft: true,
            title_value: String::new(),
            text_value: String::new(),
            title_errors: Vec::new(),
            text_errors: Vec::new(),
        }
    }

    pub fn prefilled(
        heading: impl Into<String>,
        action_href: impl Into<String>,
        post: &PostRecord,
    ) -> Self {
        Self {
            title_value: post.title.clone(),
            text_value: post.text.clone(),
            ..Self::empty(heading, action_href)
        }
    }

    pub fn with_input(mut self, title: &str, text: &str) -> Self {
        self.title_value = title.to_string();
        self.text_value = text.to_string();
        self
    }

    pub fn with_errors(mut self, errors: PostFormErrors) -> Self {
        self.title_errors = errors.title;
        self.text_errors = errors.text;
        self
    }

    pub fn with_cancel(mut self, cancel_href: impl Into<String>) -> Self {
        self.cancel_href = Some(cancel_href.into());
        self
    }

    pub fn without_draft_action(mut self) -> Self {
        self.allow_draft = false;
        self
    }
}

#[derive(Clone)]
pub struct ErrorPageView {
    pub heading: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: PostListView,
}

#[derive(Template)]
#[template(path = "drafts.html")]
pub struct DraftsTemplate {
    pub view: DraftListView,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: PostDetailView,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub view: PostFormView,
}

#[derive(Template)]
#[template(path = "partials/post_fragment.html")]
pub struct PostFragmentTemplate {
    pub view: PostDetailView,
}

#[derive(Template)]
#[template(path = "partials/post_edit_fragment.html")]
pub struct PostEditFragmentTemplate {
    pub view: PostFormView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: ErrorPageView,
}
