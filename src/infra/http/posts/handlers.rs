use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::posts::{CreatePostCommand, PublishPolicy, UpdatePostCommand},
    domain::entities::PostRecord,
    domain::posts::{PostAction, PostContent},
    infra::http::{CurrentAuthor, HttpState, RedirectIntent, respond_with_redirect},
    presentation::views::{
        DraftListView, DraftsTemplate, IndexTemplate, PostDetailView, PostEditFragmentTemplate,
        PostFormTemplate, PostFormView, PostFragmentTemplate, PostListView, PostTemplate,
        render_not_found_response, render_template_response,
    },
};

use super::{errors::post_error, forms::PostEditForm};

fn detail_href(id: Uuid) -> String {
    format!("/post/{id}/")
}

fn full_edit_form(post: &PostRecord) -> PostFormView {
    PostFormView::prefilled("Edit post", format!("/post/{}/edit", post.id), post)
        .with_cancel(detail_href(post.id))
        .without_draft_action()
}

fn fragment_edit_form(post: &PostRecord) -> PostFormView {
    PostFormView::prefilled("Edit post", format!("/post/{}/edit-fragment/", post.id), post)
        .with_cancel(format!("/post/{}/cancel-fragment/", post.id))
}

pub(crate) async fn post_list(State(state): State<HttpState>) -> Response {
    match state.posts.published_feed(OffsetDateTime::now_utc()).await {
        Ok(posts) => render_template_response(
            IndexTemplate {
                view: PostListView::from_records(&posts),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::post_list", err).into_response(),
    }
}

pub(crate) async fn post_detail(State(state): State<HttpState>, Path(id): Path<Uuid>) -> Response {
    match state.posts.load_post(id).await {
        Ok(Some(post)) => render_template_response(
            PostTemplate {
                view: PostDetailView::from_record(&post),
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(),
        Err(err) => post_error("infra::http::post_detail", err).into_response(),
    }
}

pub(crate) async fn new_post_form(_author: CurrentAuthor) -> Response {
    let view = PostFormView::empty("New post", "/post/new/");
    render_template_response(PostFormTemplate { view }, StatusCode::OK)
}

pub(crate) async fn create_post(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    headers: HeaderMap,
    Form(form): Form<PostEditForm>,
) -> Response {
    let content = match PostContent::validate(&form.title, &form.text, &state.limits) {
        Ok(content) => content,
        Err(errors) => {
            let view = PostFormView::empty("New post", "/post/new/")
                .with_input(&form.title, &form.text)
                .with_errors(errors);
            return render_template_response(
                PostFormTemplate { view },
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let action = PostAction::from_form_value(form.action.as_deref());
    let command = CreatePostCommand { content, action };

    match state.posts.create_post(&author, command).await {
        Ok(post) => respond_with_redirect(&headers, RedirectIntent::to(detail_href(post.id))),
        Err(err) => post_error("infra::http::create_post", err).into_response(),
    }
}

pub(crate) async fn edit_post_form(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
) -> Response {
    match state.posts.load_owned_post(&author, id).await {
        Ok(post) => render_template_response(
            PostFormTemplate {
                view: full_edit_form(&post),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::edit_post_form", err).into_response(),
    }
}

pub(crate) async fn update_post(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<PostEditForm>,
) -> Response {
    let content = match PostContent::validate(&form.title, &form.text, &state.limits) {
        Ok(content) => content,
        Err(errors) => {
            let view = PostFormView::empty("Edit post", format!("/post/{id}/edit"))
                .with_cancel(detail_href(id))
                .without_draft_action()
                .with_input(&form.title, &form.text)
                .with_errors(errors);
            return render_template_response(
                PostFormTemplate { view },
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    // A full-page save republishes; the fragment surface is the one that can
    // move a post back to draft.
    let command = UpdatePostCommand {
        id,
        content,
        publish: PublishPolicy::Republish,
    };

    match state.posts.update_post(&author, command).await {
        Ok(post) => respond_with_redirect(&headers, RedirectIntent::to(detail_href(post.id))),
        Err(err) => post_error("infra::http::update_post", err).into_response(),
    }
}

pub(crate) async fn edit_post_fragment(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
) -> Response {
    match state.posts.load_owned_post(&author, id).await {
        Ok(post) => render_template_response(
            PostEditFragmentTemplate {
                view: fragment_edit_form(&post),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::edit_post_fragment", err).into_response(),
    }
}

pub(crate) async fn update_post_fragment(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
    Form(form): Form<PostEditForm>,
) -> Response {
    let content = match PostContent::validate(&form.title, &form.text, &state.limits) {
        Ok(content) => content,
        Err(errors) => {
            let view = PostFormView::empty("Edit post", format!("/post/{id}/edit-fragment/"))
                .with_cancel(format!("/post/{id}/cancel-fragment/"))
                .with_input(&form.title, &form.text)
                .with_errors(errors);
            return render_template_response(
                PostEditFragmentTemplate { view },
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    let action = PostAction::from_form_value(form.action.as_deref());
    let command = UpdatePostCommand {
        id,
        content,
        publish: PublishPolicy::FromAction(action),
    };

    match state.posts.update_post(&author, command).await {
        Ok(post) => render_template_response(
            PostFragmentTemplate {
                view: PostDetailView::from_record(&post),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::update_post_fragment", err).into_response(),
    }
}

pub(crate) async fn cancel_post_fragment(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
) -> Response {
    match state.posts.load_owned_post(&author, id).await {
        Ok(post) => render_template_response(
            PostFragmentTemplate {
                view: PostDetailView::from_record(&post),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::cancel_post_fragment", err).into_response(),
    }
}

pub(crate) async fn delete_post(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    match state.posts.delete_post(&author, id).await {
        Ok(()) => respond_with_redirect(&headers, RedirectIntent::to("/")),
        Err(err) => post_error("infra::http::delete_post", err).into_response(),
    }
}

pub(crate) async fn publish_post(
    State(state): State<HttpState>,
    CurrentAuthor(author): CurrentAuthor,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    match state.posts.publish_post(&author, id).await {
        Ok(post) => respond_with_redirect(&headers, RedirectIntent::to(detail_href(post.id))),
        Err(err) => post_error("infra::http::publish_post", err).into_response(),
    }
}

pub(crate) async fn draft_list(
    State(state): State<HttpState>,
    _author: CurrentAuthor,
) -> Response {
    match state.posts.draft_feed().await {
        Ok(posts) => render_template_response(
            DraftsTemplate {
                view: DraftListView::from_records(&posts),
            },
            StatusCode::OK,
        ),
        Err(err) => post_error("infra::http::draft_list", err).into_response(),
    }
}
