mod support;

use time::{Duration, OffsetDateTime};

use pennino::application::posts::{
    CreatePostCommand, PostServiceError, PublishPolicy, UpdatePostCommand,
};
use pennino::domain::posts::{ContentLimits, PostAction, PostContent};

use support::MemoryRepositories;

fn content(title: &str, text: &str) -> PostContent {
    PostContent::validate(title, text, &ContentLimits::default()).expect("valid content")
}

#[tokio::test]
async fn create_sets_author_and_leaves_draft_state() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let post = service
        .create_post(
            &author,
            CreatePostCommand {
                content: content("Hello", "World"),
                action: PostAction::Draft,
            },
        )
        .await
        .expect("created");

    assert_eq!(post.author_id, author.id);
    assert!(post.published_at.is_none());

    let drafts = service.draft_feed().await.expect("drafts");
    assert!(drafts.iter().any(|p| p.id == post.id));

    let feed = service
        .published_feed(OffsetDateTime::now_utc())
        .await
        .expect("feed");
    assert!(feed.iter().all(|p| p.id != post.id));
}

#[tokio::test]
async fn create_with_publish_action_stamps_publication() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let before = OffsetDateTime::now_utc();
    let post = service
        .create_post(
            &author,
            CreatePostCommand {
                content: content("Hello", "World"),
                action: PostAction::Publish,
            },
        )
        .await
        .expect("created");

    let published_at = post.published_at.expect("published");
    assert!(published_at >= before);

    let feed = service
        .published_feed(OffsetDateTime::now_utc())
        .await
        .expect("feed");
    assert!(feed.iter().any(|p| p.id == post.id));
}

#[tokio::test]
async fn old_drafts_never_reach_the_public_feed() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let long_ago = OffsetDateTime::now_utc() - Duration::days(365);
    repo.seed_post(&author, "Ancient draft", "Body", long_ago, None);

    let feed = service
        .published_feed(OffsetDateTime::now_utc())
        .await
        .expect("feed");
    assert!(feed.is_empty());
}

#[tokio::test]
async fn future_publication_stays_out_of_the_feed_until_due() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let now = OffsetDateTime::now_utc();
    let scheduled = repo.seed_post(
        &author,
        "Scheduled",
        "Body",
        now - Duration::days(1),
        Some(now + Duration::hours(6)),
    );

    let feed = service.published_feed(now).await.expect("feed");
    assert!(feed.iter().all(|p| p.id != scheduled.id));

    let later = service
        .published_feed(now + Duration::hours(7))
        .await
        .expect("feed");
    assert!(later.iter().any(|p| p.id == scheduled.id));
}

#[tokio::test]
async fn published_feed_orders_by_publication_descending() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let now = OffsetDateTime::now_utc();
    let older = repo.seed_post(
        &author,
        "Older",
        "Body",
        now - Duration::days(3),
        Some(now - Duration::days(2)),
    );
    let newer = repo.seed_post(
        &author,
        "Newer",
        "Body",
        now - Duration::days(4),
        Some(now - Duration::days(1)),
    );

    let feed = service.published_feed(now).await.expect("feed");
    let ids: Vec<_> = feed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn full_page_edit_republishes_on_every_save() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let draft = repo.seed_post(&author, "Draft", "Body", OffsetDateTime::now_utc(), None);

    let before = OffsetDateTime::now_utc();
    let updated = service
        .update_post(
            &author,
            UpdatePostCommand {
                id: draft.id,
                content: content("Draft, revised", "Body"),
                publish: PublishPolicy::Republish,
            },
        )
        .await
        .expect("updated");

    assert!(updated.published_at.expect("published") >= before);
}

#[tokio::test]
async fn fragment_edit_derives_publication_from_the_action() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let now = OffsetDateTime::now_utc();
    let post = repo.seed_post(&author, "Live", "Body", now, Some(now));

    let unpublished = service
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                content: content("Live", "Body"),
                publish: PublishPolicy::FromAction(PostAction::Draft),
            },
        )
        .await
        .expect("updated");
    assert!(unpublished.published_at.is_none());

    let before = OffsetDateTime::now_utc();
    let republished = service
        .update_post(
            &author,
            UpdatePostCommand {
                id: post.id,
                content: content("Live", "Body"),
                publish: PublishPolicy::FromAction(PostAction::Publish),
            },
        )
        .await
        .expect("updated");
    assert!(republished.published_at.expect("published") >= before);
}

#[tokio::test]
async fn publish_is_idempotent() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let draft = repo.seed_post(&author, "Draft", "Body", OffsetDateTime::now_utc(), None);

    let first = service
        .publish_post(&author, draft.id)
        .await
        .expect("published");
    let second = service
        .publish_post(&author, draft.id)
        .await
        .expect("published again");

    assert_eq!(first.published_at, second.published_at);
}

#[tokio::test]
async fn mutations_by_non_authors_are_rejected_without_changes() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let owner = repo.seed_author("frida");
    let intruder = repo.seed_author("diego");

    let post = repo.seed_post(&owner, "Mine", "Body", OffsetDateTime::now_utc(), None);

    let update = service
        .update_post(
            &intruder,
            UpdatePostCommand {
                id: post.id,
                content: content("Hijacked", "Body"),
                publish: PublishPolicy::Republish,
            },
        )
        .await;
    assert!(matches!(update, Err(PostServiceError::NotOwner { .. })));

    let delete = service.delete_post(&intruder, post.id).await;
    assert!(matches!(delete, Err(PostServiceError::NotOwner { .. })));

    let publish = service.publish_post(&intruder, post.id).await;
    assert!(matches!(publish, Err(PostServiceError::NotOwner { .. })));

    let unchanged = repo.post_by_id(post.id).expect("still there");
    assert_eq!(unchanged.title, "Mine");
    assert!(unchanged.published_at.is_none());
}

#[tokio::test]
async fn delete_by_the_author_is_permanent() {
    let repo = MemoryRepositories::new();
    let service = support::post_service(&repo);
    let author = repo.seed_author("frida");

    let post = repo.seed_post(&author, "Mine", "Body", OffsetDateTime::now_utc(), None);

    service
        .delete_post(&author, post.id)
        .await
        .expect("deleted");

    assert!(service.load_post(post.id).await.expect("lookup").is_none());

    let again = service.delete_post(&author, post.id).await;
    assert!(matches!(again, Err(PostServiceError::NotFound)));
}
