//! Post content validation and publish/draft visibility rules.

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::domain::entities::PostRecord;

pub const HUMAN_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const HUMAN_DATETIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year] [hour padding:zero]:[minute padding:zero] UTC"
);

pub const DEFAULT_TITLE_MAX_CHARS: usize = 200;
pub const DEFAULT_TEXT_MAX_CHARS: usize = 50_000;

/// Upper bounds for user-submitted post fields, resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ContentLimits {
    pub title_max_chars: usize,
    pub text_max_chars: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            text_max_chars: DEFAULT_TEXT_MAX_CHARS,
        }
    }
}

/// Validated title/text pair. Every other post field is filled in by the
/// caller before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct PostContent {
    pub title: String,
    pub text: String,
}

impl PostContent {
    /// Validate raw field values against the configured limits.
    ///
    /// Both fields are trimmed; an empty or over-long field produces a
    /// field-level message. Validation never touches storage.
    pub fn validate(
        title: &str,
        text: &str,
        limits: &ContentLimits,
    ) -> Result<Self, PostFormErrors> {
        let title = title.trim();
        let text = text.trim();

        let mut errors = PostFormErrors::default();

        if title.is_empty() {
            errors.title.push("Title is required.".to_string());
        } else if title.chars().count() > limits.title_max_chars {
            errors.title.push(format!(
                "Title must be at most {} characters.",
                limits.title_max_chars
            ));
        }

        if text.is_empty() {
            errors.text.push("Text is required.".to_string());
        } else if text.chars().count() > limits.text_max_chars {
            errors.text.push(format!(
                "Text must be at most {} characters.",
                limits.text_max_chars
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title: title.to_string(),
            text: text.to_string(),
        })
    }
}

/// Field-level validation messages, keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("post content failed validation")]
pub struct PostFormErrors {
    pub title: Vec<String>,
    pub text: Vec<String>,
}

impl PostFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }
}

/// The action a form submission asked for. Anything other than an explicit
/// `publish` keeps (or returns) the post to draft state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Publish,
    Draft,
}

impl PostAction {
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("publish") => Self::Publish,
            _ => Self::Draft,
        }
    }

    /// The `published_at` value this action resolves to at `now`.
    pub fn published_at(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Self::Publish => Some(now),
            Self::Draft => None,
        }
    }
}

/// A post is publicly listed iff it has been published and the publish
/// instant is not in the future.
pub fn is_publicly_listed(post: &PostRecord, now: OffsetDateTime) -> bool {
    matches!(post.published_at, Some(at) if at <= now)
}

pub fn format_human_date(at: OffsetDateTime) -> String {
    at.format(HUMAN_DATE_FORMAT).expect("valid calendar date")
}

pub fn format_human_datetime(at: OffsetDateTime) -> String {
    at.format(HUMAN_DATETIME_FORMAT)
        .expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use time::Duration;
    use uuid::Uuid;

    use super::*;

    fn sample_post(published_at: Option<OffsetDateTime>) -> PostRecord {
        PostRecord {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author_username: "frida".to_string(),
            title: "Hello".to_string(),
            text: "World".to_string(),
            created_at: OffsetDateTime::now_utc() - Duration::days(30),
            published_at,
        }
    }

    #[test]
    fn validate_accepts_trimmed_content() {
        let limits = ContentLimits::default();
        let content = PostContent::validate("  Hello  ", "World\n", &limits).expect("valid");
        assert_eq!(content.title, "Hello");
        assert_eq!(content.text, "World");
    }

    #[test]
    fn validate_reports_field_level_errors() {
        let limits = ContentLimits::default();
        let errors = PostContent::validate("", "   ", &limits).unwrap_err();
        assert_eq!(errors.title.len(), 1);
        assert_eq!(errors.text.len(), 1);
    }

    #[test]
    fn validate_rejects_over_long_title() {
        let limits = ContentLimits {
            title_max_chars: 8,
            text_max_chars: 64,
        };
        let errors = PostContent::validate("a rather long title", "body", &limits).unwrap_err();
        assert!(!errors.title.is_empty());
        assert!(errors.text.is_empty());
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let limits = ContentLimits {
            title_max_chars: 4,
            text_max_chars: 64,
        };
        assert!(PostContent::validate("čtyři", "body", &limits).is_err());
        assert!(PostContent::validate("čtyř", "body", &limits).is_ok());
    }

    #[test]
    fn unknown_action_falls_back_to_draft() {
        assert_eq!(
            PostAction::from_form_value(Some("publish")),
            PostAction::Publish
        );
        assert_eq!(PostAction::from_form_value(Some("save")), PostAction::Draft);
        assert_eq!(PostAction::from_form_value(None), PostAction::Draft);
    }

    #[test]
    fn drafts_are_never_publicly_listed() {
        let now = OffsetDateTime::now_utc();
        let draft = sample_post(None);
        assert!(draft.is_draft());
        assert!(!is_publicly_listed(&draft, now));
    }

    #[test]
    fn future_publish_date_is_not_listed_yet() {
        let now = OffsetDateTime::now_utc();
        let post = sample_post(Some(now + Duration::hours(2)));
        assert!(!is_publicly_listed(&post, now));
        assert!(is_publicly_listed(&post, now + Duration::hours(3)));
    }
}
