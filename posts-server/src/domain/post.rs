use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Author {
    #[allow(dead_code)]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last", skipping empty parts.
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
}

/// A post that has not been persisted yet. `created` is filled in by the
/// store when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl NewPost {
    #[allow(dead_code)]
    pub fn new(author: Author, title: impl Into<String>) -> Self {
        Self {
            author,
            title: title.into(),
            content: None,
            created: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[allow(dead_code)]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Missing `title` in request body".to_string(),
            ));
        }
        Ok(())
    }

    /// Turns the record into a stored post with the given id, stamping
    /// `created` with `now` unless the caller supplied one.
    pub fn into_post(self, id: Uuid, now: DateTime<Utc>) -> Post {
        Post {
            id,
            author: self.author,
            title: self.title,
            content: self.content,
            created: self.created.unwrap_or(now),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = DomainError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        let post = NewPost {
            author: req.author.unwrap_or_default(),
            title: req.title.unwrap_or_default(),
            content: req.content,
            created: req.created,
        };
        post.validate()?;
        Ok(post)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author.display_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}
