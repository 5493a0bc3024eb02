use crate::domain::{DomainError, NewPost, Post};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persists the whole batch or nothing. Every record is validated before
    /// the first write.
    async fn insert_many(&self, records: Vec<NewPost>) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Post, DomainError>;
    /// Newest `created` first.
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Removes every post. Only used to reset state between tests.
    async fn drop_database(&self) -> Result<(), DomainError>;

    async fn insert(&self, record: NewPost) -> Result<Post, DomainError> {
        self.insert_many(vec![record])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::InternalError("Insert returned no rows".to_string()))
    }
}

pub(crate) fn validate_batch(records: &[NewPost]) -> Result<(), DomainError> {
    records.iter().try_for_each(NewPost::validate)
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    Ok(Post {
        id: row.try_get("id")?,
        author: crate::domain::Author {
            first_name: row.try_get("author_first_name")?,
            last_name: row.try_get("author_last_name")?,
        },
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get("created")?,
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_many(&self, records: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        validate_batch(&records)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut posts = Vec::with_capacity(records.len());
        for record in records {
            let row = sqlx::query(
                r#"
                INSERT INTO posts (id, author_first_name, author_last_name, title, content, created)
                VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
                RETURNING id, author_first_name, author_last_name, title, content, created
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&record.author.first_name)
            .bind(&record.author.last_name)
            .bind(&record.title)
            .bind(&record.content)
            .bind(record.created)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert post: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

            posts.push(row_to_post(&row)?);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit posts: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Post, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => row_to_post(&row),
            None => Err(DomainError::PostNotFound),
        }
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, author_first_name, author_last_name, title, content, created
            FROM posts
            ORDER BY created DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.iter().map(row_to_post).collect()
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(row.try_get("count")?)
    }

    async fn drop_database(&self) -> Result<(), DomainError> {
        tracing::warn!("Dropping all posts");

        sqlx::query("TRUNCATE posts")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// Keeps posts in process memory. Data is lost on restart.
pub struct InMemoryPostRepository {
    posts: tokio::sync::RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: tokio::sync::RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_many(&self, records: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        validate_batch(&records)?;

        let now = Utc::now();
        let inserted: Vec<Post> = records
            .into_iter()
            .map(|record| record.into_post(Uuid::new_v4(), now))
            .collect();

        self.posts.write().await.extend(inserted.iter().cloned());

        Ok(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or(DomainError::PostNotFound)
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(posts)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let len = self.posts.read().await.len();
        i64::try_from(len).map_err(|e| DomainError::InternalError(e.to_string()))
    }

    async fn drop_database(&self) -> Result<(), DomainError> {
        tracing::warn!("Dropping all posts");
        self.posts.write().await.clear();
        Ok(())
    }
}
