use crate::data::post_repository::PostRepository;
use crate::domain::post::{CreatePostRequest, PostResponse};
use crate::domain::{DomainError, NewPost};
use std::sync::Arc;
use uuid::Uuid;

pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<PostResponse, DomainError> {
        let record = NewPost::try_from(req)?;

        let post = self.post_repo.insert(record).await?;

        tracing::info!("Post created: id={}", post.id);

        Ok(PostResponse::from(post))
    }

    pub async fn get_post(&self, id: Uuid) -> Result<PostResponse, DomainError> {
        let post = self.post_repo.find_by_id(id).await?;
        Ok(PostResponse::from(post))
    }

    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, DomainError> {
        let posts = self.post_repo.list().await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub async fn count_posts(&self) -> Result<i64, DomainError> {
        self.post_repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::post_repository::InMemoryPostRepository;
    use crate::domain::Author;
    use crate::test_support::{Fixture, SEED_COUNT};

    fn service() -> (PostService, Arc<dyn PostRepository>) {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        (PostService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (service, _) = service();
        let created = service
            .create_post(CreatePostRequest {
                author: Some(Author::new("Ada", "Lovelace")),
                title: Some("Notes".to_string()),
                content: Some("On the analytical engine".to_string()),
                created: None,
            })
            .await
            .unwrap();

        let fetched = service.get_post(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.author, "Ada Lovelace");
    }

    #[tokio::test]
    async fn create_without_title_does_not_persist() {
        let (service, _) = service();
        let err = service
            .create_post(CreatePostRequest {
                content: Some("no title".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ValidationError(_)));
        assert_eq!(service.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_returns_seeded_posts() {
        let (service, repo) = service();
        let fixture = Fixture::setup(repo).await;

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), SEED_COUNT);
        assert!(fixture
            .seeded
            .iter()
            .all(|seeded| posts.iter().any(|p| p.id == seeded.id)));

        fixture.teardown().await;
        assert_eq!(service.count_posts().await.unwrap(), 0);
    }
}
