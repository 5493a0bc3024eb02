use crate::error::PostsClientError;
use crate::models::{CreatePostRequest, ErrorResponse, Post};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PostsClient {
    client: Client,
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, PostsClientError> {
        let url = self.url("/posts");
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<Vec<Post>>().await?),
            status => Err(error_from(status, response).await),
        }
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, PostsClientError> {
        let url = self.url(&format!("/posts/{}", id));
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        handle_post_response(response).await
    }

    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post, PostsClientError> {
        let url = self.url("/posts");
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(req).send().await?;
        handle_post_response(response).await
    }
}

async fn handle_post_response(response: Response) -> Result<Post, PostsClientError> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED => Ok(response.json::<Post>().await?),
        status => Err(error_from(status, response).await),
    }
}

async fn error_from(status: StatusCode, response: Response) -> PostsClientError {
    if status == StatusCode::NOT_FOUND {
        return PostsClientError::NotFound;
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    if status.is_client_error() {
        PostsClientError::InvalidRequest(message)
    } else {
        PostsClientError::ServerError(format!("HTTP {}: {}", status, message))
    }
}
