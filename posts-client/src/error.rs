use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostsClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Post not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl PostsClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PostsClientError::NotFound)
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, PostsClientError::InvalidRequest(_))
    }
}
