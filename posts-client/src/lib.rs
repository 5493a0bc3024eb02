//! HTTP client for the posts API.
//!
//! ```no_run
//! # async fn run() -> Result<(), posts_client::PostsClientError> {
//! let client = posts_client::PostsClient::new("http://localhost:3000");
//! for post in client.list_posts().await? {
//!     println!("{} by {}", post.title, post.author);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http_client;
pub mod models;

pub use error::PostsClientError;
pub use http_client::PostsClient;
pub use models::{Author, CreatePostRequest, Post};
