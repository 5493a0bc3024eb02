use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use posts_client::{Author, CreatePostRequest, Post, PostsClient};
use uuid::Uuid;

const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL, falls back to POSTS_SERVER_URL
    #[arg(short, long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    List,

    Get {
        #[arg(short, long)]
        id: Uuid,
    },

    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// RFC 3339 timestamp, defaults to the server's clock
        #[arg(long)]
        created: Option<DateTime<Utc>>,
    },
}

fn server_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("POSTS_SERVER_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

fn author_from(first_name: Option<String>, last_name: Option<String>) -> Option<Author> {
    if first_name.is_none() && last_name.is_none() {
        return None;
    }
    Some(Author {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
    })
}

fn print_post(post: &Post) {
    println!("   ID: {}", post.id);
    println!("   Title: {}", post.title);
    println!("   Author: {}", post.author);
    println!("   Content: {}", post.content.as_deref().unwrap_or("-"));
    println!("   Created: {}", post.created);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = server_url(cli.server);
    println!("🔌 Connecting to: {}", server);
    let client = PostsClient::new(server);

    match cli.command {
        Commands::List => {
            let posts = client.list_posts().await.context("Failed to list posts")?;
            println!("✅ Found {} posts", posts.len());
            println!();

            if posts.is_empty() {
                println!("   No posts found");
            }
            for (i, post) in posts.iter().enumerate() {
                println!("   {}. [{}] {}", i + 1, post.id, post.title);
                println!("      Author: {}", post.author);
                println!("      Created: {}", post.created);
                if let Some(content) = &post.content {
                    println!("      Content: {}", truncate(content, 50));
                }
                println!();
            }
        }

        Commands::Get { id } => {
            println!("🔍 Getting post {}", id);

            match client.get_post(id).await {
                Ok(post) => {
                    println!("✅ Post retrieved:");
                    print_post(&post);
                }
                Err(e) if e.is_not_found() => {
                    println!("❌ Post {} not found", id);
                    println!("   Tip: Use 'list' command to see available posts");
                    std::process::exit(1);
                }
                Err(e) => return Err(e).context("Failed to get post"),
            }
        }

        Commands::Create {
            title,
            content,
            first_name,
            last_name,
            created,
        } => {
            println!("📝 Creating new post...");

            let request = CreatePostRequest {
                author: author_from(first_name, last_name),
                title,
                content,
                created,
            };

            match client.create_post(&request).await {
                Ok(post) => {
                    println!("✅ Post created successfully!");
                    print_post(&post);
                }
                Err(e) if e.is_invalid_request() => {
                    println!("❌ Rejected by server: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e).context("Failed to create post"),
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}
