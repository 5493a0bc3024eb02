//! Seed and teardown helpers shared by the store and HTTP tests.
//!
//! Each test gets its own store handle: build one, call [`Fixture::setup`],
//! run the assertions, then [`Fixture::teardown`].

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::seq::SliceRandom;

use crate::data::post_repository::{PostRepository, PostgresPostRepository};
use crate::domain::{Author, NewPost, Post};
use crate::infrastructure::database::{create_pool, run_migrations};

/// Number of posts seeded before each test.
pub const SEED_COUNT: usize = 11;

const SEED_DATES: [&str; 6] = [
    "10/19/17", "04/08/99", "11/12/11", "09/30/86", "12/15/01", "01/27/88",
];

fn random_created() -> DateTime<Utc> {
    let raw = SEED_DATES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SEED_DATES[0]);
    let date = NaiveDate::parse_from_str(raw, "%m/%d/%y").expect("seed date parses");
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

pub fn fake_post() -> NewPost {
    let author = Author::new(FirstName().fake::<String>(), LastName().fake::<String>());
    let title: String = Sentence(3..7).fake();
    let content: String = Paragraph(2..5).fake();

    NewPost::new(author, title)
        .with_content(content)
        .with_created(random_created())
}

pub fn seed_posts() -> Vec<NewPost> {
    (0..SEED_COUNT).map(|_| fake_post()).collect()
}

pub struct Fixture {
    pub repo: Arc<dyn PostRepository>,
    pub seeded: Vec<Post>,
}

impl Fixture {
    pub async fn setup(repo: Arc<dyn PostRepository>) -> Self {
        tracing::info!("Seeding {} posts", SEED_COUNT);
        let seeded = repo
            .insert_many(seed_posts())
            .await
            .expect("seeding posts");
        Self { repo, seeded }
    }

    pub async fn teardown(self) {
        tracing::info!("Dropping database for reset");
        self.repo
            .drop_database()
            .await
            .expect("dropping database");
    }
}

/// Connects to `TEST_DATABASE_URL`, or returns `None` when it is unset so
/// Postgres-backed tests can be skipped.
pub async fn postgres_repository() -> Option<PostgresPostRepository> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping Postgres test");
        return None;
    };

    let pool = create_pool(&url, 2).await.expect("connecting to test database");
    run_migrations(&pool).await.expect("running migrations");
    Some(PostgresPostRepository::new(pool))
}
