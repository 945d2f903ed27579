//! Fill an empty database with deterministic sample users, posts and reviews.

use anyhow::Context;
use blog_server::config::DatabaseConfig;
use blog_server::{database, init_tracing, seed};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Insert sample blog data", version)]
struct Args {
    /// Number of users to create.
    #[arg(long, default_value_t = 10)]
    users: usize,
    /// Number of blog posts to create.
    #[arg(long, default_value_t = 25)]
    posts: usize,
    /// Number of reviews to create.
    #[arg(long, default_value_t = 50)]
    reviews: usize,
    /// RNG seed; the same value always yields the same data.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Database URL. Overrides the configured one.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = DatabaseConfig::load(args.database_url).context("Failed to load config")?;
    let db = database::init_db(&config)
        .await
        .context("Failed to connect to database")?;

    let counts = seed::SeedCounts {
        users: args.users,
        posts: args.posts,
        reviews: args.reviews,
    };
    let data = seed::generate(counts, args.seed).context("Invalid seed counts")?;
    seed::insert(&db, &data)
        .await
        .context("Failed to insert sample data")?;

    info!(
        password = seed::SEED_PASSWORD,
        "Done. Every seeded user shares the same password"
    );
    Ok(())
}
