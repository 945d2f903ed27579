//! Deterministic sample data for local development.
//!
//! Generation and insertion are split: [`generate`] is a pure function of the
//! requested counts and an RNG seed, and [`insert`] writes the result in a
//! single transaction. The same seed always produces the same rows.

use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use crate::entity::{blog_post, review, user};
use crate::models::{auth, blog_post as post_rules, review as review_rules};
use crate::utils::hash;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("failed to hash seed password: {0}")]
    Hash(String),

    #[error("cannot create posts or reviews without at least one user")]
    NoUsers,

    #[error("cannot create reviews without at least one blog post")]
    NoPosts,

    #[error("database already contains {0} users; refusing to seed")]
    NotEmpty(u64),
}

#[derive(Debug, Clone, Copy)]
pub struct SeedCounts {
    pub users: usize,
    pub posts: usize,
    pub reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub email: String,
}

/// `author` indexes into [`SampleData::users`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPost {
    pub title: String,
    pub content: String,
    pub author: usize,
}

/// `reviewer` and `post` index into the generated users and posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReview {
    pub content: String,
    pub rating: i32,
    pub reviewer: usize,
    pub post: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleData {
    pub users: Vec<SeedUser>,
    pub posts: Vec<SeedPost>,
    pub reviews: Vec<SeedReview>,
}

/// Generate sample rows that satisfy the same length and range rules the API
/// enforces.
///
/// # Errors
///
/// Returns [`SeedError::NoUsers`] when posts or reviews are requested without
/// users, and [`SeedError::NoPosts`] when reviews are requested without posts.
pub fn generate(counts: SeedCounts, seed: u64) -> Result<SampleData, SeedError> {
    if counts.users == 0 && (counts.posts > 0 || counts.reviews > 0) {
        return Err(SeedError::NoUsers);
    }
    if counts.posts == 0 && counts.reviews > 0 {
        return Err(SeedError::NoPosts);
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let users = (0..counts.users)
        .map(|i| generate_user(&mut rng, i))
        .collect();

    let posts = (0..counts.posts)
        .map(|_| SeedPost {
            title: generate_title(&mut rng),
            content: clip(
                Paragraph(1..4).fake_with_rng(&mut rng),
                post_rules::CONTENT_MAX,
            ),
            author: rng.random_range(0..counts.users),
        })
        .collect();

    let reviews = (0..counts.reviews)
        .map(|_| SeedReview {
            content: clip(
                Sentence(4..12).fake_with_rng(&mut rng),
                review_rules::CONTENT_MAX,
            ),
            rating: rng.random_range(review_rules::RATING_MIN..=review_rules::RATING_MAX) as i32,
            reviewer: rng.random_range(0..counts.users),
            post: rng.random_range(0..counts.posts),
        })
        .collect();

    Ok(SampleData {
        users,
        posts,
        reviews,
    })
}

/// Insert generated rows in one transaction. Refuses to run against a
/// database that already has users, since seeded usernames would collide.
pub async fn insert(db: &DatabaseConnection, data: &SampleData) -> Result<(), SeedError> {
    let existing = user::Entity::find().count(db).await?;
    if existing > 0 {
        return Err(SeedError::NotEmpty(existing));
    }

    // One hash serves every seeded account.
    let password = hash::hash_password(SEED_PASSWORD).map_err(|e| SeedError::Hash(e.to_string()))?;

    let txn = db.begin().await?;

    let mut user_ids = Vec::with_capacity(data.users.len());
    for seed_user in &data.users {
        let model = user::ActiveModel {
            username: Set(seed_user.username.clone()),
            email: Set(seed_user.email.clone()),
            password: Set(password.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        user_ids.push(model.id);
    }

    let mut post_ids = Vec::with_capacity(data.posts.len());
    for post in &data.posts {
        let model = blog_post::ActiveModel {
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            user_id: Set(user_ids[post.author]),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        post_ids.push(model.id);
    }

    for r in &data.reviews {
        review::ActiveModel {
            content: Set(r.content.clone()),
            rating: Set(r.rating),
            user_id: Set(user_ids[r.reviewer]),
            blogpost_id: Set(post_ids[r.post]),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        users = data.users.len(),
        posts = data.posts.len(),
        reviews = data.reviews.len(),
        "Seeded sample data"
    );
    Ok(())
}

/// The index suffix keeps usernames unique even when the faker repeats itself.
fn generate_user(rng: &mut StdRng, index: usize) -> SeedUser {
    let base: String = Username().fake_with_rng(rng);
    let suffix = format!("_{index}");
    let username = format!(
        "{}{suffix}",
        clip(base, auth::USERNAME_MAX - suffix.len())
    );
    let email = clip(
        format!("{}@example.com", username.to_lowercase()),
        auth::EMAIL_MAX,
    );
    SeedUser { username, email }
}

fn generate_title(rng: &mut StdRng) -> String {
    let sentence: String = Sentence(2..6).fake_with_rng(rng);
    clip(
        sentence.trim_end_matches('.').to_string(),
        post_rules::TITLE_MAX,
    )
}

/// Truncate to at most `max` characters.
fn clip(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}
