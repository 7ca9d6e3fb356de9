//! Provisioning binary: creates the admin account, the story and the first
//! photo section. Safe to run repeatedly.
//!
//! | Env Var          | Default    |
//! |------------------|------------|
//! | `DATABASE_URL`   | (required) |
//! | `ADMIN_USERNAME` | `admin`    |
//! | `ADMIN_PASSWORD` | (required) |

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sideludi_api::auth::password::hash_password;
use sideludi_core::content::DEFAULT_SECTION_TITLE;
use sideludi_db::models::photo::CreatePhotoSection;
use sideludi_db::models::user::CreateUser;
use sideludi_db::repositories::{PhotoSectionRepo, StoryRepo, UserRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sideludi_seed=info,sideludi_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    anyhow::ensure!(!password.is_empty(), "ADMIN_PASSWORD must not be empty");

    let pool = sideludi_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    sideludi_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    // --- Admin user (an existing password is never changed) ---
    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    let created = UserRepo::create_if_absent(
        &pool,
        &CreateUser {
            username: username.clone(),
            password_hash,
        },
    )
    .await
    .context("Failed to create admin user")?;
    match created {
        Some(user) => tracing::info!(user_id = user.id, %username, "Admin user created"),
        None => tracing::info!(%username, "Admin user already exists, left unchanged"),
    }

    // --- Story ---
    let story = StoryRepo::get_or_create_default(&pool)
        .await
        .context("Failed to create story")?;
    tracing::info!(story_id = story.id, "Story ready");

    // --- First photo section ---
    if PhotoSectionRepo::list(&pool)
        .await
        .context("Failed to list photo sections")?
        .is_empty()
    {
        let section = PhotoSectionRepo::create(
            &pool,
            &CreatePhotoSection {
                title: DEFAULT_SECTION_TITLE.to_string(),
            },
        )
        .await
        .context("Failed to create photo section")?;
        tracing::info!(section_id = section.id, "Photo section created");
    } else {
        tracing::info!("Photo sections already exist, none created");
    }

    tracing::info!("Seeding complete");
    Ok(())
}
