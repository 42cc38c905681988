// Seeds (or rotates) the login user from SEED_USER_EMAIL / SEED_USER_PASSWORD.
//
// Safe to re-run: an existing email gets its password hash replaced.

use anyhow::{Context, Result};
use server_core::domains::auth::{hash_password, User};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email = std::env::var("SEED_USER_EMAIL").context("SEED_USER_EMAIL must be set")?;
    let password = std::env::var("SEED_USER_PASSWORD").context("SEED_USER_PASSWORD must be set")?;

    // Same normalization as login, so the seeded credential always matches.
    let email = email.trim().to_lowercase();
    let password_hash = hash_password(&password)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let user = User::upsert(&pool, &email, &password_hash).await?;
    tracing::info!(user_id = %user.id, email = %user.email, "Seeded login user");

    Ok(())
}
