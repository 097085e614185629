use sqlx::PgPool;
use tracing::info;

/// Ensure the users and posts tables exist.
///
/// Tables are lazily created at service startup to unblock environments
/// where no schema has been applied yet (fresh developer machines or CI
/// spins).
pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring users and posts tables exist");

    sqlx::query(USERS_TABLE).execute(pool).await?;
    sqlx::query(POSTS_TABLE).execute(pool).await?;

    Ok(())
}

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    firebase_uid VARCHAR(255) UNIQUE NOT NULL,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) UNIQUE NOT NULL,
    bio TEXT,
    profile_picture_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content TEXT NOT NULL,
    image_url TEXT,
    likes_count INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;
