//! User repository implementation

use sqlx::PgPool;
use crate::models::User;
use crate::utils::errors::BowlBotError;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user by Telegram ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, BowlBotError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, username FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert the user or refresh its cached names
    pub async fn upsert(&self, user: &User) -> Result<(), BowlBotError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, username, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (id) DO UPDATE
            SET first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                username = EXCLUDED.username,
                updated_at = NOW()
            "#
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
