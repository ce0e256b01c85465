use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;

/// Bearer credential handed out once, at registration. The owning user never
/// changes after the row is written.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Token {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
    pub user_id: i32,
}

impl Token {
    /// Find a token by its bearer id.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Token>, ApiError> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, created_at, user_id
            FROM tokens
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(token)
    }

    /// Insert a fresh token for `user_id` inside the caller's transaction, so
    /// registration commits the user and the token as one unit.
    pub async fn insert(tx: &mut Transaction<'_, Postgres>, user_id: i32) -> Result<Token, ApiError> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (id, user_id)
            VALUES ($1, $2)
            RETURNING id, created_at, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(token)
    }
}
