use sqlx::PgPool;
use time::OffsetDateTime;

use crate::error::ApiError;

/// Advertisement record in the database. `user_id` is the creator and is
/// immutable after insert.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Advertisement {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub user_id: i32,
}

impl Advertisement {
    /// Find an advertisement by id.
    pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<Advertisement>, ApiError> {
        let adv = sqlx::query_as::<_, Advertisement>(
            r#"
            SELECT id, title, description, created_at, user_id
            FROM advertisements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(adv)
    }

    /// Insert a new advertisement owned by `user_id`. The owner can vanish
    /// between token lookup and insert; the FK violation surfaces as 400.
    pub async fn insert(
        db: &PgPool,
        title: &str,
        description: &str,
        user_id: i32,
    ) -> Result<Advertisement, ApiError> {
        let adv = sqlx::query_as::<_, Advertisement>(
            r#"
            INSERT INTO advertisements (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, created_at, user_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                ApiError::bad_request("user doesn`t exist")
            }
            other => ApiError::from(other),
        })?;
        Ok(adv)
    }

    /// Apply only the present fields; absent ones keep their stored value.
    pub async fn update(
        db: &PgPool,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Advertisement, ApiError> {
        let adv = sqlx::query_as::<_, Advertisement>(
            r#"
            UPDATE advertisements
            SET title = COALESCE($1, title),
                description = COALESCE($2, description)
            WHERE id = $3
            RETURNING id, title, description, created_at, user_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(adv)
    }

    /// Delete an advertisement by id.
    pub async fn delete(db: &PgPool, id: i32) -> Result<(), ApiError> {
        sqlx::query(r#"DELETE FROM advertisements WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
