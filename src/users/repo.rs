use sqlx::PgPool;
use time::OffsetDateTime;

use crate::{auth::repo::Token, error::ApiError};

/// User record in the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by id.
    pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert the user and their registration token as one atomic unit.
    /// Either both rows exist afterwards or neither does.
    pub async fn create_with_token(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<(User, Token), ApiError> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ApiError::conflict("user is already exists")
            }
            other => ApiError::from(other),
        })?;

        let token = Token::insert(&mut tx, user.id).await?;
        tx.commit().await?;

        Ok((user, token))
    }

    /// Delete a user, returning the removed row. Tokens and advertisements go
    /// with it through the `ON DELETE CASCADE` constraints.
    pub async fn delete_by_id(db: &PgPool, id: i32) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Ids of advertisements owned by the user, oldest first.
    pub async fn advertisement_ids(db: &PgPool, user_id: i32) -> Result<Vec<i32>, ApiError> {
        let rows: Vec<(i32,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM advertisements
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
