//! Image repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::ImageStore;
use crate::models::{Image, NewImage};

/// PostgreSQL-backed image repository
#[derive(Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    /// Create a new image repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for ImageRepository {
    async fn create(&self, new_image: &NewImage) -> DatabaseResult<Image> {
        sqlx::query_as::<_, Image>(
            r#"
            INSERT INTO images (id, url, filename, size, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, url, filename, size, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_image.url)
        .bind(&new_image.filename)
        .bind(new_image.size)
        .bind(new_image.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Image>> {
        sqlx::query_as::<_, Image>(
            r#"
            SELECT id, url, filename, size, user_id, created_at
            FROM images
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn list_by_user(&self, user_id: Uuid) -> DatabaseResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            r#"
            SELECT id, url, filename, size, user_id, created_at
            FROM images
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
