//! PostgreSQL backend. All collections share one `resources` table and every
//! row is namespaced by the store id the process was started with.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, types::Json};

use crate::{ResourceStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    store_id: String,
}

impl PgStore {
    pub fn new(pool: PgPool, store_id: impl Into<String>) -> Self {
        Self {
            pool,
            store_id: store_id.into(),
        }
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn get(&self, resource: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let value = sqlx::query_scalar::<_, Json<Value>>(
            // language=PostgreSQL
            r#"
                SELECT value
                FROM resources
                WHERE store_id = $1 AND resource = $2 AND key = $3
            "#,
        )
        .bind(&self.store_id)
        .bind(resource)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.map(|Json(value)| value))
    }

    async fn set(&self, resource: &str, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            // language=PostgreSQL
            r#"
                INSERT INTO resources (store_id, resource, key, value)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (store_id, resource, key)
                DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(&self.store_id)
        .bind(resource)
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, resource: &str) -> Result<Vec<Value>, StoreError> {
        let values = sqlx::query_scalar::<_, Json<Value>>(
            // language=PostgreSQL
            r#"
                SELECT value
                FROM resources
                WHERE store_id = $1 AND resource = $2
                ORDER BY created_at, key
            "#,
        )
        .bind(&self.store_id)
        .bind(resource)
        .fetch_all(&self.pool)
        .await?;

        Ok(values.into_iter().map(|Json(value)| value).collect())
    }

    async fn remove(&self, resource: &str, key: &str) -> Result<(), StoreError> {
        sqlx::query(
            // language=PostgreSQL
            r#"
                DELETE FROM resources
                WHERE store_id = $1 AND resource = $2 AND key = $3
            "#,
        )
        .bind(&self.store_id)
        .bind(resource)
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
