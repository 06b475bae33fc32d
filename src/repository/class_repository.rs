use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::GymClass,
    error::{AppError, Result},
    repository::ClassRepository,
};

#[derive(FromRow)]
struct ClassRow {
    id: String,
    name: String,
    description: String,
    trainer_id: String,
    capacity: i32,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    price_cents: i64,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteClassRepository {
    pool: SqlitePool,
}

impl SqliteClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_class(row: ClassRow) -> Result<GymClass> {
        Ok(GymClass {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            name: row.name,
            description: row.description,
            trainer_id: Uuid::parse_str(&row.trainer_id).map_err(|e| AppError::Database(e.to_string()))?,
            capacity: row.capacity,
            start_time: DateTime::from_naive_utc_and_offset(row.start_time, Utc),
            end_time: DateTime::from_naive_utc_and_offset(row.end_time, Utc),
            price_cents: row.price_cents,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl ClassRepository for SqliteClassRepository {
    async fn create(&self, class: GymClass) -> Result<GymClass> {
        sqlx::query(
            r#"
            INSERT INTO gym_classes (
                id, name, description, trainer_id, capacity,
                start_time, end_time, price_cents, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(class.id.to_string())
        .bind(&class.name)
        .bind(&class.description)
        .bind(class.trainer_id.to_string())
        .bind(class.capacity)
        .bind(class.start_time.naive_utc())
        .bind(class.end_time.naive_utc())
        .bind(class.price_cents)
        .bind(class.created_at.naive_utc())
        .bind(class.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(class.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created class".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GymClass>> {
        let row = sqlx::query_as::<_, ClassRow>(
            r#"
            SELECT id, name, description, trainer_id, capacity,
                   start_time, end_time, price_cents, created_at, updated_at
            FROM gym_classes
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_class(r)?)),
            None => Ok(None)
        }
    }

    async fn list(&self) -> Result<Vec<GymClass>> {
        let rows = sqlx::query_as::<_, ClassRow>(
            r#"
            SELECT id, name, description, trainer_id, capacity,
                   start_time, end_time, price_cents, created_at, updated_at
            FROM gym_classes
            ORDER BY start_time ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_class)
            .collect()
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM gym_classes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn count_starting_after(&self, instant: DateTime<Utc>) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM gym_classes WHERE start_time > ?"
        )
        .bind(instant.naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }
}
