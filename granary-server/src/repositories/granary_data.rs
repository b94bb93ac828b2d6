use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::{GranaryData, collected_at_key};

#[derive(Clone)]
pub struct GranaryDataRepository {
    storage: Arc<Storage>,
}

impl GranaryDataRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl GranaryDataRepository {
    pub async fn create(
        &self,
        item: &GranaryData,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO granary_data (granary_id, collected_at, sequence, temperatures, humidity)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.granary_id)
        .bind(collected_at_key(item.collected_at)?)
        .bind(item.sequence)
        .bind(&item.temperatures)
        .bind(item.humidity)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    /// Records inside the inclusive window, oldest first. A missing bound is open.
    pub async fn find_by_time_range(
        &self,
        granary_id: i32,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> Result<Vec<GranaryData>, Error> {
        let data: Vec<GranaryData> = sqlx::query_as(
            r#"
            SELECT * FROM granary_data
            WHERE granary_id = $1
                AND ($2 IS NULL OR collected_at >= $2)
                AND ($3 IS NULL OR collected_at <= $3)
            ORDER BY collected_at ASC, id ASC
            "#,
        )
        .bind(granary_id)
        .bind(start.map(collected_at_key).transpose()?)
        .bind(end.map(collected_at_key).transpose()?)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(data)
    }

    pub async fn find_latest(
        &self,
        granary_id: i32,
        limit: i64,
    ) -> Result<Vec<GranaryData>, Error> {
        let data: Vec<GranaryData> = sqlx::query_as(
            r#"
            SELECT * FROM granary_data
            WHERE granary_id = $1
            ORDER BY collected_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(granary_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(data)
    }
}
