use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::GranaryInfo;

#[derive(Clone)]
pub struct GranaryInfoRepository {
    storage: Arc<Storage>,
}

impl GranaryInfoRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl GranaryInfoRepository {
    pub async fn create(
        &self,
        item: &GranaryInfo,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO granary_infos (
                granary_id, manager, design_capacity, actual_capacity, storage_nature,
                grain_variety, entry_time, origin, grade, rough_rice_yield, moisture, remark
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(item.granary_id)
        .bind(&item.manager)
        .bind(item.design_capacity)
        .bind(item.actual_capacity)
        .bind(&item.storage_nature)
        .bind(&item.grain_variety)
        .bind(item.entry_time)
        .bind(&item.origin)
        .bind(&item.grade)
        .bind(item.rough_rice_yield)
        .bind(item.moisture)
        .bind(&item.remark)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_granary_id(&self, granary_id: i32) -> Result<Option<GranaryInfo>, Error> {
        let info: Option<GranaryInfo> =
            sqlx::query_as("SELECT * FROM granary_infos WHERE granary_id = $1")
                .bind(granary_id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(info)
    }

    /// Infos of the given granaries, read inside the caller's transaction.
    pub async fn find_by_granary_ids(
        &self,
        granary_ids: &[i32],
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<GranaryInfo>, Error> {
        let infos: Vec<GranaryInfo> = sqlx::query_as(
            r#"
            SELECT * FROM granary_infos
            WHERE granary_id IN (SELECT value FROM json_each($1))
            "#,
        )
        .bind(Json(granary_ids))
        .fetch_all(&mut **transaction)
        .await?;

        Ok(infos)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &GranaryInfo,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE granary_infos
            SET manager = $1, design_capacity = $2, actual_capacity = $3, storage_nature = $4,
                grain_variety = $5, entry_time = $6, origin = $7, grade = $8,
                rough_rice_yield = $9, moisture = $10, remark = $11
            WHERE id = $12
            "#,
        )
        .bind(&item.manager)
        .bind(item.design_capacity)
        .bind(item.actual_capacity)
        .bind(&item.storage_nature)
        .bind(&item.grain_variety)
        .bind(item.entry_time)
        .bind(&item.origin)
        .bind(&item.grade)
        .bind(item.rough_rice_yield)
        .bind(item.moisture)
        .bind(&item.remark)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }
}
