use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::GranaryConfig;

#[derive(Clone)]
pub struct GranaryConfigRepository {
    storage: Arc<Storage>,
}

impl GranaryConfigRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl GranaryConfigRepository {
    pub async fn create(
        &self,
        item: &GranaryConfig,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO granary_configs (
                granary_id, extension_number, temperature_collector_count,
                humiture_collector_count, total_collector_count, start_index, end_index,
                th_index, cable_count, cable_point_count, device_number,
                subscribe_topic, publish_topic
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(item.granary_id)
        .bind(item.extension_number)
        .bind(item.temperature_collector_count)
        .bind(item.humiture_collector_count)
        .bind(item.total_collector_count)
        .bind(item.start_index)
        .bind(item.end_index)
        .bind(item.th_index)
        .bind(item.cable_count)
        .bind(item.cable_point_count)
        .bind(item.device_number)
        .bind(&item.subscribe_topic)
        .bind(&item.publish_topic)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_granary_id(
        &self,
        granary_id: i32,
    ) -> Result<Option<GranaryConfig>, Error> {
        let config: Option<GranaryConfig> =
            sqlx::query_as("SELECT * FROM granary_configs WHERE granary_id = $1")
                .bind(granary_id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(config)
    }

    /// Configs of the given granaries, read inside the caller's transaction.
    pub async fn find_by_granary_ids(
        &self,
        granary_ids: &[i32],
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<GranaryConfig>, Error> {
        let configs: Vec<GranaryConfig> = sqlx::query_as(
            r#"
            SELECT * FROM granary_configs
            WHERE granary_id IN (SELECT value FROM json_each($1))
            "#,
        )
        .bind(Json(granary_ids))
        .fetch_all(&mut **transaction)
        .await?;

        Ok(configs)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &GranaryConfig,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE granary_configs
            SET extension_number = $1, temperature_collector_count = $2,
                humiture_collector_count = $3, total_collector_count = $4, start_index = $5,
                end_index = $6, th_index = $7, cable_count = $8, cable_point_count = $9,
                device_number = $10, subscribe_topic = $11, publish_topic = $12
            WHERE id = $13
            "#,
        )
        .bind(item.extension_number)
        .bind(item.temperature_collector_count)
        .bind(item.humiture_collector_count)
        .bind(item.total_collector_count)
        .bind(item.start_index)
        .bind(item.end_index)
        .bind(item.th_index)
        .bind(item.cable_count)
        .bind(item.cable_point_count)
        .bind(item.device_number)
        .bind(&item.subscribe_topic)
        .bind(&item.publish_topic)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::{create_test_depot, create_test_granary, setup_test_db};

    use super::*;

    #[tokio::test]
    async fn test_second_config_violates_uniqueness() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let granary = create_test_granary(storage.clone(), depot.id, "A").await;
        let repo = GranaryConfigRepository::new(storage.clone());

        let config = GranaryConfig {
            granary_id: granary.id,
            extension_number: Some(7),
            ..Default::default()
        };

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&config, &mut tx).await.unwrap();
        let result = repo.create(&config, &mut tx).await;

        match result {
            Err(Error::Database(e)) => assert!(e.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_by_granary_ids() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let first = create_test_granary(storage.clone(), depot.id, "A").await;
        let second = create_test_granary(storage.clone(), depot.id, "B").await;
        let repo = GranaryConfigRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        for granary_id in [first.id, second.id] {
            let config = GranaryConfig {
                granary_id,
                device_number: Some(granary_id * 10),
                ..Default::default()
            };
            repo.create(&config, &mut tx).await.unwrap();
        }
        tx.commit().await.unwrap();

        let mut tx = storage.get_pool().begin().await.unwrap();
        let one = repo.find_by_granary_ids(&[second.id], &mut tx).await.unwrap();
        let both = repo
            .find_by_granary_ids(&[first.id, second.id], &mut tx)
            .await
            .unwrap();
        let none = repo.find_by_granary_ids(&[], &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(one.len(), 1);
        assert_eq!(one[0].device_number, Some(second.id * 10));
        assert_eq!(both.len(), 2);
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_config() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let granary = create_test_granary(storage.clone(), depot.id, "A").await;
        let repo = GranaryConfigRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo
            .create(
                &GranaryConfig {
                    granary_id: granary.id,
                    cable_count: Some(4),
                    ..Default::default()
                },
                &mut tx,
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut config = repo.find_by_granary_id(granary.id).await.unwrap().unwrap();
        assert_eq!(config.id, id);
        config.subscribe_topic = Some("granary/a/down".to_string());

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.update(id, &config, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_granary_id(granary.id).await.unwrap().unwrap();
        assert_eq!(found, config);
    }
}
