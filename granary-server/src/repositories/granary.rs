use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::Granary;

#[derive(Clone)]
pub struct GranaryRepository {
    storage: Arc<Storage>,
}

impl GranaryRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl GranaryRepository {
    pub async fn create(
        &self,
        item: &Granary,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO granaries (depot_id, name, last_collected_at, collection_status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.depot_id)
        .bind(&item.name)
        .bind(item.last_collected_at)
        .bind(&item.collection_status)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Granary>, Error> {
        let granary: Option<Granary> = sqlx::query_as("SELECT * FROM granaries WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(granary)
    }

    pub async fn find_in_transaction(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Option<Granary>, Error> {
        let granary: Option<Granary> = sqlx::query_as("SELECT * FROM granaries WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **transaction)
            .await?;

        Ok(granary)
    }

    pub async fn find_page(
        &self,
        limit: i64,
        offset: i64,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Granary>, Error> {
        let granaries: Vec<Granary> =
            sqlx::query_as("SELECT * FROM granaries ORDER BY id LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut **transaction)
                .await?;

        Ok(granaries)
    }

    pub async fn find_by_depot_id(
        &self,
        depot_id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Granary>, Error> {
        let granaries: Vec<Granary> =
            sqlx::query_as("SELECT * FROM granaries WHERE depot_id = $1 ORDER BY id")
                .bind(depot_id)
                .fetch_all(&mut **transaction)
                .await?;

        Ok(granaries)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &Granary,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE granaries
            SET depot_id = $1, name = $2
            WHERE id = $3
            "#,
        )
        .bind(item.depot_id)
        .bind(&item.name)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn update_collection(
        &self,
        id: i32,
        status: &str,
        last_collected_at: Option<OffsetDateTime>,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE granaries
            SET collection_status = $1, last_collected_at = COALESCE($2, last_collected_at)
            WHERE id = $3
            "#,
        )
        .bind(status)
        .bind(last_collected_at)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn delete(
        &self,
        id: i32,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query("DELETE FROM granaries WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::tests::{create_test_depot, setup_test_db};

    use super::*;

    fn sample(depot_id: i32, name: &str) -> Granary {
        Granary {
            id: 0,
            depot_id,
            name: name.to_string(),
            last_collected_at: None,
            collection_status: "idle".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_depot_id() {
        let storage = setup_test_db().await;
        let north = create_test_depot(storage.clone(), "North").await;
        let south = create_test_depot(storage.clone(), "South").await;
        let repo = GranaryRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.create(&sample(north.id, "A"), &mut tx).await.unwrap();
        repo.create(&sample(south.id, "B"), &mut tx).await.unwrap();
        repo.create(&sample(north.id, "C"), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = storage.get_pool().begin().await.unwrap();
        let found = repo.find_by_depot_id(north.id, &mut tx).await.unwrap();
        let page = repo.find_page(1, 1, &mut tx).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(page[0].name, "B");
        let names: Vec<_> = found.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_create_with_unknown_depot_fails() {
        let storage = setup_test_db().await;
        let repo = GranaryRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let result = repo.create(&sample(99, "A"), &mut tx).await;

        match result {
            Err(Error::Database(e)) => assert!(e.is_foreign_key_violation()),
            other => panic!("expected foreign key violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_collection_keeps_previous_timestamp() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let repo = GranaryRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&sample(depot.id, "A"), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let finished = datetime!(2024-03-01 08:30:00 UTC);
        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.update_collection(id, "idle", Some(finished), &mut tx)
            .await
            .unwrap();
        repo.update_collection(id, "collecting", None, &mut tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.collection_status, "collecting");
        assert_eq!(found.last_collected_at, Some(finished));
    }
}
