use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Depot;

#[derive(Clone)]
pub struct DepotRepository {
    storage: Arc<Storage>,
}

impl DepotRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl DepotRepository {
    pub async fn create(
        &self,
        item: &Depot,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO depots (name, address, contact_person, phone, province, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&item.name)
        .bind(&item.address)
        .bind(&item.contact_person)
        .bind(&item.phone)
        .bind(&item.province)
        .bind(item.created_at)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Depot>, Error> {
        let depot: Option<Depot> = sqlx::query_as("SELECT * FROM depots WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(depot)
    }

    pub async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Depot>, Error> {
        let depots: Vec<Depot> =
            sqlx::query_as("SELECT * FROM depots ORDER BY id LIMIT $1 OFFSET $2")
                .bind(limit)
                .bind(offset)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(depots)
    }

    pub async fn update(
        &self,
        id: i32,
        item: &Depot,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE depots
            SET name = $1, address = $2, contact_person = $3, phone = $4, province = $5
            WHERE id = $6
            "#,
        )
        .bind(&item.name)
        .bind(&item.address)
        .bind(&item.contact_person)
        .bind(&item.phone)
        .bind(&item.province)
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
        sqlx::query("DELETE FROM depots WHERE id = $1")
            .bind(id)
            .execute(&mut **transaction)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::setup_test_db;

    use super::*;

    fn sample(name: &str) -> Depot {
        Depot {
            id: 0,
            name: name.to_string(),
            address: Some("12 Harbour Road".to_string()),
            contact_person: None,
            phone: None,
            province: Some("Hubei".to_string()),
            created_at: time::OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_depot() {
        let storage = setup_test_db().await;
        let repo = DepotRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&sample("North"), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "North");
        assert_eq!(found.province.as_deref(), Some("Hubei"));
        assert!(repo.find_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_page_orders_by_id() {
        let storage = setup_test_db().await;
        let repo = DepotRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        for name in ["A", "B", "C", "D"] {
            repo.create(&sample(name), &mut tx).await.unwrap();
        }
        tx.commit().await.unwrap();

        let page = repo.find_page(2, 1).await.unwrap();
        let names: Vec<_> = page.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_depot() {
        let storage = setup_test_db().await;
        let repo = DepotRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        let id = repo.create(&sample("Old"), &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let mut depot = repo.find_by_id(id).await.unwrap().unwrap();
        depot.name = "New".to_string();
        depot.address = None;

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.update(id, &depot, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "New");
        assert_eq!(found.address, None);

        let mut tx = storage.get_pool().begin().await.unwrap();
        repo.delete(id, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
