use std::sync::Arc;

use granary_api::{CreateUserRequest, Pagination as Page, UpdateUserRequest, UserResponse};

use crate::configs::{Pagination, Storage};
use crate::errors::{ServiceError, UserError};
use crate::models::User;
use crate::repositories::{DepotRepository, UserRepository};
use crate::services::{AuthService, Caller};

#[derive(Clone)]
pub struct UserService {
    storage: Arc<Storage>,
    pagination: Pagination,
    auth_service: AuthService,
    depot_repository: DepotRepository,
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(storage: Arc<Storage>, pagination: Pagination, auth_service: AuthService) -> Self {
        Self {
            depot_repository: DepotRepository::new(storage.clone()),
            user_repository: UserRepository::new(storage.clone()),
            auth_service,
            pagination,
            storage,
        }
    }

    pub async fn create_user(
        &self,
        caller: &Caller,
        request: CreateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let username = request.username.trim().to_string();
        if username.is_empty() || request.password.is_empty() {
            return Err(UserError::InvalidRequest.into());
        }
        self.ensure_unique(None, &username, request.email.as_deref()).await?;
        self.ensure_depot(request.depot_id).await?;

        let password = self
            .auth_service
            .hash(&request.password)
            .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

        let user = User {
            id: 0,
            username,
            email: request.email,
            full_name: request.full_name,
            phone: request.phone,
            role: request.role.to_string(),
            depot_id: request.depot_id,
            is_active: request.is_active,
            password,
        };

        let mut tx = self.storage.get_pool().begin().await?;
        let id = self.user_repository.create(&user, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            caller = %caller,
            user_id = id,
            role = %request.role,
            "user created"
        );

        self.get_user(id).await
    }

    pub async fn get_user(&self, id: i32) -> Result<UserResponse, ServiceError> {
        let user = self.find_user(id).await?;

        Ok(user.into())
    }

    pub async fn list_users(&self, page: Page) -> Result<Vec<UserResponse>, ServiceError> {
        let (limit, offset) = self.pagination.resolve(page);
        let users = self.user_repository.find_page(limit, offset).await?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Replaces the profile fields of an account. The password is not changed.
    pub async fn update_user(
        &self,
        caller: &Caller,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, ServiceError> {
        let mut user = self.find_user(id).await?;

        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::InvalidRequest.into());
        }
        self.ensure_unique(Some(id), &username, request.email.as_deref()).await?;
        self.ensure_depot(request.depot_id).await?;

        user.username = username;
        user.email = request.email;
        user.full_name = request.full_name;
        user.phone = request.phone;
        user.role = request.role.to_string();
        user.depot_id = request.depot_id;
        user.is_active = request.is_active;

        let mut tx = self.storage.get_pool().begin().await?;
        self.user_repository.update(id, &user, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, user_id = id, "user updated");

        self.get_user(id).await
    }

    pub async fn delete_user(&self, caller: &Caller, id: i32) -> Result<(), ServiceError> {
        self.find_user(id).await?;

        let mut tx = self.storage.get_pool().begin().await?;
        self.user_repository.delete(id, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(caller = %caller, user_id = id, "user deleted");

        Ok(())
    }

    async fn find_user(&self, id: i32) -> Result<User, ServiceError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::UserNotFound(id).into())
    }

    async fn ensure_unique(
        &self,
        id: Option<i32>,
        username: &str,
        email: Option<&str>,
    ) -> Result<(), ServiceError> {
        if let Some(existing) = self.user_repository.find_by_username(username).await? {
            if Some(existing.id) != id {
                return Err(UserError::UsernameExists.into());
            }
        }

        if let Some(email) = email {
            if let Some(existing) = self.user_repository.find_by_email(email).await? {
                if Some(existing.id) != id {
                    return Err(UserError::EmailExists.into());
                }
            }
        }

        Ok(())
    }

    async fn ensure_depot(&self, depot_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(depot_id) = depot_id else {
            return Ok(());
        };

        match self.depot_repository.find_by_id(depot_id).await? {
            Some(_) => Ok(()),
            None => Err(UserError::InvalidDepot(depot_id).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use granary_api::UserRole;

    use crate::errors::ErrorKind;
    use crate::tests::{create_test_depot, setup_test_db};

    use super::*;

    fn request(username: &str, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.map(str::to_string),
            full_name: None,
            phone: None,
            role: UserRole::Operator,
            depot_id: None,
            is_active: true,
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let storage = setup_test_db().await;
        let service = UserService::new(storage.clone(), Pagination::default(), AuthService::new());

        let user = service
            .create_user(&Caller::system(), request("keeper", Some("keeper@example.com")))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Operator);

        let stored = UserRepository::new(storage)
            .find_by_id(user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicates_conflict() {
        let storage = setup_test_db().await;
        let service = UserService::new(storage, Pagination::default(), AuthService::new());
        let caller = Caller::system();

        service
            .create_user(&caller, request("keeper", Some("keeper@example.com")))
            .await
            .unwrap();

        let error = service
            .create_user(&caller, request("keeper", None))
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::UserError(UserError::UsernameExists)));

        let error = service
            .create_user(&caller, request("other", Some("keeper@example.com")))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_user_rules() {
        let storage = setup_test_db().await;
        let depot = create_test_depot(storage.clone(), "North").await;
        let service = UserService::new(storage, Pagination::default(), AuthService::new());
        let caller = Caller::system();

        let user = service
            .create_user(&caller, request("keeper", Some("keeper@example.com")))
            .await
            .unwrap();
        service.create_user(&caller, request("other", None)).await.unwrap();

        let update = |username: &str, depot_id: Option<i32>| UpdateUserRequest {
            username: username.to_string(),
            email: Some("keeper@example.com".to_string()),
            full_name: Some("Wang Fang".to_string()),
            phone: None,
            role: UserRole::Admin,
            depot_id,
            is_active: true,
        };

        let error = service
            .update_user(&caller, user.id, update("other", None))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let error = service
            .update_user(&caller, user.id, update("keeper", Some(depot.id + 10)))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidReference);

        let updated = service
            .update_user(&caller, user.id, update("keeper", Some(depot.id)))
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::Admin);
        assert_eq!(updated.depot_id, Some(depot.id));
        assert_eq!(updated.full_name.as_deref(), Some("Wang Fang"));
    }
}
