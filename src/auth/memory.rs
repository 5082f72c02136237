use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::repo::{StoreError, UserStore};
use crate::auth::repo_types::{NewUser, ProfileChanges, User};

/// `UserStore` kept in process memory. Email uniqueness is enforced under
/// the write lock, mirroring the table constraint.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count_by_email(&self, email: &str) -> usize {
        let users = self.users.read().await;
        users.values().filter(|u| u.email == email).count()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: None,
            profile_image: None,
            is_verified: false,
            verification_token: Some(new_user.verification_token),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn mark_verified(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.values_mut().find(|u| u.email == email).map(|u| {
            u.is_verified = true;
            u.verification_token = None;
            u.updated_at = OffsetDateTime::now_utc();
            u.clone()
        }))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|u| {
            if let Some(name) = changes.name {
                u.name = Some(name);
            }
            if let Some(image) = changes.profile_image {
                u.profile_image = Some(image);
            }
            u.updated_at = OffsetDateTime::now_utc();
            u.clone()
        }))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            verification_token: "token".into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.count_by_email("a@example.com").await, 1);
    }

    #[tokio::test]
    async fn mark_verified_clears_token() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let user = store.mark_verified("a@example.com").await.unwrap().unwrap();
        assert!(user.is_verified);
        assert!(user.verification_token.is_none());
        assert!(store.mark_verified("nobody@example.com").await.unwrap().is_none());
    }
}
