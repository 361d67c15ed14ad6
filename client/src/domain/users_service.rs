//! User records service.

use std::sync::Arc;

use crate::domain::ports::{ApiClient, ApiClientError, ApiClientExt, QueryParams};
use crate::domain::{NewUser, Role, User, UserId};

const USERS_PATH: &str = "/users";

/// Typed facade over the `/users` endpoints.
pub struct UsersService<C: ?Sized> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for UsersService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: ?Sized> UsersService<C> {
    /// Create a service backed by `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> UsersService<C>
where
    C: ApiClient + ?Sized,
{
    /// List users, restricted to one role when `role` is given.
    pub async fn get_users(&self, role: Option<Role>) -> Result<Vec<User>, ApiClientError> {
        let mut params = QueryParams::new();
        if let Some(role) = role {
            params.insert("role".to_owned(), role.as_str().to_owned());
        }
        self.client.get(USERS_PATH, params).await
    }

    /// List field agents; the same request as `get_users(Some(Role::Agent))`.
    pub async fn get_agents(&self) -> Result<Vec<User>, ApiClientError> {
        self.get_users(Some(Role::Agent)).await
    }

    /// Fetch one user by identifier.
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, ApiClientError> {
        self.client
            .get(&user_path(user_id), QueryParams::new())
            .await
    }

    /// Create an account and return the stored record.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User, ApiClientError> {
        self.client.post(USERS_PATH, new_user).await
    }

    /// Delete an account.
    pub async fn delete_user(&self, user_id: &UserId) -> Result<(), ApiClientError> {
        self.client.delete(&user_path(user_id)).await
    }
}

fn user_path(user_id: &UserId) -> String {
    format!("{USERS_PATH}/{user_id}")
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
