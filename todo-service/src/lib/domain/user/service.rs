use std::sync::Arc;

use async_trait::async_trait;
use auth::AccountLookup;
use auth::LookupError;

use crate::domain::pagination::Page;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn ensure_owner(actor: &User, id: &UserId) -> Result<(), UserError> {
        if actor.id != *id {
            tracing::warn!(actor = %actor.id, requested = %id, "Rejected access to another account");
            return Err(UserError::Forbidden);
        }
        Ok(())
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        actor: &User,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        Self::ensure_owner(actor, id)?;

        let user = User {
            username: command.username,
            email: command.email,
            password_hash: self.password_hasher.hash(command.password.expose())?,
            ..actor.clone()
        };

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, "User updated");
        Ok(updated)
    }

    async fn delete_user(&self, actor: &User, id: &UserId) -> Result<(), UserError> {
        Self::ensure_owner(actor, id)?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

/// Token subjects are email addresses, so identity resolution is an email lookup.
#[async_trait]
impl<UR> AccountLookup for UserService<UR>
where
    UR: UserRepository,
{
    type Account = User;

    async fn find_account_by_unique_key(&self, key: &str) -> Result<Option<User>, LookupError> {
        self.repository
            .find_by_email(key)
            .await
            .map_err(|e| LookupError(e.to_string()))
    }
}
