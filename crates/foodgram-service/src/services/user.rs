//! User service
//!
//! Handles registration, profiles and password changes.

use std::collections::HashSet;

use foodgram_common::{validate_password_strength, AppError, PasswordService};
use foodgram_core::{DomainError, Snowflake, User};
use tracing::{info, instrument, warn};

use crate::dto::{
    user_view, CreateUserRequest, PageParams, PageResponse, SetPasswordRequest,
    UserCreatedResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<UserCreatedResponse> {
        User::validate_username(request.username.trim())?;
        validate_password_strength(
            &request.password,
            &[request.username.as_str(), request.email.as_str()],
        )?;

        let user = User::new(
            self.ctx.generate_id(),
            &request.email,
            &request.username,
            &request.first_name,
            &request.last_name,
        );

        if self.ctx.user_repo().email_exists(&user.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&user.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        Ok(UserCreatedResponse::from(&user))
    }

    /// Paginated list of users
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        viewer: Option<Snowflake>,
        params: PageParams,
    ) -> ServiceResult<PageResponse<UserResponse>> {
        let page = self.ctx.user_repo().list(params.request()).await?;

        let ids: Vec<_> = page.items.iter().map(|u| u.id).collect();
        let followed = self.followed_among(viewer, &ids).await?;

        let results = page
            .items
            .iter()
            .map(|user| user_view(user, followed.contains(&user.id)))
            .collect();
        Ok(PageResponse::new(results, page.total, params))
    }

    /// Get one user as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        viewer: Option<Snowflake>,
        user_id: Snowflake,
    ) -> ServiceResult<UserResponse> {
        let user = self.get_entity(user_id).await?;
        let is_subscribed = match viewer {
            Some(viewer) => self.ctx.follow_repo().exists(viewer, user.id).await?,
            None => false,
        };
        Ok(user_view(&user, is_subscribed))
    }

    /// The authenticated user
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.get_entity(user_id).await?;
        Ok(user_view(&user, false))
    }

    /// Change the password after checking the current one
    #[instrument(skip(self, request))]
    pub async fn set_password(
        &self,
        user_id: Snowflake,
        request: SetPasswordRequest,
    ) -> ServiceResult<()> {
        let user = self.get_entity(user_id).await?;
        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::internal("user has no password hash"))?;

        if let Err(err) = check_current_password(
            self.ctx.password_service(),
            &request.current_password,
            &current_hash,
        ) {
            warn!(user_id = %user_id, error = %err, "Password change rejected");
            return Err(err);
        }

        validate_password_strength(
            &request.new_password,
            &[user.username.as_str(), user.email.as_str()],
        )?;

        let new_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx.user_repo().update_password(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Load a user or fail with 404
    pub async fn get_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Authors in `author_ids` that `viewer` follows; empty for anonymous viewers
    pub(crate) async fn followed_among(
        &self,
        viewer: Option<Snowflake>,
        author_ids: &[Snowflake],
    ) -> ServiceResult<HashSet<Snowflake>> {
        match viewer {
            Some(viewer) if !author_ids.is_empty() => Ok(self
                .ctx
                .follow_repo()
                .followed_among(viewer, author_ids)
                .await?
                .into_iter()
                .collect()),
            _ => Ok(HashSet::new()),
        }
    }
}

/// Only a mismatch is the caller's fault; a broken stored hash is a 500
fn check_current_password(
    passwords: &PasswordService,
    password: &str,
    hash: &str,
) -> ServiceResult<()> {
    match passwords.verify_or_error(password, hash) {
        Ok(()) => Ok(()),
        Err(AppError::InvalidCredentials) => {
            Err(ServiceError::validation("Current password is incorrect"))
        }
        Err(other) => Err(other.into()),
    }
}
