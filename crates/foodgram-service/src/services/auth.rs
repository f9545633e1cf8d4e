//! Authentication service
//!
//! Handles login, token refresh, logout and access token checks.

use foodgram_cache::RefreshSession;
use foodgram_common::{AppError, TokenPair};
use foodgram_core::Snowflake;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, RefreshTokenRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        let pair = self.ctx.jwt_service().issue(user.id)?;
        self.store_session(user.id, &pair).await?;

        info!(user_id = %user.id, session_id = %pair.session_id, "User logged in");
        Ok(Self::token_response(pair))
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// Refresh tokens are single use; the new pair continues the same session.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<TokenResponse> {
        let claims = self.ctx.jwt_service().verify_refresh(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let session = self
            .ctx
            .refresh_token_store()
            .consume(&claims.jti)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh token was revoked or already used");
                AppError::InvalidToken
            })?;
        if session.user_id != user_id || session.session_id != claims.sid {
            warn!(user_id = %user_id, "Refresh token does not match its session");
            return Err(AppError::InvalidToken.into());
        }

        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(AppError::InvalidToken.into());
        }

        let pair = self
            .ctx
            .jwt_service()
            .issue_for_session(user_id, session.session_id)?;
        self.store_session(user_id, &pair).await?;

        info!(user_id = %user_id, "Token pair refreshed");
        Ok(Self::token_response(pair))
    }

    /// Revoke every refresh session of the user
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        let revoked = self
            .ctx
            .refresh_token_store()
            .revoke_all_for_user(user_id)
            .await?;

        info!(user_id = %user_id, revoked, "User logged out");
        Ok(())
    }

    /// Resolve the user id of a bearer access token
    pub fn authenticate(&self, access_token: &str) -> ServiceResult<Snowflake> {
        let claims = self.ctx.jwt_service().verify_access(access_token)?;
        Ok(claims.user_id()?)
    }

    async fn store_session(&self, user_id: Snowflake, pair: &TokenPair) -> ServiceResult<()> {
        let session = RefreshSession::new(user_id, pair.session_id.clone());
        self.ctx
            .refresh_token_store()
            .store(&pair.refresh_token_id, &session)
            .await?;
        Ok(())
    }

    fn token_response(pair: TokenPair) -> TokenResponse {
        TokenResponse::bearer(pair.access_token, pair.refresh_token, pair.expires_in)
    }
}
