//! JWT access/refresh tokens
//!
//! Both tokens of a pair carry the same session id. Refresh tokens also carry
//! a unique `jti`, which is the key the session store tracks them under.

use chrono::{Duration, Utc};
use foodgram_core::Snowflake;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenType,
    /// Login session shared by the access and refresh token
    pub sid: String,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Freshly issued tokens
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// `jti` of the refresh token
    pub refresh_token_id: String,
    pub session_id: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Issues and verifies HS256 tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
    }

    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue a pair for a new login session
    pub fn issue(&self, user_id: Snowflake) -> Result<TokenPair, AppError> {
        self.issue_for_session(user_id, Uuid::new_v4().to_string())
    }

    /// Issue a pair that continues an existing session
    pub fn issue_for_session(
        &self,
        user_id: Snowflake,
        session_id: String,
    ) -> Result<TokenPair, AppError> {
        let access_token = self.encode(user_id, TokenType::Access, &session_id, Uuid::new_v4())?;
        let refresh_id = Uuid::new_v4();
        let refresh_token = self.encode(user_id, TokenType::Refresh, &session_id, refresh_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_token_id: refresh_id.to_string(),
            session_id,
            expires_in: self.access_token_expiry,
        })
    }

    fn encode(
        &self,
        user_id: Snowflake,
        typ: TokenType,
        session_id: &str,
        jti: Uuid,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let lifetime = match typ {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime)).timestamp(),
            typ,
            sid: session_id.to_string(),
            jti: jti.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode a token of the expected type
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        if data.claims.typ != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Refresh)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
