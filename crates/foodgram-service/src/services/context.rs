//! Service context - dependency container for services
//!
//! Holds repositories, the refresh token store, auth helpers and the
//! settings services need at request time.

use std::sync::Arc;

use foodgram_cache::{RedisPool, RefreshTokenStore};
use foodgram_common::auth::{JwtService, PasswordService};
use foodgram_common::{ExportConfig, MediaConfig, PaginationConfig};
use foodgram_core::traits::{
    FavoriteRepository, FollowRepository, IngredientRepository, RecipeRepository,
    ShoppingCartRepository, TagRepository, UserRepository,
};
use foodgram_core::{Snowflake, SnowflakeGenerator};
use foodgram_db::PgPool;

use super::error::{ServiceError, ServiceResult};
use super::media::ImageStorage;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    tag_repo: Arc<dyn TagRepository>,
    ingredient_repo: Arc<dyn IngredientRepository>,
    recipe_repo: Arc<dyn RecipeRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,
    shopping_cart_repo: Arc<dyn ShoppingCartRepository>,

    refresh_token_store: RefreshTokenStore,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,

    images: ImageStorage,
    media: MediaConfig,
    export: ExportConfig,
    pagination: PaginationConfig,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    pub fn ingredient_repo(&self) -> &dyn IngredientRepository {
        self.ingredient_repo.as_ref()
    }

    pub fn recipe_repo(&self) -> &dyn RecipeRepository {
        self.recipe_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    pub fn shopping_cart_repo(&self) -> &dyn ShoppingCartRepository {
        self.shopping_cart_repo.as_ref()
    }

    // === Cache Stores ===

    /// Redis pool behind the refresh token store
    pub fn redis_pool(&self) -> &RedisPool {
        self.refresh_token_store.pool()
    }

    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    // === Settings ===

    pub fn images(&self) -> &ImageStorage {
        &self.images
    }

    pub fn media(&self) -> &MediaConfig {
        &self.media
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("media", &self.media)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    ingredient_repo: Option<Arc<dyn IngredientRepository>>,
    recipe_repo: Option<Arc<dyn RecipeRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    shopping_cart_repo: Option<Arc<dyn ShoppingCartRepository>>,
    refresh_token_store: Option<RefreshTokenStore>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    media: Option<MediaConfig>,
    export: Option<ExportConfig>,
    pagination: Option<PaginationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn ingredient_repo(mut self, repo: Arc<dyn IngredientRepository>) -> Self {
        self.ingredient_repo = Some(repo);
        self
    }

    pub fn recipe_repo(mut self, repo: Arc<dyn RecipeRepository>) -> Self {
        self.recipe_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn shopping_cart_repo(mut self, repo: Arc<dyn ShoppingCartRepository>) -> Self {
        self.shopping_cart_repo = Some(repo);
        self
    }

    pub fn refresh_token_store(mut self, store: RefreshTokenStore) -> Self {
        self.refresh_token_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn media(mut self, media: MediaConfig) -> Self {
        self.media = Some(media);
        self
    }

    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = Some(export);
        self
    }

    pub fn pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        let media = required(self.media, "media")?;
        Ok(ServiceContext {
            pool: required(self.pool, "pool")?,
            user_repo: required(self.user_repo, "user_repo")?,
            tag_repo: required(self.tag_repo, "tag_repo")?,
            ingredient_repo: required(self.ingredient_repo, "ingredient_repo")?,
            recipe_repo: required(self.recipe_repo, "recipe_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            favorite_repo: required(self.favorite_repo, "favorite_repo")?,
            shopping_cart_repo: required(self.shopping_cart_repo, "shopping_cart_repo")?,
            refresh_token_store: required(self.refresh_token_store, "refresh_token_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            images: ImageStorage::from_config(&media),
            media,
            export: required(self.export, "export")?,
            pagination: required(self.pagination, "pagination")?,
        })
    }
}
