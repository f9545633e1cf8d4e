//! PostgreSQL implementation of RecipeRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use foodgram_core::entities::{IngredientAmount, Recipe};
use foodgram_core::traits::{Page, PageRequest, RecipeFilter, RecipeRepository, RepoResult};
use foodgram_core::value_objects::Snowflake;

use crate::mappers::assemble_recipes;
use crate::models::{RecipeIngredientModel, RecipeModel, RecipeTagModel};

use super::error::{map_db_error, map_reference_violation, raw_ids, recipe_not_found};

const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.pub_date";

/// PostgreSQL implementation of RecipeRepository
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    /// Create a new PgRecipeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load tags and ingredient lines for a batch of recipe rows
    async fn with_details(&self, rows: Vec<RecipeModel>) -> RepoResult<Vec<Recipe>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tags = sqlx::query_as::<_, RecipeTagModel>(
            r"
            SELECT rt.recipe_id, t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.slug
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let ingredients = sqlx::query_as::<_, RecipeIngredientModel>(
            r"
            SELECT ri.recipe_id, i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.position
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(assemble_recipes(rows, tags, ingredients))
    }
}

/// Append the `AND ...` conditions of a filter to a query ending in `WHERE TRUE`
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    if let Some(author_id) = filter.author_id {
        qb.push(" AND r.author_id = ").push_bind(author_id.into_inner());
    }
    if !filter.tag_slugs.is_empty() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.recipe_id = r.id AND t.slug = ANY(",
        )
        .push_bind(filter.tag_slugs.clone())
        .push("))");
    }
    if let Some(user_id) = filter.favorited_by {
        qb.push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ")
            .push_bind(user_id.into_inner())
            .push(")");
    }
    if let Some(user_id) = filter.in_cart_of {
        qb.push(
            " AND EXISTS (SELECT 1 FROM shopping_cart sc WHERE sc.recipe_id = r.id AND sc.user_id = ",
        )
        .push_bind(user_id.into_inner())
        .push(")");
    }
}

async fn insert_ingredients(
    conn: &mut PgConnection,
    recipe_id: Snowflake,
    ingredients: &[IngredientAmount],
) -> RepoResult<()> {
    let ids: Vec<i64> = ingredients.iter().map(|i| i.ingredient_id.into_inner()).collect();
    let amounts: Vec<i32> = ingredients.iter().map(|i| i.amount).collect();
    let positions: Vec<i16> = (0..ingredients.len())
        .map(|p| i16::try_from(p).unwrap_or(i16::MAX))
        .collect();

    sqlx::query(
        r"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount, position)
        SELECT $1, line.ingredient_id, line.amount, line.position
        FROM UNNEST($2::BIGINT[], $3::INTEGER[], $4::SMALLINT[])
             AS line (ingredient_id, amount, position)
        ",
    )
    .bind(recipe_id.into_inner())
    .bind(ids)
    .bind(amounts)
    .bind(positions)
    .execute(conn)
    .await
    .map_err(map_reference_violation)?;

    Ok(())
}

async fn insert_tags(conn: &mut PgConnection, recipe_id: Snowflake, tag_ids: &[Snowflake]) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO recipe_tags (recipe_id, tag_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ",
    )
    .bind(recipe_id.into_inner())
    .bind(raw_ids(tag_ids))
    .execute(conn)
    .await
    .map_err(map_reference_violation)?;

    Ok(())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeModel>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match row {
            Some(row) => Ok(self.with_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> RepoResult<Page<Recipe>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM recipes r WHERE TRUE");
        push_filters(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE TRUE"));
        push_filters(&mut select, filter);
        select
            .push(" ORDER BY r.pub_date DESC, r.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = select
            .build_query_as::<RecipeModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page {
            items: self.with_details(rows).await?,
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_authors(
        &self,
        author_ids: &[Snowflake],
        limit_per_author: i64,
    ) -> RepoResult<Vec<Recipe>> {
        if author_ids.is_empty() || limit_per_author <= 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, RecipeModel>(&format!(
            r"
            SELECT {RECIPE_COLUMNS}
            FROM (
                SELECT recipes.*,
                       ROW_NUMBER() OVER (
                           PARTITION BY author_id ORDER BY pub_date DESC, id DESC
                       ) AS rn
                FROM recipes
                WHERE author_id = ANY($1)
            ) r
            WHERE r.rn <= $2
            ORDER BY r.author_id, r.pub_date DESC, r.id DESC
            "
        ))
        .bind(raw_ids(author_ids))
        .bind(limit_per_author)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_authors(
        &self,
        author_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT author_id, COUNT(*)
            FROM recipes
            WHERE author_id = ANY($1)
            GROUP BY author_id
            ",
        )
        .bind(raw_ids(author_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(author_id, count)| (Snowflake::new(author_id), count))
            .collect())
    }

    #[instrument(skip(self, recipe), fields(recipe_id = %recipe.id))]
    async fn create(
        &self,
        recipe: &Recipe,
        ingredients: &[IngredientAmount],
        tag_ids: &[Snowflake],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, author_id, name, image, text, cooking_time, pub_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(recipe.id.into_inner())
        .bind(recipe.author_id.into_inner())
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .bind(recipe.pub_date)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        insert_ingredients(&mut tx, recipe.id, ingredients).await?;
        insert_tags(&mut tx, recipe.id, tag_ids).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, recipe, ingredients, tag_ids), fields(recipe_id = %recipe.id))]
    async fn update(
        &self,
        recipe: &Recipe,
        ingredients: Option<&[IngredientAmount]>,
        tag_ids: Option<&[Snowflake]>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE recipes
            SET name = $2, image = $3, text = $4, cooking_time = $5
            WHERE id = $1
            ",
        )
        .bind(recipe.id.into_inner())
        .bind(&recipe.name)
        .bind(&recipe.image)
        .bind(&recipe.text)
        .bind(recipe.cooking_time)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(recipe_not_found(recipe.id));
        }

        if let Some(ingredients) = ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(recipe.id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            insert_ingredients(&mut tx, recipe.id, ingredients).await?;
        }

        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
                .bind(recipe.id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            insert_tags(&mut tx, recipe.id, tag_ids).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(recipe_not_found(id));
        }

        Ok(())
    }
}
