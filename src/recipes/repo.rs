use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::recipes::dto::{CreateRecipeRequest, UpdateRecipeRequest};

/// Recipe record in the database. Recipes carry no owner; any admin
/// may mutate any recipe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub rating: f64,
    pub category: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Recipe {
    pub async fn list_all(db: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, description, image, rating, category,
                   ingredients, instructions, created_at, updated_at
            FROM recipes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn list_by_category(
        db: &PgPool,
        category: &str,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, description, image, rating, category,
                   ingredients, instructions, created_at, updated_at
            FROM recipes
            WHERE category = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(db)
        .await
    }

    pub async fn create(db: &PgPool, new: &CreateRecipeRequest) -> Result<Recipe, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, description, image, rating, category,
                                 ingredients, instructions)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, image, rating, category,
                      ingredients, instructions, created_at, updated_at
            "#,
        )
        .bind(new.title.trim())
        .bind(new.description.trim())
        .bind(new.image.trim())
        .bind(new.rating)
        .bind(new.category.trim())
        .bind(&new.ingredients)
        .bind(&new.instructions)
        .fetch_one(db)
        .await
    }

    /// Partial update; absent fields keep their stored value. Returns
    /// `None` when no recipe has the given id.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        changes: &UpdateRecipeRequest,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET title        = COALESCE($2, title),
                description  = COALESCE($3, description),
                image        = COALESCE($4, image),
                rating       = COALESCE($5, rating),
                category     = COALESCE($6, category),
                ingredients  = COALESCE($7, ingredients),
                instructions = COALESCE($8, instructions),
                updated_at   = now()
            WHERE id = $1
            RETURNING id, title, description, image, rating, category,
                      ingredients, instructions, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref().map(str::trim))
        .bind(changes.description.as_deref().map(str::trim))
        .bind(changes.image.as_deref().map(str::trim))
        .bind(changes.rating)
        .bind(changes.category.as_deref().map(str::trim))
        .bind(changes.ingredients.as_deref())
        .bind(changes.instructions.as_deref())
        .fetch_optional(db)
        .await
    }

    /// Returns the deleted recipe, or `None` when no recipe has the
    /// given id.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(
            r#"
            DELETE FROM recipes
            WHERE id = $1
            RETURNING id, title, description, image, rating, category,
                      ingredients, instructions, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}
