use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AdminUser;
use crate::errors::ApiError;
use crate::recipes::dto::{
    CreateRecipeRequest, UpdateRecipeRequest, RECIPE_CREATE_SCHEMA, RECIPE_UPDATE_SCHEMA,
};
use crate::recipes::repo::Recipe;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/all", get(list_recipes))
        .route("/recipes/:category", get(list_by_category))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/create", post(create_recipe))
        .route("/recipes/update/:id", put(update_recipe))
        .route("/recipes/delete/:id", delete(delete_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = Recipe::list_all(&state.db).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = Recipe::list_by_category(&state.db, &category).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state, payload, admin))]
pub async fn create_recipe(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(payload): Json<Value>,
) -> Result<Json<Recipe>, ApiError> {
    RECIPE_CREATE_SCHEMA.check(&payload)?;
    let body: CreateRecipeRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let recipe = Recipe::create(&state.db, &body).await?;
    info!(recipe_id = %recipe.id, user_id = %admin.0.sub, "recipe created");
    Ok(Json(recipe))
}

#[instrument(skip(state, payload, admin))]
pub async fn update_recipe(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Json<Recipe>, ApiError> {
    RECIPE_UPDATE_SCHEMA.check(&payload)?;
    let changes: UpdateRecipeRequest =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let recipe = Recipe::update(&state.db, id, &changes)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;
    info!(recipe_id = %recipe.id, user_id = %admin.0.sub, "recipe updated");
    Ok(Json(recipe))
}

#[instrument(skip(state, admin))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = Recipe::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("recipe"))?;
    info!(recipe_id = %recipe.id, user_id = %admin.0.sub, "recipe deleted");
    Ok(Json(recipe))
}
