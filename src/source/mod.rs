mod mealdb;

pub use mealdb::MealDbClient;

use crate::error::SourceError;
use crate::model::{Recipe, RecipeSummary};
use async_trait::async_trait;

/// Read-only access to a recipe catalog
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Search recipes by free-text term; an empty term lists the default catalog
    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeSummary>, SourceError>;

    /// Look up one recipe by id
    async fn get_recipe_by_id(&self, id: &str) -> Result<Recipe, SourceError>;
}
