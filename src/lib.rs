pub mod app;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod router;
pub mod search;
pub mod source;
pub mod views;

pub use app::{App, Page};
pub use crate::config::AppConfig;
pub use error::{AppError, SourceError, StorageError};
pub use favorites::{FavoritesStore, FileStorage, MemoryStorage, Storage, StoreEvent};
pub use model::{Ingredient, Recipe, RecipeSummary};
pub use router::Route;
pub use search::SearchSession;
pub use source::{MealDbClient, RecipeSource};

/// Build a catalog client from configuration
pub fn client_from_config(config: &AppConfig) -> Result<MealDbClient, SourceError> {
    MealDbClient::with_base_url(&config.api_base_url, Some(config.request_timeout()))
}

/// Open the favorites store described by configuration and hydrate it
pub fn favorites_from_config(config: &AppConfig) -> FavoritesStore<FileStorage> {
    let storage = FileStorage::new(&config.storage_path);
    let mut store = FavoritesStore::with_key(storage, config.storage_key.clone());
    store.initialize();
    store
}

/// Search the public catalog with default settings
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meals = meal_finder::search_recipes("stew").await?;
/// for meal in meals {
///     println!("{} {}", meal.id, meal.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(term: &str) -> Result<Vec<RecipeSummary>, SourceError> {
    MealDbClient::new(None)?.search_recipes(term).await
}

/// Fetch one recipe from the public catalog with default settings
pub async fn get_recipe_by_id(id: &str) -> Result<Recipe, SourceError> {
    MealDbClient::new(None)?.get_recipe_by_id(id).await
}
