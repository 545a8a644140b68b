use async_trait::async_trait;
use meal_finder::views::{ADDED_TOAST, REMOVED_TOAST};
use meal_finder::{
    App, FavoritesStore, MealDbClient, MemoryStorage, Recipe, RecipeSource, RecipeSummary, Route,
    SearchSession, SourceError,
};
use mockito::Matcher;
use std::collections::HashMap;
use std::time::Duration;

/// In-memory catalog; searches for terms in `delays` take longer to answer
#[derive(Default)]
struct FakeCatalog {
    recipes: Vec<Recipe>,
    delays: HashMap<String, Duration>,
    fail_search: bool,
}

impl FakeCatalog {
    fn with_recipes() -> Self {
        let mut stew = Recipe::new("52874", "Beef Stew");
        stew.instructions = "Brown the beef in batches. Simmer for two hours.".to_string();
        FakeCatalog {
            recipes: vec![Recipe::new("52771", "Spicy Arrabiata Penne"), stew],
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecipeSource for FakeCatalog {
    async fn search_recipes(&self, term: &str) -> Result<Vec<RecipeSummary>, SourceError> {
        if let Some(delay) = self.delays.get(term) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_search {
            return Err(SourceError::SourceUnavailable("offline".to_string()));
        }
        let term = term.to_lowercase();
        Ok(self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&term))
            .map(Recipe::summary)
            .collect())
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Recipe, SourceError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}

fn app(catalog: FakeCatalog) -> App<FakeCatalog, MemoryStorage> {
    App::new(catalog, FavoritesStore::open(MemoryStorage::new()))
}

#[tokio::test]
async fn test_home_lists_catalog() {
    let app = app(FakeCatalog::with_recipes());
    let page = app.navigate(Route::parse("/")).await;
    assert!(!page.is_error());
    assert!(page.body.contains("Spicy Arrabiata Penne"));
    assert!(page.body.contains("Beef Stew"));
    assert!(page.render().starts_with("RecipeApp | [Home]"));
}

#[tokio::test]
async fn test_home_search_filters() {
    let app = app(FakeCatalog::with_recipes());
    let page = app.navigate(Route::parse("/?search=stew")).await;
    assert!(page.body.contains("Beef Stew"));
    assert!(!page.body.contains("Arrabiata"));
}

#[tokio::test]
async fn test_search_failure_renders_error_view() {
    let app = app(FakeCatalog {
        fail_search: true,
        ..FakeCatalog::with_recipes()
    });
    let page = app.navigate(Route::parse("/")).await;
    assert!(page.is_error());
    assert!(page.body.contains("Something went wrong"));
    assert!(page.body.contains("Error: Network error occurred"));
}

#[tokio::test]
async fn test_unknown_recipe_renders_error_view() {
    let app = app(FakeCatalog::with_recipes());
    let page = app.navigate(Route::parse("/recipe/1")).await;
    assert!(page.is_error());
    assert!(page.body.contains("Recipe not found"));
}

#[tokio::test]
async fn test_unknown_path_renders_error_view() {
    let app = app(FakeCatalog::with_recipes());
    let page = app.navigate(Route::parse("/settings")).await;
    assert_eq!(page.error.as_ref().and_then(|e| e.status), Some(404));
}

#[tokio::test]
async fn test_toggle_favorite_flow() {
    let mut app = app(FakeCatalog::with_recipes());

    assert_eq!(app.toggle_favorite("52874").await.unwrap(), ADDED_TOAST);
    let detail = app.navigate(Route::parse("/recipe/52874")).await;
    assert!(detail.body.starts_with("♥ Beef Stew"));

    let favorites = app.navigate(Route::Favorites).await;
    assert!(favorites.body.contains("1 recipe"));
    assert!(favorites.body.contains("Beef Stew"));

    assert_eq!(app.toggle_favorite("52874").await.unwrap(), REMOVED_TOAST);
    let favorites = app.navigate(Route::Favorites).await;
    assert!(favorites.body.contains("No favorites yet"));
}

#[tokio::test]
async fn test_toggle_unknown_recipe_leaves_favorites_untouched() {
    let mut app = app(FakeCatalog::with_recipes());
    let err = app.toggle_favorite("nope").await.unwrap_err();
    assert_eq!(err, SourceError::NotFound("nope".to_string()));
    assert!(app.favorites().is_empty());
}

#[tokio::test]
async fn test_remove_favorite_without_network() {
    let mut app = app(FakeCatalog::with_recipes());
    app.favorites_mut().add(Recipe::new("52874", "Beef Stew"));
    assert!(app.remove_favorite("52874"));
    assert!(!app.remove_favorite("52874"));
}

#[tokio::test]
async fn test_stale_search_response_discarded() {
    let mut catalog = FakeCatalog::with_recipes();
    catalog
        .delays
        .insert("beef".to_string(), Duration::from_millis(200));
    let session = SearchSession::new();

    // "beef" is dispatched first but answers after "penne"
    let (older, newer) = tokio::join!(session.search(&catalog, "beef"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.search(&catalog, "penne").await
    });

    assert_eq!(older.unwrap(), None);
    let newer = newer.unwrap().unwrap();
    assert_eq!(newer.len(), 1);
    assert_eq!(newer[0].id, "52771");
}

#[tokio::test]
async fn test_stale_search_page_shows_default_listing() {
    let mut catalog = FakeCatalog::with_recipes();
    catalog
        .delays
        .insert("stew".to_string(), Duration::from_millis(200));
    let app = app(catalog);

    // The "stew" search is dispatched first but answers after "penne"
    let (older, newer) = tokio::join!(app.navigate(Route::parse("/?search=stew")), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.navigate(Route::parse("/?search=penne")).await
    });

    assert!(!older.is_error());
    // Stew results were dropped, so the full listing is shown
    assert!(older.body.contains("Spicy Arrabiata Penne"));
    assert!(older.body.contains("Beef Stew"));

    assert!(newer.body.contains("Spicy Arrabiata Penne"));
    assert!(!newer.body.contains("Beef Stew"));
}

#[tokio::test]
async fn test_search_without_matches_keeps_listing() {
    let mut server = mockito::Server::new_async().await;
    let _listing = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals": [{"idMeal": "52874", "strMeal": "Beef Stew", "strMealThumb": "https://example.com/stew.jpg"}]}"#,
        )
        .create_async()
        .await;
    let _no_match = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "zzzz".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url(), None).unwrap();
    let app = App::new(client, FavoritesStore::open(MemoryStorage::new()));
    let page = app.navigate(Route::parse("/?search=zzzz")).await;

    assert!(!page.is_error());
    assert!(page.body.contains("Beef Stew"));
    assert!(!page.body.contains("Something went wrong"));
}

#[tokio::test]
async fn test_listing_failure_still_renders_error_view() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search.php")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let client = MealDbClient::with_base_url(server.url(), None).unwrap();
    let app = App::new(client, FavoritesStore::open(MemoryStorage::new()));
    let page = app.navigate(Route::parse("/?search=stew")).await;

    assert!(page.is_error());
    assert!(page.body.contains("Status: 500"));
}
