use crate::error::SourceError;
use crate::favorites::{FavoritesStore, Storage};
use crate::router::Route;
use crate::search::SearchSession;
use crate::source::RecipeSource;
use crate::views::{self, ErrorInfo};
use log::{debug, warn};

/// A rendered navigation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub body: String,
    /// Set when the error view was rendered instead of the page
    pub error: Option<ErrorInfo>,
}

impl Page {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Page body under the navigation bar
    pub fn render(&self) -> String {
        format!("{}\n\n{}", views::navigation(&self.route), self.body)
    }
}

/// Composes the recipe source and the favorites store into pages.
///
/// Both collaborators are constructed by the caller and handed in.
pub struct App<R: RecipeSource, S: Storage> {
    source: R,
    favorites: FavoritesStore<S>,
    searches: SearchSession,
}

impl<R: RecipeSource, S: Storage> App<R, S> {
    pub fn new(source: R, favorites: FavoritesStore<S>) -> Self {
        App {
            source,
            favorites,
            searches: SearchSession::new(),
        }
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore<S> {
        &mut self.favorites
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Load and render `route`. Catalog failures and unknown paths render
    /// the error view instead of propagating.
    pub async fn navigate(&self, route: Route) -> Page {
        if let Route::NotFound { path } = &route {
            let info = ErrorInfo::not_found(path);
            return Page {
                body: views::error_page(&info),
                route,
                error: Some(info),
            };
        }

        match self.load(&route).await {
            Ok(body) => Page {
                route,
                body,
                error: None,
            },
            Err(e) => {
                warn!("Failed to load {}: {}", route, e);
                let info = ErrorInfo::from(&e);
                Page {
                    body: views::error_page(&info),
                    route,
                    error: Some(info),
                }
            }
        }
    }

    async fn load(&self, route: &Route) -> Result<String, SourceError> {
        match route {
            Route::Home { search } => {
                let listing = self.source.search_recipes("").await?;
                // A failed or superseded search leaves the default listing on screen
                let results = match search {
                    Some(term) => match self.searches.search(&self.source, term).await {
                        Ok(results) => results.unwrap_or_default(),
                        Err(e) => {
                            warn!("Search for '{}' failed: {}", term, e);
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                };
                Ok(views::home(&listing, &results))
            }
            Route::Recipe { id } => {
                let recipe = self.source.get_recipe_by_id(id).await?;
                Ok(views::recipe_detail(
                    &recipe,
                    self.favorites.is_favorited(&recipe.id),
                ))
            }
            Route::Favorites => Ok(views::favorites(self.favorites.favorites())),
            Route::About => Ok(views::about()),
            Route::NotFound { path } => Ok(views::error_page(&ErrorInfo::not_found(path))),
        }
    }

    /// Fetch the recipe and flip its favorite state. Returns the toast text.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<&'static str, SourceError> {
        let recipe = self.source.get_recipe_by_id(id).await?;
        let now_favorited = self.favorites.toggle(recipe);
        debug!("Recipe {} favorited: {}", id, now_favorited);
        Ok(views::toggle_toast(now_favorited))
    }

    /// Remove a favorite without contacting the catalog
    pub fn remove_favorite(&mut self, id: &str) -> bool {
        self.favorites.remove(id)
    }
}
