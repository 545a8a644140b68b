mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::error::StorageError;
use crate::model::Recipe;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fmt;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "recipeFavorites";

/// Notifications emitted by [`FavoritesStore`].
///
/// Storage failures never reach callers of the store; subscribers can use
/// `StorageCorrupt` and `PersistFailed` to observe them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Initial load finished with `count` favorites
    Hydrated { count: usize },
    /// The persisted favorites could not be read; the set started empty
    StorageCorrupt { reason: String },
    Added { id: String },
    Removed { id: String },
    /// The full set was written to storage
    Persisted { count: usize },
    /// Writing failed; in-memory state remains authoritative
    PersistFailed { reason: String },
}

type Observer = Box<dyn Fn(&StoreEvent)>;

/// Session-scoped store of favorite recipes synchronized with durable storage.
///
/// The store is the only mutator of the favorites set. Every mutation runs to
/// completion under `&mut self` and is followed by a write of the whole set.
pub struct FavoritesStore<S: Storage> {
    storage: S,
    key: String,
    favorites: Vec<Recipe>,
    hydrated: bool,
    observers: Vec<Observer>,
}

impl<S: Storage> FavoritesStore<S> {
    /// Create an empty store. Call [`initialize`](Self::initialize) to load
    /// persisted favorites.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        FavoritesStore {
            storage,
            key: key.into(),
            favorites: Vec::new(),
            hydrated: false,
            observers: Vec::new(),
        }
    }

    /// Create a store and hydrate it from storage
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.initialize();
        store
    }

    /// Register a callback receiving every [`StoreEvent`]
    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    /// Load persisted favorites.
    ///
    /// A missing entry yields an empty set. An unreadable or unparseable entry
    /// is logged and also yields an empty set. Runs once; later calls are
    /// no-ops.
    pub fn initialize(&mut self) {
        if self.hydrated {
            debug!("Favorites already hydrated, skipping");
            return;
        }

        self.favorites = match self.load() {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Failed to load favorites from storage: {}", e);
                self.emit(StoreEvent::StorageCorrupt {
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };
        self.hydrated = true;

        info!("Loaded {} favorite recipe(s)", self.favorites.len());
        self.emit(StoreEvent::Hydrated {
            count: self.favorites.len(),
        });
    }

    fn load(&self) -> Result<Vec<Recipe>, StorageError> {
        let Some(blob) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let recipes: Vec<Recipe> =
            serde_json::from_str(&blob).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let mut seen = HashSet::new();
        let total = recipes.len();
        let unique: Vec<Recipe> = recipes
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();
        if unique.len() != total {
            warn!(
                "Dropped {} duplicate favorite(s) from storage",
                total - unique.len()
            );
        }
        Ok(unique)
    }

    /// Add a recipe unless one with the same id is already present.
    ///
    /// Returns whether the set changed.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        let changed = !self.is_favorited(&recipe.id);
        if changed {
            debug!("Adding '{}' ({}) to favorites", recipe.name, recipe.id);
            let id = recipe.id.clone();
            self.favorites.push(recipe);
            self.emit(StoreEvent::Added { id });
        }
        self.persist();
        changed
    }

    /// Remove the recipe with `id` if present. Returns whether the set changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|r| r.id != id);
        let changed = self.favorites.len() != before;
        if changed {
            debug!("Removed {} from favorites", id);
            self.emit(StoreEvent::Removed { id: id.to_string() });
        }
        self.persist();
        changed
    }

    pub fn is_favorited(&self, id: &str) -> bool {
        self.favorites.iter().any(|r| r.id == id)
    }

    /// Flip membership of `recipe`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, recipe: Recipe) -> bool {
        if self.is_favorited(&recipe.id) {
            self.remove(&recipe.id);
            false
        } else {
            self.add(recipe);
            true
        }
    }

    /// Write the whole set to storage, replacing the previous entry.
    ///
    /// Failures are logged and reported to subscribers only.
    pub fn persist(&mut self) {
        match self.try_persist() {
            Ok(()) => {
                debug!("Persisted {} favorite(s)", self.favorites.len());
                self.emit(StoreEvent::Persisted {
                    count: self.favorites.len(),
                });
            }
            Err(e) => {
                error!("Failed to save favorites to storage: {}", e);
                self.emit(StoreEvent::PersistFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn try_persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.favorites)?;
        self.storage.set_item(&self.key, &blob)
    }

    /// Favorites in insertion order
    pub fn favorites(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.favorites.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: Storage + fmt::Debug> fmt::Debug for FavoritesStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("favorites", &self.favorites)
            .field("hydrated", &self.hydrated)
            .field("observers", &self.observers.len())
            .finish()
    }
}
