//! Plain-text renderers for each page.

use crate::error::SourceError;
use crate::model::{Recipe, RecipeSummary};
use crate::router::Route;
use std::fmt::Write;

pub const BRAND: &str = "RecipeApp";
const NAV_LINKS: [&str; 3] = ["Home", "Favorites", "About"];

pub const ADDED_TOAST: &str = "Your meal has been added to favorites";
pub const REMOVED_TOAST: &str = "Your meal has been removed from favorites";

/// Navigation bar with the active link in brackets
pub fn navigation(active: &Route) -> String {
    let active = active.nav_label();
    let links: Vec<String> = NAV_LINKS
        .iter()
        .map(|label| {
            if Some(*label) == active {
                format!("[{}]", label)
            } else {
                label.to_string()
            }
        })
        .collect();
    format!("{} | {}", BRAND, links.join("  "))
}

/// Home page: search results when there are any, otherwise the default listing
pub fn home(default_listing: &[RecipeSummary], search_results: &[RecipeSummary]) -> String {
    let meals = if search_results.is_empty() {
        default_listing
    } else {
        search_results
    };

    let mut out = String::new();
    if meals.is_empty() {
        out.push_str("No meals to show.\n");
    }
    for meal in meals {
        let _ = writeln!(out, "{}  (/recipe/{})", meal.name, meal.id);
        if !meal.thumbnail_url.is_empty() {
            let _ = writeln!(out, "    {}", meal.thumbnail_url);
        }
    }
    out
}

/// Recipe detail page
pub fn recipe_detail(recipe: &Recipe, favorited: bool) -> String {
    let mut out = String::new();
    let heart = if favorited { "♥" } else { "♡" };
    let _ = writeln!(out, "{} {}", heart, recipe.name);

    let meta: Vec<&str> = [recipe.category.as_deref(), recipe.region.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        let _ = writeln!(out, "{}", meta.join(" · "));
    }
    if !recipe.thumbnail_url.is_empty() {
        let _ = writeln!(out, "{}", recipe.thumbnail_url);
    }

    out.push_str("\nIngredients\n");
    for item in &recipe.ingredients {
        if item.measure.is_empty() {
            let _ = writeln!(out, "  - {}", item.name);
        } else {
            let _ = writeln!(out, "  - {} {}", item.measure, item.name);
        }
    }

    out.push_str("\nInstructions\n");
    for (n, step) in recipe.instruction_steps().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", n + 1, step);
    }

    if !recipe.links.is_empty() {
        out.push_str("\nAdditional Resources\n");
        if let Some(video) = &recipe.links.video {
            let _ = writeln!(out, "  Watch Video: {}", video);
        }
        if let Some(source) = &recipe.links.source {
            let _ = writeln!(out, "  Original Recipe: {}", source);
        }
    }
    out
}

/// Favorites page, with an empty state when nothing is saved
pub fn favorites(recipes: &[Recipe]) -> String {
    let mut out = String::from("My Favorites");
    if recipes.is_empty() {
        out.push_str("\n\nNo favorites yet\n");
        out.push_str(
            "Discover delicious recipes and save your favorites by clicking the heart icon\n",
        );
        out.push_str("Explore Recipes: /\n");
        return out;
    }

    let noun = if recipes.len() == 1 { "recipe" } else { "recipes" };
    let _ = writeln!(out, "  {} {}\n", recipes.len(), noun);
    for recipe in recipes {
        let meta: Vec<&str> = [recipe.category.as_deref(), recipe.region.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let _ = writeln!(out, "{}  (/recipe/{})", recipe.name, recipe.id);
        if !meta.is_empty() {
            let _ = writeln!(out, "    {}", meta.join(" · "));
        }
    }
    out
}

/// Message shown after toggling a favorite
pub fn toggle_toast(now_favorited: bool) -> &'static str {
    if now_favorited {
        ADDED_TOAST
    } else {
        REMOVED_TOAST
    }
}

pub fn about() -> String {
    "About Us\n\n\
     Discover culinary inspiration with our carefully curated collection of recipes, \
     designed to make cooking accessible and enjoyable for everyone.\n\n\
     Why Choose Us\n\
     \x20 - Easy Recipes: simple, step-by-step instructions that anyone can follow\n\
     \x20 - Healthy Choices: nutritious recipes that support your wellness goals\n\
     \x20 - Quick Search: find the perfect recipe instantly\n"
        .to_string()
}

/// What went wrong, as shown by the error view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub status: Option<u16>,
    pub message: String,
}

impl From<&SourceError> for ErrorInfo {
    fn from(err: &SourceError) -> Self {
        ErrorInfo {
            status: Some(err.status()),
            message: err.user_message(),
        }
    }
}

impl ErrorInfo {
    pub fn not_found(path: &str) -> Self {
        ErrorInfo {
            status: Some(404),
            message: format!("No route matches '{}'", path),
        }
    }
}

/// Shared error view offering recovery actions
pub fn error_page(info: &ErrorInfo) -> String {
    let mut out = String::from("⚠ Something went wrong\n\n");
    if let Some(status) = info.status {
        let _ = writeln!(out, "Status: {} {}", status, status_text(status));
    }
    let _ = writeln!(out, "Error: {}", info.message);
    out.push_str("\nGo to Home: /\nGo Back\nRefresh Page\n\n");
    out.push_str("If this error persists, please try refreshing the page or contact support.\n");
    out
}

fn status_text(status: u16) -> &'static str {
    match status {
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}
