use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Number of indexed ingredient slots on a catalog record
pub const INGREDIENT_SLOTS: usize = 20;

/// Minimum trimmed length for a piece of the instructions to count as a step
const MIN_STEP_LEN: usize = 10;

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Quantity text as given by the catalog; empty when absent
    #[serde(default)]
    pub measure: String,
}

/// Optional external resources attached to a recipe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ExternalLinks {
    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.source.is_none()
    }
}

/// A full recipe as shown on the detail page and stored in favorites.
///
/// `id` is the only identity key; every other field is descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "ExternalLinks::is_empty")]
    pub links: ExternalLinks,
}

impl Recipe {
    /// Minimal recipe with only identity and name set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Recipe {
            id: id.into(),
            name: name.into(),
            category: None,
            region: None,
            thumbnail_url: String::new(),
            instructions: String::new(),
            tags: Vec::new(),
            ingredients: Vec::new(),
            links: ExternalLinks::default(),
        }
    }

    /// Split the instructions into displayable steps.
    ///
    /// Breaks on line endings and on a period followed by whitespace, then
    /// drops fragments of ten characters or fewer.
    pub fn instruction_steps(&self) -> Vec<String> {
        split_steps(&self.instructions)
            .into_iter()
            .map(str::trim)
            .filter(|step| step.chars().count() > MIN_STEP_LEN)
            .map(str::to_string)
            .collect()
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
        }
    }
}

fn split_steps(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\n' => {
                pieces.push(&text[start..idx]);
                start = idx + 1;
            }
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                pieces.push(&text[start..idx]);
                chars.next();
                start = idx + 2;
            }
            '.' if matches!(chars.peek(), Some((_, next)) if next.is_whitespace()) => {
                pieces.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// The fields list screens need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail_url: String,
}

/// A raw record as returned by the catalog API.
///
/// Ingredient and measure slots are numbered fields
/// (`strIngredient1`..`strIngredient20`), so they are collected from the
/// flattened remainder.
#[derive(Debug, Clone, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl MealRecord {
    fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.extra
            .get(&format!("{}{}", prefix, index))
            .and_then(Value::as_str)
    }

    /// Collect the non-empty ingredient slots in order
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=INGREDIENT_SLOTS)
            .filter_map(|i| {
                let name = self.slot("strIngredient", i)?.trim();
                if name.is_empty() {
                    return None;
                }
                let measure = self
                    .slot("strMeasure", i)
                    .map(str::trim)
                    .unwrap_or_default();
                Some(Ingredient {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl From<MealRecord> for Recipe {
    fn from(record: MealRecord) -> Self {
        let ingredients = record.ingredients();
        let tags = record
            .tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Recipe {
            id: record.id,
            name: record.name,
            category: non_empty(record.category),
            region: non_empty(record.area),
            thumbnail_url: record.thumbnail.unwrap_or_default(),
            instructions: record.instructions.unwrap_or_default(),
            tags,
            ingredients,
            links: ExternalLinks {
                video: non_empty(record.youtube),
                source: non_empty(record.source),
            },
        }
    }
}
