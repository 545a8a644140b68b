use std::fmt;

/// A navigable page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Recipe list, optionally filtered by a search term
    Home { search: Option<String> },
    Favorites,
    About,
    Recipe { id: String },
    /// Anything unmatched; renders the error view
    NotFound { path: String },
}

impl Route {
    /// Parse a path with an optional `?query` part
    pub fn parse(input: &str) -> Route {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .skip_while(|s| s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home {
                search: query.and_then(search_param),
            },
            ["favorites"] => Route::Favorites,
            ["about"] => Route::About,
            ["recipe", id] if !id.is_empty() => Route::Recipe {
                id: decode_component(id),
            },
            _ => Route::NotFound {
                path: input.to_string(),
            },
        }
    }

    /// Canonical path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Home { search: None } => "/".to_string(),
            Route::Home { search: Some(term) } => {
                format!("/?search={}", urlencoding::encode(term))
            }
            Route::Favorites => "/favorites".to_string(),
            Route::About => "/about".to_string(),
            Route::Recipe { id } => format!("/recipe/{}", urlencoding::encode(id)),
            Route::NotFound { path } => path.clone(),
        }
    }

    /// Label of the navigation link this route highlights, if any
    pub fn nav_label(&self) -> Option<&'static str> {
        match self {
            Route::Home { .. } => Some("Home"),
            Route::Favorites => Some("Favorites"),
            Route::About => Some("About"),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn search_param(query: &str) -> Option<String> {
    query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == "search")
        .map(|(_, value)| decode_component(&value.replace('+', " ")))
        .filter(|term| !term.trim().is_empty())
}

/// Percent-decode a URL component, keeping the raw text if it is not UTF-8
fn decode_component(value: &str) -> String {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Home { search: None });
        assert_eq!(Route::parse(""), Route::Home { search: None });
        assert_eq!(Route::parse("/favorites"), Route::Favorites);
        assert_eq!(Route::parse("/favorites/"), Route::Favorites);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(
            Route::parse("/recipe/52874"),
            Route::Recipe {
                id: "52874".to_string()
            }
        );
    }

    #[test]
    fn test_parse_search_query() {
        assert_eq!(
            Route::parse("/?search=beef%20stew"),
            Route::Home {
                search: Some("beef stew".to_string())
            }
        );
        assert_eq!(
            Route::parse("/?page=2&search=pie+crust"),
            Route::Home {
                search: Some("pie crust".to_string())
            }
        );
        assert_eq!(Route::parse("/?search="), Route::Home { search: None });
    }

    #[test]
    fn test_unknown_paths() {
        for path in ["/recipe", "/recipe/1/extra", "/settings"] {
            assert_eq!(
                Route::parse(path),
                Route::NotFound {
                    path: path.to_string()
                }
            );
        }
    }

    #[test]
    fn test_to_path_roundtrip() {
        let route = Route::Home {
            search: Some("mac & cheese".to_string()),
        };
        assert_eq!(route.to_path(), "/?search=mac%20%26%20cheese");
        assert_eq!(Route::parse(&route.to_path()), route);
    }

    #[test]
    fn test_non_ascii_search_roundtrip() {
        let route = Route::Home {
            search: Some("crème brûlée".to_string()),
        };
        assert_eq!(route.to_path(), "/?search=cr%C3%A8me%20br%C3%BBl%C3%A9e");
        assert_eq!(Route::parse(&route.to_path()), route);
    }

    #[test]
    fn test_recipe_id_decoded() {
        assert_eq!(
            Route::parse("/recipe/a%2Fb"),
            Route::Recipe {
                id: "a/b".to_string()
            }
        );
        assert_eq!(Route::parse("/recipe/a%2Fb").to_path(), "/recipe/a%2Fb");
    }
}
