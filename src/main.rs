use log::{debug, info};
use meal_finder::{client_from_config, favorites_from_config, App, AppConfig, AppError, Route};
use std::env;

const USAGE: &str = "Usage: meal-finder [PATH] [--toggle-favorite | --remove-favorite]

Paths:
  /                    recipe list (add ?search=TERM to search)
  /favorites           saved recipes
  /about               about this app
  /recipe/ID           recipe details";

#[derive(Debug, PartialEq)]
enum Action {
    Show,
    Toggle,
    Remove,
}

fn parse_args(args: &[String]) -> Result<(Route, Action), AppError> {
    let mut path = None;
    let mut action = Action::Show;

    for arg in args {
        match arg.as_str() {
            "--toggle-favorite" => action = Action::Toggle,
            "--remove-favorite" => action = Action::Remove,
            "-h" | "--help" => return Err(AppError::Usage(USAGE.to_string())),
            flag if flag.starts_with("--") => {
                return Err(AppError::Usage(format!(
                    "Unknown option: {}\n\n{}",
                    flag, USAGE
                )))
            }
            other if path.is_none() => path = Some(other.to_string()),
            other => {
                return Err(AppError::Usage(format!(
                    "Unexpected argument: {}\n\n{}",
                    other, USAGE
                )))
            }
        }
    }

    let route = Route::parse(path.as_deref().unwrap_or("/"));
    if action != Action::Show && !matches!(route, Route::Recipe { .. }) {
        return Err(AppError::Usage(
            "Favorite actions need a /recipe/ID path".to_string(),
        ));
    }
    Ok((route, action))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (route, action) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(AppError::Usage(msg)) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
        Err(e) => return Err(e),
    };

    let config = AppConfig::load()?;
    debug!("Using configuration: {:?}", config);

    let source = client_from_config(&config)?;
    let favorites = favorites_from_config(&config);
    let mut app = App::new(source, favorites);

    if let Route::Recipe { id } = &route {
        match action {
            Action::Toggle => {
                let toast = app.toggle_favorite(id).await?;
                println!("{}", toast);
            }
            Action::Remove => {
                if app.remove_favorite(id) {
                    println!("{}", meal_finder::views::REMOVED_TOAST);
                } else {
                    info!("Recipe {} was not a favorite", id);
                }
            }
            Action::Show => {}
        }
        if action != Action::Show {
            return Ok(());
        }
    }

    let page = app.navigate(route).await;
    println!("{}", page.render());
    if page.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_path_is_home() {
        let (route, action) = parse_args(&[]).unwrap();
        assert_eq!(route, Route::Home { search: None });
        assert_eq!(action, Action::Show);
    }

    #[test]
    fn test_toggle_requires_recipe_path() {
        assert!(parse_args(&args(&["/favorites", "--toggle-favorite"])).is_err());
        let (route, action) = parse_args(&args(&["/recipe/52874", "--toggle-favorite"])).unwrap();
        assert_eq!(
            route,
            Route::Recipe {
                id: "52874".to_string()
            }
        );
        assert_eq!(action, Action::Toggle);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(matches!(
            parse_args(&args(&["--verbose"])),
            Err(AppError::Usage(_))
        ));
    }
}
