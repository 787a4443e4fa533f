use clap::Parser;
use recipe_cook::{Config, recipe};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn init_logging(cfg: &Config) {
    if !cfg.debug_log {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut cfg = Config::parse();
    cfg.recipe_from_env_if_empty();
    init_logging(&cfg);

    let recipe = match &cfg.recipe {
        Some(path) => match recipe::load_recipe(path).await {
            Ok(recipe) => recipe,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load recipe");
                return Err(e.into());
            }
        },
        None => recipe::default_recipe(),
    };
    tracing::info!(title = %recipe.title, steps = recipe.total_steps(), "Starting recipe card");

    let result = if cfg.pipe {
        recipe_cook::ui::pipe::display_card_pipe(recipe, cfg.clone()).await
    } else {
        recipe_cook::ui::modern::display_card_modern(recipe, cfg.clone()).await
    };

    // Print error if any, for better diagnostics
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }
    Ok(())
}
