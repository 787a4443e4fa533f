// recipe.rs: Recipe content shown on the card and how it is loaded

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid recipe: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub title: String,
    pub text: String,
}

/// A single recipe: what the card lists and how long cooking takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    /// Total cooking time driving the countdown.
    pub total_minutes: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn total_time_seconds(&self) -> u32 {
        self.total_minutes.saturating_mul(60)
    }

    /// Steps are numbered from 1 on the card.
    pub fn step(&self, number: usize) -> Option<&RecipeStep> {
        number.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.steps.is_empty() {
            return Err(RecipeError::Invalid("recipe has no steps".into()));
        }
        if self.total_minutes == 0 {
            return Err(RecipeError::Invalid("total_minutes must be positive".into()));
        }
        Ok(())
    }
}

fn step(title: &str, text: &str) -> RecipeStep {
    RecipeStep {
        title: title.to_string(),
        text: text.to_string(),
    }
}

static DEFAULT_RECIPE: Lazy<Recipe> = Lazy::new(|| Recipe {
    title: "Creamy Garlic Mushroom Pasta".to_string(),
    total_minutes: 27,
    ingredients: [
        "250 g penne",
        "300 g chestnut mushrooms, sliced",
        "4 cloves garlic, minced",
        "2 tbsp butter",
        "1 tbsp olive oil",
        "200 ml double cream",
        "50 g parmesan, grated",
        "Handful of fresh parsley",
        "Salt and black pepper",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect(),
    steps: vec![
        step(
            "Boil the pasta",
            "Bring a large pot of salted water to the boil and cook the penne until al dente. Reserve a mug of pasta water before draining.",
        ),
        step(
            "Brown the mushrooms",
            "Heat the olive oil and half the butter in a wide pan. Fry the mushrooms over high heat until golden, about 6 minutes.",
        ),
        step(
            "Add the garlic",
            "Lower the heat, add the remaining butter and the garlic, and cook for one minute until fragrant.",
        ),
        step(
            "Make the sauce",
            "Pour in the cream, season with salt and pepper, and simmer gently for 3 minutes until slightly thickened.",
        ),
        step(
            "Combine",
            "Toss the drained pasta through the sauce with the parmesan, loosening with pasta water as needed.",
        ),
        step(
            "Serve",
            "Scatter over the chopped parsley, add a final grind of pepper and serve straight away.",
        ),
    ],
});

/// The recipe shipped with the binary: 6 steps, 27 minutes.
pub fn default_recipe() -> Recipe {
    DEFAULT_RECIPE.clone()
}

pub fn parse_recipe(json: &str) -> Result<Recipe, RecipeError> {
    let recipe: Recipe = serde_json::from_str(json)?;
    recipe.validate()?;
    Ok(recipe)
}

/// Loads a recipe from a JSON file.
pub async fn load_recipe(path: &Path) -> Result<Recipe, RecipeError> {
    let contents = fs::read_to_string(path).await?;
    let recipe = parse_recipe(&contents)?;
    tracing::info!(
        path = %path.display(),
        steps = recipe.total_steps(),
        minutes = recipe.total_minutes,
        "Loaded recipe"
    );
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recipe_matches_card() {
        let recipe = default_recipe();
        assert_eq!(recipe.total_steps(), 6);
        assert_eq!(recipe.total_time_seconds(), 1620);
        assert!(recipe.validate().is_ok());
    }

    #[test]
    fn steps_are_one_based() {
        let recipe = default_recipe();
        assert!(recipe.step(0).is_none());
        assert_eq!(recipe.step(1).map(|s| s.title.as_str()), Some("Boil the pasta"));
        assert_eq!(recipe.step(6).map(|s| s.title.as_str()), Some("Serve"));
        assert!(recipe.step(7).is_none());
    }

    #[test]
    fn parse_accepts_missing_ingredients() {
        let json = r#"{"title":"Toast","total_minutes":3,"steps":[{"title":"Toast","text":"Toast the bread."}]}"#;
        let recipe = parse_recipe(json).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.total_time_seconds(), 180);
    }

    #[test]
    fn parse_rejects_empty_steps_and_zero_time() {
        let no_steps = r#"{"title":"Air","total_minutes":3,"steps":[]}"#;
        assert!(matches!(parse_recipe(no_steps), Err(RecipeError::Invalid(_))));
        let no_time = r#"{"title":"Raw","total_minutes":0,"steps":[{"title":"Eat","text":"Eat it."}]}"#;
        assert!(matches!(parse_recipe(no_time), Err(RecipeError::Invalid(_))));
        assert!(matches!(parse_recipe("{not json"), Err(RecipeError::Parse(_))));
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let err = load_recipe(Path::new("/nonexistent/recipe.json")).await.unwrap_err();
        assert!(matches!(err, RecipeError::Io(_)));
    }
}
