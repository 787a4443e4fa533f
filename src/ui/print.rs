//! Plain-text rendering of the fully expanded card, used by the print action.

use crate::recipe::Recipe;
use crate::timer::format_clock;
use std::fmt::Write;

const PRINT_WIDTH: usize = 72;

/// Render every section of the card regardless of what is currently collapsed.
/// Crossed-off ingredients are marked `[x]`.
pub fn render_card(recipe: &Recipe, crossed: &[bool]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(PRINT_WIDTH.min(recipe.title.chars().count().max(8)));
    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Total time: {}  |  {} steps",
        format_clock(recipe.total_time_seconds()),
        recipe.total_steps()
    );

    if !recipe.ingredients.is_empty() {
        let _ = writeln!(out, "\nIngredients");
        for (i, item) in recipe.ingredients.iter().enumerate() {
            let mark = if crossed.get(i).copied().unwrap_or(false) { 'x' } else { ' ' };
            let _ = writeln!(out, "  [{}] {}", mark, item);
        }
    }

    let _ = writeln!(out, "\nInstructions");
    for (i, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step.title);
        let options = textwrap::Options::new(PRINT_WIDTH)
            .initial_indent("     ")
            .subsequent_indent("     ");
        for line in textwrap::wrap(&step.text, options) {
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::default_recipe;

    #[test]
    fn lists_every_ingredient_and_step() {
        let recipe = default_recipe();
        let text = render_card(&recipe, &[]);
        assert!(text.starts_with("Creamy Garlic Mushroom Pasta\n"));
        assert!(text.contains("Total time: 27:00  |  6 steps"));
        for item in &recipe.ingredients {
            assert!(text.contains(&format!("[ ] {}", item)));
        }
        assert!(text.contains("  1. Boil the pasta"));
        assert!(text.contains("  6. Serve"));
        assert!(text.lines().all(|l| l.chars().count() <= PRINT_WIDTH));
    }

    #[test]
    fn marks_crossed_off_ingredients() {
        let recipe = default_recipe();
        let text = render_card(&recipe, &[false, true]);
        assert!(text.contains("[x] 300 g chestnut mushrooms, sliced"));
        assert!(text.contains("[ ] 250 g penne"));
    }
}
