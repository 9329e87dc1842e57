//! Plain-text rendering of application state.

use std::fmt::{self, Write};

use forkify_core::format::{format_count, limit_title};
use forkify_core::{LikedRecipe, Page, Recipe, RecipeSummary, ShoppingList};

const TITLE_LIMIT: usize = 40;

pub fn results(page: &Page<RecipeSummary>) -> Result<String, fmt::Error> {
    if page.items.is_empty() {
        return Ok("No recipes found.".to_string());
    }

    let mut out = String::new();
    for summary in &page.items {
        writeln!(
            out,
            "  {:>8}  {}  ({})",
            summary.id,
            limit_title(&summary.title, TITLE_LIMIT),
            summary.author
        )?;
    }

    write!(out, "Page {}/{}", page.page, page.pages)?;
    if let Some(prev) = page.prev {
        write!(out, "  [page {}: prev]", prev)?;
    }
    if let Some(next) = page.next {
        write!(out, "  [page {}: next]", next)?;
    }
    Ok(out)
}

pub fn recipe(recipe: &Recipe, liked: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let heart = if liked { "♥" } else { "♡" };
    writeln!(out, "{} {}", heart, recipe.title)?;
    writeln!(out, "by {}", recipe.author)?;
    writeln!(
        out,
        "{} minutes · {} servings",
        recipe.cooking_time, recipe.servings
    )?;
    writeln!(out)?;

    for ingredient in &recipe.ingredients {
        let mut line = format_count(ingredient.count);
        if !ingredient.unit.is_empty() {
            line.push(' ');
            line.push_str(&ingredient.unit);
        }
        writeln!(out, "  - {} {}", line, ingredient.ingredient)?;
    }

    if !recipe.url.is_empty() {
        writeln!(out)?;
        write!(out, "Directions: {}", recipe.url)?;
    }
    Ok(out.trim_end().to_string())
}

/// Shopping list with 1-based positions, which the shell uses to address items.
pub fn list(list: &ShoppingList) -> Result<String, fmt::Error> {
    if list.is_empty() {
        return Ok("Shopping list is empty.".to_string());
    }

    let mut out = String::new();
    for (i, item) in list.items().iter().enumerate() {
        let mut amount = format_count(item.count);
        if !item.unit.is_empty() {
            amount.push(' ');
            amount.push_str(&item.unit);
        }
        writeln!(out, "  {:>2}. {} {}", i + 1, amount, item.ingredient)?;
    }
    Ok(out.trim_end().to_string())
}

pub fn likes(likes: &[LikedRecipe]) -> Result<String, fmt::Error> {
    if likes.is_empty() {
        return Ok("No liked recipes yet.".to_string());
    }

    let mut out = String::new();
    for like in likes {
        writeln!(
            out,
            "  {:>8}  {}  ({})",
            like.id,
            limit_title(&like.title, TITLE_LIMIT),
            like.author
        )?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forkify_core::{paginate, Ingredient};

    fn summary(id: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            author: "Someone".to_string(),
            img: String::new(),
        }
    }

    #[test]
    fn test_results_footer() {
        let items: Vec<RecipeSummary> = (1..=15).map(|i| summary(&i.to_string())).collect();
        let text = results(&paginate(&items, 2, 10)).unwrap();
        assert!(text.contains("Recipe 11"));
        assert!(!text.contains("Recipe 10 "));
        assert!(text.ends_with("Page 2/2  [page 1: prev]"));
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(results(&paginate(&[], 1, 10)).unwrap(), "No recipes found.");
    }

    #[test]
    fn test_recipe_ingredients() {
        let mut r = Recipe::new("1");
        r.title = "Pancakes".to_string();
        r.ingredients = vec![
            Ingredient {
                count: Some(1.5),
                unit: "cup".to_string(),
                ingredient: "flour".to_string(),
            },
            Ingredient {
                count: None,
                unit: String::new(),
                ingredient: "salt".to_string(),
            },
        ];
        let text = recipe(&r, true).unwrap();
        assert!(text.starts_with("♥ Pancakes"));
        assert!(text.contains("  - 1 1/2 cup flour"));
        assert!(text.contains("  - ? salt"));
    }

    #[test]
    fn test_list_positions() {
        let mut l = ShoppingList::new();
        l.add_item(Some(2.0), "", "eggs");
        l.add_item(Some(0.5), "cup", "milk");
        assert_eq!(list(&l).unwrap(), "   1. 2 eggs\n   2. 1/2 cup milk");
    }
}
