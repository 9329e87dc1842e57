//! Recipe model: detail fetch, ingredient parsing and servings scaling.

use serde::{Deserialize, Serialize};

use crate::api::{RecipeApi, RecipeDetail, RecipeSummary};
use crate::error::NetworkError;
use crate::ingredient_parser::{parse_ingredients, Ingredient};

/// Servings used when the source does not state any.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes added per started group of three ingredients.
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingsDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    pub url: String,
    /// Ingredient lines as fetched, before parsing.
    pub raw_ingredients: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    /// Always >= 1.
    pub servings: u32,
    /// Estimated cooking time in minutes.
    pub cooking_time: u32,
    pub source_servings: Option<u32>,
    pub source_cooking_time: Option<u32>,
}

impl Recipe {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: String::new(),
            author: String::new(),
            img: String::new(),
            url: String::new(),
            raw_ingredients: Vec::new(),
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            cooking_time: 0,
            source_servings: None,
            source_cooking_time: None,
        }
    }

    /// Fetch this recipe's details from the API.
    pub async fn get_recipe(&mut self, api: &RecipeApi) -> Result<(), NetworkError> {
        let detail = api.get_recipe(&self.id).await?;
        self.apply_detail(detail);
        Ok(())
    }

    /// Copy fetched fields onto the recipe. The id is kept as requested.
    pub fn apply_detail(&mut self, detail: RecipeDetail) {
        self.title = detail.title;
        self.author = detail.author;
        self.img = detail.img;
        self.url = detail.url;
        self.raw_ingredients = detail.ingredients;
        self.source_servings = detail.servings;
        self.source_cooking_time = detail.cooking_time;
    }

    pub fn parse_ingredients(&mut self) {
        self.ingredients = parse_ingredients(&self.raw_ingredients);
    }

    /// Rough estimate: 15 minutes for every three ingredients.
    pub fn calc_time(&mut self) {
        let periods = self.ingredients.len().div_ceil(INGREDIENTS_PER_PERIOD);
        self.cooking_time = u32::try_from(periods)
            .unwrap_or(u32::MAX)
            .saturating_mul(MINUTES_PER_PERIOD);
    }

    pub fn calc_servings(&mut self) {
        self.servings = self
            .source_servings
            .filter(|&s| s >= 1)
            .unwrap_or(DEFAULT_SERVINGS);
    }

    /// Step servings up or down by one and rescale every ingredient count.
    ///
    /// Counts are scaled from the current servings, so repeated calls compound.
    /// Returns false when nothing changed (decreasing at one serving).
    pub fn update_servings(&mut self, direction: ServingsDirection) -> bool {
        let old = self.servings;
        let new = match direction {
            ServingsDirection::Increase => match old.checked_add(1) {
                Some(n) => n,
                None => return false,
            },
            ServingsDirection::Decrease if old <= 1 => return false,
            ServingsDirection::Decrease => old - 1,
        };

        for ingredient in &mut self.ingredients {
            if let Some(count) = ingredient.count.as_mut() {
                *count = *count * f64::from(new) / f64::from(old);
            }
        }
        self.servings = new;
        true
    }

    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            img: self.img.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;
    use std::sync::Arc;

    const EPSILON: f64 = 1e-9;

    fn recipe_with(lines: &[&str]) -> Recipe {
        let mut recipe = Recipe::new("r1");
        recipe.raw_ingredients = lines.iter().map(|s| s.to_string()).collect();
        recipe.parse_ingredients();
        recipe.calc_time();
        recipe.calc_servings();
        recipe
    }

    fn counts(recipe: &Recipe) -> Vec<Option<f64>> {
        recipe.ingredients.iter().map(|i| i.count).collect()
    }

    #[tokio::test]
    async fn test_get_recipe() {
        let body = r#"{"recipe": {"recipe_id": "r1", "title": "Soup", "publisher": "Me",
            "image_url": "img", "source_url": "src", "ingredients": ["1 cup water"], "servings": 2}}"#;
        let client = MockClient::new().with_body("https://api.test/get?rId=r1", body);
        let api = RecipeApi::new(Arc::new(client), "https://api.test");

        let mut recipe = Recipe::new("r1");
        recipe.get_recipe(&api).await.unwrap();
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.raw_ingredients, vec!["1 cup water".to_string()]);
        assert_eq!(recipe.source_servings, Some(2));

        recipe.calc_servings();
        assert_eq!(recipe.servings, 2);
    }

    #[tokio::test]
    async fn test_get_recipe_failure() {
        let api = RecipeApi::new(Arc::new(MockClient::new()), "https://api.test");
        let mut recipe = Recipe::new("missing");
        assert!(recipe.get_recipe(&api).await.is_err());
        assert!(recipe.title.is_empty());
    }

    #[test]
    fn test_calc_time() {
        assert_eq!(recipe_with(&[]).cooking_time, 0);
        assert_eq!(recipe_with(&["a", "b", "c"]).cooking_time, 15);
        assert_eq!(recipe_with(&["a", "b", "c", "d"]).cooking_time, 30);
        assert_eq!(recipe_with(&["a"; 7]).cooking_time, 45);
    }

    #[test]
    fn test_calc_servings_defaults() {
        let recipe = recipe_with(&["1 egg"]);
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);

        let mut zero = Recipe::new("z");
        zero.source_servings = Some(0);
        zero.calc_servings();
        assert_eq!(zero.servings, DEFAULT_SERVINGS);
    }

    #[test]
    fn test_update_servings_scales_proportionally() {
        let mut recipe = recipe_with(&["2 cups flour", "1/2 tsp salt", "pepper"]);
        assert_eq!(recipe.servings, 4);

        assert!(recipe.update_servings(ServingsDirection::Increase));
        assert_eq!(recipe.servings, 5);
        let c = counts(&recipe);
        assert!((c[0].unwrap() - 2.5).abs() < EPSILON);
        assert!((c[1].unwrap() - 0.625).abs() < EPSILON);
        assert_eq!(c[2], None);
        assert_eq!(recipe.ingredients[0].unit, "cup");
        assert_eq!(recipe.ingredients[0].ingredient, "flour");
    }

    #[test]
    fn test_update_servings_round_trip() {
        let mut recipe = recipe_with(&["3 eggs", "1 1/2 cups milk"]);
        let original = counts(&recipe);

        for _ in 0..3 {
            recipe.update_servings(ServingsDirection::Decrease);
        }
        assert_eq!(recipe.servings, 1);
        assert!((recipe.ingredients[0].count.unwrap() - 0.75).abs() < EPSILON);

        for _ in 0..3 {
            recipe.update_servings(ServingsDirection::Increase);
        }
        assert_eq!(recipe.servings, 4);
        for (now, before) in counts(&recipe).iter().zip(original.iter()) {
            assert!((now.unwrap() - before.unwrap()).abs() < EPSILON);
        }
    }

    #[test]
    fn test_decrease_at_one_is_noop() {
        let mut recipe = recipe_with(&["2 eggs"]);
        recipe.servings = 1;
        assert!(!recipe.update_servings(ServingsDirection::Decrease));
        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.ingredients[0].count, Some(2.0));
    }
}
