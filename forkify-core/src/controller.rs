//! Orchestration: turns user actions into model operations.
//!
//! All mutable application state lives in [`AppState`], owned by the
//! [`Controller`]. Front-ends send a [`Command`] and render the returned
//! [`Outcome`], reading whatever else they need through [`Controller::state`].
//!
//! Every search and every recipe selection is stamped with a generation
//! number. A fetch that completes after a newer one was started is discarded,
//! so a slow response can never overwrite the state of a later request.

use uuid::Uuid;

use crate::api::{RecipeApi, RecipeSummary};
use crate::error::NetworkError;
use crate::models::{Likes, Recipe, Search, ServingsDirection, ShoppingList};
use crate::pagination::{paginate, Page};

pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong with search.";
pub const RECIPE_FAILED_MESSAGE: &str = "Error processing recipe!";

/// Semantic user actions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { query: String },
    GoToPage(usize),
    SelectRecipe { id: String },
    UpdateServings(ServingsDirection),
    AddRecipeToList,
    DeleteListItem { id: Uuid },
    UpdateListItemCount { id: Uuid, count: f64 },
    ToggleLike,
    /// Unlike a recipe by id, e.g. from the likes panel.
    RemoveLike { id: String },
}

/// What the front-end should render after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing to do (empty input, no current recipe, ...).
    Ignored,
    /// A response arrived for a request that has since been superseded.
    Stale,
    /// Show a page of search results.
    Results(Page<RecipeSummary>),
    /// Show the current recipe.
    Recipe { liked: bool },
    /// Show the shopping list.
    List,
    /// Update the like button and likes menu.
    Likes { liked: bool, num_likes: usize },
    /// Show a blocking error message.
    Alert(String),
}

/// Progress of a search or recipe cycle. A failed fetch raises an alert and
/// drops back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
}

/// Single owner of all mutable application state.
pub struct AppState {
    pub search: Option<Search>,
    pub recipe: Option<Recipe>,
    pub list: ShoppingList,
    pub likes: Likes,
}

/// A request whose model is being fetched, tagged with its generation.
#[derive(Debug)]
pub struct Pending<T> {
    generation: u64,
    model: T,
}

impl<T> Pending<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn model(&self) -> &T {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut T {
        &mut self.model
    }
}

pub struct Controller {
    api: RecipeApi,
    state: AppState,
    page_size: usize,
    search_generation: u64,
    recipe_generation: u64,
    search_phase: Phase,
    recipe_phase: Phase,
}

impl Controller {
    pub fn new(api: RecipeApi, likes: Likes, page_size: usize) -> Self {
        Self {
            api,
            state: AppState {
                search: None,
                recipe: None,
                list: ShoppingList::new(),
                likes,
            },
            page_size: page_size.max(1),
            search_generation: 0,
            recipe_generation: 0,
            search_phase: Phase::Idle,
            recipe_phase: Phase::Idle,
        }
    }

    pub fn api(&self) -> &RecipeApi {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn search_phase(&self) -> Phase {
        self.search_phase
    }

    pub fn recipe_phase(&self) -> Phase {
        self.recipe_phase
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::Search { query } => {
                let Some(mut pending) = self.begin_search(&query) else {
                    return Outcome::Ignored;
                };
                let result = pending.model.get_results(&self.api).await;
                self.complete_search(pending, result)
            }
            Command::GoToPage(page) => self.go_to_page(page),
            Command::SelectRecipe { id } => {
                let Some(mut pending) = self.begin_recipe(&id) else {
                    return Outcome::Ignored;
                };
                let result = pending.model.get_recipe(&self.api).await;
                self.complete_recipe(pending, result)
            }
            Command::UpdateServings(direction) => self.update_servings(direction),
            Command::AddRecipeToList => self.add_recipe_to_list(),
            Command::DeleteListItem { id } => {
                self.state.list.delete_item(id);
                Outcome::List
            }
            Command::UpdateListItemCount { id, count } => {
                self.state.list.update_count(id, count);
                Outcome::List
            }
            Command::ToggleLike => self.toggle_like(),
            Command::RemoveLike { id } => self.remove_like(&id),
        }
    }

    /// Start a search. Returns None for a blank query.
    pub fn begin_search(&mut self, query: &str) -> Option<Pending<Search>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.search_generation += 1;
        self.search_phase = Phase::Loading;
        tracing::info!(query, generation = self.search_generation, "search started");

        Some(Pending {
            generation: self.search_generation,
            model: Search::new(query),
        })
    }

    /// Finish a search started with [`Controller::begin_search`].
    pub fn complete_search(
        &mut self,
        pending: Pending<Search>,
        result: Result<(), NetworkError>,
    ) -> Outcome {
        if pending.generation != self.search_generation {
            tracing::warn!(
                query = %pending.model.query,
                generation = pending.generation,
                current = self.search_generation,
                "discarding stale search response"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(()) => {
                tracing::info!(
                    query = %pending.model.query,
                    count = pending.model.result.len(),
                    "search finished"
                );
                let page = paginate(&pending.model.result, 1, self.page_size);
                self.state.search = Some(pending.model);
                self.search_phase = Phase::Success;
                Outcome::Results(page)
            }
            Err(e) => {
                tracing::warn!(query = %pending.model.query, error = %e, "search failed");
                self.state.search = None;
                self.search_phase = Phase::Idle;
                Outcome::Alert(SEARCH_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Start loading a recipe. Returns None for a blank id.
    pub fn begin_recipe(&mut self, id: &str) -> Option<Pending<Recipe>> {
        let id = id.trim().trim_start_matches('#');
        if id.is_empty() {
            return None;
        }
        self.recipe_generation += 1;
        self.recipe_phase = Phase::Loading;
        tracing::info!(id, generation = self.recipe_generation, "recipe requested");

        Some(Pending {
            generation: self.recipe_generation,
            model: Recipe::new(id),
        })
    }

    /// Finish loading a recipe started with [`Controller::begin_recipe`].
    pub fn complete_recipe(
        &mut self,
        pending: Pending<Recipe>,
        result: Result<(), NetworkError>,
    ) -> Outcome {
        if pending.generation != self.recipe_generation {
            tracing::warn!(
                id = %pending.model.id,
                generation = pending.generation,
                current = self.recipe_generation,
                "discarding stale recipe response"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(()) => {
                let mut recipe = pending.model;
                recipe.parse_ingredients();
                recipe.calc_time();
                recipe.calc_servings();
                tracing::info!(
                    id = %recipe.id,
                    ingredients = recipe.ingredients.len(),
                    servings = recipe.servings,
                    "recipe loaded"
                );

                let liked = self.state.likes.is_liked(&recipe.id);
                self.state.recipe = Some(recipe);
                self.recipe_phase = Phase::Success;
                Outcome::Recipe { liked }
            }
            Err(e) => {
                tracing::warn!(id = %pending.model.id, error = %e, "recipe failed");
                self.state.recipe = None;
                self.recipe_phase = Phase::Idle;
                Outcome::Alert(RECIPE_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Re-slice the cached results; never fetches.
    fn go_to_page(&self, page: usize) -> Outcome {
        match &self.state.search {
            Some(search) => Outcome::Results(paginate(&search.result, page, self.page_size)),
            None => Outcome::Ignored,
        }
    }

    fn update_servings(&mut self, direction: ServingsDirection) -> Outcome {
        let Some(recipe) = self.state.recipe.as_mut() else {
            return Outcome::Ignored;
        };
        recipe.update_servings(direction);
        let liked = self.state.likes.is_liked(&recipe.id);
        Outcome::Recipe { liked }
    }

    fn add_recipe_to_list(&mut self) -> Outcome {
        let Some(recipe) = &self.state.recipe else {
            return Outcome::Ignored;
        };
        for ingredient in &recipe.ingredients {
            self.state
                .list
                .add_item(ingredient.count, &ingredient.unit, &ingredient.ingredient);
        }
        tracing::debug!(id = %recipe.id, items = self.state.list.len(), "recipe added to list");
        Outcome::List
    }

    fn toggle_like(&mut self) -> Outcome {
        let Some(recipe) = &self.state.recipe else {
            return Outcome::Ignored;
        };
        let likes = &mut self.state.likes;

        let result = if likes.is_liked(&recipe.id) {
            likes.delete_like(&recipe.id)
        } else {
            likes
                .add_like(&recipe.id, &recipe.title, &recipe.author, &recipe.img)
                .map(|_| ())
        };
        if let Err(e) = result {
            tracing::warn!(id = %recipe.id, error = %e, "failed to persist likes");
        }

        Outcome::Likes {
            liked: likes.is_liked(&recipe.id),
            num_likes: likes.num_likes(),
        }
    }

    fn remove_like(&mut self, id: &str) -> Outcome {
        let likes = &mut self.state.likes;
        if !likes.is_liked(id) {
            return Outcome::Ignored;
        }
        if let Err(e) = likes.delete_like(id) {
            tracing::warn!(id, error = %e, "failed to persist likes");
        }
        Outcome::Likes {
            liked: false,
            num_likes: likes.num_likes(),
        }
    }
}
