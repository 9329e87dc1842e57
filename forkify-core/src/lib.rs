pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod http;
pub mod ingredient_parser;
pub mod models;
pub mod pagination;
pub mod storage;

pub use api::{RecipeApi, RecipeDetail, RecipeSummary};
pub use config::Config;
pub use controller::{AppState, Command, Controller, Outcome, Pending, Phase};
pub use error::{NetworkError, StorageError};
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use ingredient_parser::{parse_ingredient, parse_ingredients, Ingredient};
pub use models::{
    LikedRecipe, Likes, Recipe, Search, ServingsDirection, ShoppingItem, ShoppingList,
};
pub use pagination::{paginate, Page};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
