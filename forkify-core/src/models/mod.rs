//! In-memory data layer: the Search, Recipe, List and Likes models.

pub mod likes;
pub mod list;
pub mod recipe;
pub mod search;

pub use likes::{LikedRecipe, Likes, LIKES_KEY};
pub use list::{ShoppingItem, ShoppingList};
pub use recipe::{Recipe, ServingsDirection, DEFAULT_SERVINGS};
pub use search::Search;
