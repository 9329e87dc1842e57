//! Liked recipes, persisted through a [`KeyValueStore`].
//!
//! The whole collection is written on every change as a JSON object keyed by
//! recipe id. That is fine for a personal bookmark list but does not scale to
//! large collections.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized collection.
pub const LIKES_KEY: &str = "likes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikedRecipe {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
    /// Restores insertion order on load; object keys carry no order.
    pub liked_at: DateTime<Utc>,
}

pub struct Likes {
    likes: Vec<LikedRecipe>,
    store: Arc<dyn KeyValueStore>,
}

impl Likes {
    /// Empty collection writing to `store`. Call [`Likes::read_storage`] to load.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            likes: Vec::new(),
            store,
        }
    }

    /// Create a collection and load whatever `store` holds.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut likes = Self::new(store);
        likes.read_storage();
        likes
    }

    /// Append a like and persist the collection.
    ///
    /// Liking an id that is already liked is the caller's responsibility to
    /// avoid. If persisting fails the like is still kept in memory.
    pub fn add_like(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        img: &str,
    ) -> Result<LikedRecipe, StorageError> {
        let mut liked_at = Utc::now();
        if let Some(last) = self.likes.last() {
            if liked_at <= last.liked_at {
                liked_at = last.liked_at + TimeDelta::nanoseconds(1);
            }
        }

        let like = LikedRecipe {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            img: img.to_string(),
            liked_at,
        };
        self.likes.push(like.clone());
        tracing::info!(id, "recipe liked");

        self.persist()?;
        Ok(like)
    }

    /// Remove a like and persist the collection. Unknown ids are ignored.
    pub fn delete_like(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.likes.len();
        self.likes.retain(|like| like.id != id);
        if self.likes.len() == before {
            return Ok(());
        }
        tracing::info!(id, "recipe unliked");
        self.persist()
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[LikedRecipe] {
        &self.likes
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Missing, unreadable or corrupt data yields an empty collection.
    pub fn read_storage(&mut self) {
        self.likes = match self.store.get(LIKES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<BTreeMap<String, LikedRecipe>>(&json) {
                Ok(map) => {
                    let mut likes: Vec<LikedRecipe> = map.into_values().collect();
                    likes.sort_by_key(|like| like.liked_at);
                    likes
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored likes are corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored likes, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = self.likes.len(), "likes loaded");
    }

    fn persist(&self) -> Result<(), StorageError> {
        let map: BTreeMap<&str, &LikedRecipe> = self
            .likes
            .iter()
            .map(|like| (like.id.as_str(), like))
            .collect();
        let json = serde_json::to_string(&map)?;
        self.store.set(LIKES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    fn memory_likes() -> (Arc<dyn KeyValueStore>, Likes) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let likes = Likes::new(store.clone());
        (store, likes)
    }

    #[test]
    fn test_add_and_delete_like() {
        let (_, mut likes) = memory_likes();
        assert_eq!(likes.num_likes(), 0);

        let like = likes.add_like("47746", "Pizza", "101 Cookbooks", "img").unwrap();
        assert_eq!(like.id, "47746");
        assert!(likes.is_liked("47746"));
        assert_eq!(likes.num_likes(), 1);

        likes.delete_like("47746").unwrap();
        assert!(!likes.is_liked("47746"));
        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_, mut likes) = memory_likes();
        likes.add_like("a", "A", "x", "i").unwrap();
        likes.delete_like("zzz").unwrap();
        assert_eq!(likes.num_likes(), 1);
    }

    #[test]
    fn test_persist_and_read_into_fresh_instance() {
        let (store, mut likes) = memory_likes();
        likes.add_like("b", "Banana Bread", "Ann", "b.jpg").unwrap();
        likes.add_like("a", "Apple Pie", "Bob", "a.jpg").unwrap();
        likes.add_like("c", "Carrot Cake", "Cy", "c.jpg").unwrap();
        likes.delete_like("a").unwrap();

        let fresh = Likes::load(store);
        assert_eq!(fresh.likes(), likes.likes());
        let ids: Vec<&str> = fresh.likes().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_stored_as_map_keyed_by_id() {
        let (store, mut likes) = memory_likes();
        likes.add_like("42", "Soup", "Me", "s.jpg").unwrap();

        let json = store.get(LIKES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["42"]["title"], "Soup");
        assert_eq!(value["42"]["author"], "Me");
    }

    #[test]
    fn test_read_storage_replaces_memory() {
        let (store, mut likes) = memory_likes();
        likes.add_like("a", "A", "x", "i").unwrap();

        let mut other = Likes::new(store.clone());
        other.add_like("b", "B", "y", "j").unwrap();

        likes.read_storage();
        assert!(!likes.is_liked("a"));
        assert!(likes.is_liked("b"));
    }

    #[test]
    fn test_corrupt_storage_resets_to_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(LIKES_KEY, "[not valid").unwrap();

        let likes = Likes::load(store);
        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_file_backed_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let mut likes = Likes::new(Arc::new(JsonFileStore::new(&path)));
        likes.add_like("1", "One", "A", "1.jpg").unwrap();
        likes.add_like("2", "Two", "B", "2.jpg").unwrap();

        let reloaded = Likes::load(Arc::new(JsonFileStore::new(&path)));
        assert_eq!(reloaded.likes(), likes.likes());
    }
}
