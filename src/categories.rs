use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{DebtError, Result};
use crate::types::{CategoryKind, UserId};

/// a user's transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub kind: CategoryKind,
}

/// categories unique per user by case-insensitive, trimmed name
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    by_key: HashMap<(UserId, String), Category>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user's category with this name, creating it if missing.
    ///
    /// The flag is true when a new category was inserted. A name already
    /// registered under the other kind is a conflict.
    pub fn lookup_or_insert(&mut self, user_id: UserId, name: &str, kind: CategoryKind) -> Result<(Category, bool)> {
        let display = name.trim();
        if display.is_empty() {
            return Err(DebtError::EmptyName);
        }

        let key = (user_id, normalize(display));
        if let Some(existing) = self.by_key.get(&key) {
            if existing.kind != kind {
                return Err(DebtError::CategoryConflict {
                    name: existing.name.clone(),
                });
            }
            return Ok((existing.clone(), false));
        }

        let category = Category {
            id: Uuid::new_v4(),
            user_id,
            name: display.to_string(),
            kind,
        };
        debug!(user_id = %user_id, name = %category.name, kind = ?kind, "created category");
        self.by_key.insert(key, category.clone());
        Ok((category, true))
    }

    pub fn find(&self, user_id: UserId, name: &str) -> Option<&Category> {
        self.by_key.get(&(user_id, normalize(name)))
    }

    /// the user's categories sorted by name, optionally of one kind
    pub fn list(&self, user_id: UserId, kind: Option<CategoryKind>) -> Vec<&Category> {
        let mut categories: Vec<&Category> = self
            .by_key
            .values()
            .filter(|c| c.user_id == user_id && kind.map_or(true, |k| c.kind == k))
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub fn remove(&mut self, user_id: UserId, name: &str) -> Option<Category> {
        self.by_key.remove(&(user_id, normalize(name)))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
