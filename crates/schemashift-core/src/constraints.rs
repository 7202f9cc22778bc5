use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Source key column reference preserving declared position.
///
/// `order` is 1-based and only meaningful after
/// [`init_key_orders`](crate::ordering::init_key_orders) has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Key {
    pub col_id: String,
    #[serde(default)]
    pub desc: bool,
    #[serde(default)]
    pub order: usize,
}

impl Key {
    pub fn new(col_id: impl Into<String>) -> Self {
        Self {
            col_id: col_id.into(),
            desc: false,
            order: 0,
        }
    }
}

/// Source index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Index {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    pub keys: Vec<Key>,
}

/// Target primary-key column reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexKey {
    pub col_id: String,
    #[serde(default)]
    pub desc: bool,
    #[serde(default)]
    pub order: usize,
}

impl IndexKey {
    pub fn new(col_id: impl Into<String>) -> Self {
        Self {
            col_id: col_id.into(),
            desc: false,
            order: 0,
        }
    }
}
