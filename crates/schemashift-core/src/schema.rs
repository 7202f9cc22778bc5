use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constraints::{Index, IndexKey, Key};
use crate::types::TargetType;

/// Source tables keyed by table id.
pub type SourceSchema = HashMap<String, SourceTable>;

/// Target tables keyed by table id.
pub type TargetSchema = HashMap<String, TargetTable>;

/// A table as ingested from the source database.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceTable {
    pub id: String,
    pub name: String,
    /// Column ids in declared order.
    pub col_ids: Vec<String>,
    pub col_defs: HashMap<String, SourceColumn>,
    #[serde(default)]
    pub primary_keys: Vec<Key>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl SourceTable {
    /// Look up a column id by its source name.
    pub fn col_id_by_name(&self, name: &str) -> Option<&str> {
        self.col_defs
            .values()
            .find(|col| col.name == name)
            .map(|col| col.id.as_str())
    }
}

/// Column metadata for a source table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceColumn {
    pub id: String,
    pub name: String,
    /// Source engine type name (e.g. `numeric`, `varchar`).
    pub data_type: String,
    #[serde(default)]
    pub is_array: bool,
    /// Declared size; array length for array columns.
    #[serde(default)]
    pub size: i64,
    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
}

fn default_nullable() -> bool {
    true
}

/// A table as produced for the target engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetTable {
    pub id: String,
    pub name: String,
    /// Column ids in declared order.
    pub col_ids: Vec<String>,
    pub col_defs: HashMap<String, TargetColumn>,
    #[serde(default)]
    pub primary_keys: Vec<IndexKey>,
}

impl TargetTable {
    pub fn is_primary_key(&self, col_id: &str) -> bool {
        self.primary_keys.iter().any(|key| key.col_id == col_id)
    }
}

/// Column definition for a target table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetColumn {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TargetType,
    #[serde(default)]
    pub not_null: bool,
}
