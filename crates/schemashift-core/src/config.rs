use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum storage of a `STRING(MAX)` column, in bytes.
pub const STRING_MAX_LENGTH: u64 = 2_621_440;

/// Maximum storage of a `BYTES(MAX)` column, in bytes.
pub const BYTES_MAX_LENGTH: u64 = 10_485_760;

/// Maximum combined size of non-key columns in a row, in bytes.
pub const MAX_NON_KEY_COLUMN_LENGTH: u64 = 1600 * 1024 * 1024;

/// Engine limits applied during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConversionSettings {
    pub max_non_key_column_length: u64,
    pub string_max_length: u64,
    pub bytes_max_length: u64,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            max_non_key_column_length: MAX_NON_KEY_COLUMN_LENGTH,
            string_max_length: STRING_MAX_LENGTH,
            bytes_max_length: BYTES_MAX_LENGTH,
        }
    }
}
