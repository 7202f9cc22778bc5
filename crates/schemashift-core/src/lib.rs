//! Schema conversion and assessment engine for schemashift.
//!
//! This crate owns the conversion context and the operations that run over
//! it: dialect type mapping, key ordering, row-size validation, schema issue
//! bookkeeping and source/target column correspondence.

pub mod columns;
pub mod config;
pub mod constraints;
pub mod context;
pub mod error;
pub mod issues;
pub mod ordering;
pub mod schema;
pub mod sorting;
pub mod storage;
pub mod typemap;
pub mod types;
pub mod validation;

pub use columns::{common_column_ids, intersect, prepare_columns, prepare_values};
pub use config::{
    BYTES_MAX_LENGTH, ConversionSettings, MAX_NON_KEY_COLUMN_LENGTH, STRING_MAX_LENGTH,
};
pub use constraints::{Index, IndexKey, Key};
pub use context::{Conv, TableSchemas, to_not_null};
pub use error::{Error, Result};
pub use issues::{
    IssueGranularity, IssueLedger, SchemaIssue, TableIssues, find_schema_issue,
    remove_schema_issue,
};
pub use ordering::{init_index_order, init_key_orders, init_primary_key_order};
pub use schema::{SourceColumn, SourceSchema, SourceTable, TargetColumn, TargetSchema, TargetTable};
pub use sorting::{
    NamedTable, sorted_table_ids_by_name, sorted_table_ids_by_src_name,
    sorted_table_ids_by_target_name,
};
pub use storage::{column_size, compute_non_key_column_size, fixed_storage_size};
pub use typemap::{apply_pg_dialect, is_primary_key, to_pg_dialect_type};
pub use types::{Length, TargetType, TypeCode};
pub use validation::validate_conv;

/// Current contract version for conversion snapshot artifacts.
pub const SNAPSHOT_VERSION: &str = "0.1";
