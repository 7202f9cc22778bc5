use thiserror::Error;

/// Core error type shared across schemashift crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A source column name or target column could not be resolved.
    #[error("unknown column {column} in table {table_id}")]
    UnknownColumn { table_id: String, column: String },
    /// The table is missing from the schema that was queried.
    #[error("table {table_id} not found in {schema} schema")]
    MissingTable { table_id: String, schema: &'static str },
    /// Source and target tables share no column ids.
    #[error("no common columns between source and target table {table_id}")]
    NoCommonColumns { table_id: String },
    /// Column names and row values do not line up.
    #[error("column names and values differ in length: columns={columns}, values={values}")]
    LengthMismatch { columns: usize, values: usize },
    /// A common column id had no value in the row being realigned.
    #[error("no value supplied for column id {column_id}")]
    MissingValue { column_id: String },
    /// Several independent lookups failed together.
    #[error("lookup failed: {}", .0.join("; "))]
    Lookup(Vec<String>),
    /// The conversion snapshot violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by schemashift crates.
pub type Result<T> = std::result::Result<T, Error>;
