use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ConversionSettings;
use crate::error::{Error, Result};
use crate::issues::IssueLedger;
use crate::schema::{SourceSchema, SourceTable, TargetSchema, TargetTable};

/// Conversion context owning both schemas and the issue ledger for a run.
///
/// Every engine operation borrows the context explicitly; nothing is kept in
/// global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Conv {
    /// Source database name, used to name report artifacts.
    #[serde(default)]
    pub database: Option<String>,
    pub src_schema: SourceSchema,
    #[serde(default)]
    pub target_schema: TargetSchema,
    #[serde(default)]
    pub schema_issues: IssueLedger,
    /// Unexpected conditions seen during conversion, with occurrence counts.
    #[serde(default)]
    pub unexpecteds: BTreeMap<String, u64>,
    #[serde(default)]
    pub settings: ConversionSettings,
}

/// Source and target views of one table resolved together.
#[derive(Debug)]
pub struct TableSchemas<'a> {
    pub source: &'a SourceTable,
    pub target_name: &'a str,
    pub target_cols: Vec<String>,
    pub target: &'a TargetTable,
}

impl Conv {
    pub fn new(src_schema: SourceSchema) -> Self {
        Self {
            src_schema,
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: ConversionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Record a data condition that could not be handled. Conversion continues.
    pub fn unexpected(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(event = "unexpected_condition", message = %message);
        *self.unexpecteds.entry(message).or_insert(0) += 1;
    }

    pub fn source_table(&self, table_id: &str) -> Result<&SourceTable> {
        self.src_schema
            .get(table_id)
            .ok_or_else(|| Error::MissingTable {
                table_id: table_id.to_string(),
                schema: "source",
            })
    }

    pub fn target_table(&self, table_id: &str) -> Result<&TargetTable> {
        self.target_schema
            .get(table_id)
            .ok_or_else(|| Error::MissingTable {
                table_id: table_id.to_string(),
                schema: "target",
            })
    }

    pub fn target_table_name(&self, table_id: &str) -> Result<&str> {
        self.target_table(table_id).map(|table| table.name.as_str())
    }

    /// Map source column names to the names of their target counterparts.
    pub fn target_column_names(&self, table_id: &str, src_cols: &[String]) -> Result<Vec<String>> {
        let source = self.source_table(table_id)?;
        let target = self.target_table(table_id)?;

        src_cols
            .iter()
            .map(|name| {
                let col = source
                    .col_id_by_name(name)
                    .and_then(|col_id| target.col_defs.get(col_id))
                    .ok_or_else(|| Error::UnknownColumn {
                        table_id: table_id.to_string(),
                        column: name.clone(),
                    })?;
                Ok(col.name.clone())
            })
            .collect()
    }

    /// Resolve the source table, target table name, target column names and
    /// target table in one go, reporting every fault rather than the first.
    pub fn cols_and_schemas(&self, table_id: &str) -> Result<TableSchemas<'_>> {
        let mut faults = Vec::new();

        let source = match self.source_table(table_id) {
            Ok(table) => Some(table),
            Err(err) => {
                faults.push(err.to_string());
                None
            }
        };

        let target_name = match self.target_table_name(table_id) {
            Ok(name) => Some(name),
            Err(err) => {
                faults.push(err.to_string());
                None
            }
        };

        let target_cols = source.and_then(|table| {
            let src_cols: Vec<String> = table
                .col_ids
                .iter()
                .filter_map(|col_id| table.col_defs.get(col_id))
                .map(|col| col.name.clone())
                .collect();
            match self.target_column_names(table_id, &src_cols) {
                Ok(cols) => Some(cols),
                Err(Error::MissingTable { .. }) => None,
                Err(err) => {
                    faults.push(err.to_string());
                    None
                }
            }
        });

        let target = self.target_schema.get(table_id);
        if target.is_none() {
            faults.push(format!("target schema has no entry for table {table_id}"));
        }

        match (source, target_name, target_cols, target) {
            (Some(source), Some(target_name), Some(target_cols), Some(target))
                if faults.is_empty() =>
            {
                Ok(TableSchemas {
                    source,
                    target_name,
                    target_cols,
                    target,
                })
            }
            _ => Err(Error::Lookup(faults)),
        }
    }
}

/// Interpret an `information_schema`-style nullability flag.
///
/// Returns true when the column is NOT NULL. Unknown flags are reported on the
/// context's unexpected channel and treated as nullable.
pub fn to_not_null(conv: &mut Conv, is_nullable: &str) -> bool {
    match is_nullable {
        "YES" => false,
        "NO" => true,
        other => {
            conv.unexpected(format!("isNullable column has unknown value: {other}"));
            false
        }
    }
}
