use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether an issue describes a whole table or a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueGranularity {
    Table,
    Column,
}

impl IssueGranularity {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueGranularity::Table => "table",
            IssueGranularity::Column => "column",
        }
    }
}

/// Compatibility compromise recorded while building the target schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SchemaIssue {
    ArrayTypeNotSupported,
    NumericPKNotSupported,
    RowLimitExceeded,
    MissingPrimaryKey,
    NoGoodType,
    Widened,
    StringOverflow,
    DefaultValue,
}

impl SchemaIssue {
    pub fn granularity(self) -> IssueGranularity {
        match self {
            SchemaIssue::RowLimitExceeded | SchemaIssue::MissingPrimaryKey => {
                IssueGranularity::Table
            }
            _ => IssueGranularity::Column,
        }
    }

    /// Human-readable explanation, logged with each recorded issue.
    pub fn description(self) -> &'static str {
        match self {
            SchemaIssue::ArrayTypeNotSupported => {
                "array types are not supported in the target dialect; converted to STRING(MAX)"
            }
            SchemaIssue::NumericPKNotSupported => {
                "NUMERIC primary key columns are not supported in the target dialect; converted to STRING(MAX)"
            }
            SchemaIssue::RowLimitExceeded => {
                "non-key columns exceed the maximum row size of the target engine"
            }
            SchemaIssue::MissingPrimaryKey => "table has no primary key",
            SchemaIssue::NoGoodType => "no appropriate target type; mapped to STRING(MAX)",
            SchemaIssue::Widened => "type widened to the closest target type",
            SchemaIssue::StringOverflow => "declared length exceeds the target maximum",
            SchemaIssue::DefaultValue => "default values are not carried over",
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Issues recorded for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableIssues {
    #[serde(default)]
    pub table_level_issues: Vec<SchemaIssue>,
    #[serde(default)]
    pub column_level_issues: BTreeMap<String, Vec<SchemaIssue>>,
}

/// Per-table issue ledger keyed by table id.
///
/// Issue lists keep insertion order and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct IssueLedger(BTreeMap<String, TableIssues>);

impl IssueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_id: &str) -> Option<&TableIssues> {
        self.0.get(table_id)
    }

    /// Issues for `table_id`, creating an empty entry when absent.
    pub fn entry(&mut self, table_id: &str) -> &mut TableIssues {
        self.0.entry(table_id.to_string()).or_default()
    }

    pub fn table_level_issues(&self, table_id: &str) -> &[SchemaIssue] {
        self.0
            .get(table_id)
            .map(|issues| issues.table_level_issues.as_slice())
            .unwrap_or_default()
    }

    pub fn column_issues(&self, table_id: &str, col_id: &str) -> &[SchemaIssue] {
        self.0
            .get(table_id)
            .and_then(|issues| issues.column_level_issues.get(col_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn add_table_issue(&mut self, table_id: &str, issue: SchemaIssue) {
        self.entry(table_id).table_level_issues.push(issue);
    }

    pub fn add_column_issues(&mut self, table_id: &str, col_id: &str, issues: &[SchemaIssue]) {
        if issues.is_empty() {
            return;
        }
        self.entry(table_id)
            .column_level_issues
            .entry(col_id.to_string())
            .or_default()
            .extend_from_slice(issues);
    }

    /// Iterate tables in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TableIssues)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Position of the last occurrence of `issue`.
pub fn find_schema_issue(issues: &[SchemaIssue], issue: SchemaIssue) -> Option<usize> {
    issues.iter().rposition(|candidate| *candidate == issue)
}

/// Remove the last occurrence of `issue`, leaving the list untouched when absent.
pub fn remove_schema_issue(mut issues: Vec<SchemaIssue>, issue: SchemaIssue) -> Vec<SchemaIssue> {
    if let Some(index) = find_schema_issue(&issues, issue) {
        issues.remove(index);
    }
    issues
}
