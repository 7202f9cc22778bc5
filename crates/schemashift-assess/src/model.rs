use serde::{Deserialize, Serialize};

use schemashift_core::SchemaIssue;

/// Assessment aggregate handed to report writers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentOutput {
    pub schema_assessment: SchemaAssessmentOutput,
}

/// Schema-level findings, tables in name order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaAssessmentOutput {
    pub tables: Vec<TableAssessment>,
}

/// Findings for one source table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableAssessment {
    pub table_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SchemaIssue>,
    /// Columns in declared order.
    pub columns: Vec<ColumnAssessment>,
}

/// Findings for one source column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnAssessment {
    pub col_id: String,
    pub name: String,
    pub details: ColumnDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_definition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SchemaIssue>,
}

/// Source column definition as shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDetails {
    pub datatype: String,
    pub is_array: bool,
    pub size: i64,
    pub is_null: bool,
}

impl ColumnDetails {
    /// Report spelling: datatype, array size in parentheses, then nullability.
    pub fn definition(&self) -> String {
        let mut definition = self.datatype.clone();
        if self.is_array {
            definition.push_str(&format!(" ({})", self.size));
        }
        if !self.is_null {
            definition.push_str(" NOT NULL");
        }
        definition
    }
}
