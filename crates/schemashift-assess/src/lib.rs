//! Assessment output and schema report rendering.

pub mod assessment;
pub mod errors;
pub mod model;
pub mod report;

pub use assessment::collect_assessment;
pub use errors::{AssessError, Result};
pub use model::{
    AssessmentOutput, ColumnAssessment, ColumnDetails, SchemaAssessmentOutput, TableAssessment,
};
pub use report::{
    SCHEMA_REPORT_HEADER, SchemaReportRow, render_schema_report, schema_report_file_name,
    schema_report_rows,
};
