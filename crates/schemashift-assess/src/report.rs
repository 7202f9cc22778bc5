use crate::errors::{AssessError, Result};
use crate::model::AssessmentOutput;

/// Report columns, in output order.
pub const SCHEMA_REPORT_HEADER: [&str; 11] = [
    "Element",
    "Element Type",
    "Source Definition",
    "Target Name",
    "Target Definition",
    "DB Change Effort",
    "DB Change Type",
    "Code Change Effort",
    "Code Change Type",
    "Impacted Files",
    "Related Code Snippets",
];

/// One schema element (table or column) of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReportRow {
    pub element: String,
    pub element_type: String,
    pub source_definition: String,
    pub target_name: String,
    pub target_definition: String,
    pub db_change_effort: String,
    pub db_change_type: String,
    pub code_change_effort: String,
    pub code_change_type: String,
    pub code_impacted_files: String,
    pub code_snippets: String,
}

impl SchemaReportRow {
    fn into_record(self) -> [String; 11] {
        [
            self.element,
            self.element_type,
            self.source_definition,
            self.target_name,
            self.target_definition,
            self.db_change_effort,
            self.db_change_type,
            self.code_change_effort,
            self.code_change_type,
            self.code_impacted_files,
            self.code_snippets,
        ]
    }
}

/// Table rows first, then column rows grouped by table.
pub fn schema_report_rows(output: &AssessmentOutput) -> Vec<SchemaReportRow> {
    let tables = &output.schema_assessment.tables;
    let mut rows = Vec::new();

    for table in tables {
        rows.push(SchemaReportRow {
            element: table.name.clone(),
            element_type: "Table".to_string(),
            source_definition: "N/A".to_string(),
            target_name: "N/A".to_string(),
            target_definition: "N/A".to_string(),
            db_change_effort: "Automatic".to_string(),
            db_change_type: "None".to_string(),
            ..SchemaReportRow::default()
        });
    }

    for table in tables {
        for column in &table.columns {
            rows.push(SchemaReportRow {
                element: column.name.clone(),
                element_type: "Column".to_string(),
                target_definition: column.details.definition(),
                ..SchemaReportRow::default()
            });
        }
    }

    rows
}

const REPORT_DELIMITER: u8 = b'|';

/// Render the pipe-delimited, CRLF-terminated schema report.
///
/// Quoting is applied per field by [`quote_field`]; the writer itself never
/// quotes.
pub fn render_schema_report(output: &AssessmentOutput) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(REPORT_DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(SCHEMA_REPORT_HEADER.map(|field| quote_field(field.to_string())))?;
    for row in schema_report_rows(output) {
        writer.write_record(row.into_record().map(quote_field))?;
    }

    writer
        .into_inner()
        .map_err(|err| AssessError::Io(err.into_error()))
}

/// A field is quoted when it contains the delimiter, a quote or a line
/// break, starts with whitespace, or is exactly `\.`.
fn needs_quotes(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    if field == r"\." {
        return true;
    }
    if field
        .bytes()
        .any(|byte| matches!(byte, b'\n' | b'\r' | b'"') || byte == REPORT_DELIMITER)
    {
        return true;
    }
    field.chars().next().is_some_and(char::is_whitespace)
}

/// Quote a field when needed. Inside quotes `"` is doubled, bare `\r` is
/// dropped and `\n` becomes `\r\n`.
fn quote_field(field: String) -> String {
    if !needs_quotes(&field) {
        return field;
    }

    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for ch in field.chars() {
        match ch {
            '"' => quoted.push_str("\"\""),
            '\r' => {}
            '\n' => quoted.push_str("\r\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// File name of the schema report for `database`.
pub fn schema_report_file_name(database: &str) -> String {
    format!("{database}_schema.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_left_alone() {
        assert_eq!(quote_field("orders".to_string()), "orders");
        assert_eq!(quote_field(String::new()), "");
        assert_eq!(quote_field("varchar NOT NULL".to_string()), "varchar NOT NULL");
    }

    #[test]
    fn leading_whitespace_and_escape_marker_are_quoted() {
        assert_eq!(quote_field(" spaced".to_string()), "\" spaced\"");
        assert_eq!(quote_field("\tcol".to_string()), "\"\tcol\"");
        assert_eq!(quote_field("\u{a0}nbsp".to_string()), "\"\u{a0}nbsp\"");
        assert_eq!(quote_field(r"\.".to_string()), r#""\.""#);
        assert_eq!(quote_field(r"a\.".to_string()), r"a\.");
    }

    #[test]
    fn quotes_and_line_breaks_are_escaped() {
        assert_eq!(quote_field("say \"hi\"".to_string()), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("a|b".to_string()), "\"a|b\"");
        assert_eq!(quote_field("a\nb".to_string()), "\"a\r\nb\"");
        assert_eq!(quote_field("a\r\nb".to_string()), "\"a\r\nb\"");
        assert_eq!(quote_field("a\rb".to_string()), "\"ab\"");
    }
}
