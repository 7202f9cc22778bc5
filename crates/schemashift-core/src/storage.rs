//! Storage sizes and the per-row non-key size limit.

use crate::config::ConversionSettings;
use crate::context::Conv;
use crate::error::Result;
use crate::issues::{SchemaIssue, remove_schema_issue};
use crate::types::{Length, TargetType, TypeCode};

/// Fixed storage size in bytes, or `None` for length-dependent types.
pub fn fixed_storage_size(code: TypeCode, settings: &ConversionSettings) -> Option<u64> {
    match code {
        TypeCode::Bool => Some(1),
        TypeCode::Date => Some(4),
        TypeCode::Float32 => Some(4),
        TypeCode::Float64 => Some(8),
        TypeCode::Int64 => Some(8),
        TypeCode::Json => Some(settings.string_max_length),
        TypeCode::Numeric => Some(22),
        TypeCode::Timestamp => Some(12),
        TypeCode::String | TypeCode::Bytes => None,
    }
}

/// Storage size of a single column value.
pub fn column_size(ty: &TargetType, settings: &ConversionSettings) -> u64 {
    if let Some(size) = fixed_storage_size(ty.name, settings) {
        return size;
    }
    match (ty.name, ty.len) {
        (TypeCode::Bytes, Length::Max) => settings.bytes_max_length,
        (_, Length::Max) => settings.string_max_length,
        (_, Length::Bounded(len)) => len,
    }
}

/// Sum the storage of all non-primary-key target columns of `table_id` and
/// keep the `RowLimitExceeded` table issue in step with the result.
///
/// Any stale `RowLimitExceeded` entry is removed before the check, so calling
/// this repeatedly after schema edits never accumulates duplicates. The sum
/// saturates at `u64::MAX`, which is always over the limit.
pub fn compute_non_key_column_size(conv: &mut Conv, table_id: &str) -> Result<u64> {
    let table = conv.target_table(table_id)?;
    let total = table
        .col_defs
        .values()
        .filter(|col| !table.is_primary_key(&col.id))
        .map(|col| column_size(&col.ty, &conv.settings))
        .fold(0u64, u64::saturating_add);

    let exceeded = total > conv.settings.max_non_key_column_length;
    let issues = conv.schema_issues.entry(table_id);
    let mut table_level = remove_schema_issue(
        std::mem::take(&mut issues.table_level_issues),
        SchemaIssue::RowLimitExceeded,
    );
    if exceeded {
        table_level.push(SchemaIssue::RowLimitExceeded);
        tracing::debug!(event = "row_limit_exceeded", table_id = %table_id, size = total);
    }
    issues.table_level_issues = table_level;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sizes_follow_engine_table() {
        let settings = ConversionSettings::default();
        let size = |code| fixed_storage_size(code, &settings);
        assert_eq!(size(TypeCode::Bool), Some(1));
        assert_eq!(size(TypeCode::Date), Some(4));
        assert_eq!(size(TypeCode::Float32), Some(4));
        assert_eq!(size(TypeCode::Float64), Some(8));
        assert_eq!(size(TypeCode::Int64), Some(8));
        assert_eq!(size(TypeCode::Json), Some(settings.string_max_length));
        assert_eq!(size(TypeCode::Numeric), Some(22));
        assert_eq!(size(TypeCode::Timestamp), Some(12));
        assert_eq!(size(TypeCode::String), None);
    }

    #[test]
    fn variable_types_use_declared_or_max_length() {
        let settings = ConversionSettings::default();
        let sized = |code, len| column_size(&TargetType::sized(code, len), &settings);
        assert_eq!(sized(TypeCode::String, Length::Bounded(50)), 50);
        assert_eq!(sized(TypeCode::String, Length::Max), settings.string_max_length);
        assert_eq!(sized(TypeCode::Bytes, Length::Bounded(7)), 7);
        assert_eq!(sized(TypeCode::Bytes, Length::Max), settings.bytes_max_length);
    }
}
