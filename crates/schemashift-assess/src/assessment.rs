use schemashift_core::{Conv, sorted_table_ids_by_src_name};

use crate::model::{
    AssessmentOutput, ColumnAssessment, ColumnDetails, SchemaAssessmentOutput, TableAssessment,
};

/// Collect the assessment for every source table of a conversion.
///
/// Tables follow source name order and columns their declared order, so the
/// output is stable across runs.
pub fn collect_assessment(conv: &Conv) -> AssessmentOutput {
    let mut tables = Vec::with_capacity(conv.src_schema.len());

    for table_id in sorted_table_ids_by_src_name(&conv.src_schema) {
        let Some(table) = conv.src_schema.get(&table_id) else {
            continue;
        };
        let target = conv.target_schema.get(&table_id);

        let columns = table
            .col_ids
            .iter()
            .filter_map(|col_id| table.col_defs.get(col_id))
            .map(|col| ColumnAssessment {
                col_id: col.id.clone(),
                name: col.name.clone(),
                details: ColumnDetails {
                    datatype: col.data_type.clone(),
                    is_array: col.is_array,
                    size: col.size,
                    is_null: col.is_nullable,
                },
                target_definition: target
                    .and_then(|target| target.col_defs.get(&col.id))
                    .map(|target_col| target_col.ty.to_string()),
                issues: conv.schema_issues.column_issues(&table_id, &col.id).to_vec(),
            })
            .collect();

        tables.push(TableAssessment {
            name: table.name.clone(),
            target_name: target.map(|target| target.name.clone()),
            issues: conv.schema_issues.table_level_issues(&table_id).to_vec(),
            columns,
            table_id,
        });
    }

    tracing::debug!(event = "assessment_collected", tables = tables.len());

    AssessmentOutput {
        schema_assessment: SchemaAssessmentOutput { tables },
    }
}
