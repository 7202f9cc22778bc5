use crate::schema::SourceSchema;

/// Number every primary-key entry `1..=N` in its current position order.
pub fn init_primary_key_order(src_schema: &mut SourceSchema) {
    for table in src_schema.values_mut() {
        for (position, key) in table.primary_keys.iter_mut().enumerate() {
            key.order = position + 1;
        }
    }
}

/// Number the keys of each index `1..=N`, independently per index.
pub fn init_index_order(src_schema: &mut SourceSchema) {
    for table in src_schema.values_mut() {
        for index in &mut table.indexes {
            for (position, key) in index.keys.iter_mut().enumerate() {
                key.order = position + 1;
            }
        }
    }
}

/// Establish primary-key and index key orders. Must run once after ingestion.
pub fn init_key_orders(src_schema: &mut SourceSchema) {
    init_primary_key_order(src_schema);
    init_index_order(src_schema);
    tracing::debug!(event = "key_orders_initialized", tables = src_schema.len());
}
