use crate::domain::repositories::StoreError;

use super::gateway::StoreGateway;

/// Legacy identifier allocator
///
/// Computes the next integer id for a table as `max(existing) + 1`,
/// starting at 1 on an empty table. The read and the subsequent insert are
/// not atomic: two concurrent allocations can observe the same maximum and
/// race to the same value, which then surfaces as a duplicate-key conflict
/// on insert. Selected only via `ID_ALLOCATION=legacy-max`; the default
/// configuration lets the store assign identifiers.
pub struct IdAllocator {
    gateway: StoreGateway,
}

impl IdAllocator {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    /// Returns the next id for `table`, reading the current maximum of
    /// `id_column`.
    pub async fn next_id(&self, table: &str, id_column: &str) -> Result<i64, StoreError> {
        // table and column names are code constants, not client input
        let sql = format!("SELECT MAX({id_column}) FROM {table}");
        let row: Option<(Option<i64>,)> =
            self.gateway.fetch_optional(sqlx::query_as(&sql)).await?;

        Ok(next_from_max(row.and_then(|(max,)| max)))
    }
}

fn next_from_max(max: Option<i64>) -> i64 {
    max.unwrap_or(0) + 1
}
