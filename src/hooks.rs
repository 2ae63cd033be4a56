use crate::types::Record;

/// Per-entity strategy threaded through both pipelines.
///
/// `transform` reshapes a raw parsed row before any validation runs;
/// `validate` may reject the transformed row with a reason that ends up in
/// the import report; `transform_export` reshapes a fetched batch before
/// serialization. All three default to the identity.
pub trait RowHooks {
    fn transform(&self, raw: Record) -> Record {
        raw
    }

    /// # Errors
    /// The returned reason is recorded against the row, which is skipped.
    fn validate(&self, _record: &Record, _row: usize) -> Result<(), String> {
        Ok(())
    }

    fn transform_export(&self, records: Vec<Record>) -> Vec<Record> {
        records
    }
}

/// Identity hooks for callers with no entity-specific shaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl RowHooks for NoHooks {}
