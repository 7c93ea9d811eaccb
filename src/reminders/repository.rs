//! Record source for the reminder batch.
//!
//! Persistence lives outside the engine; the batch only needs something
//! that can list every recurring record.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::RecurringRecord;

/// Supplies recurring records to the reminder batch.
///
/// Implementations must be shareable across request handlers.
pub trait RecordRepository: Send + Sync {
    /// Returns every income, expense and debt record.
    fn recurring_records(&self) -> EngineResult<Vec<RecurringRecord>>;
}

/// A fixed set of records held in memory.
///
/// # Example
///
/// ```
/// use cashflow_engine::reminders::{InMemoryRepository, RecordRepository};
///
/// let repository = InMemoryRepository::default();
/// assert!(repository.recurring_records().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Vec<RecurringRecord>,
}

impl InMemoryRepository {
    /// Creates a repository holding `records`.
    pub fn new(records: Vec<RecurringRecord>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON array file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let records =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { records })
    }
}

impl RecordRepository for InMemoryRepository {
    fn recurring_records(&self) -> EngineResult<Vec<RecurringRecord>> {
        Ok(self.records.clone())
    }
}
