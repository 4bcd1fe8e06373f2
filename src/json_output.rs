use crate::record::BookRecord;
use crate::storage::StoragePlan;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RecordReport<'a> {
    pub record: &'a BookRecord,
    pub storage: &'a StoragePlan,
    pub needs_review: Vec<&'static str>,
}

impl<'a> RecordReport<'a> {
    pub fn new(record: &'a BookRecord, storage: &'a StoragePlan) -> Self {
        Self {
            record,
            storage,
            needs_review: record.missing_fields(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
