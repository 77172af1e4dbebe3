use crate::error::DatasetError;
use crate::loader::load_orders_file;
use analytics::Aggregator;
use core_types::{DateRange, OrderRecord};
use std::path::Path;
use std::sync::Arc;

/// The read-only order table for a dashboard session.
///
/// Loaded once and shared by cloning; clones point at the same rows.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    records: Arc<Vec<OrderRecord>>,
}

impl OrderRepository {
    /// Wraps rows that have already been loaded.
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Loads the dataset at `path` into a new repository.
    pub fn open(path: &Path) -> Result<Self, DatasetError> {
        let records = load_orders_file(path)?;
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// An aggregator bound to the full table.
    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.records)
    }

    /// The earliest and latest approval instants, used as the default filter.
    /// `None` when no row has been approved.
    pub fn approval_bounds(&self) -> Option<DateRange> {
        self.aggregator().full_range()
    }
}
