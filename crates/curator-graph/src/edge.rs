//! Edge data for the vault graph.
//!
//! An edge records the journal dates on which two nodes were mentioned
//! together. The dates are what make incremental updates possible: when one
//! journal entry changes, only that entry's date has to be taken off every
//! edge and derived again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dates on which a relationship between two nodes was observed.
///
/// An edge without dates is dead and must not stay in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDates {
    dates: BTreeSet<NaiveDate>,
}

impl EdgeDates {
    /// Creates an edge observed on a single date.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            dates: BTreeSet::from([date]),
        }
    }

    /// Adds a date. Returns false if it was already present.
    pub fn add(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// Removes a date. Returns false if it was not present.
    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.dates.remove(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// True when no dates are left.
    pub fn is_dead(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// The most recent date.
    pub fn last_seen(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// A flattened edge for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub dates: Vec<NaiveDate>,
}
