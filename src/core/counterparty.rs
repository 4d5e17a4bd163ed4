use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a counterparty inside a single netting table.
///
/// Ids are assigned sequentially from 0 by
/// [`ClaimGraph::add_counterparty`](crate::graph::claim_graph::ClaimGraph::add_counterparty)
/// and are never reused: counterparties are append-only for the lifetime of a table.
///
/// # Examples
///
/// ```
/// use netting_table::core::counterparty::CounterpartyId;
///
/// let a = CounterpartyId::new(0);
/// let b = CounterpartyId::new(1);
/// assert!(a < b);
/// assert_eq!(b.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterpartyId(usize);

impl CounterpartyId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this counterparty in the table (row/column of the matrix).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for CounterpartyId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}
