use crate::core::claim::Claim;
use crate::core::counterparty::CounterpartyId;
use crate::graph::mirror::MirroredGraph;
use crate::optimization::cancellation::{CancellationReport, CycleCanceller};
use crate::optimization::exposure::ExposureMetrics;
use log::trace;
use std::collections::BTreeMap;

/// Consolidated claims between the counterparties of one netting table.
///
/// Each unordered pair of counterparties holds at most one directed claim.
/// New claims are consolidated against whatever already exists between the
/// pair, so the graph never carries both `a -> b` and `b -> a`, never stores
/// a self-claim, and never stores a non-positive weight.
///
/// # Examples
///
/// ```
/// use netting_table::prelude::*;
///
/// let mut graph = ClaimGraph::new();
/// let a = graph.add_counterparty();
/// let b = graph.add_counterparty();
///
/// graph.add_claim(a, b, 100.0);
/// graph.add_claim(b, a, 60.0);
///
/// assert_eq!(graph.claim_count(), 1);
/// assert_eq!(graph.weight(a, b), Some(40.0));
/// assert_eq!(graph.weight(b, a), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimGraph {
    counterparty_count: usize,
    /// (low id, high id) -> the single directed claim between the pair
    claims: BTreeMap<(CounterpartyId, CounterpartyId), Claim>,
}

fn pair_key(a: CounterpartyId, b: CounterpartyId) -> (CounterpartyId, CounterpartyId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ClaimGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `count` counterparties and no claims.
    pub fn with_counterparties(count: usize) -> Self {
        Self {
            counterparty_count: count,
            claims: BTreeMap::new(),
        }
    }

    /// Register a new counterparty and return its fresh id.
    pub fn add_counterparty(&mut self) -> CounterpartyId {
        let id = CounterpartyId::new(self.counterparty_count);
        self.counterparty_count += 1;
        id
    }

    /// Record that `src` owes `dst` the amount `value`.
    ///
    /// Ignored when `src == dst`, when either id is not registered, or when
    /// `value` is not a finite positive number. Otherwise the amount is netted
    /// against any existing claim between the pair and the surviving direction
    /// is kept; an exact offset removes the pair entirely. A claim whose
    /// consolidated amount would overflow to infinity is ignored as well.
    pub fn add_claim(&mut self, src: CounterpartyId, dst: CounterpartyId, value: f64) {
        if src == dst || !self.contains(src) || !self.contains(dst) {
            trace!("ignoring claim {} -> {}: invalid endpoints", src, dst);
            return;
        }
        if !value.is_finite() || value <= 0.0 {
            trace!("ignoring claim {} -> {}: value {}", src, dst, value);
            return;
        }

        let key = pair_key(src, dst);
        // Signed amount in the src -> dst direction.
        let signed = match self.claims.get(&key) {
            Some(existing) if existing.from() == src => existing.weight() + value,
            Some(existing) => value - existing.weight(),
            None => value,
        };
        if !signed.is_finite() {
            trace!("ignoring claim {} -> {}: consolidated amount overflows", src, dst);
            return;
        }

        if signed > 0.0 {
            self.claims.insert(key, Claim::new(src, dst, signed));
        } else if signed < 0.0 {
            self.claims.insert(key, Claim::new(dst, src, -signed));
        } else {
            self.claims.remove(&key);
        }
    }

    /// Whether `id` has been registered in this table.
    pub fn contains(&self, id: CounterpartyId) -> bool {
        id.index() < self.counterparty_count
    }

    pub fn counterparty_count(&self) -> usize {
        self.counterparty_count
    }

    /// All registered counterparties in ascending order.
    pub fn counterparties(&self) -> impl Iterator<Item = CounterpartyId> {
        (0..self.counterparty_count).map(CounterpartyId::new)
    }

    /// Number of stored (consolidated) claims.
    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Weight of the claim `from -> to`, if that directed claim exists.
    pub fn weight(&self, from: CounterpartyId, to: CounterpartyId) -> Option<f64> {
        self.claims
            .get(&pair_key(from, to))
            .filter(|claim| claim.from() == from)
            .map(Claim::weight)
    }

    /// The claim between `a` and `b` in whichever direction it runs.
    pub fn claim_between(&self, a: CounterpartyId, b: CounterpartyId) -> Option<&Claim> {
        self.claims.get(&pair_key(a, b))
    }

    /// All claims, ordered by their (low id, high id) pair.
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// Claims owed by `party`, ordered by creditor id.
    pub fn outgoing(&self, party: CounterpartyId) -> Vec<Claim> {
        let mut out: Vec<Claim> = self
            .claims
            .values()
            .filter(|claim| claim.from() == party)
            .copied()
            .collect();
        out.sort_by_key(|claim| claim.to());
        out
    }

    /// Sum of all claim weights.
    pub fn gross_total(&self) -> f64 {
        self.claims.values().map(Claim::weight).sum()
    }

    /// Adjacency list indexed by counterparty: creditors of each debtor in
    /// ascending id order.
    pub fn successors(&self) -> Vec<Vec<CounterpartyId>> {
        let mut adjacency = vec![Vec::new(); self.counterparty_count];
        for claim in self.claims.values() {
            adjacency[claim.from().index()].push(claim.to());
        }
        for creditors in &mut adjacency {
            creditors.sort();
        }
        adjacency
    }

    /// Independent copy carrying the implicit negative reciprocal of every claim.
    pub fn mirrored(&self) -> MirroredGraph {
        MirroredGraph::from_graph(self)
    }

    /// Exposure metrics computed from a mirrored snapshot of this graph.
    pub fn exposure(&self) -> ExposureMetrics {
        ExposureMetrics::of(self)
    }

    /// Run one cycle-cancellation pass in place.
    pub fn optimize(&mut self) -> CancellationReport {
        CycleCanceller::optimize(self)
    }

    /// Lower the weight of the existing claim `from -> to` by `amount`.
    ///
    /// The claim stays stored even when it reaches zero until
    /// [`remove_exhausted`](Self::remove_exhausted) runs. Returns `false` when
    /// no claim runs in that direction.
    pub(crate) fn reduce_claim(
        &mut self,
        from: CounterpartyId,
        to: CounterpartyId,
        amount: f64,
    ) -> bool {
        match self.claims.get_mut(&pair_key(from, to)) {
            Some(claim) if claim.from() == from => {
                *claim.weight_mut() -= amount;
                true
            }
            _ => false,
        }
    }

    /// Drop every claim whose weight has fallen to zero. Returns how many were removed.
    pub(crate) fn remove_exhausted(&mut self) -> usize {
        let before = self.claims.len();
        self.claims.retain(|_, claim| claim.weight() > 0.0);
        before - self.claims.len()
    }
}
