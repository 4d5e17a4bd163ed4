use crate::core::counterparty::CounterpartyId;
use crate::graph::claim_graph::ClaimGraph;
use crate::graph::scc::components_from;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An elementary debt cycle: each counterparty owes the next one, and the
/// last owes the first.
///
/// Cycles produced by [`find_cycles`] always start at their smallest id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimCycle {
    counterparties: Vec<CounterpartyId>,
}

impl ClaimCycle {
    pub fn new(counterparties: Vec<CounterpartyId>) -> Self {
        Self { counterparties }
    }

    /// Counterparties in cycle order, without repeating the start.
    pub fn counterparties(&self) -> &[CounterpartyId] {
        &self.counterparties
    }

    /// The number of counterparties (and claims) in this cycle.
    pub fn len(&self) -> usize {
        self.counterparties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counterparties.is_empty()
    }

    /// The directed (debtor, creditor) pairs of the cycle, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (CounterpartyId, CounterpartyId)> + '_ {
        let n = self.counterparties.len();
        (0..n).map(move |i| (self.counterparties[i], self.counterparties[(i + 1) % n]))
    }

    /// Smallest current weight along the cycle.
    ///
    /// `None` when some edge of the cycle no longer exists in `graph`.
    pub fn bottleneck(&self, graph: &ClaimGraph) -> Option<f64> {
        self.edges().try_fold(f64::INFINITY, |min, (from, to)| {
            graph.weight(from, to).map(|weight| min.min(weight))
        })
    }
}

/// Enumerate every elementary cycle of the claim graph.
///
/// Johnson's algorithm: for each start node `s` in ascending order, search
/// only the strongly connected component containing `s` within the subgraph
/// of nodes `>= s`, following creditors in ascending order. Every cycle is
/// emitted exactly once, rooted at its smallest id, and the emission order
/// depends only on the current edge set.
///
/// Exponential in the number of cycles in the worst case; intended for
/// counterparty-sized tables.
pub fn find_cycles(graph: &ClaimGraph) -> Vec<ClaimCycle> {
    let adjacency = graph.successors();
    let n = adjacency.len();
    let mut cycles = Vec::new();

    for start in 0..n {
        let component = match components_from(&adjacency, start)
            .into_iter()
            .find(|component| component.first().map(|id| id.index()) == Some(start))
        {
            Some(component) if component.len() > 1 => component,
            _ => continue,
        };

        let mut search = CircuitSearch::new(&adjacency, start, &component);
        search.circuit(start, &mut cycles);
    }

    cycles
}

/// Blocking state of one Johnson search rooted at `start`.
struct CircuitSearch<'a> {
    adjacency: &'a [Vec<CounterpartyId>],
    start: usize,
    in_component: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<BTreeSet<usize>>,
    stack: Vec<CounterpartyId>,
}

impl<'a> CircuitSearch<'a> {
    fn new(adjacency: &'a [Vec<CounterpartyId>], start: usize, component: &[CounterpartyId]) -> Self {
        let n = adjacency.len();
        let mut in_component = vec![false; n];
        for id in component {
            in_component[id.index()] = true;
        }
        Self {
            adjacency,
            start,
            in_component,
            blocked: vec![false; n],
            blocked_by: vec![BTreeSet::new(); n],
            stack: Vec::new(),
        }
    }

    fn circuit(&mut self, v: usize, cycles: &mut Vec<ClaimCycle>) -> bool {
        let adjacency = self.adjacency;
        let mut closed = false;
        self.stack.push(CounterpartyId::new(v));
        self.blocked[v] = true;

        for w in adjacency[v].iter().map(|id| id.index()) {
            if !self.in_component[w] {
                continue;
            }
            if w == self.start {
                cycles.push(ClaimCycle::new(self.stack.clone()));
                closed = true;
            } else if !self.blocked[w] && self.circuit(w, cycles) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for w in adjacency[v].iter().map(|id| id.index()) {
                if self.in_component[w] {
                    self.blocked_by[w].insert(v);
                }
            }
        }

        self.stack.pop();
        closed
    }

    fn unblock(&mut self, u: usize) {
        self.blocked[u] = false;
        let waiting = std::mem::take(&mut self.blocked_by[u]);
        for w in waiting {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}
