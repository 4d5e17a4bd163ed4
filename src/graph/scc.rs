use crate::core::counterparty::CounterpartyId;
use crate::graph::claim_graph::ClaimGraph;

/// A strongly connected component of the claim graph.
///
/// Every counterparty in the component can reach every other one through a
/// chain of claims, so debt cycles (and therefore cancellation) only exist
/// inside components with more than one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StronglyConnectedComponent {
    pub counterparties: Vec<CounterpartyId>,
}

impl StronglyConnectedComponent {
    pub fn len(&self) -> usize {
        self.counterparties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counterparties.is_empty()
    }

    /// Returns true if this component contains more than one counterparty
    /// (meaning cycles may exist inside it).
    pub fn is_nettable(&self) -> bool {
        self.counterparties.len() > 1
    }
}

/// Find all strongly connected components using Tarjan's algorithm.
pub fn find_sccs(graph: &ClaimGraph) -> Vec<StronglyConnectedComponent> {
    components_from(&graph.successors(), 0)
        .into_iter()
        .map(|counterparties| StronglyConnectedComponent { counterparties })
        .collect()
}

/// Tarjan over the subgraph induced by counterparties with index `>= floor`.
///
/// Each component is returned sorted ascending.
pub(crate) fn components_from(
    adjacency: &[Vec<CounterpartyId>],
    floor: usize,
) -> Vec<Vec<CounterpartyId>> {
    let n = adjacency.len();
    let mut state = TarjanState {
        floor,
        index_counter: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![None; n],
        lowlinks: vec![0; n],
        result: Vec::new(),
    };

    for v in floor..n {
        if state.indices[v].is_none() {
            strongconnect(v, adjacency, &mut state);
        }
    }

    state.result
}

struct TarjanState {
    floor: usize,
    index_counter: usize,
    stack: Vec<usize>,
    on_stack: Vec<bool>,
    indices: Vec<Option<usize>>,
    lowlinks: Vec<usize>,
    result: Vec<Vec<CounterpartyId>>,
}

fn strongconnect(v: usize, adjacency: &[Vec<CounterpartyId>], state: &mut TarjanState) {
    state.indices[v] = Some(state.index_counter);
    state.lowlinks[v] = state.index_counter;
    state.index_counter += 1;
    state.stack.push(v);
    state.on_stack[v] = true;

    for w in adjacency[v].iter().map(|id| id.index()) {
        if w < state.floor {
            continue;
        }
        match state.indices[w] {
            None => {
                strongconnect(w, adjacency, state);
                state.lowlinks[v] = state.lowlinks[v].min(state.lowlinks[w]);
            }
            Some(idx_w) if state.on_stack[w] => {
                state.lowlinks[v] = state.lowlinks[v].min(idx_w);
            }
            Some(_) => {}
        }
    }

    // v is a root: pop its component
    if Some(state.lowlinks[v]) == state.indices[v] {
        let mut component = Vec::new();
        while let Some(w) = state.stack.pop() {
            state.on_stack[w] = false;
            component.push(CounterpartyId::new(w));
            if w == v {
                break;
            }
        }
        component.sort();
        state.result.push(component);
    }
}
