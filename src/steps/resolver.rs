//! Prerequisite resolver: which steps are offered for a creature.
//!
//! ## Rules
//!
//! - A step is *settled* when its relevance predicate is false (done, or
//!   not applicable to this creature).
//! - A step is *offered* when every prerequisite is settled and its own
//!   predicate is true. Prerequisites naming a step outside the graph are
//!   treated as settled.
//!
//! ## Evaluation
//!
//! The graph is tiny (at most a dozen steps) and acyclic. It is put in
//! topological order with Kahn's algorithm, then evaluated in one pass.
//! Relevance is memoized per step name for the duration of a single query,
//! so every predicate runs at most once. Steps caught in a cycle are never
//! offered.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::run::{Pokemon, Run};

use super::catalog::StepCatalog;
use super::step::{StepContext, StepInfo, StepName};

/// Resolves offered steps against a variant's step graph.
#[derive(Debug)]
pub struct StepResolver<'a> {
    graph: &'a [StepInfo],
    catalog: &'a StepCatalog,
    order: Vec<usize>,
}

impl<'a> StepResolver<'a> {
    /// Prepare a resolver for `graph`, whose steps come from `catalog`.
    #[must_use]
    pub fn new(graph: &'a [StepInfo], catalog: &'a StepCatalog) -> Self {
        let order = topological_order(graph);
        if order.len() < graph.len() {
            warn!(steps = graph.len(), ordered = order.len(), "step graph has a cycle");
        }
        Self { graph, catalog, order }
    }

    /// Offered steps in graph declaration order.
    #[must_use]
    pub fn offered(&self, ctx: &StepContext<'_>, run: &Run, pokemon: &Pokemon) -> Vec<StepName> {
        let mut relevance: FxHashMap<StepName, bool> = FxHashMap::default();
        let mut offered = vec![false; self.graph.len()];

        for &idx in &self.order {
            let info = &self.graph[idx];
            let prerequisites_settled = info.prerequisites.iter().all(|&p| {
                !self.in_graph(p) || !self.relevant(&mut relevance, p, ctx, run, pokemon)
            });
            offered[idx] =
                prerequisites_settled && self.relevant(&mut relevance, info.name, ctx, run, pokemon);
        }

        let result: Vec<StepName> = self
            .graph
            .iter()
            .zip(&offered)
            .filter(|(_, o)| **o)
            .map(|(info, _)| info.name)
            .collect();
        debug!(creature = %pokemon.id(), steps = ?result, "resolved steps");
        result
    }

    /// Whether `name` is offered right now.
    #[must_use]
    pub fn is_offered(
        &self,
        ctx: &StepContext<'_>,
        run: &Run,
        pokemon: &Pokemon,
        name: StepName,
    ) -> bool {
        self.offered(ctx, run, pokemon).contains(&name)
    }

    fn in_graph(&self, name: StepName) -> bool {
        self.graph.iter().any(|s| s.name == name)
    }

    fn relevant(
        &self,
        memo: &mut FxHashMap<StepName, bool>,
        name: StepName,
        ctx: &StepContext<'_>,
        run: &Run,
        pokemon: &Pokemon,
    ) -> bool {
        *memo.entry(name).or_insert_with(|| {
            self.catalog
                .get(name)
                .is_some_and(|step| step.is_relevant(ctx, run, pokemon))
        })
    }
}

/// Kahn's algorithm over graph indices. Unknown prerequisites add no edge.
fn topological_order(graph: &[StepInfo]) -> Vec<usize> {
    let index: FxHashMap<StepName, usize> =
        graph.iter().enumerate().map(|(i, s)| (s.name, i)).collect();

    let mut indegree = vec![0usize; graph.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];
    for (i, info) in graph.iter().enumerate() {
        for p in &info.prerequisites {
            if let Some(&j) = index.get(p) {
                indegree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    let mut ready: Vec<usize> = (0..graph.len()).filter(|&i| indegree[i] == 0).rev().collect();
    let mut order = Vec::with_capacity(graph.len());
    while let Some(i) = ready.pop() {
        order.push(i);
        for &d in dependents[i].iter().rev() {
            indegree[d] -= 1;
            if indegree[d] == 0 {
                ready.push(d);
            }
        }
    }
    order
}
