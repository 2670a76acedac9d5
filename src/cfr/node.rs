use super::edge::Edge;
use crate::Probability;
use crate::Utility;
use std::collections::BTreeMap;

/// per-infoset learned state: cumulative regret, cumulative strategy
/// weight, and a visit count. created lazily on first traversal,
/// mutated every iteration, never destroyed within a training run.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    regrets: BTreeMap<Edge, Utility>,
    weights: BTreeMap<Edge, Utility>,
    visits: usize,
}

impl Memory {
    pub fn visits(&self) -> usize {
        self.visits
    }
    pub fn touch(&mut self) {
        self.visits += 1;
    }

    /// the current strategy by regret matching:
    /// positive regrets normalized, uniform when nothing is positive
    pub fn policy(&self, edges: &[Edge]) -> BTreeMap<Edge, Probability> {
        let positive = edges
            .iter()
            .map(|e| (*e, self.regrets.get(e).copied().unwrap_or(0.0).max(0.0)))
            .collect::<BTreeMap<Edge, Utility>>();
        let total: Utility = positive.values().sum();
        if total > crate::POLICY_MIN {
            positive.into_iter().map(|(e, r)| (e, r / total)).collect()
        } else {
            let uniform = 1.0 / edges.len() as Probability;
            edges.iter().map(|e| (*e, uniform)).collect()
        }
    }

    /// the average strategy: normalized cumulative weights.
    /// this is the sequence that converges to equilibrium.
    pub fn average(&self, edges: &[Edge]) -> BTreeMap<Edge, Probability> {
        let total: Utility = edges
            .iter()
            .map(|e| self.weights.get(e).copied().unwrap_or(0.0))
            .sum();
        if total > crate::POLICY_MIN {
            edges
                .iter()
                .map(|e| (*e, self.weights.get(e).copied().unwrap_or(0.0) / total))
                .collect()
        } else {
            let uniform = 1.0 / edges.len() as Probability;
            edges.iter().map(|e| (*e, uniform)).collect()
        }
    }

    /// accumulate counterfactual regret. the plus rule floors the
    /// running sum at zero, which drops the need to carry negative
    /// bookkeeping and speeds convergence.
    pub fn add_regret(&mut self, edge: Edge, delta: Utility, plus: bool) {
        let slot = self.regrets.entry(edge).or_insert(0.0);
        *slot = if plus {
            (*slot + delta).max(0.0)
        } else {
            (*slot + delta).clamp(crate::REGRET_MIN, crate::REGRET_MAX)
        };
    }

    /// accumulate reach-weighted strategy mass
    pub fn add_weight(&mut self, edge: Edge, mass: Utility) {
        *self.weights.entry(edge).or_insert(0.0) += mass;
    }

    /// fold another worker's accumulators into this one.
    /// regret and strategy sums are additive across independent
    /// training runs over the same tree.
    pub fn merge(&mut self, other: Memory) {
        for (edge, regret) in other.regrets {
            *self.regrets.entry(edge).or_insert(0.0) += regret;
        }
        for (edge, weight) in other.weights {
            *self.weights.entry(edge).or_insert(0.0) += weight;
        }
        self.visits += other.visits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: [Edge; 2] = [Edge::Check, Edge::Bet];

    #[test]
    fn fresh_memory_is_uniform() {
        let memory = Memory::default();
        let policy = memory.policy(&EDGES);
        assert_eq!(policy[&Edge::Check], 0.5);
        assert_eq!(policy[&Edge::Bet], 0.5);
    }

    #[test]
    fn positive_regret_shifts_the_policy() {
        let mut memory = Memory::default();
        memory.add_regret(Edge::Bet, 3.0, false);
        memory.add_regret(Edge::Check, 1.0, false);
        let policy = memory.policy(&EDGES);
        assert!((policy[&Edge::Bet] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn plus_rule_floors_at_zero() {
        let mut memory = Memory::default();
        memory.add_regret(Edge::Bet, -5.0, true);
        memory.add_regret(Edge::Bet, 1.0, true);
        let policy = memory.policy(&EDGES);
        // under plus the -5 vanished, so bet carries all the mass
        assert!(policy[&Edge::Bet] > 0.99);
    }

    #[test]
    fn average_tracks_weights() {
        let mut memory = Memory::default();
        memory.add_weight(Edge::Bet, 9.0);
        memory.add_weight(Edge::Check, 1.0);
        let average = memory.average(&EDGES);
        assert!((average[&Edge::Bet] - 0.9).abs() < 1e-6);
    }
}
