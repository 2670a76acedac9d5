use super::edge::Edge;
use super::info::Info;
use super::node::Memory;
use super::tree::GameTree;
use super::tree::Leaf;
use super::tree::Spot;
use super::tree::Turn;
use crate::Equity;
use crate::Probability;
use crate::Utility;
use crate::config::CfrConfig;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::time::Instant;

/// which regret minimization rule drives training
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// plain counterfactual regret matching
    Vanilla,
    /// regrets floored at zero, linear strategy averaging
    Plus,
    /// external-sampling monte carlo: opponent and chance sampled,
    /// hidden cards drawn from a fresh shuffled world each iteration
    External,
}

/// training progress handed to callers every few epochs,
/// so deadlines and stopping rules stay in their hands
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub iteration: usize,
    pub exploitability: Utility,
}

/// the regret minimizer over one abstract tree.
///
/// walks the tree once per iteration per role, accumulating
/// counterfactual regret and reach-weighted strategy mass per
/// infoset. the normalized strategy mass is what converges to
/// equilibrium, and is everything the synthesizer consumes.
pub struct Trainer {
    tree: GameTree,
    profile: BTreeMap<Info, Memory>,
    variant: Variant,
    world: Option<(Game, usize)>,
    epochs: usize,
    rng: SmallRng,
}

impl Trainer {
    pub fn new(tree: GameTree, variant: Variant, seed: u64) -> Self {
        Self {
            tree,
            variant,
            profile: BTreeMap::new(),
            world: None,
            epochs: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// attach the real table state so external sampling can draw
    /// hidden cards from a genuinely shuffled world
    pub fn with_world(mut self, game: Game, hero: usize) -> Self {
        self.world = Some((game, hero));
        self
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// run iterations until the budget, the exploitability target, or
    /// the deadline is hit. on expiry the current average strategy is
    /// whatever callers read next, no partial update is ever visible.
    pub fn train(
        &mut self,
        config: &CfrConfig,
        deadline: Option<Instant>,
        progress: &mut dyn FnMut(Progress),
    ) {
        for t in 1..=config.iterations {
            self.iterate();
            if t % config.exploit_every == 0 {
                let exploitability = self.exploitability();
                progress(Progress {
                    iteration: t,
                    exploitability,
                });
                if exploitability < config.exploit_target {
                    log::debug!("converged at {} after {} iterations", exploitability, t);
                    break;
                }
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    log::debug!("deadline after {} iterations", t);
                    break;
                }
            }
        }
    }

    /// one epoch: both roles traverse once
    pub fn iterate(&mut self) {
        self.epochs += 1;
        let root = self.tree.root();
        match self.variant {
            Variant::Vanilla | Variant::Plus => {
                self.cfr(root, 1.0, 1.0, Turn::Hero, None);
                self.cfr(root, 1.0, 1.0, Turn::Villain, None);
            }
            Variant::External => {
                let world = self.sample_world();
                self.external(root, Turn::Hero, world);
                self.external(root, Turn::Villain, world);
            }
        }
    }

    /// full shuffled deck, hidden cards dealt, board run out:
    /// one concrete showdown result shared by this iteration
    fn sample_world(&mut self) -> Option<Equity> {
        let (game, hero) = self.world.clone()?;
        Some(game.sample_showdown(hero, &mut self.rng))
    }

    /// vanilla recursion: full traversal, reach-weighted updates.
    /// utilities are hero-perspective; the villain maximizes their
    /// negation.
    fn cfr(
        &mut self,
        node: NodeIndex,
        hero_reach: Probability,
        villain_reach: Probability,
        traverser: Turn,
        world: Option<Equity>,
    ) -> Utility {
        let spot = self.tree.spot(node).clone();
        match spot {
            Spot::Terminal(leaf) => Self::payoff(&leaf, world),
            Spot::Choice { turn, info } => {
                let children = self.tree.children(node);
                let edges = children.iter().map(|(e, _)| *e).collect::<Vec<Edge>>();
                let policy = self.memory(&info).policy(&edges);
                let mut utils = BTreeMap::new();
                let mut value = 0.0;
                for (edge, child) in children.iter() {
                    let p = policy[edge];
                    let (hr, vr) = match turn {
                        Turn::Hero => (hero_reach * p, villain_reach),
                        Turn::Villain => (hero_reach, villain_reach * p),
                    };
                    let util = self.cfr(*child, hr, vr, traverser, world);
                    utils.insert(*edge, util);
                    value += p * util;
                }
                if turn == traverser {
                    let sign = match turn {
                        Turn::Hero => 1.0,
                        Turn::Villain => -1.0,
                    };
                    let (own, opp) = match turn {
                        Turn::Hero => (hero_reach, villain_reach),
                        Turn::Villain => (villain_reach, hero_reach),
                    };
                    let plus = self.variant == Variant::Plus;
                    let mass = self.averaging_weight();
                    let memory = self.memory_mut(&info);
                    memory.touch();
                    for edge in edges.iter() {
                        memory.add_regret(*edge, opp * sign * (utils[edge] - value), plus);
                        memory.add_weight(*edge, own * policy[edge] * mass);
                    }
                }
                value
            }
        }
    }

    /// external sampling: the traverser explores every edge, everyone
    /// else is sampled from their current strategy
    fn external(&mut self, node: NodeIndex, traverser: Turn, world: Option<Equity>) -> Utility {
        let spot = self.tree.spot(node).clone();
        match spot {
            Spot::Terminal(leaf) => Self::payoff(&leaf, world),
            Spot::Choice { turn, info } => {
                let children = self.tree.children(node);
                let edges = children.iter().map(|(e, _)| *e).collect::<Vec<Edge>>();
                let policy = self.memory(&info).policy(&edges);
                if turn == traverser {
                    let sign = match turn {
                        Turn::Hero => 1.0,
                        Turn::Villain => -1.0,
                    };
                    let mut utils = BTreeMap::new();
                    let mut value = 0.0;
                    for (edge, child) in children.iter() {
                        let util = self.external(*child, traverser, world);
                        utils.insert(*edge, util);
                        value += policy[edge] * util;
                    }
                    let memory = self.memory_mut(&info);
                    memory.touch();
                    for edge in edges.iter() {
                        memory.add_regret(*edge, sign * (utils[edge] - value), false);
                    }
                    value
                } else {
                    let edge = Self::roll(&policy, &mut self.rng);
                    let mass = self.averaging_weight();
                    self.memory_mut(&info).add_weight(edge, mass);
                    let child = children
                        .iter()
                        .find(|(e, _)| *e == edge)
                        .map(|(_, c)| *c)
                        .expect("sampled edge exists");
                    self.external(child, traverser, world)
                }
            }
        }
    }

    fn roll(policy: &BTreeMap<Edge, Probability>, rng: &mut SmallRng) -> Edge {
        let total: Probability = policy.values().sum();
        let mut roll = rng.random_range(0.0..total.max(crate::POLICY_MIN));
        for (edge, p) in policy.iter() {
            roll -= p;
            if roll <= 0.0 {
                return *edge;
            }
        }
        *policy.keys().next_back().expect("nonempty policy")
    }

    /// plus uses linear averaging, later epochs weigh more
    fn averaging_weight(&self) -> Utility {
        match self.variant {
            Variant::Plus => self.epochs as Utility,
            _ => 1.0,
        }
    }

    fn payoff(leaf: &Leaf, world: Option<Equity>) -> Utility {
        match leaf {
            Leaf::Chips(util) => *util,
            Leaf::Showdown { pot, spent, equity } => {
                let share = world.unwrap_or(*equity);
                share * pot - spent
            }
        }
    }

    fn memory(&mut self, info: &Info) -> &Memory {
        self.profile.entry(info.clone()).or_default()
    }
    fn memory_mut(&mut self, info: &Info) -> &mut Memory {
        self.profile.entry(info.clone()).or_default()
    }

    /// fold a worker trainer into this one. iterations parallelize
    /// embarrassingly: each worker trains its own profile over the
    /// same tree, then the per-infoset tables sum.
    pub fn absorb(&mut self, other: Trainer) {
        for (info, memory) in other.profile {
            self.profile.entry(info).or_default().merge(memory);
        }
        self.epochs += other.epochs;
    }

    /// the average strategy at an infoset
    pub fn strategy(&self, info: &Info, edges: &[Edge]) -> BTreeMap<Edge, Probability> {
        match self.profile.get(info) {
            Some(memory) => memory.average(edges),
            None => {
                let uniform = 1.0 / edges.len().max(1) as Probability;
                edges.iter().map(|e| (*e, uniform)).collect()
            }
        }
    }

    /// distance from equilibrium: each role's best response against
    /// the other's average strategy, averaged over both roles.
    /// zero at Nash; used as the stopping heuristic.
    pub fn exploitability(&self) -> Utility {
        let root = self.tree.root();
        let hero = self.best_response(root, Turn::Hero);
        let villain = self.best_response(root, Turn::Villain);
        (hero + villain) / 2.0
    }

    /// value to the responder when it plays pure best response and
    /// the other side plays its average strategy
    fn best_response(&self, node: NodeIndex, responder: Turn) -> Utility {
        match self.tree.spot(node) {
            Spot::Terminal(leaf) => {
                let util = Self::payoff(leaf, None);
                match responder {
                    Turn::Hero => util,
                    Turn::Villain => -util,
                }
            }
            Spot::Choice { turn, info } => {
                let children = self.tree.children(node);
                let edges = children.iter().map(|(e, _)| *e).collect::<Vec<Edge>>();
                let values = children
                    .iter()
                    .map(|(_, child)| self.best_response(*child, responder));
                if *turn == responder {
                    values.fold(Utility::MIN, Utility::max)
                } else {
                    let average = self.strategy(info, &edges);
                    children
                        .iter()
                        .map(|(e, child)| average[e] * self.best_response(*child, responder))
                        .sum()
                }
            }
        }
    }

    /// the root recommendation: per concrete action, the average
    /// strategy frequency and the expected utility of committing to
    /// that action while both sides then follow the average profile
    pub fn decision(&self) -> Vec<(Action, Probability, Utility)> {
        let root = self.tree.root();
        let children = self.tree.children(root);
        let edges = children.iter().map(|(e, _)| *e).collect::<Vec<Edge>>();
        let info = match self.tree.spot(root) {
            Spot::Choice { info, .. } => info.clone(),
            Spot::Terminal(_) => unreachable!("roots are decisions"),
        };
        let average = self.strategy(&info, &edges);
        children
            .iter()
            .filter_map(|(edge, child)| {
                self.tree
                    .actions()
                    .iter()
                    .find(|(e, _)| e == edge)
                    .map(|(_, action)| (*action, average[edge], self.expectation(*child)))
            })
            .collect()
    }

    /// expected hero utility under average play from here down
    fn expectation(&self, node: NodeIndex) -> Utility {
        match self.tree.spot(node) {
            Spot::Terminal(leaf) => Self::payoff(leaf, None),
            Spot::Choice { info, .. } => {
                let children = self.tree.children(node);
                let edges = children.iter().map(|(e, _)| *e).collect::<Vec<Edge>>();
                let average = self.strategy(info, &edges);
                children
                    .iter()
                    .map(|(e, child)| average[e] * self.expectation(*child))
                    .sum()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// biased matching pennies: hero picks heads or tails, villain
    /// answers blind. payoffs (hero perspective):
    ///   heads/heads +2, heads/tails -1, tails/heads -1, tails/tails +1
    /// the unique equilibrium mixes hero 40/60 and villain 40/60,
    /// with game value +0.2 for the hero.
    fn pennies() -> GameTree {
        let mut tree = GameTree::seed(Spot::Choice {
            turn: Turn::Hero,
            info: Info::from("mp:hero"),
        });
        let root = tree.root();
        let heads = tree.grow(
            root,
            Edge::Check,
            Spot::Choice {
                turn: Turn::Villain,
                info: Info::from("mp:villain"),
            },
        );
        let tails = tree.grow(
            root,
            Edge::Bet,
            Spot::Choice {
                turn: Turn::Villain,
                info: Info::from("mp:villain"),
            },
        );
        tree.grow(heads, Edge::Check, Spot::Terminal(Leaf::Chips(2.0)));
        tree.grow(heads, Edge::Bet, Spot::Terminal(Leaf::Chips(-1.0)));
        tree.grow(tails, Edge::Check, Spot::Terminal(Leaf::Chips(-1.0)));
        tree.grow(tails, Edge::Bet, Spot::Terminal(Leaf::Chips(1.0)));
        tree
    }

    fn config(iterations: usize) -> CfrConfig {
        CfrConfig {
            variant: Variant::Plus,
            iterations,
            depth: 3,
            exploit_every: 500,
            exploit_target: 0.0,
        }
    }

    #[test]
    fn plus_converges_on_matching_pennies() {
        let mut trainer = Trainer::new(pennies(), Variant::Plus, 1);
        trainer.train(&config(10_000), None, &mut |_| {});
        assert!(trainer.exploitability() < 0.01);
        let strategy = trainer.strategy(&Info::from("mp:hero"), &[Edge::Check, Edge::Bet]);
        assert!((strategy[&Edge::Check] - 0.4).abs() < 0.01);
        assert!((strategy[&Edge::Bet] - 0.6).abs() < 0.01);
        let villain = trainer.strategy(&Info::from("mp:villain"), &[Edge::Check, Edge::Bet]);
        assert!((villain[&Edge::Check] - 0.4).abs() < 0.01);
    }

    #[test]
    fn vanilla_converges_more_slowly() {
        let mut trainer = Trainer::new(pennies(), Variant::Vanilla, 1);
        trainer.train(&config(20_000), None, &mut |_| {});
        assert!(trainer.exploitability() < 0.05);
    }

    #[test]
    fn exploitability_starts_high_and_falls() {
        let mut trainer = Trainer::new(pennies(), Variant::Plus, 1);
        let before = trainer.exploitability();
        trainer.train(&config(2_000), None, &mut |_| {});
        let after = trainer.exploitability();
        assert!(after < before);
    }

    #[test]
    fn progress_callback_fires() {
        let mut trainer = Trainer::new(pennies(), Variant::Plus, 1);
        let mut calls = 0;
        trainer.train(&config(2_000), None, &mut |p| {
            calls += 1;
            assert!(p.iteration > 0);
            assert!(p.exploitability.is_finite());
        });
        assert_eq!(calls, 4);
    }

    #[test]
    fn training_is_deterministic() {
        let mut a = Trainer::new(pennies(), Variant::Plus, 9);
        let mut b = Trainer::new(pennies(), Variant::Plus, 9);
        a.train(&config(3_000), None, &mut |_| {});
        b.train(&config(3_000), None, &mut |_| {});
        let ia = a.strategy(&Info::from("mp:hero"), &[Edge::Check, Edge::Bet]);
        let ib = b.strategy(&Info::from("mp:hero"), &[Edge::Check, Edge::Bet]);
        assert_eq!(ia, ib);
    }

    #[test]
    fn unvisited_infosets_answer_uniform() {
        let trainer = Trainer::new(pennies(), Variant::Plus, 1);
        let strategy = trainer.strategy(&Info::from("never-seen"), &[Edge::Check, Edge::Bet]);
        assert_eq!(strategy[&Edge::Check], 0.5);
    }

    #[test]
    fn deadline_cuts_training_short() {
        let mut trainer = Trainer::new(pennies(), Variant::Plus, 1);
        let deadline = Instant::now();
        trainer.train(&config(1_000_000), Some(deadline), &mut |_| {});
        assert!(trainer.epochs() < 1_000_000);
    }
}
