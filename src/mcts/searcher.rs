use super::node::Node;
use super::rollout::Rollout;
use crate::Probability;
use crate::Utility;
use crate::abstraction::abstractor::Abstractor;
use crate::config::MctsConfig;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::Rng;
use rand::rngs::SmallRng;
use std::time::Instant;

/// one candidate line out of the root
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub action: Action,
    pub visits: u32,
    pub mean: Utility,
}

/// what a search hands back: per-action visit and reward statistics,
/// so the caller can turn them into frequencies and EVs
#[derive(Debug, Clone)]
pub struct Report {
    pub lines: Vec<Line>,
    pub iterations: usize,
}

impl Report {
    /// most-visited child, ties broken by average reward
    pub fn best(&self) -> Option<&Line> {
        self.lines.first()
    }
}

/// determinized monte carlo tree search over the real action space.
///
/// every iteration samples a concrete world consistent with what the
/// hero can see, then runs the usual select, expand, simulate,
/// backpropagate cycle through a single tree keyed by action paths.
/// selection is UCB1, or prior-weighted PUCT when configured, with
/// optional progressive widening so sparsely visited nodes see few
/// actions and popular branches broaden.
pub struct Searcher {
    config: MctsConfig,
}

impl From<MctsConfig> for Searcher {
    fn from(config: MctsConfig) -> Self {
        Self { config }
    }
}

impl Searcher {
    /// search until the wall-clock deadline
    pub fn search(
        &self,
        game: &Game,
        hero: usize,
        deadline: Instant,
        rng: &mut SmallRng,
    ) -> Result<Report> {
        self.run(game, hero, usize::MAX, Some(deadline), rng)
    }

    /// search a fixed number of iterations; deterministic under a
    /// fixed seed, which is what tests and comparisons want
    pub fn search_n(
        &self,
        game: &Game,
        hero: usize,
        iterations: usize,
        rng: &mut SmallRng,
    ) -> Result<Report> {
        self.run(game, hero, iterations, None, rng)
    }

    fn run(
        &self,
        game: &Game,
        hero: usize,
        cap: usize,
        deadline: Option<Instant>,
        rng: &mut SmallRng,
    ) -> Result<Report> {
        if game.actor_index() != Some(hero) {
            return Err(Error::InvalidState("search roots at the hero's turn".into()));
        }
        let hole = game.seats()[hero]
            .cards()
            .ok_or_else(|| Error::InvalidState("hero has no cards".into()))?;
        let aggression = Abstractor.abstraction(hole, game.board()).aggression();
        let scale = (game.pot() + game.effective_stack()).max(1) as Utility;
        let mut graph: DiGraph<Node, Action> = DiGraph::new();
        let root = graph.add_node(Node::new(hero, Self::candidates(game)));
        let rollout = Rollout {
            epsilon: self.config.epsilon,
            depth: self.config.rollout_depth,
        };
        let mut iterations = 0;
        loop {
            let mut world = game.clone();
            world.determinize(hero, rng);
            self.iterate(&mut graph, root, world, hero, scale, aggression, &rollout, rng);
            iterations += 1;
            if iterations >= cap {
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
        }
        let mut lines = graph
            .edges(root)
            .map(|e| {
                let child = &graph[e.target()];
                Line {
                    action: *e.weight(),
                    visits: child.visits,
                    mean: child.mean(),
                }
            })
            .collect::<Vec<Line>>();
        lines.sort_by(|a, b| {
            b.visits
                .cmp(&a.visits)
                .then(b.mean.partial_cmp(&a.mean).expect("rewards are finite"))
        });
        log::debug!("mcts ran {} iterations over {} nodes", iterations, graph.node_count());
        Ok(Report { lines, iterations })
    }

    /// one select / expand / simulate / backpropagate pass
    #[allow(clippy::too_many_arguments)]
    fn iterate(
        &self,
        graph: &mut DiGraph<Node, Action>,
        root: NodeIndex,
        mut world: Game,
        hero: usize,
        scale: Utility,
        aggression: Probability,
        rollout: &Rollout,
        rng: &mut impl Rng,
    ) {
        let mut path = vec![root];
        let mut node = root;
        loop {
            if world.over() {
                break;
            }
            if !graph[node].untried.is_empty() && self.may_widen(graph, node) {
                // expand one new child and hand over to the rollout
                let i = rng.random_range(0..graph[node].untried.len());
                let action = graph[node].untried.swap_remove(i);
                let id = world.action_on().to_string();
                world
                    .execute(&id, action)
                    .expect("candidates are legal in every determinization");
                let actor = world.actor_index().unwrap_or(hero);
                let untried = if world.over() {
                    Vec::new()
                } else {
                    Self::candidates(&world)
                };
                let child = graph.add_node(Node::new(actor, untried));
                graph.add_edge(node, child, action);
                path.push(child);
                break;
            }
            let children = graph
                .edges(node)
                .map(|e| (*e.weight(), e.target()))
                .collect::<Vec<_>>();
            if children.is_empty() {
                break;
            }
            let (action, child) =
                self.select(graph, node, &children, hero, scale, aggression);
            let id = world.action_on().to_string();
            world
                .execute(&id, action)
                .expect("tree actions stay legal, the public state is shared");
            path.push(child);
            node = child;
        }
        let reward = match world.result() {
            Some(result) => result[hero].pnl() as Utility,
            None => rollout.simulate(&mut world, hero, rng),
        };
        for n in path {
            graph[n].absorb(reward);
        }
    }

    /// progressive widening: a node may only hold
    /// ceil(k * visits^alpha) children
    fn may_widen(&self, graph: &DiGraph<Node, Action>, node: NodeIndex) -> bool {
        match self.config.widening {
            None => true,
            Some((k, alpha)) => {
                let spread = graph.neighbors_directed(node, Direction::Outgoing).count();
                let visits = graph[node].visits.max(1) as f32;
                spread < (k * visits.powf(alpha)).ceil().max(1.0) as usize
            }
        }
    }

    /// UCB1 or PUCT from the acting player's perspective.
    /// rewards are stored hero-side, opponents flip the sign.
    fn select(
        &self,
        graph: &DiGraph<Node, Action>,
        parent: NodeIndex,
        children: &[(Action, NodeIndex)],
        hero: usize,
        scale: Utility,
        aggression: Probability,
    ) -> (Action, NodeIndex) {
        let total = graph[parent].visits.max(1) as f32;
        let ours = graph[parent].actor == hero;
        let priors = self.priors(children, ours, aggression);
        let mut best = children[0];
        let mut top = f32::MIN;
        for (i, &(action, child)) in children.iter().enumerate() {
            let node = &graph[child];
            let mean = if ours { node.mean() } else { -node.mean() };
            let exploit = mean / scale;
            let explore = if node.visits == 0 {
                f32::INFINITY
            } else if self.config.puct {
                self.config.exploration * priors[i] * total.sqrt() / (1.0 + node.visits as f32)
            } else {
                self.config.exploration * (total.ln() / node.visits as f32).sqrt()
            };
            if exploit + explore > top {
                top = exploit + explore;
                best = (action, child);
            }
        }
        best
    }

    /// PUCT priors: the hero's bucket aggression shapes how much the
    /// search wants to try each action first; opponents get uniform
    fn priors(&self, children: &[(Action, NodeIndex)], ours: bool, aggression: Probability) -> Vec<f32> {
        let raw = children
            .iter()
            .map(|(action, _)| {
                if !ours {
                    1.0
                } else if action.is_aggressive() {
                    aggression.max(0.05)
                } else if matches!(action, Action::Fold) {
                    (1.0 - aggression).max(0.05) * 0.5
                } else {
                    0.5
                }
            })
            .collect::<Vec<f32>>();
        let total: f32 = raw.iter().sum();
        raw.into_iter().map(|p| p / total).collect()
    }

    /// the real-space action menu: fold, check or call, a min raise,
    /// a two-thirds-pot raise when distinct, and the shove
    fn candidates(game: &Game) -> Vec<Action> {
        let i = game.actor_index().expect("decision node");
        let seat = &game.seats()[i];
        let to_call = game.to_call(i);
        let stack = seat.stack();
        let all_in = seat.stake() + stack;
        let mut actions = Vec::new();
        if to_call == 0 {
            actions.push(Action::Check);
        } else {
            actions.push(Action::Fold);
            actions.push(Action::Call(to_call.min(stack)));
        }
        if stack > to_call {
            let sizing = game.pot() * 2 / 3;
            let mut targets = if game.current_bet() == 0 {
                vec![game.min_bet_to(), sizing.max(game.min_bet_to())]
            } else {
                vec![
                    game.min_raise_to(),
                    (game.current_bet() + sizing).max(game.min_raise_to()),
                ]
            };
            targets.sort_unstable();
            targets.dedup();
            for target in targets.into_iter().filter(|&t| t < all_in) {
                if game.current_bet() == 0 {
                    actions.push(Action::Bet(target));
                } else {
                    actions.push(Action::Raise(target));
                }
            }
        }
        if stack > 0 {
            actions.push(Action::Shove(all_in));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn searcher() -> Searcher {
        Searcher::from(MctsConfig::default())
    }

    fn game() -> Game {
        let mut rng = SmallRng::seed_from_u64(5);
        Game::table(&["hero", "a", "b"], 100, (1, 2), &mut rng).unwrap()
    }

    #[test]
    fn wrong_actor_is_invalid() {
        let game = game();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(searcher().search_n(&game, 1, 16, &mut rng).is_err());
    }

    #[test]
    fn reports_cover_the_root_actions() {
        let game = game();
        let mut rng = SmallRng::seed_from_u64(1);
        let report = searcher().search_n(&game, 0, 256, &mut rng).unwrap();
        assert!(!report.lines.is_empty());
        assert_eq!(report.iterations, 256);
        // visits at the root children can never exceed the iterations
        let visits: u32 = report.lines.iter().map(|l| l.visits).sum();
        assert!(visits <= 256);
    }

    #[test]
    fn recommendation_is_most_visited() {
        let game = game();
        let mut rng = SmallRng::seed_from_u64(2);
        let report = searcher().search_n(&game, 0, 256, &mut rng).unwrap();
        let best = report.best().unwrap();
        assert!(report.lines.iter().all(|l| l.visits <= best.visits));
    }

    #[test]
    fn same_seed_same_search() {
        let game = game();
        let a = searcher()
            .search_n(&game, 0, 128, &mut SmallRng::seed_from_u64(3))
            .unwrap();
        let b = searcher()
            .search_n(&game, 0, 128, &mut SmallRng::seed_from_u64(3))
            .unwrap();
        for (x, y) in a.lines.iter().zip(b.lines.iter()) {
            assert_eq!(x.action, y.action);
            assert_eq!(x.visits, y.visits);
        }
    }

    #[test]
    fn puct_variant_runs() {
        let game = game();
        let config = MctsConfig {
            puct: true,
            ..MctsConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(4);
        let report = Searcher::from(config).search_n(&game, 0, 64, &mut rng).unwrap();
        assert!(!report.lines.is_empty());
    }

    #[test]
    fn deadline_is_respected() {
        let game = game();
        let mut rng = SmallRng::seed_from_u64(6);
        let deadline = Instant::now() + std::time::Duration::from_millis(20);
        let report = searcher().search(&game, 0, deadline, &mut rng).unwrap();
        // at least one iteration even if the clock already ran out
        assert!(report.iterations >= 1);
        assert!(Instant::now() >= deadline - std::time::Duration::from_millis(21));
    }
}
