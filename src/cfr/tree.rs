use super::edge::Edge;
use super::info::Info;
use crate::Chips;
use crate::Equity;
use crate::Utility;
use crate::abstraction::abstractor::Abstractor;
use crate::cards::street::Street;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use crate::gameplay::seat::State;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// whose move it is inside the abstract tree.
/// every opponent seat collapses into one villain role, which is the
/// abstraction's two-player projection of the real table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Hero,
    Villain,
}

/// how a terminal node pays the hero.
/// folds settle in exact chips; everything that would see cards is
/// priced by the hero bucket's equity share of the pot, so hidden
/// information never leaks into the tree.
#[derive(Debug, Clone, Copy)]
pub enum Leaf {
    Chips(Utility),
    Showdown {
        pot: Utility,
        spent: Utility,
        equity: Equity,
    },
}

/// one node of the abstract tree
#[derive(Debug, Clone)]
pub enum Spot {
    Choice { turn: Turn, info: Info },
    Terminal(Leaf),
}

/// a depth- and action-bounded game tree rooted at a live decision.
///
/// rebuilt per solve, discarded after. the underlying arena is a
/// petgraph digraph: nodes are Spots, edges the abstract alphabet.
/// the root additionally remembers which concrete table action each
/// abstract edge stands for, so the final strategy can be played.
#[derive(Clone)]
pub struct GameTree {
    graph: DiGraph<Spot, Edge>,
    root: NodeIndex,
    actions: Vec<(Edge, Action)>,
}

impl GameTree {
    /// start a tree from its root spot
    pub fn seed(spot: Spot) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(spot);
        Self {
            graph,
            root,
            actions: Vec::new(),
        }
    }
    /// the only way the tree grows
    pub fn grow(&mut self, parent: NodeIndex, edge: Edge, spot: Spot) -> NodeIndex {
        let child = self.graph.add_node(spot);
        self.graph.add_edge(parent, child, edge);
        child
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }
    pub fn spot(&self, n: NodeIndex) -> &Spot {
        self.graph.node_weight(n).expect("index from this graph")
    }
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }
    /// concrete table actions behind the root edges
    pub fn actions(&self) -> &[(Edge, Action)] {
        &self.actions
    }
    pub fn set_actions(&mut self, actions: Vec<(Edge, Action)>) {
        self.actions = actions;
    }
    /// outgoing (edge, child) pairs in a stable order
    pub fn children(&self, n: NodeIndex) -> Vec<(Edge, NodeIndex)> {
        let mut children = self
            .graph
            .edges(n)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        children.sort_by_key(|(e, _)| *e);
        children
    }
    pub fn edges(&self, n: NodeIndex) -> Vec<Edge> {
        self.children(n).into_iter().map(|(e, _)| e).collect()
    }

    /// build the abstract tree for the player about to act.
    ///
    /// expansion stops at a fold, at a street boundary, or when the
    /// depth budget runs out; those frontiers become terminals priced
    /// by the hero bucket's equity at the CURRENT board. we never read
    /// cards the hero cannot see.
    pub fn plan(game: &Game, hero: usize, depth: usize) -> Result<Self> {
        let abstractor = Abstractor;
        if game.actor_index() != Some(hero) {
            return Err(Error::InvalidState("tree roots at the hero's turn".into()));
        }
        let hole = game.seats()[hero]
            .cards()
            .ok_or_else(|| Error::InvalidState("hero has no cards".into()))?;
        let abstraction = abstractor.abstraction(hole, game.board());
        let equity = abstraction.equity();
        let bb = game.bblind();
        let info = Info::hero(abstraction, game.pot(), game.to_call(hero), bb, "");
        let mut tree = Self::seed(Spot::Choice {
            turn: Turn::Hero,
            info,
        });
        let root = tree.root();
        let mut actions = Vec::new();
        for (edge, action) in Self::options(game) {
            actions.push((edge, action));
            tree.branch(game, hero, root, edge, action, String::new(), depth, equity);
        }
        tree.set_actions(actions);
        Ok(tree)
    }

    /// apply one action on a cloned state and attach the consequence
    #[allow(clippy::too_many_arguments)]
    fn branch(
        &mut self,
        game: &Game,
        hero: usize,
        parent: NodeIndex,
        edge: Edge,
        action: Action,
        path: String,
        depth: usize,
        equity: Equity,
    ) {
        let street = game.street();
        let mut next = game.clone();
        let id = next.action_on().to_string();
        next.execute(&id, action)
            .expect("edges derive from legal actions");
        let path = format!("{}{}", path, edge.abbrev());
        let spent = next.seats()[hero].spent() as Utility;
        let spot = if next.over() {
            if next.street() == Street::Show {
                // betting ended all-in; price the runout by bucket equity
                let pot = next.seats().iter().map(|s| s.spent()).sum::<Chips>() as Utility;
                Spot::Terminal(Leaf::Showdown { pot, spent, equity })
            } else {
                let pnl = next
                    .result()
                    .expect("finished hands settle")
                    .get(hero)
                    .expect("hero keeps a seat")
                    .pnl() as Utility;
                Spot::Terminal(Leaf::Chips(pnl))
            }
        } else if next.street() != street || depth <= 1 {
            Spot::Terminal(Leaf::Showdown {
                pot: next.pot() as Utility,
                spent,
                equity,
            })
        } else {
            let actor = next.actor_index().expect("hand in progress");
            let bb = next.bblind();
            let (turn, info) = if actor == hero {
                let hole = next.seats()[hero].cards().expect("cards dealt");
                let abstraction = Abstractor.abstraction(hole, next.board());
                (
                    Turn::Hero,
                    Info::hero(abstraction, next.pot(), next.to_call(actor), bb, &path),
                )
            } else {
                (
                    Turn::Villain,
                    Info::villain(next.pot(), next.to_call(actor), bb, &path),
                )
            };
            Spot::Choice { turn, info }
        };
        let here = self.grow(parent, edge, spot);
        if let Spot::Choice { .. } = self.spot(here) {
            for (edge, action) in Self::options(&next) {
                self.branch(&next, hero, here, edge, action, path.clone(), depth - 1, equity);
            }
        }
    }

    /// the action budget at a decision: fold, check or call, and one
    /// two-thirds-pot aggression that promotes to a shove when short
    fn options(game: &Game) -> Vec<(Edge, Action)> {
        let i = game.actor_index().expect("decision node");
        let seat = &game.seats()[i];
        debug_assert!(seat.state() == State::Betting);
        let to_call = game.to_call(i);
        let stack = seat.stack();
        let all_in = seat.stake() + stack;
        let mut options = Vec::new();
        if to_call == 0 {
            options.push((Edge::Check, Action::Check));
        } else {
            options.push((Edge::Fold, Action::Fold));
            options.push((Edge::Call, Action::Call(to_call.min(stack))));
        }
        if stack > to_call {
            let sizing = game.pot() * 2 / 3;
            let target = if game.current_bet() == 0 {
                sizing.max(game.min_bet_to())
            } else {
                (game.current_bet() + sizing).max(game.min_raise_to())
            };
            if target >= all_in {
                options.push((Edge::Shove, Action::Shove(all_in)));
            } else if game.current_bet() == 0 {
                options.push((Edge::Bet, Action::Bet(target)));
            } else {
                options.push((Edge::Bet, Action::Raise(target)));
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn spot_game() -> Game {
        let mut rng = SmallRng::seed_from_u64(7);
        Game::table(&["hero", "villain"], 200, (1, 2), &mut rng).unwrap()
    }

    #[test]
    fn roots_at_the_hero() {
        let game = spot_game();
        let tree = GameTree::plan(&game, 0, 3).unwrap();
        assert!(matches!(
            tree.spot(tree.root()),
            Spot::Choice {
                turn: Turn::Hero,
                ..
            }
        ));
        assert!(!tree.actions().is_empty());
    }

    #[test]
    fn wrong_actor_is_invalid() {
        let game = spot_game();
        assert!(GameTree::plan(&game, 1, 3).is_err());
    }

    #[test]
    fn action_budget_holds() {
        let game = spot_game();
        let tree = GameTree::plan(&game, 0, 3);
        let tree = tree.unwrap();
        for n in 0..tree.size() {
            let n = petgraph::graph::NodeIndex::new(n);
            assert!(tree.children(n).len() <= 3);
        }
    }

    #[test]
    fn depth_budget_holds() {
        let game = spot_game();
        let tree = GameTree::plan(&game, 0, 3).unwrap();
        // a 3-ply budget with <=3 actions per node stays small
        assert!(tree.size() <= 1 + 3 + 9 + 27);
    }
}
