use super::odds;
use super::profile::DecisionProfile;
use super::profile::Entry;
use crate::Equity;
use crate::Utility;
use crate::abstraction::abstractor::Abstraction;
use crate::abstraction::abstractor::Abstractor;
use crate::abstraction::texture::Texture;
use crate::cards::hand::Hand;
use crate::cards::notation::Class;
use crate::cards::street::Street;
use crate::cfr::trainer::Trainer;
use crate::cfr::tree::GameTree;
use crate::config::Config;
use crate::equity::estimator::Estimator;
use crate::equity::range::Range;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use crate::mcts::searcher::Searcher;
use crate::nash::Position;
use crate::nash::Situation;
use crate::nash::action::Reply;
use crate::nash::table::Table;
use rand::Rng;
use rand::rngs::SmallRng;
use std::time::Duration;
use std::time::Instant;

/// which solver answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Nash(Position, Situation),
    Cfr,
    Mcts,
}

/// the front door of the decision pipeline.
///
/// dispatches each request to the right solver: the frozen push/fold
/// table for recognized short-stack preflop spots, the abstracted
/// tree for rivers and quiet turns where three plies of lookahead
/// say most of what matters, and determinized search everywhere the
/// abstraction would be too coarse. whatever answers, the output is
/// normalized over exactly the legal actions, missing actions get
/// zero frequency with estimated EV, and the max-EV action is
/// flagged optimal.
pub struct Synthesizer {
    config: Config,
    estimator: Estimator,
    nash: &'static Table,
}

impl From<Config> for Synthesizer {
    fn from(config: Config) -> Self {
        Self {
            estimator: Estimator::from(config.equity.clone()),
            nash: Table::shared(),
            config,
        }
    }
}

impl Synthesizer {
    pub fn solve(
        &self,
        game: &Game,
        id: &str,
        deadline_ms: u64,
        rng: &mut SmallRng,
    ) -> Result<DecisionProfile> {
        let i = game.seat_index(id)?;
        if game.over() {
            return Err(Error::HandEnded);
        }
        if game.actor_index() != Some(i) {
            return Err(Error::IllegalAction(format!(
                "action is on {}, not {}",
                game.action_on(),
                id
            )));
        }
        let legal = game.legal(id)?;
        debug_assert!(!legal.is_empty());
        let deadline = Instant::now() + Duration::from_millis(deadline_ms);
        // a budget of nothing leaves nothing to return best-of
        if deadline_ms == 0 || Instant::now() >= deadline {
            return Err(Error::Timeout);
        }
        let hole = game.seats()[i]
            .cards()
            .ok_or_else(|| Error::InvalidState("actor has no cards".into()))?;
        let abstraction = Abstractor.abstraction(hole, game.board());
        let equity = self.equity(game, i, abstraction, rng)?;
        let modality = self.route(game, i);
        log::debug!(
            "solving for {} via {:?}, equity {:.2}",
            id,
            modality,
            equity
        );
        let entries = match modality {
            Modality::Nash(position, situation) => {
                self.from_nash(game, i, position, situation)
            }
            Modality::Cfr => self.from_cfr(game, i, deadline, rng)?,
            Modality::Mcts => self.from_mcts(game, i, deadline, rng)?,
        };
        let entries = self.cover(entries, &legal, game, i, equity);
        let mut profile = DecisionProfile::new(entries);
        self.annotate(&mut profile, game, i, abstraction, equity);
        Ok(profile)
    }

    /// hero equity: bucket estimate preflop, sampled postflop
    fn equity(
        &self,
        game: &Game,
        i: usize,
        abstraction: Abstraction,
        rng: &mut SmallRng,
    ) -> Result<Equity> {
        if game.street() == Street::Pref {
            return Ok(abstraction.equity());
        }
        let hole = game.seats()[i].cards().expect("cards dealt");
        let blocked = Hand::add(Hand::from(hole), Hand::from(game.board()));
        self.estimator
            .equity(hole, game.board(), &Range::any(blocked), rng)
    }

    /// the dispatch rule: chart when the chart speaks, the abstract
    /// tree when the board is settled enough for it, search otherwise
    fn route(&self, game: &Game, i: usize) -> Modality {
        if game.street() == Street::Pref {
            let bb = game.effective_stack() / game.bblind();
            if bb >= self.config.nash.min_bb && bb <= self.config.nash.max_bb {
                if let Some((position, situation)) = Self::situation(game, i) {
                    return Modality::Nash(position, situation);
                }
            }
            return Modality::Mcts;
        }
        match game.street() {
            Street::Rive => Modality::Cfr,
            Street::Turn if Texture::from(game.board()).wetness() <= 1 => Modality::Cfr,
            _ => Modality::Mcts,
        }
    }

    /// does the preflop history spell a chart situation?
    /// facing a normal raise is not one, the charts stay silent there.
    fn situation(game: &Game, i: usize) -> Option<(Position, Situation)> {
        let seat = &game.seats()[i];
        let position = if seat.is_sblind() {
            Position::Small
        } else if seat.is_bblind() {
            Position::Big
        } else if seat.is_dealer() {
            Position::Button
        } else {
            return None;
        };
        let mut shoved = false;
        let mut raised = false;
        let mut limped = false;
        for record in game.history().iter().filter(|r| r.street == Street::Pref) {
            match record.action {
                Action::Shove(_) => shoved = true,
                Action::Raise(_) | Action::Bet(_) => raised = true,
                Action::Call(_) => limped = true,
                _ => {}
            }
        }
        let situation = if shoved {
            Situation::VsShove
        } else if raised {
            return None;
        } else if limped {
            Situation::VsLimp
        } else {
            Situation::Open
        };
        Some((position, situation))
    }

    /// read the chart and translate replies into table actions
    fn from_nash(
        &self,
        game: &Game,
        i: usize,
        position: Position,
        situation: Situation,
    ) -> Vec<Entry> {
        let seat = &game.seats()[i];
        let hole = seat.cards().expect("cards dealt");
        let class = Class::from(hole);
        let bb = game.bblind();
        let stack_bb = game.effective_stack() / bb;
        let mix = self.nash.distribution(class, position, situation, stack_bb);
        let evs = self.nash.evs(
            class,
            position,
            situation,
            stack_bb,
            game.pot() as Utility / bb as Utility,
            game.to_call(i) as Utility / bb as Utility,
        );
        let to_call = game.to_call(i);
        let stack = seat.stack();
        let all_in = seat.stake() + stack;
        let mut entries = Vec::new();
        for &reply in Reply::all() {
            let action = match reply {
                Reply::Fold if to_call > 0 => Some(Action::Fold),
                Reply::Fold => None,
                Reply::Call if to_call > 0 => Some(Action::Call(to_call.min(stack))),
                Reply::Call => Some(Action::Check),
                Reply::MinRaise
                    if stack > to_call && all_in >= game.min_raise_to() =>
                {
                    Some(Action::Raise(game.min_raise_to()))
                }
                Reply::MinRaise => None,
                Reply::AllIn if stack > 0 => Some(Action::Shove(all_in)),
                Reply::AllIn => None,
            };
            if let Some(action) = action {
                entries.push(Entry {
                    action,
                    frequency: mix.frequency(reply),
                    ev: evs[&reply],
                    optimal: false,
                    explanation: String::new(),
                });
            }
        }
        entries
    }

    /// grow, train, and read the abstract tree
    fn from_cfr(
        &self,
        game: &Game,
        i: usize,
        deadline: Instant,
        rng: &mut SmallRng,
    ) -> Result<Vec<Entry>> {
        let tree = GameTree::plan(game, i, self.config.cfr.depth)?;
        let mut trainer = Trainer::new(tree, self.config.cfr.variant, rng.random())
            .with_world(game.clone(), i);
        trainer.train(&self.config.cfr, Some(deadline), &mut |p| {
            log::trace!(
                "cfr iteration {} exploitability {:.4}",
                p.iteration,
                p.exploitability
            );
        });
        let bb = game.bblind() as Utility;
        Ok(trainer
            .decision()
            .into_iter()
            .map(|(action, probability, util)| Entry {
                action,
                frequency: probability * 100.0,
                ev: util / bb,
                optimal: false,
                explanation: String::new(),
            })
            .collect())
    }

    /// determinized search over the real action space
    fn from_mcts(
        &self,
        game: &Game,
        i: usize,
        deadline: Instant,
        rng: &mut SmallRng,
    ) -> Result<Vec<Entry>> {
        let searcher = Searcher::from(self.config.mcts.clone());
        let report = searcher.search(game, i, deadline, rng)?;
        let bb = game.bblind() as Utility;
        let total: u32 = report.lines.iter().map(|l| l.visits).sum();
        let total = total.max(1);
        Ok(report
            .lines
            .into_iter()
            .map(|line| Entry {
                action: line.action,
                frequency: line.visits as f32 * 100.0 / total as f32,
                ev: line.mean / bb,
                optimal: false,
                explanation: String::new(),
            })
            .collect())
    }

    /// the profile must cover exactly the legal action kinds:
    /// solver output outside it is dropped, legal kinds the solver
    /// never priced come in at zero frequency with estimated EV
    fn cover(
        &self,
        mut entries: Vec<Entry>,
        legal: &[Action],
        game: &Game,
        i: usize,
        equity: Equity,
    ) -> Vec<Entry> {
        let kind = std::mem::discriminant::<Action>;
        entries.retain(|e| legal.iter().any(|l| kind(l) == kind(&e.action)));
        for &action in legal.iter() {
            if entries.iter().all(|e| kind(&e.action) != kind(&action)) {
                entries.push(Entry {
                    action,
                    frequency: 0.0,
                    ev: self.estimate(game, i, action, equity),
                    optimal: false,
                    explanation: String::new(),
                });
            }
        }
        entries
    }

    /// the shared fallback EV model, in big blinds:
    ///   fold loses what is already invested, a check realizes
    ///   equity in the current pot, a call prices the pot plus the
    ///   call, and aggression blends fold equity with a grown pot
    fn estimate(&self, game: &Game, i: usize, action: Action, equity: Equity) -> Utility {
        let bb = game.bblind() as Utility;
        let pot = game.pot() as Utility;
        let seat = &game.seats()[i];
        let spent = seat.spent() as Utility;
        let stake = seat.stake() as Utility;
        let to_call = game.to_call(i) as Utility;
        let chips = match action {
            Action::Fold => -spent,
            Action::Check => equity * pot,
            Action::Call(_) => equity * (pot + to_call) - to_call,
            Action::Bet(t) | Action::Raise(t) | Action::Shove(t) => {
                let cost = t as Utility - stake;
                let fe = 0.6 * cost / (pot + cost);
                let future = pot + 2.0 * cost;
                fe * pot + (1.0 - fe) * (equity * future - cost)
            }
            Action::Blind(_) => 0.0,
        };
        chips / bb
    }

    /// terse per-action rationales for human consumption
    fn annotate(
        &self,
        profile: &mut DecisionProfile,
        game: &Game,
        i: usize,
        abstraction: Abstraction,
        equity: Equity,
    ) {
        let price = odds::pot_odds(game.to_call(i), game.pot());
        let drawing = matches!(
            abstraction,
            Abstraction::Postflop(p) if p.draw != crate::abstraction::abstractor::Draw::None
        );
        let blocker = matches!(abstraction, Abstraction::Postflop(p) if p.blocker);
        for entry in profile.entries.iter_mut() {
            let gist = match entry.action {
                Action::Fold if equity < price => "fold below pot-odds threshold".to_string(),
                Action::Fold => "give up the invested chips".to_string(),
                Action::Check => "free card, pot stays small".to_string(),
                Action::Call(_) if equity >= price => format!(
                    "price {:.0}% with {:.0}% equity",
                    price * 100.0,
                    equity * 100.0
                ),
                Action::Call(_) => "MDF defense".to_string(),
                Action::Bet(_) | Action::Raise(_) | Action::Shove(_) => {
                    if blocker && equity > 0.55 {
                        "blocker-heavy value bet".to_string()
                    } else if equity > 0.62 {
                        "value bet for a growing pot".to_string()
                    } else if drawing {
                        "semi-bluff with live outs".to_string()
                    } else {
                        "pressure on fold equity".to_string()
                    }
                }
                Action::Blind(_) => String::new(),
            };
            entry.explanation = format!(
                "{:.0}% at {:+.2}bb: {}",
                entry.frequency, entry.ev, gist
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn synthesizer() -> Synthesizer {
        let mut config = Config::default();
        config.mcts.budget_ms = 30;
        config.cfr.iterations = 300;
        config.cfr.exploit_every = 150;
        Synthesizer::from(config)
    }

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn short_game() -> Game {
        // 15bb effective at 1/2: nash territory
        Game::table(&["btn", "sb", "bb"], 30, (1, 2), &mut rng(7)).unwrap()
    }

    #[test]
    fn preflop_short_stacks_route_to_the_chart() {
        let game = short_game();
        let s = synthesizer();
        assert!(matches!(
            s.route(&game, 0),
            Modality::Nash(Position::Button, Situation::Open)
        ));
    }

    #[test]
    fn deep_stacks_route_to_search() {
        let game = Game::table(&["btn", "sb", "bb"], 400, (1, 2), &mut rng(7)).unwrap();
        let s = synthesizer();
        assert_eq!(s.route(&game, 0), Modality::Mcts);
    }

    #[test]
    fn facing_a_raise_leaves_the_chart() {
        let mut game = short_game();
        game.execute("btn", Action::Raise(4)).unwrap();
        let s = synthesizer();
        assert!(!matches!(s.route(&game, 1), Modality::Nash(..)));
    }

    #[test]
    fn profiles_cover_legal_actions_and_sum_to_100() {
        let game = short_game();
        let s = synthesizer();
        let profile = s.solve(&game, "btn", 50, &mut rng(1)).unwrap();
        let legal = game.legal("btn").unwrap();
        assert_eq!(profile.entries.len(), legal.len());
        let total: f32 = profile.entries.iter().map(|e| e.frequency).sum();
        assert!((total - 100.0).abs() < 1.0);
        assert_eq!(profile.entries.iter().filter(|e| e.optimal).count(), 1);
    }

    #[test]
    fn solving_out_of_turn_fails() {
        let game = short_game();
        let s = synthesizer();
        assert!(matches!(
            s.solve(&game, "sb", 50, &mut rng(1)),
            Err(Error::IllegalAction(_))
        ));
        assert!(matches!(
            s.solve(&game, "ghost", 50, &mut rng(1)),
            Err(Error::UnknownPlayer(_))
        ));
    }

    #[test]
    fn ended_hands_cannot_be_solved() {
        let mut game = short_game();
        game.execute("btn", Action::Fold).unwrap();
        game.execute("sb", Action::Fold).unwrap();
        let s = synthesizer();
        assert!(matches!(
            s.solve(&game, "bb", 50, &mut rng(1)),
            Err(Error::HandEnded)
        ));
    }

    #[test]
    fn a_spent_deadline_times_out() {
        let game = short_game();
        let s = synthesizer();
        assert!(matches!(
            s.solve(&game, "btn", 0, &mut rng(1)),
            Err(Error::Timeout)
        ));
    }

    #[test]
    fn same_seed_same_profile() {
        let game = short_game();
        let s = synthesizer();
        let a = s.solve(&game, "btn", 50, &mut rng(5)).unwrap();
        let b = s.solve(&game, "btn", 50, &mut rng(5)).unwrap();
        for (x, y) in a.entries.iter().zip(b.entries.iter()) {
            assert_eq!(x.action, y.action);
            assert_eq!(x.frequency, y.frequency);
        }
    }

    #[test]
    fn explanations_carry_the_numbers() {
        let game = short_game();
        let s = synthesizer();
        let profile = s.solve(&game, "btn", 50, &mut rng(2)).unwrap();
        for entry in profile.entries.iter() {
            assert!(entry.explanation.contains("bb"));
        }
    }
}
