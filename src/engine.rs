use crate::Chips;
use crate::Equity;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::strength::Strength;
use crate::config::Config;
use crate::config::EquityConfig;
use crate::equity::estimator::Estimator;
use crate::equity::range::Range;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use crate::gameplay::game::View;
use crate::gameplay::seat::Seat;
use crate::solver::profile::DecisionProfile;
use crate::solver::synthesizer::Synthesizer;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// the handle the outside world holds.
///
/// owns the authoritative game state for one hand plus the solver
/// stack configured at construction. everything crossing this
/// boundary is plain data: snapshots out, actions in, decision
/// profiles back. nothing here persists anywhere.
pub struct Engine {
    config: Config,
    game: Game,
    synthesizer: Synthesizer,
    rng: SmallRng,
}

impl Engine {
    /// deal a fresh hand, seat 0 on the button
    pub fn new_game(ids: &[&str], stack: Chips, config: Config, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let game = Game::table(ids, stack, (config.sblind, config.bblind), &mut rng)?;
        Ok(Self {
            synthesizer: Synthesizer::from(config.clone()),
            config,
            game,
            rng,
        })
    }

    /// deal a fresh hand over caller-built seats, stacks and
    /// position flags included; how multi-hand sessions carry chips
    pub fn with_seats(seats: Vec<Seat>, config: Config, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let game = Game::new(seats, (config.sblind, config.bblind), &mut rng)?;
        Ok(Self {
            synthesizer: Synthesizer::from(config.clone()),
            config,
            game,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    /// serializable snapshot, hole cards redacted
    pub fn state(&self) -> View {
        self.game.view()
    }

    pub fn legal_actions(&self, id: &str) -> Result<Vec<Action>> {
        self.game.legal(id)
    }

    pub fn execute_action(&mut self, id: &str, action: Action) -> Result<()> {
        self.game.execute(id, action)
    }

    /// the full decision pipeline for the player on turn
    pub fn solve(&mut self, id: &str, deadline_ms: u64) -> Result<DecisionProfile> {
        self.synthesizer
            .solve(&self.game, id, deadline_ms, &mut self.rng)
    }

    /// score two hole cards against a board
    pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> Result<Strength> {
        if hole.len() != 2 || board.len() > 5 {
            return Err(Error::InvalidState(
                "evaluate takes 2 hole cards and up to 5 board cards".into(),
            ));
        }
        let cards = hole.iter().chain(board.iter()).copied().collect::<Vec<_>>();
        let hand = Hand::from(cards.clone());
        if hand.size() != cards.len() {
            return Err(Error::InvalidState("duplicate cards".into()));
        }
        if hand.size() < 5 {
            return Err(Error::InvalidState("too few cards to score".into()));
        }
        Ok(Strength::from(hand))
    }

    /// hero equity against a weighted range, to a tolerance
    pub fn equity(
        &mut self,
        hole: Hole,
        board: &[Card],
        villain: &Range,
        tolerance: f32,
    ) -> Result<Equity> {
        let estimator = Estimator::from(EquityConfig {
            tolerance,
            ..self.config.equity.clone()
        });
        let board = crate::cards::board::Board::from(Hand::from(board.to_vec()));
        estimator.equity(hole, board, villain, &mut self.rng)
    }
}
