use super::range::Range;
use crate::Equity;
use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::hand::HandIterator;
use crate::cards::hole::Hole;
use crate::cards::strength::Strength;
use crate::config::EquityConfig;
use crate::error::Error;
use crate::error::Result;
use rand::Rng;

/// hero's probability of winning the pot at showdown,
/// with ties counting as half a win.
///
/// small problems are enumerated exactly: when at most a couple of
/// board cards are unknown and the opponent range is modest, we walk
/// every runout against every combo. everything else is monte carlo,
/// sampled without replacement until the standard error drops under
/// the configured tolerance or the sample cap is reached.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: EquityConfig,
}

impl From<EquityConfig> for Estimator {
    fn from(config: EquityConfig) -> Self {
        Self { config }
    }
}

impl Estimator {
    pub fn equity(
        &self,
        hole: Hole,
        board: Board,
        villain: &Range,
        rng: &mut impl Rng,
    ) -> Result<Equity> {
        let hero = Hand::from(hole);
        let table = Hand::from(board);
        if hero.intersects(table) {
            return Err(Error::InvalidState("hole cards are on the board".into()));
        }
        let known = Hand::add(hero, table);
        let villain = villain.without(known);
        if villain.is_empty() {
            return Err(Error::InvalidState("opponent range is fully blocked".into()));
        }
        let unknown = 5 - board.size();
        if unknown <= self.config.exact_threshold && villain.len() <= self.config.exact_range {
            Ok(self.exact(hero, table, &villain))
        } else {
            Ok(self.sampled(hero, table, &villain, unknown, rng))
        }
    }

    /// walk every (combo, runout) pair
    fn exact(&self, hero: Hand, table: Hand, villain: &Range) -> Equity {
        let mut equity = 0.0;
        for (combo, weight) in villain.iter() {
            let dead = Hand::add(Hand::add(hero, table), Hand::from(*combo));
            let unknown = 5 - table.size();
            let (wins, runs) = if unknown == 0 {
                (Self::score(hero, Hand::from(*combo), table), 1.0)
            } else {
                HandIterator::from((unknown, dead))
                    .map(|runout| Hand::add(table, runout))
                    .map(|full| Self::score(hero, Hand::from(*combo), full))
                    .fold((0.0, 0.0), |(w, n), s| (w + s, n + 1.0))
            };
            equity += weight * wins / runs;
        }
        equity
    }

    /// sample (combo, runout) pairs until the answer settles
    fn sampled(
        &self,
        hero: Hand,
        table: Hand,
        villain: &Range,
        unknown: usize,
        rng: &mut impl Rng,
    ) -> Equity {
        const MIN_SAMPLES: usize = 256;
        let mut wins = 0.0;
        let mut n = 0usize;
        while n < self.config.cap {
            let combo = villain.sample(rng).expect("nonempty range");
            let dead = Hand::add(Hand::add(hero, table), Hand::from(combo));
            let runout = Self::runout(dead, unknown, rng);
            let full = Hand::add(table, runout);
            wins += Self::score(hero, Hand::from(combo), full);
            n += 1;
            if n >= MIN_SAMPLES && n % 64 == 0 {
                let p = wins / n as Equity;
                let stderr = (p * (1.0 - p) / n as Equity).sqrt();
                if stderr < self.config.tolerance {
                    break;
                }
            }
        }
        wins / n as Equity
    }

    /// draw some board cards uniformly without replacement
    fn runout(dead: Hand, n: usize, rng: &mut impl Rng) -> Hand {
        let mut pool: Vec<Card> = dead.complement().into();
        let mut runout = Hand::empty();
        for k in 0..n {
            let i = rng.random_range(k..pool.len());
            pool.swap(k, i);
            runout = Hand::add(runout, Hand::from(pool[k]));
        }
        runout
    }

    /// 1 for a win, half for a chop, 0 for a loss
    fn score(hero: Hand, combo: Hand, table: Hand) -> Equity {
        let ours = Strength::from(Hand::add(hero, table));
        let theirs = Strength::from(Hand::add(combo, table));
        match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        }
    }
}
