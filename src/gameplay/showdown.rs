use super::seat::State;
use super::settlement::Settlement;
use crate::Chips;

/// ephemeral accountant for the end of a hand.
///
/// walks the distinct commitment levels from the smallest all-in
/// upward, carving the pot into a main pot and side pots. at each
/// level every player contributes what they risked up to that level,
/// and only non-folded players who covered the level are eligible.
/// the best strength among the eligible takes the level, split
/// equally on ties; an indivisible residual goes to the eligible
/// winner seated earliest after the dealer.
pub struct Showdown {
    entries: Vec<Settlement>,
    /// seat indices ordered dealer-relative, small blind first
    order: Vec<usize>,
}

impl From<(Vec<Settlement>, usize)> for Showdown {
    fn from((entries, dealer): (Vec<Settlement>, usize)) -> Self {
        let n = entries.len();
        let order = (1..=n).map(|i| (dealer + i) % n).collect();
        Self { entries, order }
    }
}

impl Showdown {
    pub fn settle(mut self) -> Vec<Settlement> {
        let mut prev: Chips = 0;
        let levels = self.levels();
        for (i, &level) in levels.iter().enumerate() {
            // the last level absorbs dead money risked above it,
            // including any uncalled excess, which flows back naturally
            let cap = if i + 1 == levels.len() {
                Chips::MAX
            } else {
                level
            };
            let winnings = self.winnings(prev, cap);
            self.distribute(winnings, level);
            prev = level;
        }
        debug_assert!(
            self.entries.iter().map(|e| e.risked).sum::<Chips>()
                == self.entries.iter().map(|e| e.reward).sum::<Chips>()
        );
        self.entries
    }

    /// distinct commitment levels, ascending.
    /// only levels reached by a live player can be contested.
    fn levels(&self) -> Vec<Chips> {
        let mut levels = self
            .entries
            .iter()
            .filter(|e| e.status != State::Folding)
            .map(|e| e.risked)
            .filter(|&r| r > 0)
            .collect::<Vec<Chips>>();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// everyone contributes the slice between the previous level and this cap
    fn winnings(&self, prev: Chips, cap: Chips) -> Chips {
        self.entries
            .iter()
            .map(|e| e.risked.min(cap).saturating_sub(prev))
            .sum()
    }

    fn distribute(&mut self, winnings: Chips, level: Chips) {
        let winners = self.winners(level);
        assert!(!winners.is_empty(), "some live player covers every level");
        let share = winnings / winners.len() as Chips;
        let residue = winnings % winners.len() as Chips;
        for &i in &winners {
            self.entries[i].reward += share;
        }
        self.entries[winners[0]].reward += residue;
    }

    /// eligible seats holding the best strength at this level,
    /// ordered dealer-relative so the residual lands deterministically
    fn winners(&self, level: Chips) -> Vec<usize> {
        let best = self
            .entries
            .iter()
            .filter(|e| e.status != State::Folding)
            .filter(|e| e.risked >= level)
            .map(|e| e.strength)
            .max()
            .expect("some live player covers every level");
        self.order
            .iter()
            .copied()
            .filter(|&i| self.entries[i].status != State::Folding)
            .filter(|&i| self.entries[i].risked >= level)
            .filter(|&i| self.entries[i].strength == best)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hand::Hand;
    use crate::cards::strength::Strength;

    fn strength(s: &str) -> Option<Strength> {
        Some(Strength::from(Hand::try_from(s).unwrap()))
    }

    #[test]
    fn single_live_player_scoops() {
        let entries = vec![
            Settlement::from((10, State::Folding, None)),
            Settlement::from((4, State::Betting, None)),
            Settlement::from((2, State::Folding, None)),
        ];
        let settled = Showdown::from((entries, 0)).settle();
        assert_eq!(settled[1].reward, 16);
        assert_eq!(settled[1].pnl(), 12);
    }

    #[test]
    fn side_pots_by_lowest_all_in() {
        // A is all-in for 20; B and C continue to 50.
        // main pot 60 at level 20, side pot 60 between B and C.
        let nuts = strength("AsKsQsJsTs");
        let boat = strength("AdAhAcKdKh");
        let pair = strength("QdQh8c5d2s");
        let entries = vec![
            Settlement::from((20, State::Shoving, nuts)),
            Settlement::from((50, State::Betting, boat)),
            Settlement::from((50, State::Betting, pair)),
        ];
        let settled = Showdown::from((entries, 0)).settle();
        assert_eq!(settled[0].reward, 60);
        assert_eq!(settled[1].reward, 60);
        assert_eq!(settled[2].reward, 0);
    }

    #[test]
    fn ties_split_equally() {
        let same = strength("AsKsQsJs9s");
        let entries = vec![
            Settlement::from((30, State::Betting, same)),
            Settlement::from((30, State::Betting, same)),
        ];
        let settled = Showdown::from((entries, 0)).settle();
        assert_eq!(settled[0].reward, 30);
        assert_eq!(settled[1].reward, 30);
    }

    #[test]
    fn residue_lands_after_the_dealer() {
        let same = strength("AsKsQsJs9s");
        let entries = vec![
            Settlement::from((30, State::Betting, same)),
            Settlement::from((30, State::Betting, same)),
            Settlement::from((31, State::Folding, None)),
        ];
        // dealer is seat 2, so seat 0 is first after the dealer
        let settled = Showdown::from((entries, 2)).settle();
        assert_eq!(settled[0].reward + settled[1].reward, 91);
        assert!(settled[0].reward > settled[1].reward);
    }

    #[test]
    fn dead_money_feeds_the_pot() {
        let big = strength("AsAhKdQc9s");
        let small = strength("7d7h5c4d2s");
        let entries = vec![
            Settlement::from((10, State::Folding, None)),
            Settlement::from((25, State::Betting, big)),
            Settlement::from((25, State::Betting, small)),
        ];
        let settled = Showdown::from((entries, 0)).settle();
        assert_eq!(settled[1].reward, 60);
    }
}
