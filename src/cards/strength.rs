use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// a hand's strength: category plus kicker ranks.
///
/// always constructed from an unordered set of 5 to 7 cards.
/// Ord is lexicographic on (ranking, kicks), so comparing two
/// Strengths is exactly the showdown comparison. equality is a
/// genuine tie and the pot splits.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
    pub fn kickers(&self) -> Kickers {
        self.kicks
    }
    /// evaluate exactly five cards
    pub fn eval5(hand: Hand) -> Self {
        assert!(hand.size() == 5, "eval5 takes exactly 5 cards");
        Self::from(hand)
    }
    /// best five-card strength among seven cards
    pub fn best_of_7(hand: Hand) -> Self {
        assert!(hand.size() == 7, "best_of_7 takes exactly 7 cards");
        Self::from(hand)
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let value = e.find_ranking();
        let kicks = e.find_kickers(value);
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}
