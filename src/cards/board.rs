use super::card::Card;
use super::hand::Hand;
use super::street::Street;

/// the public cards, 0 to 5 of them.
/// street is derived from size, never stored.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Board(Hand);

impl Board {
    pub fn empty() -> Self {
        Self(Hand::empty())
    }
    pub fn add(&mut self, cards: Hand) {
        assert!(!self.0.intersects(cards));
        self.0 = Hand::add(self.0, cards);
        assert!(self.0.size() <= 5);
    }
    pub fn clear(&mut self) {
        self.0 = Hand::empty();
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn cards(&self) -> Vec<Card> {
        Vec::<Card>::from(self.0)
    }
    pub fn street(&self) -> Street {
        match self.0.size() {
            0 => Street::Pref,
            3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::Rive,
            n => panic!("no board has {} cards", n),
        }
    }
}

impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}
impl From<Hand> for Board {
    fn from(hand: Hand) -> Self {
        assert!(hand.size() <= 5);
        Self(hand)
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hand = Hand::try_from(s)?;
        anyhow::ensure!(hand.size() <= 5, "board holds at most 5 cards");
        Ok(Self(hand))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
