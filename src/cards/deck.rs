use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use super::street::Street;
use rand::Rng;
use rand::seq::SliceRandom;

/// an ordered sequence of distinct cards.
/// shuffles are full Fisher-Yates passes from a caller-supplied
/// random source, so a fixed seed reproduces a fixed deal.
/// dealing pops from the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// a fresh 52-card deck in sorted order
    pub fn new() -> Self {
        Self((0..52u8).map(Card::from).collect())
    }
    /// a fresh deck, shuffled
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.0.shuffle(rng);
    }
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    pub fn hole(&mut self) -> Hole {
        let a = self.draw().expect("deck nonempty");
        let b = self.draw().expect("deck nonempty");
        Hole::from((a, b))
    }
    /// the cards revealed entering a street
    pub fn reveal(&mut self, street: Street) -> Hand {
        (0..street.n_revealed())
            .map(|_| self.draw().expect("deck nonempty"))
            .map(Hand::from)
            .fold(Hand::empty(), Hand::add)
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// the remaining unseen cards, in sorted order.
/// used by solvers to determinize hidden information.
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(Vec::<Card>::from(hand))
    }
}
/// cards in the given order, tail dealt first
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        Hand::from(deck.0)
    }
}
