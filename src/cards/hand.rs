use super::card::Card;

/// Hand is an unordered set of Cards
/// stored as a bitstring of 52 bits in a u64
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Hand(u64);

impl Hand {
    pub const MASK: u64 = (1 << 52) - 1;

    pub fn empty() -> Self {
        Self(0)
    }
    pub fn add(lhs: Self, rhs: Self) -> Self {
        Self(lhs.0 | rhs.0)
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    /// all the cards NOT in this hand
    pub fn complement(&self) -> Self {
        Self(!self.0 & Self::MASK)
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::MASK)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// Card isomorphism, a singleton set
impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}

/// Vec<Card> isomorphism
/// we OR the cards to get the bitstring
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, c| a | c))
    }
}
/// we pluck the 1s out of the bitstring, low card first
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut bits = hand.0;
        let mut cards = Vec::with_capacity(hand.size());
        while bits != 0 {
            cards.push(Card::from(bits.trailing_zeros() as u8));
            bits &= bits - 1;
        }
        cards
    }
}

impl TryFrom<&str> for Hand {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        anyhow::ensure!(s.len() % 2 == 0, "hand string must be pairs of chars");
        (0..s.len())
            .step_by(2)
            .map(|i| Card::try_from(&s[i..i + 2]))
            .collect::<Result<Vec<Card>, _>>()
            .map(Hand::from)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in Vec::<Card>::from(*self) {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

/// iterate over all n-card hands drawn from the deck,
/// skipping any that touch the blocked cards.
/// Gosper's hack walks the n-bit subsets in increasing order.
pub struct HandIterator {
    curr: u64,
    block: u64,
}

impl HandIterator {
    /// number of hands this iterator will yield
    pub fn combinations(&self) -> usize {
        let n = self.curr.count_ones() as usize;
        let k = 52 - self.block.count_ones() as usize;
        (0..n).fold(1, |c, i| c * (k - i) / (i + 1))
    }
    fn gosper(x: u64) -> u64 {
        let a = x & x.wrapping_neg();
        let b = x + a;
        let c = (x ^ b) >> (2 + a.trailing_zeros());
        b | c
    }
}

/// (size, blocked cards)
impl From<(usize, Hand)> for HandIterator {
    fn from((n, block): (usize, Hand)) -> Self {
        assert!(n > 0, "empty hands are not iterable");
        Self {
            curr: (1 << n) - 1,
            block: block.0,
        }
    }
}

impl Iterator for HandIterator {
    type Item = Hand;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.curr & !Hand::MASK != 0 {
                return None;
            }
            let hand = self.curr;
            self.curr = Self::gosper(self.curr);
            if hand & self.block != 0 {
                continue;
            }
            return Some(Hand::from(hand));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_cards() {
        let hand = Hand::try_from("AsKdTh2c").unwrap();
        assert_eq!(hand, Hand::from(Vec::<Card>::from(hand)));
        assert_eq!(hand.size(), 4);
    }

    #[test]
    fn complement_partitions_deck() {
        let hand = Hand::try_from("AsKd").unwrap();
        assert_eq!(hand.complement().size(), 50);
        assert!(!hand.intersects(hand.complement()));
    }

    #[test]
    fn exhaustive_holes() {
        let iter = HandIterator::from((2usize, Hand::empty()));
        assert_eq!(iter.combinations(), 1326);
        assert_eq!(iter.count(), 1326);
    }

    #[test]
    fn blocked_holes() {
        let block = Hand::try_from("AsKd").unwrap();
        let iter = HandIterator::from((2usize, block));
        assert_eq!(iter.combinations(), 1225);
        assert_eq!(
            HandIterator::from((2usize, block))
                .filter(|h| h.intersects(block))
                .count(),
            0
        );
    }

    #[test]
    fn five_card_subsets_of_seven() {
        let seven = Hand::try_from("AsKdThTc9h5d2s").unwrap();
        let subsets = HandIterator::from((5usize, seven.complement()))
            .filter(|h| u64::from(*h) & !u64::from(seven) == 0)
            .count();
        assert_eq!(subsets, 21);
    }
}
