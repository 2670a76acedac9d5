use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::rank::Rank;

/// gross features of the public cards.
/// feeds the postflop abstraction and the synthesizer's routing:
/// draw-heavy turns are too alive for a shallow abstract tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub paired: bool,
    pub monotone: bool,
    pub twotone: bool,
    pub connected: bool,
    pub high: Rank,
}

impl From<Board> for Texture {
    fn from(board: Board) -> Self {
        let cards = board.cards();
        assert!(!cards.is_empty(), "no texture on an empty board");
        let mut suits = [0u8; 4];
        let mut ranks = [0u8; 13];
        for card in cards.iter() {
            suits[card.suit() as usize] += 1;
            ranks[card.rank() as usize] += 1;
        }
        Self {
            paired: ranks.iter().any(|&n| n >= 2),
            monotone: suits.iter().any(|&n| n >= 3),
            twotone: suits.iter().any(|&n| n == 2),
            connected: Self::connected(&cards),
            high: cards
                .iter()
                .map(Card::rank)
                .max()
                .expect("nonempty board"),
        }
    }
}

impl Texture {
    /// three ranks within a five-wide window make straights live
    fn connected(cards: &[Card]) -> bool {
        let mut ranks = cards.iter().map(|c| u8::from(c.rank())).collect::<Vec<u8>>();
        ranks.sort_unstable();
        ranks.dedup();
        ranks
            .windows(3)
            .any(|w| w[2] - w[0] <= 4)
    }

    /// a rough count of how many draws this board keeps alive
    pub fn wetness(&self) -> usize {
        self.monotone as usize + self.twotone as usize + self.connected as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(s: &str) -> Texture {
        Texture::from(Board::try_from(s).unwrap())
    }

    #[test]
    fn dry_rainbow_board() {
        let t = texture("Kh7d2c");
        assert!(!t.paired && !t.monotone && !t.connected);
        assert_eq!(t.high, Rank::King);
    }

    #[test]
    fn monotone_board() {
        assert!(texture("KhTh4h").monotone);
    }

    #[test]
    fn paired_board() {
        assert!(texture("8s8d3c").paired);
    }

    #[test]
    fn connected_board() {
        assert!(texture("9s8d6c").connected);
        assert!(!texture("Kd8s2h").connected);
    }
}
