use super::bucket::Bucket;
use super::texture::Texture;
use crate::Equity;
use crate::Probability;
use crate::cards::board::Board;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::notation::Class;
use crate::cards::rank::Rank;
use crate::cards::ranking::Ranking;
use crate::cards::strength::Strength;
use crate::cards::suit::Suit;

/// gross made-hand interaction with the board
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Made {
    Air,
    WeakPair,
    TopPair,
    Overpair,
    TwoPair,
    Trips,
    Straight,
    Flush,
    FullHouse,
    Quads,
    StraightFlush,
}

/// draws still live on flop and turn
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Draw {
    None,
    Gutshot,
    OpenEnded,
    FlushDraw,
    Combo,
}

/// the postflop strategic label:
/// what we made, what we draw to, whether we block the nut flush
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Postflop {
    pub made: Made,
    pub draw: Draw,
    pub blocker: bool,
}

/// the bucket a (hole, board) pair solves as.
/// preflop labels are structural; postflop labels extend them with
/// the board-interaction modifier. two hands in the same bucket are
/// interchangeable to the abstract solvers, which bounds their
/// quality exactly as much as this mapping is coarse.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Abstraction {
    Preflop(Bucket),
    Postflop(Postflop),
}

/// deterministic (hole, board) -> bucket mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct Abstractor;

impl Abstractor {
    pub fn abstraction(&self, hole: Hole, board: Board) -> Abstraction {
        match board.size() {
            0 => Abstraction::Preflop(self.preflop(hole)),
            _ => Abstraction::Postflop(self.postflop(hole, board)),
        }
    }

    /// structural preflop bucketing over the 169 classes
    pub fn preflop(&self, hole: Hole) -> Bucket {
        use Rank::*;
        let class = Class::from(hole);
        let (hi, lo) = (class.hi(), class.lo());
        let gap = u8::from(hi) - u8::from(lo);
        if class.paired() {
            match hi {
                Ace | King | Queen => Bucket::PremiumPair,
                Jack | Ten => Bucket::HighPair,
                Nine | Eight | Seven | Six => Bucket::MidPair,
                _ => Bucket::LowPair,
            }
        } else if class.suited() {
            if hi == Ace && lo >= Jack {
                Bucket::PremiumSuited
            } else if hi >= Ten && lo >= Ten {
                Bucket::BroadwaySuited
            } else if hi == Ace {
                Bucket::GoodSuited
            } else if gap == 1 && hi <= Ten && lo >= Four {
                Bucket::SuitedConnector
            } else if lo >= Eight || (gap <= 2 && lo >= Five) {
                Bucket::DecentSuited
            } else if gap <= 2 {
                Bucket::SpeculativeSuited
            } else {
                Bucket::WeakSuited
            }
        } else {
            if hi == Ace && lo >= Queen {
                Bucket::PremiumOffsuit
            } else if hi >= Ten && lo >= Ten {
                Bucket::BroadwayOffsuit
            } else if hi == Ace && lo >= Seven {
                Bucket::DecentOffsuit
            } else if gap == 1 && lo >= Eight {
                Bucket::DecentOffsuit
            } else if hi == Ace || (hi == King && lo >= Nine) {
                Bucket::MediocreOffsuit
            } else if hi >= Queen || (gap <= 2 && lo >= Six) {
                Bucket::WeakOffsuit
            } else {
                Bucket::Trash
            }
        }
    }

    pub fn postflop(&self, hole: Hole, board: Board) -> Postflop {
        Postflop {
            made: self.made(hole, board),
            draw: self.draw(hole, board),
            blocker: self.blocker(hole, board),
        }
    }

    fn made(&self, hole: Hole, board: Board) -> Made {
        let texture = Texture::from(board);
        let combined = Hand::add(Hand::from(hole), Hand::from(board));
        let strength = Strength::from(combined);
        match strength.ranking() {
            Ranking::StraightFlush(_) => Made::StraightFlush,
            Ranking::FourOAK(_) => Made::Quads,
            Ranking::FullHouse(_, _) => Made::FullHouse,
            Ranking::Flush(_) => Made::Flush,
            Ranking::Straight(_) => Made::Straight,
            Ranking::ThreeOAK(_) => Made::Trips,
            Ranking::TwoPair(_, _) => Made::TwoPair,
            Ranking::OnePair(r) => {
                // a pair that lives entirely on the board is no pair of ours
                let ours = hole.hi().rank() == r || hole.lo().rank() == r;
                if !ours {
                    Made::Air
                } else if hole.paired() && r > texture.high {
                    Made::Overpair
                } else if r == texture.high {
                    Made::TopPair
                } else {
                    Made::WeakPair
                }
            }
            Ranking::HighCard(_) => Made::Air,
        }
    }

    fn draw(&self, hole: Hole, board: Board) -> Draw {
        if board.size() >= 5 {
            return Draw::None;
        }
        let flush = self.flush_draw(hole, board);
        let straight = self.straight_draw(hole, board);
        match (flush, straight) {
            (true, Draw::None) => Draw::FlushDraw,
            (true, _) => Draw::Combo,
            (false, s) => s,
        }
    }

    fn flush_draw(&self, hole: Hole, board: Board) -> bool {
        let mut suits = [0u8; 4];
        for card in board.cards() {
            suits[card.suit() as usize] += 1;
        }
        for card in [hole.hi(), hole.lo()] {
            suits[card.suit() as usize] += 1;
        }
        Suit::all().iter().any(|&s| {
            suits[s as usize] == 4
                && (hole.hi().suit() == s || hole.lo().suit() == s)
        })
    }

    fn straight_draw(&self, hole: Hole, board: Board) -> Draw {
        let combined = Hand::add(Hand::from(hole), Hand::from(board));
        let ranks = Vec::<crate::cards::card::Card>::from(combined)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0u16, |a, r| a | r);
        // a made straight is not a draw
        let mut made = ranks;
        made &= made << 1;
        made &= made << 1;
        made &= made << 1;
        made &= made << 1;
        if made != 0 {
            return Draw::None;
        }
        // four in a row somewhere: open-ended. four of any five-window: gutshot.
        // shift everything up one bit and let the ace occupy bit zero for the wheel.
        let ace = (ranks >> 12) & 1;
        let spread = (ranks << 1) | ace;
        let mut open = spread;
        open &= open << 1;
        open &= open << 1;
        open &= open << 1;
        if open != 0 {
            return Draw::OpenEnded;
        }
        for window in 0..10u32 {
            let mask = 0b11111u16 << window;
            if (spread & mask).count_ones() >= 4 {
                return Draw::Gutshot;
            }
        }
        Draw::None
    }

    /// holding the highest missing card of a three-suited board
    fn blocker(&self, hole: Hole, board: Board) -> bool {
        let mut suits = [0u8; 4];
        for card in board.cards() {
            suits[card.suit() as usize] += 1;
        }
        Suit::all().iter().any(|&s| {
            suits[s as usize] >= 3
                && [hole.hi(), hole.lo()]
                    .iter()
                    .any(|c| c.suit() == s && c.rank() == Rank::Ace)
        })
    }
}

impl Abstraction {
    /// rough equity for pricing abstract terminal nodes
    pub fn equity(&self) -> Equity {
        match self {
            Abstraction::Preflop(bucket) => bucket.equity(),
            Abstraction::Postflop(p) => {
                let base: f32 = match p.made {
                    Made::Air => 0.20,
                    Made::WeakPair => 0.40,
                    Made::TopPair => 0.55,
                    Made::Overpair => 0.65,
                    Made::TwoPair => 0.75,
                    Made::Trips => 0.82,
                    Made::Straight => 0.87,
                    Made::Flush => 0.90,
                    Made::FullHouse => 0.95,
                    Made::Quads => 0.98,
                    Made::StraightFlush => 0.99,
                };
                let bonus = if p.made < Made::Straight {
                    match p.draw {
                        Draw::None => 0.0,
                        Draw::Gutshot => 0.06,
                        Draw::OpenEnded => 0.12,
                        Draw::FlushDraw => 0.15,
                        Draw::Combo => 0.25,
                    }
                } else {
                    0.0
                };
                (base + bonus).min(0.95f32)
            }
        }
    }

    /// how often a heuristic policy bets this bucket
    pub fn aggression(&self) -> Probability {
        match self {
            Abstraction::Preflop(bucket) => bucket.aggression(),
            Abstraction::Postflop(p) => match (p.made, p.draw) {
                (m, _) if m >= Made::TwoPair => 0.80,
                (Made::TopPair | Made::Overpair, _) => 0.65,
                (_, Draw::Combo) => 0.60,
                (_, Draw::FlushDraw | Draw::OpenEnded) => 0.45,
                (Made::WeakPair, _) => 0.25,
                (_, Draw::Gutshot) => 0.20,
                _ => 0.10,
            },
        }
    }
}

impl std::fmt::Display for Abstraction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Abstraction::Preflop(bucket) => write!(f, "{}", bucket),
            Abstraction::Postflop(p) => {
                let made = match p.made {
                    Made::Air => "air",
                    Made::WeakPair => "weak_pair",
                    Made::TopPair => "top_pair",
                    Made::Overpair => "overpair",
                    Made::TwoPair => "two_pair",
                    Made::Trips => "trips",
                    Made::Straight => "straight",
                    Made::Flush => "flush",
                    Made::FullHouse => "full_house",
                    Made::Quads => "quads",
                    Made::StraightFlush => "straight_flush",
                };
                write!(f, "{}", made)?;
                match p.draw {
                    Draw::None => {}
                    Draw::Gutshot => write!(f, "+gs")?,
                    Draw::OpenEnded => write!(f, "+oesd")?,
                    Draw::FlushDraw => write!(f, "+fd")?,
                    Draw::Combo => write!(f, "+combo")?,
                }
                if p.blocker {
                    write!(f, "+blk")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(s: &str) -> Hole {
        Hole::try_from(s).unwrap()
    }
    fn board(s: &str) -> Board {
        Board::try_from(s).unwrap()
    }

    #[test]
    fn every_class_lands_in_a_bucket() {
        let abstractor = Abstractor;
        for class in Class::all() {
            for combo in class.combos() {
                let _ = abstractor.preflop(combo);
            }
        }
    }

    #[test]
    fn premium_hands_bucket_high() {
        let a = Abstractor;
        assert_eq!(a.preflop(hole("AsAd")), Bucket::PremiumPair);
        assert_eq!(a.preflop(hole("AsKs")), Bucket::PremiumSuited);
        assert_eq!(a.preflop(hole("AsKd")), Bucket::PremiumOffsuit);
        assert_eq!(a.preflop(hole("7s2d")), Bucket::Trash);
        assert_eq!(a.preflop(hole("8s7s")), Bucket::SuitedConnector);
    }

    #[test]
    fn bucketing_is_stable_within_a_class() {
        let a = Abstractor;
        for class in Class::all() {
            let buckets = class
                .combos()
                .iter()
                .map(|&h| a.preflop(h))
                .collect::<std::collections::BTreeSet<_>>();
            assert_eq!(buckets.len(), 1, "class {} split buckets", class);
        }
    }

    #[test]
    fn made_hands_read_the_board() {
        let a = Abstractor;
        assert_eq!(a.made(hole("AsAd"), board("Kh7d2c")), Made::Overpair);
        assert_eq!(a.made(hole("KsQd"), board("Kh7d2c")), Made::TopPair);
        assert_eq!(a.made(hole("7s6d"), board("Kh7d2c")), Made::WeakPair);
        assert_eq!(a.made(hole("AsQd"), board("Kh7d2c")), Made::Air);
        // the board pairs, we do not
        assert_eq!(a.made(hole("AsQd"), board("7h7d2c")), Made::Air);
    }

    #[test]
    fn draws_are_detected() {
        let a = Abstractor;
        assert_eq!(a.draw(hole("Ah9h"), board("Kh7h2c")), Draw::FlushDraw);
        assert_eq!(a.draw(hole("9s8d"), board("7h6d2c")), Draw::OpenEnded);
        assert_eq!(a.draw(hole("9s8d"), board("6h5d2c")), Draw::Gutshot);
        assert_eq!(a.draw(hole("AhKd"), board("9h5d2c")), Draw::None);
        // rivers have no draws
        assert_eq!(a.draw(hole("Ah9h"), board("Kh7h2c3d8s")), Draw::None);
    }

    #[test]
    fn nut_blocker_on_monotone_boards() {
        let a = Abstractor;
        assert!(a.blocker(hole("AhKd"), board("Qh7h2h")));
        assert!(!a.blocker(hole("AsKd"), board("Qh7h2h")));
    }

    #[test]
    fn labels_are_stable_keys() {
        let a = Abstractor;
        let x = a.abstraction(hole("AsAd"), Board::empty());
        assert_eq!(x.to_string(), "premium_pair");
        let y = a.abstraction(hole("Ah9h"), board("Kh7h2c"));
        assert!(y.to_string().contains("+fd"));
    }
}
