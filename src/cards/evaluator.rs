use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// a lazy evaluator for a hand's strength.
///
/// works on any 5, 6, or 7 distinct cards. using the compact
/// bitset representation of the Hand, we search for the best
/// category with bitwise operations, highest category first.
/// no lookup tables, no 21-subset loop for seven cards: the
/// masks answer for the whole hand at once.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        assert!(
            (5..=7).contains(&h.size()),
            "evaluator takes 5 to 7 cards, got {}",
            h.size()
        );
        Self(h)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least five cards in Hand")
    }

    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::none();
        }
        let (pool, mask) = match value {
            // flush kickers come from the flush suit only
            Ranking::Flush(hi) => {
                let suit = self.find_suit_of_flush().expect("flush was found");
                (self.suit_masks()[suit as usize], u16::from(hi))
            }
            Ranking::TwoPair(hi, lo) => (self.rank_masks(), u16::from(hi) | u16::from(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::FourOAK(hi) => (self.rank_masks(), u16::from(hi)),
            _ => unreachable!("no other ranking carries kickers"),
        };
        let mut bits = pool & !mask;
        while bits.count_ones() as usize > n {
            bits &= bits - 1;
        }
        Kickers::from(bits)
    }

    ///

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1, None).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2, None).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, None).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4, None).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2, None).and_then(|hi| {
            self.find_rank_of_n_oak(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, None).and_then(|trips| {
            self.find_rank_of_n_oak(2, Some(trips))
                .map(|pairs| Ranking::FullHouse(trips, pairs))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            let bits = self.suit_masks()[suit as usize];
            self.find_rank_of_straight(bits)
                .map(Ranking::StraightFlush)
                .unwrap_or_else(|| Ranking::Flush(Rank::from(bits)))
        })
    }

    ///

    /// the wheel uses Five as its high rank, so it loses to 6-high
    fn find_rank_of_straight(&self, ranks: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1000000001111;
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_masks()
            .iter()
            .position(|&m| m.count_ones() >= 5)
            .map(|i| Suit::from(i as u8))
    }
    /// highest rank held at least n times, strictly below the excluded rank
    fn find_rank_of_n_oak(&self, n: u32, below: Option<Rank>) -> Option<Rank> {
        let cap = below.map(|r| u8::from(r)).unwrap_or(13);
        let hand = u64::from(self.0);
        (0..cap)
            .rev()
            .find(|r| ((hand >> (4 * r)) & 0xF).count_ones() >= n)
            .map(Rank::from)
    }

    ///

    /// which ranks are in the hand, neglecting suit
    fn rank_masks(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// which ranks are in the hand, grouped by suit
    fn suit_masks(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| (u8::from(c.suit()), u16::from(c.rank())))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(s: &str) -> Ranking {
        Evaluator::from(Hand::try_from(s).unwrap()).find_ranking()
    }

    #[test]
    fn high_card() {
        assert_eq!(ranking("AsKhQdJc9s"), Ranking::HighCard(Rank::Ace));
    }

    #[test]
    fn one_pair() {
        assert_eq!(ranking("AsAhKdQcJs"), Ranking::OnePair(Rank::Ace));
    }

    #[test]
    fn two_pair() {
        assert_eq!(ranking("AsAhKdKcQs"), Ranking::TwoPair(Rank::Ace, Rank::King));
    }

    #[test]
    fn three_oak() {
        assert_eq!(ranking("AsAhAdKcQs"), Ranking::ThreeOAK(Rank::Ace));
    }

    #[test]
    fn straight() {
        assert_eq!(ranking("TsJhQdKcAs"), Ranking::Straight(Rank::Ace));
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(ranking("5s4h3d2cAs"), Ranking::Straight(Rank::Five));
    }

    #[test]
    fn flush() {
        assert_eq!(ranking("AsKsQsJs9s"), Ranking::Flush(Rank::Ace));
    }

    #[test]
    fn full_house() {
        assert_eq!(
            ranking("AsAhAdKcKs"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn four_oak() {
        assert_eq!(ranking("AsAhAdAcKs"), Ranking::FourOAK(Rank::Ace));
    }

    #[test]
    fn straight_flush() {
        assert_eq!(ranking("TsJsQsKsAs"), Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn wheel_straight_flush() {
        assert_eq!(ranking("As2s3s4s5s"), Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn seven_card_two_pair() {
        assert_eq!(
            ranking("AsAhKdKcQsJh9d"),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn three_pair_takes_best_two() {
        assert_eq!(
            ranking("AsAhKdKcQsQhJd"),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn two_trips_make_a_full_house() {
        assert_eq!(
            ranking("AsAhAdKcKsKhQd"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn flush_beats_straight() {
        assert_eq!(ranking("4h6h7h8h9hTs"), Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house_beats_hidden_flush() {
        assert_eq!(
            ranking("AsAhAdKsKhQsJs"),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn straight_flush_beats_quads() {
        assert_eq!(
            ranking("TsJsQsKsAsAhAd"),
            Ranking::StraightFlush(Rank::Ace)
        );
    }

    #[test]
    fn six_card_wheel_prefers_six_high() {
        assert_eq!(ranking("As2s3h4d5c6s"), Ranking::Straight(Rank::Six));
    }

    #[test]
    fn pair_kickers_come_from_the_whole_hand() {
        let hand = Hand::try_from("AsAhKdQcJs9h7d").unwrap();
        let eval = Evaluator::from(hand);
        let value = eval.find_ranking();
        let kicks = eval.find_kickers(value);
        assert_eq!(kicks.ranks(), vec![Rank::King, Rank::Queen, Rank::Jack]);
    }

    #[test]
    fn flush_kickers_stay_in_suit() {
        // the Ah does not kick for a spade flush
        let hand = Hand::try_from("KsQsJs8s4sAh2d").unwrap();
        let eval = Evaluator::from(hand);
        let value = eval.find_ranking();
        assert_eq!(value, Ranking::Flush(Rank::King));
        let kicks = eval.find_kickers(value);
        assert_eq!(
            kicks.ranks(),
            vec![Rank::Queen, Rank::Jack, Rank::Eight, Rank::Four]
        );
    }

    #[test]
    #[should_panic]
    fn wrong_size_panics() {
        let _ = Evaluator::from(Hand::try_from("AsKs").unwrap());
    }
}
