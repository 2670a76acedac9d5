use crate::Chips;
use crate::abstraction::abstractor::Abstraction;

/// the information-set key.
///
/// two nodes with the same key are indistinguishable to the player
/// acting there and must share one strategy. the poker key is the
/// acting player's hand bucket, the pot rounded to big blinds, the
/// amount owed rounded the same way, and the abbreviated action path
/// from the subgame root. toy games in tests key on plain labels.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Info(String);

impl Info {
    /// key for a node where the solving player acts
    pub fn hero(abstraction: Abstraction, pot: Chips, to_call: Chips, bb: Chips, path: &str) -> Self {
        Self(format!(
            "{}|{}|{}|{}",
            abstraction,
            Self::round(pot, bb),
            Self::round(to_call, bb),
            path,
        ))
    }
    /// key for an opponent node, whose cards we never see
    pub fn villain(pot: Chips, to_call: Chips, bb: Chips, path: &str) -> Self {
        Self(format!(
            "v|{}|{}|{}",
            Self::round(pot, bb),
            Self::round(to_call, bb),
            path,
        ))
    }
    /// chip amounts collapse to big blind multiples
    fn round(chips: Chips, bb: Chips) -> Chips {
        let bb = bb.max(1);
        (chips + bb / 2) / bb
    }
}

impl From<&str> for Info {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::bucket::Bucket;

    #[test]
    fn nearby_pots_share_a_key() {
        let b = Abstraction::Preflop(Bucket::PremiumPair);
        let x = Info::hero(b, 10, 4, 2, "xb");
        let y = Info::hero(b, 11, 4, 2, "xb");
        assert_eq!(x, y);
    }

    #[test]
    fn paths_split_keys() {
        let b = Abstraction::Preflop(Bucket::PremiumPair);
        let x = Info::hero(b, 10, 4, 2, "xb");
        let y = Info::hero(b, 10, 4, 2, "bb");
        assert_ne!(x, y);
    }
}
