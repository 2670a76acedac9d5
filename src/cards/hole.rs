use super::card::Card;
use super::hand::Hand;

/// two private cards, stored high card first.
/// storage order never carries information.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn hi(&self) -> Card {
        self.0
    }
    pub fn lo(&self) -> Card {
        self.1
    }
    pub fn suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
    pub fn paired(&self) -> bool {
        self.0.rank() == self.1.rank()
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b, "two distinct cards");
        if a.rank() < b.rank() { Self(b, a) } else { Self(a, b) }
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        Hand::add(Hand::from(hole.0), Hand::from(hole.1))
    }
}

/// "AsKd" isomorphism
impl TryFrom<&str> for Hole {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        anyhow::ensure!(s.len() == 4, "hole string must be 4 chars: {}", s);
        let a = Card::try_from(&s[0..2])?;
        let b = Card::try_from(&s[2..4])?;
        Ok(Self::from((a, b)))
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl crate::Arbitrary for Hole {
    fn random() -> Self {
        use crate::Arbitrary;
        let a = Card::random();
        loop {
            let b = Card::random();
            if b != a {
                return Self::from((a, b));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_card_first() {
        let hole = Hole::try_from("2cAs").unwrap();
        assert_eq!(hole.hi(), Card::try_from("As").unwrap());
        assert_eq!(hole.lo(), Card::try_from("2c").unwrap());
    }

    #[test]
    fn suited_and_paired() {
        assert!(Hole::try_from("AsKs").unwrap().suited());
        assert!(!Hole::try_from("AsKd").unwrap().suited());
        assert!(Hole::try_from("AsAd").unwrap().paired());
    }
}
