use super::card::Card;
use super::hole::Hole;
use super::rank::Rank;
use super::suit::Suit;

/// one of the 169 canonical preflop hand classes.
/// two ranks high-first, with "s" for suited and "o" for offsuit.
/// pairs carry no suffix: "AKs", "T9o", "QQ".
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Class {
    hi: Rank,
    lo: Rank,
    suited: bool,
}

impl Class {
    pub fn hi(&self) -> Rank {
        self.hi
    }
    pub fn lo(&self) -> Rank {
        self.lo
    }
    pub fn paired(&self) -> bool {
        self.hi == self.lo
    }
    pub fn suited(&self) -> bool {
        self.suited
    }
    pub fn pair(rank: Rank) -> Self {
        Self {
            hi: rank,
            lo: rank,
            suited: false,
        }
    }
    pub fn suit(hi: Rank, lo: Rank) -> Self {
        assert!(hi != lo, "pairs cannot be suited");
        Self {
            hi: hi.max(lo),
            lo: hi.min(lo),
            suited: true,
        }
    }
    pub fn off(hi: Rank, lo: Rank) -> Self {
        Self {
            hi: hi.max(lo),
            lo: hi.min(lo),
            suited: false,
        }
    }

    /// every concrete two-card combination in this class.
    /// 6 for pairs, 4 suited, 12 offsuit.
    pub fn combos(&self) -> Vec<Hole> {
        let mut holes = Vec::new();
        for &a in Suit::all() {
            for &b in Suit::all() {
                if self.paired() && a >= b {
                    continue;
                }
                if !self.paired() && self.suited != (a == b) {
                    continue;
                }
                let hi = Card::from((self.hi, a));
                let lo = Card::from((self.lo, b));
                holes.push(Hole::from((hi, lo)));
            }
        }
        holes
    }

    /// all 169 classes
    pub fn all() -> Vec<Self> {
        let mut classes = Vec::with_capacity(169);
        for &hi in Rank::all().iter().rev() {
            for &lo in Rank::all().iter().rev().filter(|&&lo| lo <= hi) {
                if hi == lo {
                    classes.push(Self::pair(hi));
                } else {
                    classes.push(Self::suit(hi, lo));
                    classes.push(Self::off(hi, lo));
                }
            }
        }
        classes
    }
}

impl From<Hole> for Class {
    fn from(hole: Hole) -> Self {
        let hi = hole.hi().rank();
        let lo = hole.lo().rank();
        Self {
            hi,
            lo,
            suited: hole.suited() && hi != lo,
        }
    }
}

impl TryFrom<&str> for Class {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.len() {
            2 => {
                let hi = Rank::try_from(&s[0..1])?;
                let lo = Rank::try_from(&s[1..2])?;
                anyhow::ensure!(hi == lo, "two-char class must be a pair: {}", s);
                Ok(Self::pair(hi))
            }
            3 => {
                let hi = Rank::try_from(&s[0..1])?;
                let lo = Rank::try_from(&s[1..2])?;
                anyhow::ensure!(hi != lo, "suffixed class cannot be a pair: {}", s);
                match &s[2..3] {
                    "s" => Ok(Self::suit(hi, lo)),
                    "o" => Ok(Self::off(hi, lo)),
                    x => Err(anyhow::anyhow!("invalid class suffix: {}", x)),
                }
            }
            _ => Err(anyhow::anyhow!("invalid class string: {}", s)),
        }
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.paired() {
            write!(f, "{}{}", self.hi, self.lo)
        } else {
            write!(
                f,
                "{}{}{}",
                self.hi,
                self.lo,
                if self.suited { "s" } else { "o" }
            )
        }
    }
}

impl crate::Arbitrary for Class {
    fn random() -> Self {
        use crate::Arbitrary;
        Self::from(Hole::random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_169_classes() {
        assert_eq!(Class::all().len(), 169);
    }

    #[test]
    fn combos_cover_the_deck() {
        let n = Class::all().iter().map(|c| c.combos().len()).sum::<usize>();
        assert_eq!(n, 1326);
    }

    #[test]
    fn combo_counts() {
        assert_eq!(Class::try_from("QQ").unwrap().combos().len(), 6);
        assert_eq!(Class::try_from("AKs").unwrap().combos().len(), 4);
        assert_eq!(Class::try_from("AKo").unwrap().combos().len(), 12);
    }

    #[test]
    fn bijective_str() {
        for class in Class::all() {
            assert_eq!(class, Class::try_from(class.to_string().as_str()).unwrap());
        }
    }

    #[test]
    fn from_hole() {
        let hole = Hole::try_from("KsAs").unwrap();
        assert_eq!(Class::from(hole), Class::try_from("AKs").unwrap());
        let hole = Hole::try_from("7c2d").unwrap();
        assert_eq!(Class::from(hole), Class::try_from("72o").unwrap());
    }
}
