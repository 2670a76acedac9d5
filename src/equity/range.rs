use crate::Probability;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::hand::HandIterator;
use crate::cards::hole::Hole;
use crate::cards::notation::Class;

/// a weighted set of opponent hole-card combinations.
/// weights are kept normalized to sum to one, so the range doubles
/// as a sampling distribution for determinization and monte carlo.
#[derive(Debug, Clone)]
pub struct Range(Vec<(Hole, Probability)>);

impl Range {
    /// every combination not colliding with the blocked cards, uniform
    pub fn any(blocked: Hand) -> Self {
        let combos = HandIterator::from((2usize, blocked))
            .map(|h| {
                let cards = Vec::<Card>::from(h);
                Hole::from((cards[0], cards[1]))
            })
            .map(|h| (h, 1.0))
            .collect();
        Self::normalized(combos)
    }

    /// the union of some hand classes, uniform over surviving combos
    pub fn classes(classes: &[Class], blocked: Hand) -> Self {
        let combos = classes
            .iter()
            .flat_map(|c| c.combos())
            .filter(|h| !Hand::from(*h).intersects(blocked))
            .map(|h| (h, 1.0))
            .collect();
        Self::normalized(combos)
    }

    pub fn singleton(hole: Hole) -> Self {
        Self(vec![(hole, 1.0)])
    }

    pub fn weighted(combos: Vec<(Hole, Probability)>) -> Self {
        Self::normalized(combos)
    }

    fn normalized(mut combos: Vec<(Hole, Probability)>) -> Self {
        let total: Probability = combos.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            for (_, w) in combos.iter_mut() {
                *w /= total;
            }
        }
        Self(combos)
    }

    /// drop combos colliding with newly revealed cards, renormalize
    pub fn without(&self, blocked: Hand) -> Self {
        Self::normalized(
            self.0
                .iter()
                .filter(|(h, _)| !Hand::from(*h).intersects(blocked))
                .cloned()
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(Hole, Probability)> {
        self.0.iter()
    }

    /// weighted draw, for determinization
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Option<Hole> {
        if self.0.is_empty() {
            return None;
        }
        let roll: Probability = rng.random_range(0.0..1.0);
        let mut cdf = 0.0;
        for (hole, w) in self.0.iter() {
            cdf += w;
            if roll < cdf {
                return Some(*hole);
            }
        }
        self.0.last().map(|(h, _)| *h)
    }
}
