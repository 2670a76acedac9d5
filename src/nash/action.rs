use crate::Percent;

/// the four preflop replies the charts speak in
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reply {
    Fold,
    Call,
    MinRaise,
    AllIn,
}

impl Reply {
    pub const fn all() -> &'static [Self; 4] {
        &[Self::Fold, Self::Call, Self::MinRaise, Self::AllIn]
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Reply::Fold => write!(f, "fold"),
            Reply::Call => write!(f, "call"),
            Reply::MinRaise => write!(f, "minraise"),
            Reply::AllIn => write!(f, "all-in"),
        }
    }
}

/// a mixed preflop strategy over the four replies, in percent.
/// frequencies sum to 100 within rounding tolerance. historical
/// two-action push/fold entries widen into this shape on load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NashAction {
    pub fold: Percent,
    pub call: Percent,
    pub minraise: Percent,
    pub allin: Percent,
}

impl NashAction {
    pub const FOLD: Self = Self::jam(0.0);

    /// widen a push-or-fold entry
    pub const fn jam(allin: Percent) -> Self {
        Self {
            fold: 100.0 - allin,
            call: 0.0,
            minraise: 0.0,
            allin,
        }
    }
    /// widen a call-or-fold entry
    pub const fn flat(call: Percent) -> Self {
        Self {
            fold: 100.0 - call,
            call,
            minraise: 0.0,
            allin: 0.0,
        }
    }
    /// the general four-way mix
    pub const fn mix(fold: Percent, call: Percent, minraise: Percent, allin: Percent) -> Self {
        Self {
            fold,
            call,
            minraise,
            allin,
        }
    }

    pub fn total(&self) -> Percent {
        self.fold + self.call + self.minraise + self.allin
    }
    pub fn frequency(&self, reply: Reply) -> Percent {
        match reply {
            Reply::Fold => self.fold,
            Reply::Call => self.call,
            Reply::MinRaise => self.minraise,
            Reply::AllIn => self.allin,
        }
    }
    pub fn normalized(mut self) -> Self {
        let total = self.total();
        if total > 0.0 {
            self.fold *= 100.0 / total;
            self.call *= 100.0 / total;
            self.minraise *= 100.0 / total;
            self.allin *= 100.0 / total;
        }
        self
    }

    /// sample a reply from the mix
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Reply {
        let roll: Percent = rng.random_range(0.0..self.total().max(1e-6));
        let mut cdf = 0.0;
        for &reply in Reply::all() {
            cdf += self.frequency(reply);
            if roll < cdf {
                return reply;
            }
        }
        Reply::Fold
    }
}

impl std::fmt::Display for NashAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "fold {:>3.0} call {:>3.0} minraise {:>3.0} all-in {:>3.0}",
            self.fold, self.call, self.minraise, self.allin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn widened_entries_sum_to_100() {
        assert_eq!(NashAction::jam(65.0).total(), 100.0);
        assert_eq!(NashAction::flat(30.0).total(), 100.0);
        assert_eq!(NashAction::FOLD.total(), 100.0);
    }

    #[test]
    fn normalization_repairs_drift() {
        let mix = NashAction::mix(50.0, 25.0, 20.0, 10.0).normalized();
        assert!((mix.total() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn sampling_respects_frequencies() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mix = NashAction::jam(100.0);
        for _ in 0..16 {
            assert_eq!(mix.sample(&mut rng), Reply::AllIn);
        }
        let mix = NashAction::FOLD;
        for _ in 0..16 {
            assert_eq!(mix.sample(&mut rng), Reply::Fold);
        }
    }
}
