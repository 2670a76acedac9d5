use crate::Equity;
use crate::Probability;

/// structural preflop hand buckets.
///
/// the labels are purely structural: pairness, suitedness, and rank
/// tier decide membership, never board context. stable for the whole
/// preflop street; postflop abstractions extend these with a board
/// texture modifier. coarse on purpose, this is the sole bridge
/// between real hands and the abstract solving tree.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    PremiumPair,
    HighPair,
    MidPair,
    LowPair,
    PremiumSuited,
    PremiumOffsuit,
    BroadwaySuited,
    BroadwayOffsuit,
    GoodSuited,
    SuitedConnector,
    DecentSuited,
    DecentOffsuit,
    SpeculativeSuited,
    MediocreOffsuit,
    WeakSuited,
    WeakOffsuit,
    Trash,
}

impl Bucket {
    /// rough all-in equity against a random hand.
    /// good enough to price abstract-tree terminal nodes.
    pub fn equity(&self) -> Equity {
        match self {
            Bucket::PremiumPair => 0.82,
            Bucket::HighPair => 0.75,
            Bucket::MidPair => 0.66,
            Bucket::LowPair => 0.55,
            Bucket::PremiumSuited => 0.64,
            Bucket::PremiumOffsuit => 0.62,
            Bucket::BroadwaySuited => 0.59,
            Bucket::BroadwayOffsuit => 0.56,
            Bucket::GoodSuited => 0.55,
            Bucket::SuitedConnector => 0.51,
            Bucket::DecentSuited => 0.50,
            Bucket::DecentOffsuit => 0.48,
            Bucket::SpeculativeSuited => 0.45,
            Bucket::MediocreOffsuit => 0.43,
            Bucket::WeakSuited => 0.42,
            Bucket::WeakOffsuit => 0.38,
            Bucket::Trash => 0.32,
        }
    }

    /// how often a rollout policy should come out swinging
    pub fn aggression(&self) -> Probability {
        match self {
            Bucket::PremiumPair | Bucket::HighPair => 0.85,
            Bucket::PremiumSuited | Bucket::PremiumOffsuit => 0.75,
            Bucket::MidPair | Bucket::BroadwaySuited => 0.60,
            Bucket::BroadwayOffsuit | Bucket::GoodSuited => 0.50,
            Bucket::LowPair | Bucket::SuitedConnector => 0.40,
            Bucket::DecentSuited | Bucket::DecentOffsuit => 0.30,
            Bucket::SpeculativeSuited | Bucket::MediocreOffsuit => 0.20,
            Bucket::WeakSuited | Bucket::WeakOffsuit => 0.12,
            Bucket::Trash => 0.05,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Bucket::PremiumPair => write!(f, "premium_pair"),
            Bucket::HighPair => write!(f, "high_pair"),
            Bucket::MidPair => write!(f, "mid_pair"),
            Bucket::LowPair => write!(f, "low_pair"),
            Bucket::PremiumSuited => write!(f, "premium_suited"),
            Bucket::PremiumOffsuit => write!(f, "premium_offsuit"),
            Bucket::BroadwaySuited => write!(f, "broadway_suited"),
            Bucket::BroadwayOffsuit => write!(f, "broadway_offsuit"),
            Bucket::GoodSuited => write!(f, "good_suited"),
            Bucket::SuitedConnector => write!(f, "suited_connector"),
            Bucket::DecentSuited => write!(f, "decent_suited"),
            Bucket::DecentOffsuit => write!(f, "decent_offsuit"),
            Bucket::SpeculativeSuited => write!(f, "speculative_suited"),
            Bucket::MediocreOffsuit => write!(f, "mediocre_offsuit"),
            Bucket::WeakSuited => write!(f, "weak_suited"),
            Bucket::WeakOffsuit => write!(f, "weak_offsuit"),
            Bucket::Trash => write!(f, "trash"),
        }
    }
}
