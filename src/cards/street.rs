/// the five phases of a hand.
/// Show is terminal, the board is full or betting is over.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Street {
    Pref,
    Flop,
    Turn,
    Rive,
    Show,
}

impl Street {
    pub const fn next(&self) -> Self {
        match self {
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => Self::Show,
            Self::Show => panic!("terminal"),
        }
    }
    /// how many board cards are visible on this street
    pub const fn n_observed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive | Self::Show => 5,
        }
    }
    /// how many board cards get dealt entering this street
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn | Self::Rive => 1,
            Self::Show => 0,
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
            Self::Show => write!(f, "showdown"),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        match rand::random_range(0..4u8) {
            0 => Self::Pref,
            1 => Self::Flop,
            2 => Self::Turn,
            _ => Self::Rive,
        }
    }
}
