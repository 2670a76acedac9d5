/// the abstract action alphabet.
///
/// the real game's continuous raise space collapses to a single
/// aggressive sizing, two thirds of the pot, promoted to a shove
/// when the stack cannot cover it. three edges per node keeps the
/// bounded tree small enough to solve inside a decision deadline.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Edge {
    Fold,
    Check,
    Call,
    Bet,
    Shove,
}

impl Edge {
    pub fn abbrev(&self) -> char {
        match self {
            Edge::Fold => 'f',
            Edge::Check => 'x',
            Edge::Call => 'c',
            Edge::Bet => 'b',
            Edge::Shove => 'a',
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}
