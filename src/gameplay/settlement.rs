use super::seat::State;
use crate::Chips;
use crate::cards::strength::Strength;
use colored::Colorize;

/// one seat's line in the final accounting of a hand.
/// strength is None for players who never reached showdown
/// (folded, or the hand ended before the board completed).
#[derive(Debug, Clone)]
pub struct Settlement {
    pub reward: Chips,
    pub risked: Chips,
    pub status: State,
    pub strength: Option<Strength>,
}

impl Settlement {
    pub fn pnl(&self) -> Chips {
        self.reward - self.risked
    }
}

impl From<(Chips, State, Option<Strength>)> for Settlement {
    fn from((risked, status, strength): (Chips, State, Option<Strength>)) -> Self {
        Self {
            reward: 0,
            risked,
            status,
            strength,
        }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let shown = self
            .strength
            .map(|s| s.to_string())
            .unwrap_or_else(|| "mucked".into());
        if self.reward > 0 {
            write!(f, "{:<6}{}", format!("+{}", self.reward).green(), shown)
        } else {
            write!(f, "      {}", shown)
        }
    }
}
