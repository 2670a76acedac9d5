use crate::Chips;
use colored::Colorize;

/// everything a player can do at the table.
///
/// Bet and Raise carry the actor's TARGET total commitment for the
/// street, not the delta; the engine computes the chips that move.
/// Shove ignores any requested amount and commits the whole stack.
/// Blind never comes from a caller, it is posted by the dealer and
/// shows up only in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call(Chips),
    Bet(Chips),
    Raise(Chips),
    #[serde(rename = "all-in")]
    Shove(Chips),
    Blind(Chips),
}

impl Action {
    /// chips this action moves into the pot (target for bet/raise)
    pub fn chips(&self) -> Chips {
        match self {
            Action::Fold | Action::Check => 0,
            Action::Call(c) | Action::Bet(c) | Action::Raise(c) | Action::Shove(c)
            | Action::Blind(c) => *c,
        }
    }
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_) | Action::Shove(_))
    }
    /// canonical ordering for EV tie-breaks:
    /// all-in, raise, bet, call, check, fold
    pub fn precedence(&self) -> usize {
        match self {
            Action::Shove(_) => 0,
            Action::Raise(_) => 1,
            Action::Bet(_) => 2,
            Action::Call(_) => 3,
            Action::Check => 4,
            Action::Fold => 5,
            Action::Blind(_) => 6,
        }
    }
    /// single-letter history abbreviation, used in infoset keys
    pub fn abbrev(&self) -> char {
        match self {
            Action::Fold => 'f',
            Action::Check => 'x',
            Action::Call(_) => 'c',
            Action::Bet(_) => 'b',
            Action::Raise(_) => 'r',
            Action::Shove(_) => 'a',
            Action::Blind(_) => 'p',
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Check => write!(f, "{}", "CHECK".cyan()),
            Action::Fold => write!(f, "{}", "FOLD".red()),
            Action::Blind(x) => write!(f, "{}", format!("BLIND {}", x).white()),
            Action::Call(x) => write!(f, "{}", format!("CALL  {}", x).yellow()),
            Action::Bet(x) => write!(f, "{}", format!("BET   {}", x).green()),
            Action::Raise(x) => write!(f, "{}", format!("RAISE {}", x).green()),
            Action::Shove(x) => write!(f, "{}", format!("SHOVE {}", x).magenta()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order() {
        let mut actions = vec![
            Action::Fold,
            Action::Check,
            Action::Call(2),
            Action::Raise(8),
            Action::Shove(100),
        ];
        actions.sort_by_key(|a| a.precedence());
        assert_eq!(actions[0], Action::Shove(100));
        assert_eq!(actions[4], Action::Fold);
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_string(&Action::Shove(100)).unwrap();
        assert!(json.contains("all-in"));
        let json = serde_json::to_string(&Action::Fold).unwrap();
        assert!(json.contains("fold"));
    }
}
