use crate::Chips;
use crate::Probability;

/// the equity needed to break even on a call
pub fn pot_odds(to_call: Chips, pot: Chips) -> Probability {
    if to_call <= 0 {
        return 0.0;
    }
    to_call as Probability / (pot + to_call) as Probability
}

/// minimum defense frequency: defend at least this often against a
/// bet or any two cards bluff profitably
pub fn mdf(bet: Chips, pot: Chips) -> Probability {
    if bet <= 0 {
        return 1.0;
    }
    1.0 - bet as Probability / (pot + bet) as Probability
}

/// how often a pure bluff of this size must work to break even
pub fn break_even_fold_equity(bet: Chips, pot: Chips) -> Probability {
    if bet <= 0 {
        return 0.0;
    }
    bet as Probability / (pot + bet) as Probability
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_odds_on_a_pot_sized_bet() {
        // call 10 into a 20 pot (10 bet + 10 dead): need a third
        assert!((pot_odds(10, 20) - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(pot_odds(0, 20), 0.0);
    }

    #[test]
    fn mdf_complements_the_bluff_price() {
        let pot = 10;
        let bet = 5;
        let defend = mdf(bet, pot);
        let bluff = break_even_fold_equity(bet, pot);
        assert!((defend + bluff - 1.0).abs() < 1e-6);
        assert!((defend - 2.0 / 3.0).abs() < 1e-6);
    }
}
