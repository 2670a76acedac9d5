use crate::Percent;
use crate::Utility;
use crate::gameplay::action::Action;
use colored::Colorize;

/// one recommended line
#[derive(Debug, Clone, serde::Serialize)]
pub struct Entry {
    pub action: Action,
    /// percent of the time the strategy takes this action
    pub frequency: Percent,
    /// expected value in big blinds
    pub ev: Utility,
    /// exactly one entry per profile carries this flag
    pub optimal: bool,
    pub explanation: String,
}

/// the final mixed-strategy recommendation for one decision.
///
/// frequencies cover exactly the legal actions and sum to 100 within
/// rounding. the max-EV action is marked optimal, ties broken by
/// higher frequency and then by the canonical action order: all-in,
/// raise, bet, call, check, fold.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DecisionProfile {
    pub entries: Vec<Entry>,
}

impl DecisionProfile {
    pub fn new(mut entries: Vec<Entry>) -> Self {
        assert!(!entries.is_empty(), "a decision needs options");
        entries.sort_by_key(|e| e.action.precedence());
        let mut profile = Self { entries };
        profile.normalize();
        profile.mark_optimal();
        profile
    }

    pub fn optimal(&self) -> &Entry {
        self.entries
            .iter()
            .find(|e| e.optimal)
            .expect("construction marks one entry")
    }

    /// frequency of the entry matching an action's kind
    pub fn frequency(&self, action: &Action) -> Percent {
        self.entries
            .iter()
            .find(|e| std::mem::discriminant(&e.action) == std::mem::discriminant(action))
            .map(|e| e.frequency)
            .unwrap_or(0.0)
    }

    /// sample an action from the mix; this is how engine agents play
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Action {
        let total: Percent = self.entries.iter().map(|e| e.frequency).sum();
        let mut roll: Percent = rng.random_range(0.0..total.max(1e-6));
        for entry in self.entries.iter() {
            roll -= entry.frequency;
            if roll <= 0.0 {
                return entry.action;
            }
        }
        self.optimal().action
    }

    fn normalize(&mut self) {
        let total: Percent = self.entries.iter().map(|e| e.frequency).sum();
        if total > 0.0 {
            for entry in self.entries.iter_mut() {
                entry.frequency *= 100.0 / total;
            }
        } else {
            // nothing recommended anything: spread uniformly
            let uniform = 100.0 / self.entries.len() as Percent;
            for entry in self.entries.iter_mut() {
                entry.frequency = uniform;
            }
        }
    }

    fn mark_optimal(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.optimal = false;
        }
        let best = self
            .entries
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                a.ev
                    .partial_cmp(&b.ev)
                    .expect("evs are finite")
                    .then(
                        a.frequency
                            .partial_cmp(&b.frequency)
                            .expect("frequencies are finite"),
                    )
                    // entries are sorted canonically, earlier wins ties
                    .then(b.action.precedence().cmp(&a.action.precedence()))
            })
            .map(|(i, _)| i)
            .expect("profile is nonempty");
        self.entries[best].optimal = true;
    }
}

impl std::fmt::Display for DecisionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for entry in self.entries.iter() {
            let line = format!(
                "{:<14} {:>5.1}%  {:>+6.2}bb  {}",
                entry.action.to_string(),
                entry.frequency,
                entry.ev,
                entry.explanation
            );
            if entry.optimal {
                writeln!(f, "{}", line.bold())?;
            } else {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn entry(action: Action, frequency: Percent, ev: Utility) -> Entry {
        Entry {
            action,
            frequency,
            ev,
            optimal: false,
            explanation: String::new(),
        }
    }

    #[test]
    fn frequencies_normalize_to_100() {
        let profile = DecisionProfile::new(vec![
            entry(Action::Fold, 30.0, -1.0),
            entry(Action::Call(4), 50.0, 0.5),
            entry(Action::Raise(12), 40.0, 0.4),
        ]);
        let total: Percent = profile.entries.iter().map(|e| e.frequency).sum();
        assert!((total - 100.0).abs() < 1.0);
    }

    #[test]
    fn exactly_one_optimal() {
        let profile = DecisionProfile::new(vec![
            entry(Action::Fold, 20.0, -1.0),
            entry(Action::Call(4), 60.0, 0.8),
            entry(Action::Raise(12), 20.0, 0.3),
        ]);
        assert_eq!(profile.entries.iter().filter(|e| e.optimal).count(), 1);
        assert!(matches!(profile.optimal().action, Action::Call(_)));
    }

    #[test]
    fn ev_ties_break_by_frequency() {
        let profile = DecisionProfile::new(vec![
            entry(Action::Call(4), 70.0, 0.5),
            entry(Action::Raise(12), 30.0, 0.5),
        ]);
        assert!(matches!(profile.optimal().action, Action::Call(_)));
    }

    #[test]
    fn full_ties_break_by_canonical_order() {
        let profile = DecisionProfile::new(vec![
            entry(Action::Call(4), 50.0, 0.5),
            entry(Action::Raise(12), 50.0, 0.5),
        ]);
        // all-in > raise > bet > call > check > fold
        assert!(matches!(profile.optimal().action, Action::Raise(_)));
    }

    #[test]
    fn zero_frequency_entries_survive() {
        let profile = DecisionProfile::new(vec![
            entry(Action::Fold, 100.0, -1.0),
            entry(Action::Shove(100), 0.0, -3.0),
        ]);
        assert_eq!(profile.entries.len(), 2);
        assert_eq!(profile.frequency(&Action::Shove(100)), 0.0);
    }

    #[test]
    fn sampling_follows_the_mix() {
        let mut rng = SmallRng::seed_from_u64(3);
        let profile = DecisionProfile::new(vec![
            entry(Action::Fold, 100.0, 0.0),
            entry(Action::Call(2), 0.0, -1.0),
        ]);
        for _ in 0..16 {
            assert_eq!(profile.sample(&mut rng), Action::Fold);
        }
    }

    #[test]
    fn serializes_for_the_outside_world() {
        let profile = DecisionProfile::new(vec![entry(Action::Check, 100.0, 0.2)]);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("frequency"));
        assert!(json.contains("check"));
    }
}
