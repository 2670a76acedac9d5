use super::Position;
use super::Situation;
use super::action::NashAction;
use super::action::Reply;
use super::chart::SHEETS;
use super::range;
use crate::Chips;
use crate::Percent;
use crate::Utility;
use crate::cards::notation::Class;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// the frozen push/fold lookup.
///
/// built once from the chart pages, then read-only for the life of
/// the process. keys are (position, situation, stack bucket, class);
/// anything the charts never mention falls to a situational default,
/// fold everywhere except the big blind's free check. ev estimates
/// come from a published piecewise-linear schedule over the mix
/// frequencies rather than from solving, which keeps short-stack
/// preflop answers instant.
pub struct Table {
    entries: BTreeMap<(Position, Situation, Chips, Class), NashAction>,
}

/// breakpoints mapping a reply's chart frequency to its ev in big
/// blinds at the reference 15bb stack. between points we lerp.
const PUSH_EV: [(Percent, Utility); 4] =
    [(0.0, -1.8), (25.0, -0.6), (60.0, 0.35), (100.0, 1.1)];
const CALL_EV: [(Percent, Utility); 4] =
    [(0.0, -1.4), (30.0, -0.4), (70.0, 0.45), (100.0, 1.2)];
const RAISE_EV: [(Percent, Utility); 4] =
    [(0.0, -0.9), (30.0, -0.2), (70.0, 0.5), (100.0, 0.9)];

static SHARED: OnceLock<Table> = OnceLock::new();

impl Table {
    pub const STACKS: [Chips; 5] = [5, 10, 15, 20, 25];

    /// expand every chart page; earlier rows shadow later ones
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for sheet in SHEETS {
            for (spec, mix) in sheet.rows {
                let classes = range::parse(spec).expect("charts are well formed");
                for class in classes {
                    entries
                        .entry((sheet.position, sheet.situation, sheet.stack, class))
                        .or_insert(mix.normalized());
                }
            }
        }
        Self { entries }
    }

    /// the process-wide instance; tests build their own
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::new)
    }

    /// snap an effective stack to the nearest chart page
    pub fn bucket(bb: Chips) -> Chips {
        Self::STACKS
            .iter()
            .copied()
            .min_by_key(|s| (s - bb).abs())
            .expect("stack grid nonempty")
    }

    pub fn distribution(
        &self,
        class: Class,
        position: Position,
        situation: Situation,
        bb: Chips,
    ) -> NashAction {
        let stack = Self::bucket(bb);
        self.entries
            .get(&(position, situation, stack, class))
            .copied()
            .unwrap_or_else(|| Self::fallback(position, situation))
    }

    /// missing keys almost always fold; the big blind closing a limped
    /// pot checks instead, the option costs nothing
    fn fallback(position: Position, situation: Situation) -> NashAction {
        match (position, situation) {
            (Position::Big, Situation::VsLimp) => NashAction::flat(100.0),
            _ => NashAction::FOLD,
        }
    }

    pub fn sample(
        &self,
        class: Class,
        position: Position,
        situation: Situation,
        bb: Chips,
        rng: &mut impl rand::Rng,
    ) -> Reply {
        self.distribution(class, position, situation, bb).sample(rng)
    }

    /// per-reply ev in big blinds, read off the frequency schedule.
    /// scaled by stack depth for the all-in replies, since risk grows
    /// with everything behind, and by pot share for the flat call.
    pub fn evs(
        &self,
        class: Class,
        position: Position,
        situation: Situation,
        bb: Chips,
        pot_bb: Utility,
        to_call_bb: Utility,
    ) -> BTreeMap<Reply, Utility> {
        let mix = self.distribution(class, position, situation, bb);
        let depth = (bb as Utility / 15.0).clamp(0.2, 2.0);
        let share = ((pot_bb + to_call_bb) / 3.0).clamp(0.5, 3.0);
        let mut evs = BTreeMap::new();
        evs.insert(Reply::Fold, 0.0);
        evs.insert(Reply::Call, Self::lerp(mix.call, &CALL_EV) * share);
        evs.insert(Reply::MinRaise, Self::lerp(mix.minraise, &RAISE_EV));
        evs.insert(Reply::AllIn, Self::lerp(mix.allin, &PUSH_EV) * depth);
        evs
    }

    fn lerp(f: Percent, schedule: &[(Percent, Utility)]) -> Utility {
        let f = f.clamp(0.0, 100.0);
        for pair in schedule.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if f <= x1 {
                return y0 + (y1 - y0) * (f - x0) / (x1 - x0);
            }
        }
        schedule.last().map(|&(_, y)| y).unwrap_or(0.0)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn class(s: &str) -> Class {
        Class::try_from(s).unwrap()
    }

    #[test]
    fn premium_jams_at_15bb() {
        let table = Table::new();
        let mix = table.distribution(class("AKs"), Position::Button, Situation::Open, 15);
        assert!(mix.allin >= 50.0);
        assert_eq!(mix.fold, 0.0);
    }

    #[test]
    fn trash_folds_at_15bb() {
        let table = Table::new();
        let mix = table.distribution(class("72o"), Position::Button, Situation::Open, 15);
        assert!(mix.fold >= 90.0);
    }

    #[test]
    fn frequencies_sum_to_100() {
        let table = Table::new();
        for class in Class::all() {
            for position in [Position::Button, Position::Small, Position::Big] {
                for situation in [Situation::Open, Situation::VsShove, Situation::VsLimp] {
                    for stack in Table::STACKS {
                        let mix = table.distribution(class, position, situation, stack);
                        assert!(
                            (mix.total() - 100.0).abs() < 1.0,
                            "{} {} {} {} sums to {}",
                            class,
                            position,
                            situation,
                            stack,
                            mix.total()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn stacks_snap_to_the_grid() {
        assert_eq!(Table::bucket(3), 5);
        assert_eq!(Table::bucket(12), 10);
        assert_eq!(Table::bucket(13), 15);
        assert_eq!(Table::bucket(40), 25);
    }

    #[test]
    fn calling_ranges_tighten_with_depth() {
        let table = Table::new();
        let shallow = table.distribution(class("A9s"), Position::Big, Situation::VsShove, 5);
        let deep = table.distribution(class("A9s"), Position::Big, Situation::VsShove, 25);
        assert!(shallow.call > deep.call);
    }

    #[test]
    fn bb_checks_its_option_by_default() {
        let table = Table::new();
        let mix = table.distribution(class("72o"), Position::Big, Situation::VsLimp, 15);
        assert_eq!(mix.call, 100.0);
    }

    #[test]
    fn ev_orders_strong_above_weak() {
        let table = Table::new();
        let strong = table.evs(class("AKs"), Position::Button, Situation::Open, 15, 1.5, 1.0);
        let weak = table.evs(class("72o"), Position::Button, Situation::Open, 15, 1.5, 1.0);
        assert!(strong[&Reply::AllIn] > weak[&Reply::AllIn]);
        assert!(strong[&Reply::AllIn] > 0.0);
        assert!(weak[&Reply::AllIn] < 0.0);
    }

    #[test]
    fn sampling_is_consistent_with_the_mix() {
        let table = Table::new();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            let reply = table.sample(class("72o"), Position::Button, Situation::Open, 15, &mut rng);
            assert_eq!(reply, Reply::Fold);
        }
    }

    #[test]
    fn shared_table_is_a_singleton() {
        let a = Table::shared() as *const Table;
        let b = Table::shared() as *const Table;
        assert_eq!(a, b);
    }
}
