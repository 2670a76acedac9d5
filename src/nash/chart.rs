use super::Position;
use super::Situation;
use super::action::NashAction;
use crate::Chips;

/// one chart page: a position, a situation, a stack depth in big
/// blinds, and an ordered list of (range, mix) rows. rows are checked
/// top to bottom and the first range containing the hand wins, so
/// narrow premium rows sit above the wide body of the range.
pub struct Sheet {
    pub position: Position,
    pub situation: Situation,
    pub stack: Chips,
    pub rows: &'static [(&'static str, NashAction)],
}

const fn jam(p: f32) -> NashAction {
    NashAction::jam(p)
}
const fn flat(p: f32) -> NashAction {
    NashAction::flat(p)
}
const fn mix(f: f32, c: f32, m: f32, a: f32) -> NashAction {
    NashAction::mix(f, c, m, a)
}

/// the complete frozen chart set.
///
/// short stacks are pure jam-or-fold, the classic equilibrium shape;
/// from 15 big blinds up the premiums start splitting between a
/// min-raise and the jam, and by 25 the min-raise carries the range.
/// calling ranges versus a shove tighten as stacks deepen. hands
/// missing from every row fall to the table default.
pub const SHEETS: &[Sheet] = &[
    // button opening the pot
    Sheet {
        position: Position::Button,
        situation: Situation::Open,
        stack: 5,
        rows: &[(
            "22+ A2s+ A2o+ K2s+ K7o+ Q4s+ Q9o+ J6s+ J9o+ T6s+ T9o 96s+ 98o 85s+ 75s+ 64s+ 54s",
            jam(100.0),
        )],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::Open,
        stack: 10,
        rows: &[(
            "22+ A2s+ A4o+ K5s+ KTo+ Q8s+ QJo J8s+ JTo T8s+ T9o 97s+ 86s+ 76s 65s",
            jam(100.0),
        )],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::Open,
        stack: 15,
        rows: &[
            ("AA-QQ AKs AKo", mix(0.0, 0.0, 40.0, 60.0)),
            (
                "22+ A2s+ A8o+ K9s+ KJo+ QTs+ QJo JTs T9s 98s 87s",
                jam(100.0),
            ),
        ],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::Open,
        stack: 20,
        rows: &[
            ("TT+ AQs+ AQo+", mix(0.0, 0.0, 70.0, 30.0)),
            (
                "22-99 A2s+ A9o+ KTs+ KQo QJs JTs T9s 98s 87s",
                mix(20.0, 0.0, 70.0, 10.0),
            ),
        ],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::Open,
        stack: 25,
        rows: &[
            ("TT+ AQs+ AQo+", mix(0.0, 0.0, 85.0, 15.0)),
            (
                "22-99 A2s+ ATo+ KTs+ KQo QTs+ JTs T9s 98s",
                mix(25.0, 0.0, 75.0, 0.0),
            ),
        ],
    },
    // small blind opening after a button fold
    Sheet {
        position: Position::Small,
        situation: Situation::Open,
        stack: 5,
        rows: &[(
            "22+ A2s+ A2o+ K2s+ K2o+ Q2s+ Q5o+ J2s+ J7o+ T4s+ T7o+ 95s+ 97o+ 85s+ 86o+ 74s+ 76o 63s+ 53s+ 43s",
            jam(100.0),
        )],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::Open,
        stack: 10,
        rows: &[(
            "22+ A2s+ A2o+ K2s+ K8o+ Q5s+ Q9o+ J7s+ J9o+ T7s+ T9o 96s+ 98o 85s+ 75s+ 64s+ 54s",
            jam(100.0),
        )],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::Open,
        stack: 15,
        rows: &[
            ("99+ AJs+ AQo+", mix(0.0, 0.0, 30.0, 70.0)),
            (
                "22+ A2s+ A4o+ K6s+ KTo+ Q8s+ QJo J8s+ JTo T8s+ 98s 87s 76s 65s",
                jam(100.0),
            ),
        ],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::Open,
        stack: 20,
        rows: &[
            ("99+ AJs+ AQo+", mix(0.0, 0.0, 60.0, 40.0)),
            (
                "22-88 A2s+ A7o+ K8s+ KJo+ Q9s+ QJo J9s+ JTo T8s+ 98s 87s 76s",
                mix(10.0, 20.0, 60.0, 10.0),
            ),
        ],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::Open,
        stack: 25,
        rows: &[
            ("99+ AJs+ AQo+", mix(0.0, 0.0, 80.0, 20.0)),
            (
                "22-88 A2s+ A9o+ K9s+ KJo+ QTs+ JTs T9s 98s 87s",
                mix(15.0, 25.0, 60.0, 0.0),
            ),
        ],
    },
    // calling off a shove
    Sheet {
        position: Position::Button,
        situation: Situation::VsShove,
        stack: 5,
        rows: &[("22+ A2s+ A7o+ K9s+ KJo+ QTs+ JTs", flat(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsShove,
        stack: 10,
        rows: &[("55+ A9s+ ATo+ KQs", flat(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsShove,
        stack: 15,
        rows: &[("88+ AJs+ AQo+", flat(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsShove,
        stack: 20,
        rows: &[("99+ AQs+ AKo", flat(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsShove,
        stack: 25,
        rows: &[("TT+ AQs+ AKo", flat(100.0))],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::VsShove,
        stack: 5,
        rows: &[("22+ A2s+ A8o+ KTs+ KQo QJs", flat(100.0))],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::VsShove,
        stack: 10,
        rows: &[("66+ ATs+ AJo+ KQs", flat(100.0))],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::VsShove,
        stack: 15,
        rows: &[("99+ AQs+ AQo+", flat(100.0))],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::VsShove,
        stack: 20,
        rows: &[("TT+ AQs+ AKo", flat(100.0))],
    },
    Sheet {
        position: Position::Small,
        situation: Situation::VsShove,
        stack: 25,
        rows: &[("JJ+ AKs AKo", flat(100.0))],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsShove,
        stack: 5,
        rows: &[(
            "22+ A2s+ A2o+ K5s+ K9o+ Q8s+ QTo+ J9s+ JTo T9s",
            flat(100.0),
        )],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsShove,
        stack: 10,
        rows: &[("44+ A7s+ A9o+ KTs+ KQo QJs", flat(100.0))],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsShove,
        stack: 15,
        rows: &[("77+ ATs+ AJo+ KQs", flat(100.0))],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsShove,
        stack: 20,
        rows: &[("99+ AJs+ AQo+", flat(100.0))],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsShove,
        stack: 25,
        rows: &[("TT+ AQs+ AKo", flat(100.0))],
    },
    // big blind checking its option or punishing limpers;
    // hands missing from these rows check for free
    Sheet {
        position: Position::Big,
        situation: Situation::VsLimp,
        stack: 5,
        rows: &[("22+ A8s+ ATo+ KTs+ KQo", jam(100.0))],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsLimp,
        stack: 10,
        rows: &[
            ("66+ ATs+ AJo+ KQs", jam(100.0)),
            ("22-55 A2s+ KTs+ QTs+ JTs", mix(0.0, 60.0, 40.0, 0.0)),
        ],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsLimp,
        stack: 15,
        rows: &[
            ("77+ AJs+ AQo+", mix(0.0, 0.0, 60.0, 40.0)),
            (
                "22-66 A2s+ ATo+ KTs+ KQo QJs JTs",
                mix(0.0, 50.0, 50.0, 0.0),
            ),
        ],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsLimp,
        stack: 20,
        rows: &[
            ("88+ AJs+ AQo+", mix(0.0, 0.0, 80.0, 20.0)),
            ("22-77 A5s+ KTs+ QJs JTs T9s", mix(0.0, 60.0, 40.0, 0.0)),
        ],
    },
    Sheet {
        position: Position::Big,
        situation: Situation::VsLimp,
        stack: 25,
        rows: &[("99+ AQs+ AQo+", mix(0.0, 10.0, 90.0, 0.0))],
    },
    // button isolating limpers
    Sheet {
        position: Position::Button,
        situation: Situation::VsLimp,
        stack: 5,
        rows: &[("22+ A2s+ A8o+ KTs+ KQo", jam(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsLimp,
        stack: 10,
        rows: &[("66+ A9s+ ATo+ KJs+ KQo", jam(100.0))],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsLimp,
        stack: 15,
        rows: &[
            ("88+ AJs+ AQo+", mix(0.0, 0.0, 40.0, 60.0)),
            ("22-77 ATs+ KTs+ QJs JTs T9s", mix(30.0, 40.0, 30.0, 0.0)),
        ],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsLimp,
        stack: 20,
        rows: &[
            ("99+ AJs+ AQo+", mix(0.0, 0.0, 75.0, 25.0)),
            ("22-88 ATs+ ATo+ KTs+ KQo QJs JTs", mix(20.0, 30.0, 50.0, 0.0)),
        ],
    },
    Sheet {
        position: Position::Button,
        situation: Situation::VsLimp,
        stack: 25,
        rows: &[
            ("TT+ AQs+ AQo+", mix(0.0, 0.0, 90.0, 10.0)),
            ("22-99 ATs+ AJo+ KTs+ KQo QJs JTs", mix(25.0, 25.0, 50.0, 0.0)),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nash::range;

    #[test]
    fn every_row_parses() {
        for sheet in SHEETS {
            for (spec, _) in sheet.rows {
                let classes = range::parse(spec).unwrap();
                assert!(!classes.is_empty(), "empty row in {:?}", spec);
            }
        }
    }

    #[test]
    fn every_mix_sums_to_100() {
        for sheet in SHEETS {
            for (spec, mix) in sheet.rows {
                assert!(
                    (mix.total() - 100.0).abs() < 0.5,
                    "row {} sums to {}",
                    spec,
                    mix.total()
                );
            }
        }
    }

    #[test]
    fn stacks_cover_the_grid() {
        for position in [Position::Button, Position::Small] {
            for stack in [5, 10, 15, 20, 25] {
                assert!(
                    SHEETS
                        .iter()
                        .any(|s| s.position == position
                            && s.situation == Situation::Open
                            && s.stack == stack),
                    "missing {} open at {}bb",
                    position,
                    stack
                );
            }
        }
    }
}
