use crate::Chips;
use crate::Probability;

/// construction-time configuration for the whole engine.
///
/// nothing here is read from the environment. callers build one of these,
/// hand it to [`crate::engine::Engine`], and every solver downstream is
/// dependency-injected from it. tests instantiate their own.
#[derive(Debug, Clone)]
pub struct Config {
    pub sblind: Chips,
    pub bblind: Chips,
    pub cfr: CfrConfig,
    pub mcts: MctsConfig,
    pub equity: EquityConfig,
    pub nash: NashConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sblind: 1,
            bblind: 2,
            cfr: CfrConfig::default(),
            mcts: MctsConfig::default(),
            equity: EquityConfig::default(),
            nash: NashConfig::default(),
        }
    }
}

/// knobs for the abstracted-tree CFR trainer.
#[derive(Debug, Clone)]
pub struct CfrConfig {
    /// regret minimization variant
    pub variant: crate::cfr::trainer::Variant,
    /// training iterations per decision
    pub iterations: usize,
    /// decision levels in the real-time tree
    pub depth: usize,
    /// compute best-response exploitability every k iterations
    pub exploit_every: usize,
    /// stop early once exploitability falls below this
    pub exploit_target: crate::Utility,
}

impl Default for CfrConfig {
    fn default() -> Self {
        Self {
            variant: crate::cfr::trainer::Variant::Plus,
            iterations: 10_000,
            depth: 3,
            exploit_every: 1_000,
            exploit_target: 0.01,
        }
    }
}

/// knobs for the IS-MCTS searcher.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// exploration constant, sqrt(2) for plain UCB1
    pub exploration: f32,
    /// prior-weighted selection instead of UCB1
    pub puct: bool,
    /// wall clock budget per decision
    pub budget_ms: u64,
    /// rollout depth cap
    pub rollout_depth: usize,
    /// epsilon-greedy exploration during rollouts
    pub epsilon: Probability,
    /// progressive widening, max_children = ceil(k * visits^alpha)
    pub widening: Option<(f32, f32)>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f32::consts::SQRT_2,
            puct: false,
            budget_ms: 100,
            rollout_depth: 32,
            epsilon: 0.10,
            widening: Some((2.0, 0.5)),
        }
    }
}

/// knobs for the equity estimator.
#[derive(Debug, Clone)]
pub struct EquityConfig {
    /// enumerate exactly when this many or fewer board cards are unknown
    pub exact_threshold: usize,
    /// enumerate exactly when the opponent range has this many or fewer combos
    pub exact_range: usize,
    /// stop monte carlo when standard error falls below this
    pub tolerance: f32,
    /// monte carlo sample cap
    pub cap: usize,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 2,
            exact_range: 128,
            tolerance: 0.01,
            cap: 20_000,
        }
    }
}

/// preconditions for consulting the push/fold table.
#[derive(Debug, Clone)]
pub struct NashConfig {
    /// effective stacks below this many big blinds are out of range
    pub min_bb: Chips,
    /// effective stacks above this many big blinds are out of range
    pub max_bb: Chips,
}

impl Default for NashConfig {
    fn default() -> Self {
        Self {
            min_bb: 2,
            max_bb: 25,
        }
    }
}
