use super::profile::DecisionProfile;
use crate::gameplay::action::Action;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// a table agent driven by the engine's own frequencies.
///
/// the agent asks the synthesizer for a profile and samples from it,
/// which is what playing a mixed strategy means. a seeded rng keeps
/// scripted games reproducible.
#[derive(Debug)]
pub struct Agent {
    rng: SmallRng,
}

impl Agent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    pub fn act(&mut self, profile: &DecisionProfile) -> Action {
        profile.sample(&mut self.rng)
    }
}
