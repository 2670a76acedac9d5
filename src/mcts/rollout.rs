use crate::Probability;
use crate::Utility;
use crate::abstraction::abstractor::Abstractor;
use crate::gameplay::action::Action;
use crate::gameplay::game::Game;
use rand::Rng;

/// the playout policy past the search frontier.
///
/// strong buckets lean into aggression, weak buckets check and fold,
/// and an epsilon of pure noise keeps every line reachable. in a
/// determinized world everyone's cards are concrete, so each seat
/// rolls its own bucket.
#[derive(Debug, Clone, Copy)]
pub struct Rollout {
    pub epsilon: Probability,
    pub depth: usize,
}

impl Rollout {
    /// play the world out and return the hero's profit in chips.
    /// if the depth cap lands first, the frontier is priced by the
    /// hero bucket's equity share of the pot.
    pub fn simulate(&self, world: &mut Game, hero: usize, rng: &mut impl Rng) -> Utility {
        for _ in 0..self.depth {
            if world.over() {
                break;
            }
            let id = world.action_on().to_string();
            let action = self.choose(world, rng);
            world
                .execute(&id, action)
                .expect("policy picks legal actions");
        }
        let seat = &world.seats()[hero];
        match world.result() {
            Some(result) => result[hero].pnl() as Utility,
            None => {
                let hole = seat.cards().expect("cards dealt");
                let equity = Abstractor.abstraction(hole, world.board()).equity();
                equity * world.pot() as Utility - seat.spent() as Utility
            }
        }
    }

    fn choose(&self, world: &Game, rng: &mut impl Rng) -> Action {
        let i = world.actor_index().expect("hand in progress");
        let id = world.seats()[i].id().to_string();
        let legal = world.legal(&id).expect("actor is seated");
        debug_assert!(!legal.is_empty());
        if rng.random_range(0.0..1.0) < self.epsilon {
            return legal[rng.random_range(0..legal.len())];
        }
        let hole = world.seats()[i].cards().expect("cards dealt");
        let aggression = Abstractor.abstraction(hole, world.board()).aggression();
        let aggressive = legal.iter().find(|a| a.is_aggressive()).copied();
        let passive = legal
            .iter()
            .find(|a| matches!(a, Action::Check | Action::Call(_)))
            .copied();
        if rng.random_range(0.0..1.0) < aggression {
            if let Some(action) = aggressive {
                return action;
            }
        }
        // weak hands take the free card, pay when the price is small,
        // and let go otherwise
        match passive {
            Some(Action::Check) => Action::Check,
            Some(Action::Call(price)) => {
                let pot = world.pot() as Probability;
                let odds = price as Probability / (pot + price as Probability);
                if aggression + 0.3 > odds {
                    Action::Call(price)
                } else {
                    Action::Fold
                }
            }
            _ => legal[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn rollouts_terminate_and_conserve_chips() {
        let mut rng = SmallRng::seed_from_u64(11);
        let rollout = Rollout {
            epsilon: 0.1,
            depth: 64,
        };
        for seed in 0..16 {
            let mut world = Game::table(
                &["hero", "a", "b"],
                100,
                (1, 2),
                &mut SmallRng::seed_from_u64(seed),
            )
            .unwrap();
            world.determinize(0, &mut rng);
            let pnl = rollout.simulate(&mut world, 0, &mut rng);
            assert!(pnl.is_finite());
            assert!(pnl >= -100.0 && pnl <= 200.0);
        }
    }
}
