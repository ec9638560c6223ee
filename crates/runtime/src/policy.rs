//! Random initiative draw used in play.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tactics_core::{CombatConfig, CostContribution, InitiativePolicy};

/// Draws initiative uniformly from `[min, max]`, ignoring cost.
///
/// Seeded from [`CombatConfig::initiative_seed`] when set, which makes
/// resolution order reproducible across runs.
#[derive(Debug, Clone)]
pub struct RandomInitiative {
    rng: StdRng,
    min: i32,
    max: i32,
}

impl RandomInitiative {
    pub fn new(rng: StdRng, min: i32, max: i32) -> Self {
        Self {
            rng,
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        let rng = match config.initiative_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, config.initiative_min, config.initiative_max)
    }
}

impl InitiativePolicy for RandomInitiative {
    fn initiative(&mut self, _total_cost: u32, _contribution: CostContribution) -> i32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_bounds() {
        let config = CombatConfig::default().with_initiative_seed(7);
        let mut policy = RandomInitiative::from_config(&config);
        for _ in 0..200 {
            let value = policy.initiative(0, CostContribution::default());
            assert!((config.initiative_min..=config.initiative_max).contains(&value));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = CombatConfig::default().with_initiative_seed(99);
        let mut a = RandomInitiative::from_config(&config);
        let mut b = RandomInitiative::from_config(&config);
        let c = CostContribution::movement(4);
        let first: Vec<_> = (0..10).map(|_| a.initiative(4, c)).collect();
        let second: Vec<_> = (0..10).map(|_| b.initiative(4, c)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_bounds_are_normalised() {
        let mut policy = RandomInitiative::new(StdRng::seed_from_u64(1), 5, 2);
        let value = policy.initiative(0, CostContribution::default());
        assert!((2..=5).contains(&value));
    }
}
