//! Advisory tip selection.
//!
//! Emergency guidance is a fixed, ordered procedure list and must be
//! reproducible. General heart-health tips are sampled without replacement
//! from a larger pool; the RNG is injected so tests can seed it while
//! production seeds from OS entropy.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::assessment::RiskStatus;

/// Ordered emergency procedure. Never sampled or shuffled.
const EMERGENCY_PROCEDURE: [&str; 4] = [
    "Sit down and try to remain calm.",
    "Loosen tight clothing to breathe easier.",
    "Call your local emergency number.",
    "Do not try to drive yourself to the hospital.",
];

/// General heart-health tip pool for non-emergency results.
const HEALTH_TIPS: [&str; 6] = [
    "Walking 30 mins a day strengthens the heart muscle.",
    "Reduce salt intake to lower high blood pressure.",
    "Eat more fiber (oats, beans) to lower bad cholesterol.",
    "Avoid smoking to keep your arteries flexible.",
    "Manage stress through deep breathing or meditation.",
    "Omega-3 in fish is like 'oil' for your heart's health.",
];

/// Selects advisory text for a computed status.
pub struct AdviceGenerator {
    rng: ChaCha20Rng,
    tips_per_result: usize,
}

impl AdviceGenerator {
    /// Production constructor; the RNG is seeded from OS entropy.
    #[must_use]
    pub fn new(tips_per_result: usize) -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
            tips_per_result,
        }
    }

    /// Deterministic constructor for reproducible runs.
    #[must_use]
    pub fn with_seed(seed: u64, tips_per_result: usize) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            tips_per_result,
        }
    }

    /// Select advice for the given status.
    ///
    /// Emergency results always get the full procedure list, in order.
    pub fn advise_for(&mut self, status: RiskStatus, is_emergency: bool) -> Vec<String> {
        if is_emergency || status == RiskStatus::Emergency {
            return EMERGENCY_PROCEDURE.iter().map(ToString::to_string).collect();
        }

        let count = self.tips_per_result.min(HEALTH_TIPS.len());
        HEALTH_TIPS
            .choose_multiple(&mut self.rng, count)
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_advice_is_fixed_and_ordered() {
        let mut a = AdviceGenerator::with_seed(1, 3);
        let mut b = AdviceGenerator::with_seed(999, 3);

        let first = a.advise_for(RiskStatus::Emergency, true);
        let second = b.advise_for(RiskStatus::Emergency, true);

        assert_eq!(first, second);
        assert_eq!(first[0], "Sit down and try to remain calm.");
        assert_eq!(first.len(), EMERGENCY_PROCEDURE.len());
    }

    #[test]
    fn test_general_tips_sampled_without_replacement() {
        let mut gen = AdviceGenerator::with_seed(42, 3);
        let tips = gen.advise_for(RiskStatus::Healthy, false);

        assert_eq!(tips.len(), 3);
        let mut dedup = tips.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 3, "tips must not repeat");
        for tip in &tips {
            assert!(HEALTH_TIPS.contains(&tip.as_str()));
        }
    }

    #[test]
    fn test_same_seed_same_tips() {
        let mut a = AdviceGenerator::with_seed(7, 3);
        let mut b = AdviceGenerator::with_seed(7, 3);

        assert_eq!(
            a.advise_for(RiskStatus::Moderate, false),
            b.advise_for(RiskStatus::Moderate, false)
        );
    }

    #[test]
    fn test_tip_count_bounded_by_pool() {
        let mut gen = AdviceGenerator::with_seed(3, 50);
        let tips = gen.advise_for(RiskStatus::High, false);
        assert_eq!(tips.len(), HEALTH_TIPS.len());
    }
}
