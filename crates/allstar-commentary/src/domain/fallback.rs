//! Local commentary used whenever the external source cannot answer.

use allstar_core::rng::DeterministicRng;
use tracing::warn;

use super::commentary::{CommentaryResult, DEFAULT_ENERGY};

const GYM: &[&str] = &[
    "Commentary: Pure heart strength on display! You're crushing it, baby! | 95",
    "Commentary: Those gains look good, but you look better! Keep it up! | 92",
    "Commentary: You're the heavy lifter of my world! Legendary form! | 98",
];

const FOOTBALL: &[&str] = &[
    "Commentary: Top bins! That was strictly world-class, my All-Star! | 96",
    "Commentary: You've got the magic touch! Scored another heart today! | 94",
    "Commentary: Clinical finish! You're the only MVP I need on the team! | 97",
];

const SLEEP: &[&str] = &[
    "Commentary: Recharging that heart energy! Rest like the champion you are! | 90",
    "Commentary: Perfect recovery sync! Dreaming of our future wins! | 93",
    "Commentary: Sleep well, baby. You're always a winner in my eyes! | 91",
];

const BURRITO: &[&str] = &[
    "Commentary: Fresh ingredients for a fresh start! That's a 5-star build! | 99",
    "Commentary: Bold flavors just like us! Refuel complete, champion! | 95",
    "Commentary: A masterpiece wrap for a masterpiece human! | 96",
];

const PROPOSAL: &[&str] = &[
    "Commentary: Counting every reason I love you… 💗 | 100",
    "Commentary: The championship moment is here! You're my #1 draft pick! | 100",
    "Commentary: Heart in hand, ready for the win of a lifetime! | 100",
];

const GENERIC: &[&str] = &["Commentary: You're doing amazing, baby! | 95"];

/// The fallback lines for `stage`, or the generic pool for unknown stages.
#[must_use]
pub fn pool_for(stage: &str) -> &'static [&'static str] {
    match stage {
        "Gym" => GYM,
        "Football" => FOOTBALL,
        "Sleep" => SLEEP,
        "Burrito" => BURRITO,
        "Proposal" => PROPOSAL,
        _ => GENERIC,
    }
}

/// Picks a random fallback line for `stage`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fallback_for(stage: &str, rng: &mut dyn DeterministicRng) -> CommentaryResult {
    let pool = pool_for(stage);
    let last = pool.len().saturating_sub(1) as u32;
    let index = rng.next_u32_range(0, last) as usize;
    let line = pool.get(index).copied().unwrap_or(GENERIC[0]);

    CommentaryResult::parse(line).unwrap_or_else(|err| {
        warn!(error = %err, stage, "fallback line failed to parse");
        CommentaryResult {
            message: "You're doing amazing, baby!".to_owned(),
            energy_level: DEFAULT_ENERGY,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use allstar_core::rng::StdRandom;
    use allstar_test_support::SequenceRng;

    #[test]
    fn test_every_pool_line_parses() {
        for stage in ["Gym", "Football", "Sleep", "Burrito", "Proposal", "Unknown"] {
            for line in pool_for(stage) {
                let parsed = CommentaryResult::parse(line).unwrap();
                assert!((1..=100).contains(&parsed.energy_level));
            }
        }
    }

    #[test]
    fn test_gym_fallback_always_comes_from_gym_pool() {
        let gym_messages: Vec<String> = GYM
            .iter()
            .map(|line| CommentaryResult::parse(line).unwrap().message)
            .collect();

        for seed in 0..64 {
            let mut rng = StdRandom::seeded(seed);
            let result = fallback_for("Gym", &mut rng);

            assert!(gym_messages.contains(&result.message));
            assert!((1..=100).contains(&result.energy_level));
        }
    }

    #[test]
    fn test_rng_selects_the_line() {
        let mut rng = SequenceRng::new(vec![2]);

        let result = fallback_for("Football", &mut rng);

        assert_eq!(
            result.message,
            "Clinical finish! You're the only MVP I need on the team!"
        );
        assert_eq!(result.energy_level, 97);
    }

    #[test]
    fn test_unknown_stage_uses_generic_pool() {
        let mut rng = SequenceRng::new(vec![0]);

        let result = fallback_for("Success", &mut rng);

        assert_eq!(result.message, "You're doing amazing, baby!");
        assert_eq!(result.energy_level, 95);
    }

    #[test]
    fn test_out_of_range_pick_degrades_to_generic_line() {
        let mut rng = SequenceRng::new(vec![99]);

        let result = fallback_for("Sleep", &mut rng);

        assert_eq!(result.message, "You're doing amazing, baby!");
    }
}
