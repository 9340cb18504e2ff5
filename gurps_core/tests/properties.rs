//! Property tests for the dice engine and the damage and injury pipelines

use gurps_core::combat::{resolve_damage_with_rng, resolve_injury, DamageCalculationParams};
use gurps_core::dice::{roll_damage_with_rng, DistributionCache, ParsedDamage};
use gurps_core::HitLocation;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn distribution_sums_to_one(dice in 0u32..8, sides in 1u32..12) {
        let mut cache = DistributionCache::new();
        let sums = cache.dice_sum(dice, sides);
        let total: f64 = sums.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn distribution_support_bounds(dice in 1u32..8, sides in 1u32..12) {
        let mut cache = DistributionCache::new();
        let sums = cache.dice_sum(dice, sides);
        let min = sums.keys().next().copied();
        let max = sums.keys().next_back().copied();
        prop_assert_eq!(min, Some(dice));
        prop_assert_eq!(max, Some(dice * sides));
        prop_assert!(sums.values().all(|p| *p > 0.0));
    }

    #[test]
    fn shifted_distribution_still_sums_to_one(dice in 1u32..6, modifier in -30i32..10) {
        let mut cache = DistributionCache::new();
        let dist = cache.damage_distribution(&ParsedDamage::d6(dice, modifier));
        let total: f64 = dist.iter().map(|p| p.probability).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(dist.windows(2).all(|w| w[0].value < w[1].value));
    }

    #[test]
    fn rolled_dice_never_below_one(dice in 1u32..6, modifier in -50i32..5, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let parsed = ParsedDamage::d6(dice, modifier);
        prop_assert!(roll_damage_with_rng(&parsed, &mut rng) >= 1);
    }

    #[test]
    fn more_armor_never_more_damage(
        damage in 0i32..60,
        armor in 0i32..30,
        type_mult in prop::sample::select(vec![0.5, 1.0, 1.5, 2.0]),
        loc_mult in prop::sample::select(vec![0.25, 0.5, 1.0, 2.0, 4.0]),
    ) {
        let mut rng = StdRng::seed_from_u64(0);
        let params = |armor_value| DamageCalculationParams {
            base_damage: damage.to_string(),
            armor_value,
            damage_type_multiplier: type_mult,
            location_vitality_multiplier: loc_mult,
            ..Default::default()
        };
        let less = resolve_damage_with_rng(&params(armor), &mut rng);
        let more = resolve_damage_with_rng(&params(armor + 1), &mut rng);
        prop_assert!(more.final_damage <= less.final_damage);
    }

    #[test]
    fn six_times_hp_is_always_fatal(max_hp in 1i32..40) {
        let injury = resolve_injury(6 * max_hp, max_hp, max_hp, HitLocation::Torso);
        prop_assert!(injury.is_dead);
        prop_assert!(injury.new_hp <= -5 * max_hp);
    }

    #[test]
    fn shock_penalty_is_bounded(damage in 0i32..100, max_hp in 1i32..60) {
        let injury = resolve_injury(damage, max_hp, max_hp, HitLocation::Arm);
        prop_assert!((0..=4).contains(&injury.shock_penalty));
    }
}
