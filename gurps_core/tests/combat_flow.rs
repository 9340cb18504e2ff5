//! Integration test: Setup -> Attack roll -> Damage pipeline -> Injury -> Session log
//!
//! Walks the public surface the terminal front end uses, end to end.

use gurps_core::combat::{
    resolve_attack_with_rng, resolve_damage_with_rng, AttackMode, AttackSetup, CombatState,
    DamageCalculationParams,
};
use gurps_core::config::parse_toml;
use gurps_core::prelude::*;
use gurps_core::types::ParseLocationError;
use gurps_core::weapons::WeaponClass;
use gurps_core::{analysis, SimulatorConstants};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn scenario_setup() -> AttackSetup {
    AttackSetup {
        attacker_skill: 14,
        attacker_strength: 12,
        base_damage: "2d+1".to_string(),
        damage_type: DamageType::Crushing,
        armor_value: 5,
        target_max_hp: 1000,
    }
}

#[test]
fn test_skill_14_roll_10_scenario() {
    separator("Skill 14, roll 10, 2d+1 against DR 5");

    let setup = scenario_setup();
    let mode = AttackMode::default();
    let mut rng = StdRng::seed_from_u64(2024);

    let trials = 5000;
    let mut rolled_total = 0i64;
    let mut final_total = 0i64;

    for _ in 0..trials {
        let outcome = resolve_attack_with_rng(&setup, &mode, HitLocation::Torso, 1000, 10, &mut rng);
        assert_eq!(outcome.effective_skill, 14);
        assert!(outcome.hit.hit_success);
        assert!(!outcome.hit.is_critical);

        let damage = outcome.damage.expect("hit carries damage");
        assert_eq!(damage.parsed, Some(ParsedDamage::d6(2, 1)));
        assert_eq!(damage.final_damage, (damage.rolled_damage - 5).max(0));
        rolled_total += damage.rolled_damage as i64;
        final_total += damage.final_damage as i64;
    }

    let rolled_mean = rolled_total as f64 / trials as f64;
    let final_mean = final_total as f64 / trials as f64;
    println!("  Rolled mean: {:.2}", rolled_mean);
    println!("  Final mean:  {:.2}", final_mean);

    // 2d+1 averages 8; max(0, 2d-4) averages 112/36
    assert!((rolled_mean - 8.0).abs() < 0.2);
    assert!((final_mean - 112.0 / 36.0).abs() < 0.2);
}

#[test]
fn test_public_surface() {
    separator("Library surface");

    let parsed = parse_damage("2d+1", 10);
    assert_eq!((parsed.dice, parsed.sides, parsed.modifier), (2, 6, 1));
    assert_eq!(parse_damage("8", 10), ParsedDamage::flat(8));
    assert!((average_damage(&parsed) - 8.0).abs() < 1e-12);

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let roll = gurps_core::dice::roll_damage_with_rng(&parsed, &mut rng);
        assert!((3..=13).contains(&roll));
    }

    let dist = damage_distribution(&ParsedDamage::d6(3, 0));
    let total: f64 = dist.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let hit = resolve_hit(3, 5);
    assert!(hit.hit_success && hit.is_critical && hit.is_auto_max_damage);

    let damage = resolve_damage_with_rng(
        &DamageCalculationParams {
            base_damage: "10".to_string(),
            armor_value: 4,
            damage_type_multiplier: 1.5,
            location_vitality_multiplier: 2.0,
            ..Default::default()
        },
        &mut rng,
    );
    assert_eq!(damage.damage_after_armor, 6);
    assert_eq!(damage.multiplied_damage, 9);
    assert_eq!(damage.final_damage, 18);

    let injury = resolve_injury(damage.final_damage, 10, 10, HitLocation::Neck);
    assert!(injury.is_major_wound);
    assert!(!injury.is_stunned);
    assert!(injury.unconscious_check_required);

    let err: ParseLocationError =
        gurps_core::combat::resolve_injury_by_name(5, 10, 10, "tail").unwrap_err();
    assert_eq!(err.0, "tail");

    let catalog = default_weapons();
    let broadsword = catalog.find("Broadsword").expect("broadsword in catalog");
    let analysis = gurps_core::weapons::analyze_weapon(broadsword, 12);
    println!("  {} at ST 12: mean {:.2}", analysis.name, analysis.stats.mean);
    assert!(analysis.stats.mean > 0.0);
}

#[test]
fn test_session_from_config() {
    separator("Session from TOML constants");

    let constants: SimulatorConstants = parse_toml(
        r#"
        [combat]
        attacker_skill = 16
        base_damage = "3d"
        armor_value = 0
        target_max_hp = 12

        [log]
        capacity = 5
        "#,
    )
    .expect("constants parse");

    let mut state = CombatState::from_constants(&constants);
    assert_eq!(state.current_hp, 12);
    assert_eq!(state.results.capacity(), 5);

    let mut rng = StdRng::seed_from_u64(77);
    let summary = state.run_simulation(12, &AttackMode::default(), &mut rng);
    println!(
        "  {} attacks, {} hits, {} damage, HP {} -> {}",
        summary.attacks, summary.hits, summary.total_damage, summary.hp_before, summary.hp_after
    );

    assert_eq!(summary.attacks, 12);
    assert_eq!(state.results.len(), 5);
    assert_eq!(summary.hp_after, state.current_hp);
    assert_eq!(summary.hp_before - summary.total_damage, summary.hp_after);

    state.full_heal();
    assert_eq!(state.current_hp, 12);
    state.clear_results();
    assert!(state.results.is_empty());
}

#[test]
fn test_equip_ranged_weapon_and_shoot() {
    separator("Equip a bow and shoot past half damage range");

    let catalog = default_weapons();
    let bow = catalog
        .of_class(WeaponClass::Ranged)
        .into_iter()
        .find(|w| w.category == "Bows")
        .expect("a bow in the catalog");

    let mut setup = AttackSetup::default();
    let mut mode = AttackMode::default();
    bow.equip(&mut setup, &mut mode);
    assert!(mode.is_ranged());
    assert_eq!(setup.base_damage, bow.damage);

    if let AttackMode::Ranged {
        range_yards,
        half_damage_range,
        ..
    } = &mut mode
    {
        *range_yards = *half_damage_range + 1;
    }
    assert!(mode.is_beyond_half_damage_range());

    let mut rng = StdRng::seed_from_u64(5);
    let outcome = resolve_attack_with_rng(&setup, &mode, HitLocation::Torso, 10, 4, &mut rng);
    assert!(outcome.is_hit());
    assert!(outcome.damage_halved);
    assert!(outcome.special_injuries.is_empty());
}

#[test]
fn test_dice_sampling_matches_distribution() {
    separator("3d6 against flat 3-18");

    let mut rng = StdRng::seed_from_u64(42);
    let mut progress = Vec::new();
    let cmp = analysis::compare_rolls(10_000, 1000, &mut rng, |p| progress.push(p.done));
    assert_eq!(progress.len(), 10);

    let mut cache = DistributionCache::new();
    for row in cmp.bell.rows(&mut cache) {
        println!(
            "  {:>2}: {:>5.2}% observed, {:>5.2}% exact",
            row.value, row.percentage, row.theoretical
        );
        assert!(row.deviation() < 1.5);
    }
}
