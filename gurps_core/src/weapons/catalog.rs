//! Weapon catalog - static reference data loaded from TOML

use crate::combat::{AttackMode, AttackSetup};
use crate::config::ConfigError;
use crate::dice::parse_damage_strict;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Strength the catalog's sw/thr formulas are validated at
const VALIDATION_STRENGTH: i32 = 10;

/// Range of a new ranged attack when switching from melee
const DEFAULT_RANGE_YARDS: u32 = 10;

/// Ranged or melee weapon parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeaponKind {
    Ranged {
        accuracy: i32,
        half_damage_range: u32,
        max_range: u32,
    },
    Melee {
        reach: u32,
    },
}

/// Filter for catalog queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponClass {
    Ranged,
    Melee,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// GURPS damage formula ("thr+1", "4d+2", "1d+1 (x9)")
    pub damage: String,
    pub damage_type: DamageType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn class(&self) -> WeaponClass {
        match self.kind {
            WeaponKind::Ranged { .. } => WeaponClass::Ranged,
            WeaponKind::Melee { .. } => WeaponClass::Melee,
        }
    }

    pub fn is_ranged(&self) -> bool {
        self.class() == WeaponClass::Ranged
    }

    /// Equip this weapon: formula and damage type go into the setup, weapon
    /// stats into the attack mode. Situational choices already made on a mode
    /// of the same class are kept.
    pub fn equip(&self, setup: &mut AttackSetup, mode: &mut AttackMode) {
        setup.base_damage = self.damage.clone();
        setup.damage_type = self.damage_type;

        *mode = match (self.kind, *mode) {
            (
                WeaponKind::Melee { reach },
                AttackMode::Melee {
                    maneuver,
                    posture,
                    situational,
                    target_reach,
                    ..
                },
            ) => AttackMode::Melee {
                maneuver,
                posture,
                situational,
                weapon_reach: reach,
                target_reach,
            },
            (WeaponKind::Melee { reach }, AttackMode::Ranged { .. }) => AttackMode::Melee {
                maneuver: Default::default(),
                posture: Default::default(),
                situational: 0,
                weapon_reach: reach,
                target_reach: 1,
            },
            (
                WeaponKind::Ranged {
                    accuracy,
                    half_damage_range,
                    max_range,
                },
                AttackMode::Ranged {
                    range_yards,
                    aiming,
                    size_modifier,
                    target_speed,
                    ..
                },
            ) => AttackMode::Ranged {
                range_yards,
                accuracy,
                aiming,
                half_damage_range,
                max_range,
                size_modifier,
                target_speed,
            },
            (
                WeaponKind::Ranged {
                    accuracy,
                    half_damage_range,
                    max_range,
                },
                AttackMode::Melee { .. },
            ) => AttackMode::Ranged {
                range_yards: DEFAULT_RANGE_YARDS,
                accuracy,
                aiming: false,
                half_damage_range,
                max_range,
                size_modifier: 0,
                target_speed: 0,
            },
        };
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "weapon with an empty name".to_string(),
            ));
        }
        parse_damage_strict(&self.damage, VALIDATION_STRENGTH).map_err(|err| {
            ConfigError::ValidationError(format!("{}: {}", self.name, err))
        })?;
        if let WeaponKind::Ranged {
            half_damage_range,
            max_range,
            ..
        } = self.kind
        {
            if half_damage_range > max_range {
                return Err(ConfigError::ValidationError(format!(
                    "{}: half-damage range {} exceeds max range {}",
                    self.name, half_damage_range, max_range
                )));
            }
        }
        Ok(())
    }
}

/// Ordered list of weapons
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<Weapon>,
}

impl WeaponCatalog {
    pub fn new(weapons: Vec<Weapon>) -> Self {
        WeaponCatalog { weapons }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }

    /// Case-insensitive lookup by name
    pub fn find(&self, name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn of_class(&self, class: WeaponClass) -> Vec<&Weapon> {
        self.weapons.iter().filter(|w| w.class() == class).collect()
    }

    pub fn in_category(&self, category: &str) -> Vec<&Weapon> {
        self.weapons
            .iter()
            .filter(|w| w.category == category)
            .collect()
    }

    /// Distinct categories in catalog order
    pub fn categories(&self, class: Option<WeaponClass>) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for weapon in &self.weapons {
            if class.is_some_and(|c| weapon.class() != c) {
                continue;
            }
            if !seen.contains(&weapon.category.as_str()) {
                seen.push(&weapon.category);
            }
        }
        seen
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.weapons.iter().try_for_each(Weapon::validate)
    }
}

/// Load a weapon catalog from a TOML file
pub fn load_weapon_catalog(path: &Path) -> Result<WeaponCatalog, ConfigError> {
    let catalog: WeaponCatalog = crate::config::load_toml(path)?;
    catalog.validate()?;
    info!(path = %path.display(), weapons = catalog.len(), "loaded weapon catalog");
    Ok(catalog)
}

/// Load a weapon catalog from a TOML string
pub fn parse_weapon_catalog(content: &str) -> Result<WeaponCatalog, ConfigError> {
    let catalog: WeaponCatalog = crate::config::parse_toml(content)?;
    catalog.validate()?;
    Ok(catalog)
}

/// The built-in GURPS Basic Set catalog
pub fn default_weapons() -> WeaponCatalog {
    let toml = include_str!("../../config/weapons.toml");
    parse_weapon_catalog(toml).unwrap_or_else(|err| {
        warn!(%err, "built-in weapon catalog failed to load");
        WeaponCatalog::new(vec![Weapon {
            name: "Punch".to_string(),
            damage: "thr-1".to_string(),
            damage_type: DamageType::Crushing,
            category: "Unarmed".to_string(),
            description: String::new(),
            kind: WeaponKind::Melee { reach: 1 },
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{MeleeManeuver, Posture};

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_weapons();
        assert_eq!(catalog.len(), 37);
        assert_eq!(catalog.of_class(WeaponClass::Ranged).len(), 17);
        assert_eq!(catalog.of_class(WeaponClass::Melee).len(), 20);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/weapons.toml");
        let catalog = load_weapon_catalog(&path).unwrap();
        assert_eq!(catalog, default_weapons());

        let missing = load_weapon_catalog(Path::new("/nonexistent/weapons.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_categories_in_order() {
        let catalog = default_weapons();
        assert_eq!(
            catalog.categories(Some(WeaponClass::Ranged)),
            vec!["Bows", "Crossbows", "Rifles", "Shotguns", "Pistols", "Thrown"]
        );
        let melee = catalog.categories(Some(WeaponClass::Melee));
        assert_eq!(melee.first(), Some(&"Swords"));
        assert_eq!(melee.last(), Some(&"Unarmed"));
        assert_eq!(catalog.categories(None).len(), 13);
        assert!(catalog
            .in_category("Swords")
            .iter()
            .all(|w| !w.is_ranged()));
        assert!(catalog.in_category("Polearms-ish").is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = default_weapons();
        let rapier = catalog.find("rapier").unwrap();
        assert_eq!(rapier.damage_type, DamageType::Impaling);
        assert_eq!(rapier.kind, WeaponKind::Melee { reach: 1 });
        assert!(catalog.find("lightsaber").is_none());
    }

    #[test]
    fn test_parse_catalog() {
        let toml = r#"
[[weapons]]
name = "Sling"
damage = "sw"
damage_type = "crushing"
category = "Thrown"
kind = { type = "ranged", accuracy = 0, half_damage_range = 50, max_range = 100 }
"#;
        let catalog = parse_weapon_catalog(toml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.weapons[0].is_ranged());
        assert!(catalog.weapons[0].description.is_empty());
    }

    #[test]
    fn test_rejects_bad_formula() {
        let toml = r#"
[[weapons]]
name = "Broken"
damage = "lots"
damage_type = "crushing"
category = "Clubs"
kind = { type = "melee", reach = 1 }
"#;
        let err = parse_weapon_catalog(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let toml = r#"
[[weapons]]
name = "Odd Bow"
damage = "thr"
damage_type = "piercing"
category = "Bows"
kind = { type = "ranged", accuracy = 1, half_damage_range = 300, max_range = 100 }
"#;
        assert!(parse_weapon_catalog(toml).is_err());
    }

    #[test]
    fn test_equip_melee_keeps_maneuver() {
        let catalog = default_weapons();
        let mut setup = AttackSetup::default();
        let mut mode = AttackMode::Melee {
            maneuver: MeleeManeuver::Deceptive,
            posture: Posture::Kneeling,
            situational: 1,
            weapon_reach: 1,
            target_reach: 1,
        };
        catalog.find("Pike").unwrap().equip(&mut setup, &mut mode);
        assert_eq!(setup.base_damage, "thr+3");
        assert_eq!(setup.damage_type, DamageType::Impaling);
        assert_eq!(
            mode,
            AttackMode::Melee {
                maneuver: MeleeManeuver::Deceptive,
                posture: Posture::Kneeling,
                situational: 1,
                weapon_reach: 3,
                target_reach: 1,
            }
        );
    }

    #[test]
    fn test_equip_ranged_switches_mode() {
        let catalog = default_weapons();
        let mut setup = AttackSetup::default();
        let mut mode = AttackMode::default();
        catalog.find("Longbow").unwrap().equip(&mut setup, &mut mode);
        assert!(mode.is_ranged());
        if let AttackMode::Ranged {
            accuracy,
            max_range,
            range_yards,
            ..
        } = mode
        {
            assert_eq!(accuracy, 2);
            assert_eq!(max_range, 200);
            assert_eq!(range_yards, 10);
        }
    }
}
