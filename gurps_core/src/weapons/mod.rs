//! Weapons - catalog data and damage analysis

mod analyzer;
mod catalog;

pub use analyzer::{analyze_weapon, formula_average, rank_by_mean, WeaponAnalysisData, WeaponAnalyzer};
pub use catalog::{
    default_weapons, load_weapon_catalog, parse_weapon_catalog, Weapon, WeaponCatalog, WeaponClass,
    WeaponKind,
};
