//! Application state

use gurps_core::analysis::{
    analyze_variability, compare_rolls, HistogramRow, SamplingComparison, SamplingProgress,
    VariabilityStats, VariableMechanic,
};
use gurps_core::combat::{AttackMode, CombatState, MeleeManeuver, RunSummary, RANGE_TABLE};
use gurps_core::config::load_constants;
use gurps_core::mechanics::{ArmorModel, SoakPool, COMPARISON_ATTACK_BONUS, COMPARISON_BASE_AC};
use gurps_core::{
    default_weapons, HitLocation, SimulatorConstants, Weapon, WeaponAnalysisData, WeaponAnalyzer,
    WeaponCatalog,
};
use rand::SeedableRng;
use std::path::Path;
use tracing::{info, warn};

/// Monte-Carlo sample counts offered on the Dice tab
pub const SAMPLE_SIZES: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// Attacks per `m` press
pub const ATTACK_BATCH: usize = 10;

pub const MIN_STRENGTH: i32 = 1;
pub const MAX_STRENGTH: i32 = 30;

/// Armor axis of the comparison charts
pub const MAX_CHART_ARMOR: u32 = 50;

/// Step for the Armor tab's incoming damage
pub const ARMOR_DAMAGE_STEP: f64 = 5.0;

/// Trials behind each spread figure on the Armor tab
pub const SPREAD_TRIALS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Combat,
    Weapons,
    Dice,
    Armor,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Combat, Tab::Weapons, Tab::Dice, Tab::Armor, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Combat => "Combat",
            Tab::Weapons => "Weapons",
            Tab::Dice => "Dice",
            Tab::Armor => "Armor",
            Tab::Help => "Help",
        }
    }
}

/// Finished 3d6 vs flat run with its exact comparison rows
pub struct SamplingRun {
    pub comparison: SamplingComparison,
    pub bell_rows: Vec<HistogramRow>,
    pub flat_rows: Vec<HistogramRow>,
}

pub struct App {
    pub current_tab: Tab,
    pub constants: SimulatorConstants,
    pub combat: CombatState,
    pub mode: AttackMode,
    pub equipped: Option<String>,
    pub catalog: WeaponCatalog,
    pub selected_weapon: usize,
    pub analyzer: WeaponAnalyzer,
    pub analysis: Vec<WeaponAnalysisData>,
    pub strength: i32,
    pub sample_size: usize,
    pub sampling: Option<SamplingRun>,
    pub armor_damage: f64,
    pub selected_model: usize,
    pub spread: Vec<(&'static str, Option<VariabilityStats>)>,
    pub log_scroll: usize,
    pub status: String,
    pub rng: rand::rngs::StdRng,
}

impl App {
    pub fn new() -> Self {
        Self::with_constants(Self::load_constants())
    }

    pub fn with_constants(constants: SimulatorConstants) -> Self {
        let combat = CombatState::from_constants(&constants);
        let strength = combat.setup.attacker_strength;
        let sample_size = SAMPLE_SIZES
            .iter()
            .position(|&n| n == constants.sampling.default_samples)
            .unwrap_or(1);

        let mut app = App {
            current_tab: Tab::Combat,
            combat,
            mode: AttackMode::default(),
            equipped: None,
            catalog: default_weapons(),
            selected_weapon: 0,
            analyzer: WeaponAnalyzer::new(),
            analysis: Vec::new(),
            strength,
            sample_size,
            sampling: None,
            armor_damage: 30.0,
            selected_model: 0,
            spread: Vec::new(),
            log_scroll: 0,
            status: "Ready. Press 'a' to attack.".to_string(),
            rng: rand::rngs::StdRng::seed_from_u64(42),
            constants,
        };
        app.refresh_analysis();
        app.refresh_spread();
        app
    }

    fn load_constants() -> SimulatorConstants {
        let paths = ["gurps.toml", "config/gurps.toml", "gurps_tui/gurps.toml"];

        for path in paths {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match load_constants(path) {
                Ok(constants) => return constants,
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring settings file"),
            }
        }

        info!("no settings file found, using defaults");
        SimulatorConstants::default()
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Combat => self.log_scroll = self.log_scroll.saturating_sub(1),
            Tab::Weapons => self.selected_weapon = self.selected_weapon.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Combat => {
                if self.log_scroll + 1 < self.combat.results.len() {
                    self.log_scroll += 1;
                }
            }
            Tab::Weapons => {
                if self.selected_weapon + 1 < self.catalog.len() {
                    self.selected_weapon += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        match self.current_tab {
            Tab::Combat => self.cycle_location(false),
            Tab::Dice => self.sample_size = self.sample_size.saturating_sub(1),
            Tab::Armor => {
                let count = ArmorModel::all().len();
                self.selected_model = (self.selected_model + count - 1) % count;
            }
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.current_tab {
            Tab::Combat => self.cycle_location(true),
            Tab::Dice => self.sample_size = (self.sample_size + 1).min(SAMPLE_SIZES.len() - 1),
            Tab::Armor => self.selected_model = (self.selected_model + 1) % ArmorModel::all().len(),
            _ => {}
        }
    }

    pub fn on_plus(&mut self) {
        match self.current_tab {
            Tab::Armor => {
                self.armor_damage += ARMOR_DAMAGE_STEP;
                self.refresh_spread();
            }
            _ => self.set_strength(self.strength + 1),
        }
    }

    pub fn on_minus(&mut self) {
        match self.current_tab {
            Tab::Armor => {
                self.armor_damage = (self.armor_damage - ARMOR_DAMAGE_STEP).max(ARMOR_DAMAGE_STEP);
                self.refresh_spread();
            }
            _ => self.set_strength(self.strength - 1),
        }
    }

    pub fn on_enter(&mut self) {
        if self.current_tab == Tab::Weapons {
            self.equip_selected();
        }
    }

    /// Attacker ST drives both the combat setup and the weapon table
    pub fn set_strength(&mut self, strength: i32) {
        let strength = strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
        if strength == self.strength {
            return;
        }
        self.strength = strength;
        self.combat.setup.attacker_strength = strength;
        self.refresh_analysis();
        self.status = format!("ST {}", strength);
    }

    fn refresh_analysis(&mut self) {
        self.analysis = self.analyzer.analyze(self.catalog.iter(), self.strength);
    }

    pub fn selected_weapon(&self) -> Option<&Weapon> {
        self.catalog.iter().nth(self.selected_weapon)
    }

    pub fn equip_selected(&mut self) {
        let Some(weapon) = self.catalog.iter().nth(self.selected_weapon) else {
            return;
        };
        weapon.equip(&mut self.combat.setup, &mut self.mode);
        self.status = format!("Equipped {} ({})", weapon.name, weapon.damage);
        info!(weapon = %weapon.name, "equipped");
        self.equipped = Some(weapon.name.clone());
    }

    fn cycle_location(&mut self, forward: bool) {
        let all = HitLocation::all();
        let idx = all
            .iter()
            .position(|l| *l == self.combat.target_location)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        self.combat.target_location = all[next];
        self.status = format!("Target: {}", all[next].name());
    }

    pub fn toggle_random_location(&mut self) {
        self.combat.random_location = !self.combat.random_location;
        self.status = if self.combat.random_location {
            "Random hit locations".to_string()
        } else {
            format!("Aimed at {}", self.combat.target_location.name())
        };
    }

    /// Next maneuver for melee, next range band for ranged
    pub fn cycle_option(&mut self) {
        match &mut self.mode {
            AttackMode::Melee { maneuver, .. } => {
                let all = MeleeManeuver::all();
                let idx = all.iter().position(|m| m == maneuver).unwrap_or(0);
                *maneuver = all[(idx + 1) % all.len()];
                self.status = maneuver.name().to_string();
            }
            AttackMode::Ranged { range_yards, .. } => {
                let next = RANGE_TABLE
                    .iter()
                    .map(|(yards, _)| *yards)
                    .find(|yards| *yards > *range_yards)
                    .unwrap_or(RANGE_TABLE[0].0);
                *range_yards = next;
                self.status = format!("Range {} yd", next);
            }
        }
    }

    pub fn attack(&mut self) {
        self.run_attacks(1);
    }

    pub fn attack_many(&mut self) {
        self.run_attacks(ATTACK_BATCH);
    }

    fn run_attacks(&mut self, count: usize) -> RunSummary {
        let summary = self.combat.run_simulation(count, &self.mode, &mut self.rng);
        self.log_scroll = 0;
        self.status = if count == 1 {
            self.combat
                .results
                .latest()
                .map(|o| o.summary())
                .unwrap_or_default()
        } else {
            format!(
                "{} attacks: {} hits, {} criticals, {} damage",
                summary.attacks, summary.hits, summary.criticals, summary.total_damage
            )
        };
        if self.combat.is_target_dead() {
            self.status.push_str(" - target is dead, 'r' to heal");
        }
        summary
    }

    pub fn full_heal(&mut self) {
        self.combat.full_heal();
        self.status = format!("Target healed to {} HP", self.combat.current_hp);
    }

    pub fn clear_log(&mut self) {
        self.combat.clear_results();
        self.log_scroll = 0;
        self.status = "Log cleared".to_string();
    }

    pub fn samples(&self) -> usize {
        SAMPLE_SIZES[self.sample_size.min(SAMPLE_SIZES.len() - 1)]
    }

    /// Sample 3d6 against flat; `on_progress` runs between chunks
    pub fn run_sampling(&mut self, on_progress: impl FnMut(SamplingProgress)) {
        let samples = self.samples();
        let comparison = compare_rolls(
            samples,
            self.constants.sampling.chunk_size,
            &mut self.rng,
            on_progress,
        );

        let cache = self.analyzer.cache_mut();
        let bell_rows = comparison.bell.rows(cache);
        let flat_rows = comparison.flat.rows(cache);

        self.status = format!("Sampled {} rolls of each", samples);
        self.sampling = Some(SamplingRun {
            comparison,
            bell_rows,
            flat_rows,
        });
    }

    pub fn selected_model(&self) -> ArmorModel {
        let all = ArmorModel::all();
        all[self.selected_model % all.len()]
    }

    /// Spread of a few random mechanics at the current incoming damage
    fn refresh_spread(&mut self) {
        let damage = self.armor_damage;
        let mechanics = [
            (
                "Soak pool (body 3, armor 4)",
                VariableMechanic::Soak(SoakPool::new(damage.round() as u32, 3, 4, 0)),
            ),
            (
                "d20 vs AC 15",
                VariableMechanic::ArmorClass {
                    damage,
                    ac: COMPARISON_BASE_AC + 5.0,
                    attack_bonus: COMPARISON_ATTACK_BONUS,
                },
            ),
            ("Flat DR 10", VariableMechanic::Fixed { damage: (damage - 10.0).max(0.0) }),
        ];
        self.spread = mechanics
            .iter()
            .map(|(label, mechanic)| (*label, analyze_variability(mechanic, SPREAD_TRIALS, &mut self.rng)))
            .collect();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
