pub mod config;
pub mod fish;
pub mod pool;
pub mod species;

use config::SimulationConfig;
use fish::Fish;
use pool::Pool;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use species::FishKind;

/// The single hard-failure kind. Everything else in the engine clamps
/// silently; only required identity fields (pool name, and genus/species
/// under NamePolicy::Reject) refuse bad input.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// What happened across all pools during one simulated week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: u64,
    pub age_deaths: usize,
    pub starvation_deaths: usize,
    pub fry_born: usize,
    pub crowded_out: usize,
    pub population: usize,
}

/// Owns the pools and the RNG and advances them one week at a time. Pools
/// remain directly drivable in any order; this is the canonical sequence.
pub struct Simulation {
    pub week: u64,
    pub config: SimulationConfig,
    pub pools: Vec<Pool>,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut pool = Pool::new(
            &config.pool_name,
            config.pool_volume_litres,
            config.pool_temperature_celsius,
            config.pool_ph,
            config.pool_nutrient_coefficient,
        )?;

        for _ in 0..config.initial_guppies {
            pool.add_fish(Some(Self::seed_fish(FishKind::Guppy, &config, &mut rng)?));
        }
        for _ in 0..config.initial_swordtails {
            pool.add_fish(Some(Self::seed_fish(
                FishKind::Swordtail,
                &config,
                &mut rng,
            )?));
        }
        log::info!(
            "seeded pool '{}' with {} fish",
            pool.name(),
            pool.fish_count()
        );

        Ok(Self {
            week: 0,
            config,
            pools: vec![pool],
            rng,
        })
    }

    fn seed_fish(
        kind: FishKind,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Result<Fish, ValidationError> {
        let profile = kind.profile();
        let age = rng.gen_range(0..=config.initial_age_spread_weeks.min(profile.maximum_age_in_weeks));
        let health = rng.gen_range(config.initial_minimum_health..=profile.maximum_health_coefficient);
        Fish::new(
            kind,
            &config.seed_genus,
            &config.seed_species,
            age as i32,
            rng.gen_bool(0.5),
            species::FIRST_GENERATION as i32,
            health,
            config.name_policy,
        )
    }

    pub fn add_pool(&mut self, pool: Pool) {
        self.pools.push(pool);
    }

    /// Advance every pool by one week: age everyone, starve, spawn, then cull
    /// for crowding, removing the dead between phases.
    pub fn step(&mut self) -> WeekSummary {
        self.week += 1;
        let mut summary = WeekSummary {
            week: self.week,
            ..WeekSummary::default()
        };

        for pool in &mut self.pools {
            summary.age_deaths += pool.increment_ages();
            pool.remove_dead_fish();
            summary.starvation_deaths += pool.apply_nutrient_coefficient(&mut self.rng);
            pool.remove_dead_fish();
            summary.fry_born += pool.spawn(&mut self.rng);
            summary.crowded_out += pool.adjust_for_crowding();
            pool.remove_dead_fish();
            summary.population += pool.population();
        }

        log::debug!(
            "week {}: {} aged out, {} starved, {} fry, {} crowded out, population {}",
            summary.week,
            summary.age_deaths,
            summary.starvation_deaths,
            summary.fry_born,
            summary.crowded_out,
            summary.population
        );
        summary
    }

    /// Run the configured number of weeks, returning the final summary.
    pub fn run(&mut self) -> WeekSummary {
        let mut last = WeekSummary::default();
        for _ in 0..self.config.weeks_to_run {
            last = self.step();
            if last.population == 0 {
                log::info!("population extinct at week {}", last.week);
                break;
            }
        }
        last
    }

    pub fn population(&self) -> usize {
        self.pools.iter().map(|p| p.population()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            initial_guppies: 10,
            initial_swordtails: 2,
            initial_age_spread_weeks: 20,
            pool_volume_litres: 100.0,
            pool_nutrient_coefficient: 0.95,
            weeks_to_run: 5,
            rng_seed: Some(42),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn new_simulation_seeds_configured_population() {
        let sim = Simulation::new(small_config()).expect("valid config");
        assert_eq!(sim.week, 0);
        assert_eq!(sim.pools.len(), 1);
        assert_eq!(sim.pools[0].fish_count(), 12);
        assert_eq!(sim.pools[0].name(), "Skookumchuck");
    }

    #[test]
    fn blank_seed_names_resolve_to_variant_defaults() {
        let sim = Simulation::new(small_config()).expect("valid config");
        let members = sim.pools[0].fish();
        assert!(members
            .iter()
            .filter(|f| f.kind() == species::FishKind::Guppy)
            .all(|f| f.genus() == "Poecilia" && f.species() == "reticulata"));
        assert!(members
            .iter()
            .filter(|f| f.kind() == species::FishKind::Swordtail)
            .all(|f| f.genus() == "Xiphophorus" && f.species() == "hellerii"));
    }

    #[test]
    fn reject_policy_config_refuses_blank_seed_names() {
        let config = SimulationConfig {
            name_policy: config::NamePolicy::Reject,
            ..small_config()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ValidationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn reject_policy_config_accepts_explicit_seed_names() {
        let config = SimulationConfig {
            name_policy: config::NamePolicy::Reject,
            seed_genus: "poecilia".to_string(),
            seed_species: "wingei".to_string(),
            initial_swordtails: 0,
            ..small_config()
        };
        let sim = Simulation::new(config).expect("names supplied");
        assert!(sim.pools[0]
            .fish()
            .iter()
            .all(|f| f.genus() == "Poecilia" && f.species() == "Wingei"));
    }

    #[test]
    fn blank_pool_name_fails_construction() {
        let config = SimulationConfig {
            pool_name: "   ".to_string(),
            ..small_config()
        };
        assert!(matches!(
            Simulation::new(config),
            Err(ValidationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn step_advances_week_and_removes_dead() {
        let mut sim = Simulation::new(small_config()).expect("valid config");
        let summary = sim.step();
        assert_eq!(summary.week, 1);
        assert_eq!(sim.week, 1);
        // The canonical sequence ends with remove_dead_fish, so no corpses
        // survive the step.
        for pool in &sim.pools {
            assert_eq!(pool.fish_count(), pool.population());
        }
        assert_eq!(summary.population, sim.population());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = Simulation::new(small_config()).expect("valid config");
        let mut b = Simulation::new(small_config()).expect("valid config");
        for _ in 0..5 {
            let sa = a.step();
            let sb = b.step();
            assert_eq!(sa.age_deaths, sb.age_deaths);
            assert_eq!(sa.starvation_deaths, sb.starvation_deaths);
            assert_eq!(sa.fry_born, sb.fry_born);
            assert_eq!(sa.crowded_out, sb.crowded_out);
            assert_eq!(sa.population, sb.population);
        }
    }

    #[test]
    fn run_stops_at_extinction() {
        let config = SimulationConfig {
            // Nothing survives a zero nutrient coefficient.
            pool_nutrient_coefficient: 0.0,
            weeks_to_run: 100,
            ..small_config()
        };
        let mut sim = Simulation::new(config).expect("valid config");
        let last = sim.run();
        assert_eq!(last.population, 0);
        assert!(last.week < 100);
    }

    #[test]
    fn week_summary_serializes() {
        let s = WeekSummary {
            week: 3,
            age_deaths: 1,
            starvation_deaths: 2,
            fry_born: 4,
            crowded_out: 0,
            population: 12,
        };
        let json = serde_json::to_string(&s).expect("serialize");
        let s2: WeekSummary = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(s2.week, 3);
        assert_eq!(s2.fry_born, 4);
    }
}
