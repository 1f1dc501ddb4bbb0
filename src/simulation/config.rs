use serde::{Deserialize, Serialize};

/// What to do when a fish is constructed with a blank genus or species.
/// Deployments disagree on this, so it is an explicit option rather than a
/// hard-coded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamePolicy {
    /// Silently substitute the variant's default genus/species.
    SubstituteDefault,
    /// Fail construction with an InvalidArgument error.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub name_policy: NamePolicy,

    // Pool environment
    pub pool_name: String,
    pub pool_volume_litres: f64,
    pub pool_temperature_celsius: f64,
    pub pool_ph: f64,
    pub pool_nutrient_coefficient: f64,

    // Seed population
    pub initial_guppies: u32,
    pub initial_swordtails: u32,
    /// Genus applied to every seed fish. Blank resolves per name_policy:
    /// the variant default, or a construction failure under Reject.
    pub seed_genus: String,
    /// Species applied to every seed fish; blank resolves like seed_genus.
    pub seed_species: String,
    /// Seed fish get a uniformly random age in [0, this].
    pub initial_age_spread_weeks: u32,
    /// Seed fish get a uniformly random health in [this, 1.0].
    pub initial_minimum_health: f64,

    // Driver
    pub weeks_to_run: u32,
    /// None seeds the driver RNG from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::SubstituteDefault,

            pool_name: "Skookumchuck".to_string(),
            pool_volume_litres: 1000.0,
            pool_temperature_celsius: 42.0,
            pool_ph: 7.9,
            pool_nutrient_coefficient: 0.9,

            initial_guppies: 100,
            initial_swordtails: 20,
            seed_genus: String::new(),
            seed_species: String::new(),
            initial_age_spread_weeks: 40,
            initial_minimum_health: 0.5,

            weeks_to_run: 40,
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sane_values() {
        let c = SimulationConfig::default();

        assert!(!c.pool_name.trim().is_empty());
        assert!(c.pool_volume_litres > 0.0);
        assert!(c.pool_temperature_celsius >= 0.0 && c.pool_temperature_celsius <= 100.0);
        assert!(c.pool_ph >= 0.0 && c.pool_ph <= 14.0);
        assert!(c.pool_nutrient_coefficient >= 0.0 && c.pool_nutrient_coefficient <= 1.0);

        assert!(c.initial_guppies + c.initial_swordtails > 0);
        assert!(c.initial_minimum_health > 0.0 && c.initial_minimum_health <= 1.0);
        assert!(c.weeks_to_run > 0);
    }

    #[test]
    fn config_serialization_roundtrip() {
        let c = SimulationConfig::default();
        let json = serde_json::to_string(&c).expect("serialize");
        let c2: SimulationConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(c.name_policy, c2.name_policy);
        assert_eq!(c.pool_name, c2.pool_name);
        assert_eq!(c.seed_genus, c2.seed_genus);
        assert_eq!(c.seed_species, c2.seed_species);
        assert_eq!(c.pool_volume_litres, c2.pool_volume_litres);
        assert_eq!(c.initial_guppies, c2.initial_guppies);
        assert_eq!(c.rng_seed, c2.rng_seed);
    }

    #[test]
    fn name_policy_deserializes_from_variant_name() {
        let p: NamePolicy = serde_json::from_str("\"Reject\"").expect("deserialize");
        assert_eq!(p, NamePolicy::Reject);
    }
}
