use serde::{Deserialize, Serialize};

/// Generation number assigned to fish that were not spawned by a parent.
pub const FIRST_GENERATION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishKind {
    Guppy,
    Swordtail,
}

/// Per-variant constant table. Both fish kinds share one capability set and
/// differ only in these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    pub young_fish_age_in_weeks: u32,
    pub mature_fish_age_in_weeks: u32,
    pub maximum_age_in_weeks: u32,
    pub minimum_water_volume_ml: f64,
    /// Applied to the minimum water volume once the fish is past mature age.
    pub mature_volume_multiplier: f64,
    pub default_genus: &'static str,
    pub default_species: &'static str,
    pub default_health_coefficient: f64,
    pub minimum_health_coefficient: f64,
    pub maximum_health_coefficient: f64,
    /// Minimum reproductive age for females.
    pub spawn_age_in_weeks: u32,
    /// Exclusive upper bound on the size of one spawned batch.
    pub maximum_number_of_fry: u32,
}

static GUPPY_PROFILE: SpeciesProfile = SpeciesProfile {
    young_fish_age_in_weeks: 10,
    mature_fish_age_in_weeks: 30,
    maximum_age_in_weeks: 50,
    minimum_water_volume_ml: 250.0,
    mature_volume_multiplier: 1.5,
    default_genus: "Poecilia",
    default_species: "reticulata",
    default_health_coefficient: 0.5,
    minimum_health_coefficient: 0.0,
    maximum_health_coefficient: 1.0,
    spawn_age_in_weeks: 8,
    maximum_number_of_fry: 100,
};

static SWORDTAIL_PROFILE: SpeciesProfile = SpeciesProfile {
    young_fish_age_in_weeks: 10,
    mature_fish_age_in_weeks: 50,
    maximum_age_in_weeks: 150,
    minimum_water_volume_ml: 1000.0,
    mature_volume_multiplier: 3.0,
    default_genus: "Xiphophorus",
    default_species: "hellerii",
    default_health_coefficient: 0.6,
    minimum_health_coefficient: 0.0,
    maximum_health_coefficient: 1.0,
    spawn_age_in_weeks: 16,
    maximum_number_of_fry: 50,
};

impl FishKind {
    pub fn profile(&self) -> &'static SpeciesProfile {
        match self {
            Self::Guppy => &GUPPY_PROFILE,
            Self::Swordtail => &SWORDTAIL_PROFILE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guppy => "guppy",
            Self::Swordtail => "swordtail",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "guppy" => Some(Self::Guppy),
            "swordtail" => Some(Self::Swordtail),
            _ => None,
        }
    }
}
