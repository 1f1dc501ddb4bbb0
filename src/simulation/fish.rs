use crate::simulation::config::NamePolicy;
use crate::simulation::species::{FishKind, FIRST_GENERATION};
use crate::simulation::ValidationError;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// One identification sequence shared by every fish kind; never reset mid-run.
static NEXT_FISH_ID: AtomicU64 = AtomicU64::new(1);
static GUPPIES_BORN: AtomicU64 = AtomicU64::new(0);
static SWORDTAILS_BORN: AtomicU64 = AtomicU64::new(0);

pub fn next_fish_id() -> u64 {
    NEXT_FISH_ID.fetch_add(1, Ordering::Relaxed)
}

pub fn set_fish_id_counter(val: u64) {
    NEXT_FISH_ID.store(val, Ordering::Relaxed);
}

/// Number of fish of the given kind ever constructed in this process.
pub fn born_count(kind: FishKind) -> u64 {
    match kind {
        FishKind::Guppy => GUPPIES_BORN.load(Ordering::Relaxed),
        FishKind::Swordtail => SWORDTAILS_BORN.load(Ordering::Relaxed),
    }
}

fn record_birth(kind: FishKind) {
    match kind {
        FishKind::Guppy => GUPPIES_BORN.fetch_add(1, Ordering::Relaxed),
        FishKind::Swordtail => SWORDTAILS_BORN.fetch_add(1, Ordering::Relaxed),
    };
}

/// Trim and normalize a display name: first letter uppercased, rest lowered.
/// Returns None for blank input.
pub(crate) fn format_display_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let mut name: String = first.to_uppercase().collect();
    name.extend(chars.flat_map(|c| c.to_lowercase()));
    Some(name)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    id: u64,
    kind: FishKind,
    genus: String,
    species: String,
    age_in_weeks: u32,
    is_female: bool,
    generation_number: u32,
    is_alive: bool,
    health_coefficient: f64,
}

impl Fish {
    /// Construct a fish with validated and clamped inputs. Blank genus or
    /// species is either substituted with the variant default or rejected,
    /// depending on the policy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: FishKind,
        genus: &str,
        species: &str,
        age_in_weeks: i32,
        is_female: bool,
        generation_number: i32,
        health_coefficient: f64,
        policy: NamePolicy,
    ) -> Result<Self, ValidationError> {
        let profile = kind.profile();

        let genus = match (format_display_name(genus), policy) {
            (Some(g), _) => g,
            (None, NamePolicy::SubstituteDefault) => profile.default_genus.to_string(),
            (None, NamePolicy::Reject) => {
                return Err(ValidationError::InvalidArgument(
                    "genus must not be blank".to_string(),
                ))
            }
        };
        let species = match (format_display_name(species), policy) {
            (Some(s), _) => s,
            (None, NamePolicy::SubstituteDefault) => profile.default_species.to_string(),
            (None, NamePolicy::Reject) => {
                return Err(ValidationError::InvalidArgument(
                    "species must not be blank".to_string(),
                ))
            }
        };

        let age_in_weeks = age_in_weeks.clamp(0, profile.maximum_age_in_weeks as i32) as u32;
        let generation_number = generation_number.max(FIRST_GENERATION as i32) as u32;
        let health_coefficient = health_coefficient.clamp(
            profile.minimum_health_coefficient,
            profile.maximum_health_coefficient,
        );

        record_birth(kind);
        Ok(Self {
            id: next_fish_id(),
            kind,
            genus,
            species,
            age_in_weeks,
            is_female,
            generation_number,
            is_alive: health_coefficient > profile.minimum_health_coefficient,
            health_coefficient,
        })
    }

    /// Zero-argument constructor equivalent: a first-generation female fry
    /// with the variant defaults.
    pub fn with_defaults(kind: FishKind) -> Self {
        let profile = kind.profile();
        record_birth(kind);
        Self {
            id: next_fish_id(),
            kind,
            genus: profile.default_genus.to_string(),
            species: profile.default_species.to_string(),
            age_in_weeks: 0,
            is_female: true,
            generation_number: FIRST_GENERATION,
            is_alive: true,
            health_coefficient: profile.default_health_coefficient,
        }
    }

    fn fry_of(parent: &Fish, is_female: bool, health_coefficient: f64) -> Self {
        record_birth(parent.kind);
        Self {
            id: next_fish_id(),
            kind: parent.kind,
            genus: parent.genus.clone(),
            species: parent.species.clone(),
            age_in_weeks: 0,
            is_female,
            generation_number: parent.generation_number + 1,
            is_alive: true,
            health_coefficient,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> FishKind {
        self.kind
    }

    pub fn genus(&self) -> &str {
        &self.genus
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn age_in_weeks(&self) -> u32 {
        self.age_in_weeks
    }

    pub fn is_female(&self) -> bool {
        self.is_female
    }

    pub fn generation_number(&self) -> u32 {
        self.generation_number
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn health_coefficient(&self) -> f64 {
        self.health_coefficient
    }

    /// Advance age by one week. Aging past the variant maximum is lethal; the
    /// observed age still never exceeds the maximum.
    pub fn increment_age(&mut self) {
        if !self.is_alive {
            return;
        }
        self.age_in_weeks += 1;
        if self.age_in_weeks > self.kind.profile().maximum_age_in_weeks {
            self.is_alive = false;
            self.age_in_weeks = self.kind.profile().maximum_age_in_weeks;
        }
    }

    /// Directly set the age. Ignored when the fish is dead or the value is
    /// out of range; unlike increment_age this never kills.
    pub fn set_age_in_weeks(&mut self, age_in_weeks: i32) {
        if !self.is_alive {
            return;
        }
        let max = self.kind.profile().maximum_age_in_weeks as i32;
        if (0..=max).contains(&age_in_weeks) {
            self.age_in_weeks = age_in_weeks as u32;
        }
    }

    pub fn set_health_coefficient(&mut self, health_coefficient: f64) {
        let profile = self.kind.profile();
        self.health_coefficient = health_coefficient.clamp(
            profile.minimum_health_coefficient,
            profile.maximum_health_coefficient,
        );
        if self.health_coefficient <= profile.minimum_health_coefficient {
            self.is_alive = false;
        }
    }

    pub fn change_health_coefficient(&mut self, delta: f64) {
        self.set_health_coefficient(self.health_coefficient + delta);
    }

    /// Death is monotonic: a dead fish never comes back to life.
    pub fn set_is_alive(&mut self, is_alive: bool) {
        if !is_alive {
            self.is_alive = false;
        }
    }

    /// Water volume required in millilitres. Dead fish need none; young fish
    /// need the variant minimum, ramping linearly with age until mature.
    pub fn volume_needed(&self) -> f64 {
        if !self.is_alive {
            return 0.0;
        }
        let profile = self.kind.profile();
        if self.age_in_weeks < profile.young_fish_age_in_weeks {
            profile.minimum_water_volume_ml
        } else if self.age_in_weeks <= profile.mature_fish_age_in_weeks {
            profile.minimum_water_volume_ml * self.age_in_weeks as f64
                / profile.young_fish_age_in_weeks as f64
        } else {
            profile.minimum_water_volume_ml * profile.mature_volume_multiplier
        }
    }

    /// Produce a batch of fry, or None when this fish cannot reproduce (dead,
    /// male, or under the variant spawn age). The batch may be empty; callers
    /// that need offspring retry.
    pub fn spawn(&self, rng: &mut impl Rng) -> Option<Vec<Fish>> {
        let profile = self.kind.profile();
        if !self.is_alive || !self.is_female || self.age_in_weeks < profile.spawn_age_in_weeks {
            return None;
        }
        let count = rng.gen_range(0..profile.maximum_number_of_fry);
        let health = (1.0 + self.health_coefficient) / 2.0;
        let mut fry = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let is_female = rng.gen_bool(0.5);
            fry.push(Fish::fry_of(self, is_female, health));
        }
        Some(fry)
    }
}
