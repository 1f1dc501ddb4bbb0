use crate::simulation::fish::{format_display_name, Fish};
use crate::simulation::ValidationError;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_POOL_NAME: &str = "Unnamed";
pub const DEFAULT_POOL_TEMP_CELSIUS: f64 = 40.0;
pub const MINIMUM_POOL_TEMP_CELSIUS: f64 = 0.0;
pub const MAXIMUM_POOL_TEMP_CELSIUS: f64 = 100.0;
pub const NEUTRAL_PH: f64 = 7.0;
pub const MINIMUM_PH: f64 = 0.0;
pub const MAXIMUM_PH: f64 = 14.0;
pub const DEFAULT_NUTRIENT_COEFFICIENT: f64 = 0.5;
pub const MINIMUM_NUTRIENT_COEFFICIENT: f64 = 0.0;
pub const MAXIMUM_NUTRIENT_COEFFICIENT: f64 = 1.0;
pub const KILO: f64 = 1000.0;

// Pool ids come from their own sequence, separate from the fish sequence.
static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);
static POOLS_CREATED: AtomicU64 = AtomicU64::new(0);

pub fn next_pool_id() -> u64 {
    NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed)
}

pub fn set_pool_id_counter(val: u64) {
    NEXT_POOL_ID.store(val, Ordering::Relaxed);
}

pub fn pools_created() -> u64 {
    POOLS_CREATED.load(Ordering::Relaxed)
}

/// A body of water owning a population of fish. Environmental parameters are
/// bounded; out-of-range construction inputs fall back to named defaults,
/// out-of-range mutator inputs are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    id: u64,
    name: String,
    volume_litres: f64,
    temperature_celsius: f64,
    ph: f64,
    nutrient_coefficient: f64,
    fish: Vec<Fish>,
}

impl Pool {
    pub fn new(
        name: &str,
        volume_litres: f64,
        temperature_celsius: f64,
        ph: f64,
        nutrient_coefficient: f64,
    ) -> Result<Self, ValidationError> {
        let name = format_display_name(name).ok_or_else(|| {
            ValidationError::InvalidArgument("pool name must not be blank".to_string())
        })?;

        let volume_litres = volume_litres.max(0.0);
        let temperature_celsius = if (MINIMUM_POOL_TEMP_CELSIUS..=MAXIMUM_POOL_TEMP_CELSIUS)
            .contains(&temperature_celsius)
        {
            temperature_celsius
        } else {
            DEFAULT_POOL_TEMP_CELSIUS
        };
        let ph = if (MINIMUM_PH..=MAXIMUM_PH).contains(&ph) {
            ph
        } else {
            NEUTRAL_PH
        };
        let nutrient_coefficient = if (MINIMUM_NUTRIENT_COEFFICIENT
            ..=MAXIMUM_NUTRIENT_COEFFICIENT)
            .contains(&nutrient_coefficient)
        {
            nutrient_coefficient
        } else {
            DEFAULT_NUTRIENT_COEFFICIENT
        };

        POOLS_CREATED.fetch_add(1, Ordering::Relaxed);
        Ok(Self {
            id: next_pool_id(),
            name,
            volume_litres,
            temperature_celsius,
            ph,
            nutrient_coefficient,
            fish: Vec::new(),
        })
    }

    pub fn with_defaults() -> Self {
        POOLS_CREATED.fetch_add(1, Ordering::Relaxed);
        Self {
            id: next_pool_id(),
            name: DEFAULT_POOL_NAME.to_string(),
            volume_litres: 0.0,
            temperature_celsius: DEFAULT_POOL_TEMP_CELSIUS,
            ph: NEUTRAL_PH,
            nutrient_coefficient: DEFAULT_NUTRIENT_COEFFICIENT,
            fish: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume_litres(&self) -> f64 {
        self.volume_litres
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn nutrient_coefficient(&self) -> f64 {
        self.nutrient_coefficient
    }

    /// All members, dead or alive.
    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    /// Raw member count, including dead fish not yet removed.
    pub fn fish_count(&self) -> usize {
        self.fish.len()
    }

    pub fn set_volume_litres(&mut self, volume_litres: f64) {
        if volume_litres >= 0.0 {
            self.volume_litres = volume_litres;
        }
    }

    pub fn set_temperature_celsius(&mut self, temperature_celsius: f64) {
        if (MINIMUM_POOL_TEMP_CELSIUS..=MAXIMUM_POOL_TEMP_CELSIUS).contains(&temperature_celsius) {
            self.temperature_celsius = temperature_celsius;
        }
    }

    pub fn set_ph(&mut self, ph: f64) {
        if (MINIMUM_PH..=MAXIMUM_PH).contains(&ph) {
            self.ph = ph;
        }
    }

    pub fn set_nutrient_coefficient(&mut self, nutrient_coefficient: f64) {
        if (MINIMUM_NUTRIENT_COEFFICIENT..=MAXIMUM_NUTRIENT_COEFFICIENT)
            .contains(&nutrient_coefficient)
        {
            self.nutrient_coefficient = nutrient_coefficient;
        }
    }

    /// Clamped delta: the applied value never falls outside the legal range,
    /// so the setter's own range check cannot reject it.
    pub fn change_nutrient_coefficient(&mut self, delta: f64) {
        let next = (self.nutrient_coefficient + delta)
            .clamp(MINIMUM_NUTRIENT_COEFFICIENT, MAXIMUM_NUTRIENT_COEFFICIENT);
        self.set_nutrient_coefficient(next);
    }

    pub fn change_temperature(&mut self, delta: f64) {
        let next = (self.temperature_celsius + delta)
            .clamp(MINIMUM_POOL_TEMP_CELSIUS, MAXIMUM_POOL_TEMP_CELSIUS);
        self.set_temperature_celsius(next);
    }

    /// Append a fish to the pool. None stands for an absent fish and is
    /// refused without effect.
    pub fn add_fish(&mut self, fish: Option<Fish>) -> bool {
        match fish {
            Some(f) => {
                self.fish.push(f);
                true
            }
            None => false,
        }
    }

    /// Count of living members.
    pub fn population(&self) -> usize {
        self.fish.iter().filter(|f| f.is_alive()).count()
    }

    /// One uniform draw per member; a draw above the nutrient coefficient is
    /// lethal. Dead members are touched too but cannot die again. Returns the
    /// number of fish newly killed.
    pub fn apply_nutrient_coefficient(&mut self, rng: &mut impl Rng) -> usize {
        let mut killed = 0;
        for f in &mut self.fish {
            let draw: f64 = rng.gen();
            if draw > self.nutrient_coefficient && f.is_alive() {
                f.set_is_alive(false);
                killed += 1;
            }
        }
        killed
    }

    /// Drop every dead member from the collection; returns how many were
    /// removed.
    pub fn remove_dead_fish(&mut self) -> usize {
        let before = self.fish.len();
        self.fish.retain(|f| f.is_alive());
        before - self.fish.len()
    }

    /// Total water volume required by living members, in litres.
    pub fn fish_volume_requirement_litres(&self) -> f64 {
        self.fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.volume_needed())
            .sum::<f64>()
            / KILO
    }

    pub fn average_age_in_weeks(&self) -> f64 {
        let population = self.population();
        if population == 0 {
            return 0.0;
        }
        let total: u64 = self
            .fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.age_in_weeks() as u64)
            .sum();
        total as f64 / population as f64
    }

    pub fn average_health_coefficient(&self) -> f64 {
        let population = self.population();
        if population == 0 {
            return 0.0;
        }
        let total: f64 = self
            .fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.health_coefficient())
            .sum();
        total / population as f64
    }

    /// Fraction of living members that are female; 0.0 for an empty pool.
    pub fn female_percentage(&self) -> f64 {
        let population = self.population();
        if population == 0 {
            return 0.0;
        }
        let females = self
            .fish
            .iter()
            .filter(|f| f.is_alive() && f.is_female())
            .count();
        females as f64 / population as f64
    }

    /// Median age of living members: middle element for an odd population,
    /// mean of the two middle elements for an even one.
    pub fn median_age(&self) -> f64 {
        let mut ages: Vec<u32> = self
            .fish
            .iter()
            .filter(|f| f.is_alive())
            .map(|f| f.age_in_weeks())
            .collect();
        if ages.is_empty() {
            return 0.0;
        }
        ages.sort_unstable();
        let mid = ages.len() / 2;
        if ages.len() % 2 == 1 {
            ages[mid] as f64
        } else {
            (ages[mid - 1] as f64 + ages[mid] as f64) / 2.0
        }
    }

    /// Invoke every member's spawn and absorb all fry into the pool. Returns
    /// the total number of fry born.
    pub fn spawn(&mut self, rng: &mut impl Rng) -> usize {
        let mut all_fry: Vec<Fish> = Vec::new();
        for f in &self.fish {
            if let Some(mut fry) = f.spawn(rng) {
                all_fry.append(&mut fry);
            }
        }
        let born = all_fry.len();
        self.fish.extend(all_fry);
        born
    }

    /// Age every member by one week. Dead members no-op internally. Returns
    /// the count of fish that died of old age during this call.
    pub fn increment_ages(&mut self) -> usize {
        let mut deaths = 0;
        for f in &mut self.fish {
            let was_alive = f.is_alive();
            f.increment_age();
            if was_alive && !f.is_alive() {
                deaths += 1;
            }
        }
        deaths
    }

    /// While the living population needs more water than the pool holds, kill
    /// the weakest member (lowest health, first encountered on ties) and
    /// deduct its requirement. Returns the number of fish culled.
    pub fn adjust_for_crowding(&mut self) -> usize {
        let mut killed = 0;
        let mut required = self.fish_volume_requirement_litres();
        while required > self.volume_litres {
            let mut weakest: Option<usize> = None;
            let mut weakest_health = f64::INFINITY;
            for (i, f) in self.fish.iter().enumerate() {
                if f.is_alive() && f.health_coefficient() < weakest_health {
                    weakest_health = f.health_coefficient();
                    weakest = Some(i);
                }
            }
            let Some(idx) = weakest else {
                break;
            };
            required -= self.fish[idx].volume_needed() / KILO;
            self.fish[idx].set_is_alive(false);
            killed += 1;
        }
        killed
    }
}
