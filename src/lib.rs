pub mod simulation;

pub use simulation::config::{NamePolicy, SimulationConfig};
pub use simulation::fish::Fish;
pub use simulation::pool::Pool;
pub use simulation::species::{FishKind, SpeciesProfile};
pub use simulation::{Simulation, ValidationError, WeekSummary};
