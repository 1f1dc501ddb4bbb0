use poolsim::{Simulation, SimulationConfig};
use std::fs::File;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("failed to load config from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("failed to build simulation: {e}");
            return ExitCode::FAILURE;
        }
    };

    let weeks = sim.config.weeks_to_run;
    let last = sim.run();
    println!(
        "after {} week(s): population {}, {} born last week, {} aged out, {} starved, {} crowded out",
        last.week, last.population, last.fry_born, last.age_deaths,
        last.starvation_deaths, last.crowded_out
    );
    if last.population == 0 && last.week < weeks as u64 {
        println!("the pool went extinct early");
    }
    for pool in &sim.pools {
        println!(
            "pool '{}': population {}, avg age {:.1} wk, median age {:.1} wk, avg health {:.2}, {:.0}% female",
            pool.name(),
            pool.population(),
            pool.average_age_in_weeks(),
            pool.median_age(),
            pool.average_health_coefficient(),
            pool.female_percentage() * 100.0
        );
    }
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}
