// ------------------------------------------------------------------------------- MODULES

mod bc;
mod field;
mod forcing;
mod io;
mod lattice;
#[cfg(test)]
mod legacy;
pub mod post;
mod streaming;

// ------------------------------------------------------------------------------- IMPORTS

use crate::prelude_crate::*;
use colored::*;
pub use field::{DistributionField, Grid, LatticeState, ObstacleMask};
pub use lattice::Lattice;
pub use post::PostResult;
use std::time::Instant;

// -------------------------------------------------------------------- STRUCT: Parameters

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub width: usize,
    pub height: usize,
    pub max_iterations: usize,
    pub reynolds_dim: usize,
    pub density: Float,
    pub accel: Float,
    pub omega: Float,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            width: 128,
            height: 128,
            max_iterations: 40000,
            reynolds_dim: 128,
            density: 0.1,
            accel: 0.005,
            omega: 1.7,
        }
    }
}

impl Parameters {
    pub fn test_default() -> Self {
        Parameters {
            width: 4,
            height: 4,
            max_iterations: 1,
            reynolds_dim: 4,
            density: 0.1,
            accel: 0.1,
            omega: 1.0,
        }
    }

    /// # Examples
    /// ```
    /// # use bgkflow::prelude::*;
    /// assert!(Parameters::default().validate().is_ok());
    ///
    /// let flat = Parameters { height: 1, ..Default::default() };
    /// assert!(flat.validate().is_err());
    ///
    /// let unstable = Parameters { omega: 2.5, ..Default::default() };
    /// assert!(unstable.validate().is_err());
    /// ```
    pub fn validate(&self) -> LbResult<()> {
        if self.width == 0 {
            return Err(LbError::invalid("nx", "the grid needs at least one column"));
        }
        if self.height < 2 {
            return Err(LbError::invalid(
                "ny",
                format!("the accelerated row is ny - 2, got ny = {}", self.height),
            ));
        }
        if !self.omega.is_finite() || self.omega <= 0.0 || self.omega > 2.0 {
            return Err(LbError::invalid(
                "omega",
                format!("must lie in (0, 2], got {}", self.omega),
            ));
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics on a zero extent; run [`Parameters::validate`] first.
    pub fn get_grid(&self) -> Grid {
        Grid::new(self.width, self.height)
    }

    /// Kinematic viscosity `(2 / omega - 1) / 6` in lattice units.
    pub fn get_viscosity(&self) -> Float {
        CS_2 * (1.0 / self.omega - 0.5)
    }

    /// Index of the row that is accelerated every step, second from the top.
    pub fn get_forcing_row(&self) -> usize {
        self.height - 2
    }
}

// ----------------------------------------------------------------------------- FUNCTIONS

pub(crate) fn run(config: &Config, lattice: &mut Lattice) -> LbResult<()> {
    let total = lattice.get_parameters().max_iterations;
    let show_progress = config.verbosity == cli::Verbosity::Normal && total > 0;
    let interval = (total / PROGRESS_BAR_UPDATES).max(1);
    while !lattice.stop_condition() {
        lattice.timestep()?;
        let time_step = lattice.get_time_step();
        if show_progress && (time_step % interval == 0 || time_step == total) {
            crate::io::progress_bar(time_step - 1, total);
        }
    }
    Ok(())
}

/// Entry point of the `d2q9-bgk` binary: reads the command line and the input
/// files, runs the simulation and writes both output files.
pub fn load() -> LbResult<()> {
    let total_tic = Instant::now();
    let config = cli::parse_matches(&cli::get_args());
    cli::init_logging(&config);
    cli::init_global_pool(config.number_of_threads, config.core_affinity)?;
    if config.verbosity != cli::Verbosity::Quiet {
        println!(
            "{} {} with {} rayon threads\n",
            "Running".cyan().bold(),
            config.parameters_path.display().to_string().yellow().bold(),
            rayon::current_num_threads()
        );
    }

    let init_tic = Instant::now();
    let parameters = crate::io::read_parameters_file(&config.parameters_path)?;
    parameters.validate()?;
    let grid = parameters.get_grid();
    let obstacles = crate::io::read_obstacles_file(&config.obstacles_path, &grid)?;
    let mut lattice =
        Lattice::new(parameters, obstacles)?.with_stability_check(config.check_stability);
    let init_time = init_tic.elapsed();

    let compute_tic = Instant::now();
    run(&config, &mut lattice)?;
    let compute_time = compute_tic.elapsed();

    let collate_tic = Instant::now();
    let reynolds_number = lattice.compute_reynolds_number();
    let collate_time = collate_tic.elapsed();
    let total_time = total_tic.elapsed();

    if config.verbosity != cli::Verbosity::Quiet {
        println!("{}", "==done==".green().bold());
        println!(
            "Reynolds number:\t\t{}",
            crate::io::format_scientific(reynolds_number)
        );
        println!("Elapsed Init time:\t\t\t{:.6} (s)", init_time.as_secs_f64());
        println!("Elapsed Compute time:\t\t\t{:.6} (s)", compute_time.as_secs_f64());
        println!("Elapsed Collate time:\t\t\t{:.6} (s)", collate_time.as_secs_f64());
        println!("Elapsed Total time:\t\t\t{:.6} (s)", total_time.as_secs_f64());
    }
    tracing::debug!(results = ?lattice.get_post_results(), "final diagnostics");

    lattice.write_final_state(&config.final_state_path)?;
    lattice.write_av_velocities(&config.av_vels_path)?;
    Ok(())
}
