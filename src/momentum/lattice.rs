use super::streaming::{self, Neighborhood};
use super::{Grid, LatticeState, ObstacleMask, Parameters, bc, forcing};
#[cfg(test)]
use super::DistributionField;
use crate::prelude_crate::*;
use rayon::prelude::*;

// ----------------------------------------------------------------------- STRUCT: Lattice

#[derive(Debug, Clone)]
pub struct Lattice {
    state: LatticeState,
    parameters: Parameters,
    av_velocities: Vec<Float>,
    time_step: usize,
    check_stability: bool,
}

impl Lattice {
    /// Allocates both fields at the rest equilibrium of the reference density.
    pub fn new(parameters: Parameters, obstacles: ObstacleMask) -> LbResult<Self> {
        parameters.validate()?;
        let grid = parameters.get_grid();
        if obstacles.get_grid() != &grid {
            return Err(LbError::invalid(
                "obstacles",
                format!(
                    "mask is {}x{} but the grid is {}x{}",
                    obstacles.get_grid().get_width(),
                    obstacles.get_grid().get_height(),
                    grid.get_width(),
                    grid.get_height()
                ),
            ));
        }
        tracing::info!(
            width = grid.get_width(),
            height = grid.get_height(),
            fluid_cells = obstacles.get_number_of_fluid_cells(),
            "creating lattice"
        );
        let state = LatticeState::new(obstacles, parameters.density);
        Ok(Lattice {
            state,
            av_velocities: Vec::with_capacity(parameters.max_iterations),
            parameters,
            time_step: 0,
            check_stability: false,
        })
    }

    pub fn test_default() -> Self {
        let parameters = Parameters::test_default();
        let obstacles = ObstacleMask::only_fluid(parameters.get_grid());
        Lattice::new(parameters, obstacles).expect("test parameters are valid")
    }

    /// Aborts [`Lattice::timestep`] with [`LbError::Unstable`] as soon as the
    /// average velocity stops being finite.
    pub fn with_stability_check(mut self, check_stability: bool) -> Self {
        self.check_stability = check_stability;
        self
    }
}

impl Lattice {
    pub fn get_parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn get_grid(&self) -> &Grid {
        self.state.get_grid()
    }

    pub fn get_state(&self) -> &LatticeState {
        &self.state
    }

    pub fn get_state_mut(&mut self) -> &mut LatticeState {
        &mut self.state
    }

    pub fn get_time_step(&self) -> usize {
        self.time_step
    }

    /// Average velocity of every completed step, in order.
    pub fn get_av_velocities(&self) -> &[Float] {
        &self.av_velocities
    }

    pub fn stop_condition(&self) -> bool {
        self.time_step >= self.parameters.max_iterations
    }
}

impl Lattice {
    pub fn accelerate_flow_step(&mut self) -> usize {
        let y = self.parameters.get_forcing_row();
        let density = self.parameters.density;
        let accel = self.parameters.accel;
        let (current, obstacles) = self.state.split_current_mut();
        forcing::accelerate_flow(current, obstacles, y, density, accel)
    }

    /// Fused streaming, bounce-back and collision from the current field into
    /// the scratch field. Returns the mean speed over the fluid cells.
    ///
    /// Rows are processed in parallel; per-row partial sums are combined in
    /// row order so the result does not depend on the number of threads.
    pub fn stream_collide_step(&mut self) -> Float {
        let omega = self.parameters.omega;
        let (current, scratch, obstacles) = self.state.split_mut();
        let grid = *current.get_grid();
        let partial_sums = scratch
            .get_rows_mut()
            .into_par_iter()
            .enumerate()
            .map(|(y, mut row)| {
                let mut sum = 0.0;
                let mut count = 0;
                obstacles
                    .get_row(y)
                    .iter()
                    .enumerate()
                    .for_each(|(x, node_type)| {
                        let neighborhood = Neighborhood::new(&grid, x, y);
                        let f = streaming::compute_streaming(current, &neighborhood);
                        let f_star = match node_type {
                            Solid => bc::compute_inner_bounce_back(&f),
                            Fluid => {
                                let (f_star, speed) = kernel::compute_bgk_collision(&f, omega);
                                sum += speed;
                                count += 1;
                                f_star
                            }
                        };
                        row.iter_mut()
                            .zip(f_star.iter())
                            .for_each(|(speed, f_i)| speed[x] = *f_i);
                    });
                (sum, count)
            })
            .collect::<Vec<(Float, usize)>>();
        let (total_speed, fluid_cells) = partial_sums
            .iter()
            .fold((0.0, 0), |(sum, count), (row_sum, row_count)| {
                (sum + row_sum, count + row_count)
            });
        total_speed / fluid_cells as Float
    }

    /// Advances the lattice by one time step and records its average velocity.
    pub fn timestep(&mut self) -> LbResult<Float> {
        self.accelerate_flow_step();
        let av_velocity = self.stream_collide_step();
        self.state.swap();
        self.av_velocities.push(av_velocity);
        self.time_step += 1;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let total_density = self.compute_total_density();
            tracing::debug!(
                time_step = self.time_step,
                av_velocity,
                total_density,
                "completed time step"
            );
        }
        if self.check_stability && !av_velocity.is_finite() {
            return Err(LbError::Unstable {
                time_step: self.time_step,
            });
        }
        Ok(av_velocity)
    }

    /// Runs time steps until `max_iterations` is reached.
    pub fn run(&mut self) -> LbResult<()> {
        while !self.stop_condition() {
            self.timestep()?;
        }
        Ok(())
    }
}
