//! Staged reference solver used to cross-check the fused kernel.
//!
//! Every stage is its own sweep over an array-of-structs copy of the grid:
//! acceleration, push streaming, rebound at obstacles and collision.

use super::{Lattice, Parameters};
use crate::prelude_crate::*;
use crate::velocity_set::C;

struct StagedLattice {
    parameters: Parameters,
    cells: Vec<[Float; Q]>,
    tmp_cells: Vec<[Float; Q]>,
    obstacles: Vec<bool>,
    av_velocities: Vec<Float>,
}

impl StagedLattice {
    fn from_lattice(lattice: &Lattice) -> Self {
        let state = lattice.get_state();
        let grid = lattice.get_grid();
        let cells = grid
            .coordinates()
            .map(|(x, y)| state.get_current().get_f(x, y))
            .collect::<Vec<[Float; Q]>>();
        let obstacles = grid
            .coordinates()
            .map(|(x, y)| state.get_obstacles().is_solid(x, y))
            .collect();
        StagedLattice {
            parameters: lattice.get_parameters().clone(),
            tmp_cells: cells.clone(),
            cells,
            obstacles,
            av_velocities: Vec::new(),
        }
    }

    fn accelerate_flow(&mut self) {
        let Parameters {
            width,
            height,
            density,
            accel,
            ..
        } = self.parameters;
        let w_1 = density * accel / 9.0;
        let w_2 = density * accel / 36.0;
        let y = height - 2;
        for x in 0..width {
            let index = x + y * width;
            let f = &mut self.cells[index];
            if !self.obstacles[index] && f[3] - w_1 > 0.0 && f[6] - w_2 > 0.0 && f[7] - w_2 > 0.0
            {
                f[1] += w_1;
                f[5] += w_2;
                f[8] += w_2;
                f[3] -= w_1;
                f[6] -= w_2;
                f[7] -= w_2;
            }
        }
    }

    fn propagate(&mut self) {
        let Parameters { width, height, .. } = self.parameters;
        for y in 0..height {
            for x in 0..width {
                for (i, [c_x, c_y]) in C.iter().enumerate() {
                    let new_x = (x as i32 + c_x).rem_euclid(width as i32) as usize;
                    let new_y = (y as i32 + c_y).rem_euclid(height as i32) as usize;
                    self.tmp_cells[new_x + new_y * width][i] = self.cells[x + y * width][i];
                }
            }
        }
    }

    fn rebound(&mut self) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if self.obstacles[index] {
                let tmp = self.tmp_cells[index];
                cell[1] = tmp[3];
                cell[2] = tmp[4];
                cell[3] = tmp[1];
                cell[4] = tmp[2];
                cell[5] = tmp[7];
                cell[6] = tmp[8];
                cell[7] = tmp[5];
                cell[8] = tmp[6];
            }
        }
    }

    fn collision(&mut self) {
        let omega = self.parameters.omega;
        let c_sq = 1.0 / 3.0;
        let w_0 = 4.0 / 9.0;
        let w_1 = 1.0 / 9.0;
        let w_2 = 1.0 / 36.0;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if self.obstacles[index] {
                continue;
            }
            let tmp = self.tmp_cells[index];
            let local_density = tmp.iter().sum::<Float>();
            let u_x = (tmp[1] + tmp[5] + tmp[8] - (tmp[3] + tmp[6] + tmp[7])) / local_density;
            let u_y = (tmp[2] + tmp[5] + tmp[6] - (tmp[4] + tmp[7] + tmp[8])) / local_density;
            let u_sq = u_x * u_x + u_y * u_y;
            let u = [
                0.0,
                u_x,
                u_y,
                -u_x,
                -u_y,
                u_x + u_y,
                -u_x + u_y,
                -u_x - u_y,
                u_x - u_y,
            ];
            let weights = [w_0, w_1, w_1, w_1, w_1, w_2, w_2, w_2, w_2];
            for i in 0..Q {
                let d_equ = weights[i]
                    * local_density
                    * (1.0 + u[i] / c_sq + (u[i] * u[i]) / (2.0 * c_sq * c_sq)
                        - u_sq / (2.0 * c_sq));
                cell[i] = tmp[i] + omega * (d_equ - tmp[i]);
            }
        }
    }

    fn av_velocity(&self) -> Float {
        let mut tot_u = 0.0;
        let mut tot_cells = 0;
        for (index, f) in self.cells.iter().enumerate() {
            if !self.obstacles[index] {
                let local_density = f.iter().sum::<Float>();
                let u_x = (f[1] + f[5] + f[8] - (f[3] + f[6] + f[7])) / local_density;
                let u_y = (f[2] + f[5] + f[6] - (f[4] + f[7] + f[8])) / local_density;
                tot_u += (u_x * u_x + u_y * u_y).sqrt();
                tot_cells += 1;
            }
        }
        tot_u / tot_cells as Float
    }

    fn timestep(&mut self) {
        self.accelerate_flow();
        self.propagate();
        self.rebound();
        self.collision();
        let av_velocity = self.av_velocity();
        self.av_velocities.push(av_velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::ObstacleMask;
    use rand::Rng;

    fn random_lattice(width: usize, height: usize, omega: Float) -> Lattice {
        let mut rng = rand::rng();
        let parameters = Parameters {
            width,
            height,
            max_iterations: 25,
            reynolds_dim: width,
            density: 0.1,
            accel: 0.005,
            omega,
        };
        let grid = parameters.get_grid();
        let blocked = grid
            .coordinates()
            .filter(|_| rng.random_range(0.0..1.0) < 0.1)
            .collect::<Vec<(usize, usize)>>();
        let obstacles = ObstacleMask::from_blocked_cells(grid, &blocked).unwrap();
        let mut lattice = Lattice::new(parameters, obstacles).unwrap();
        let current = lattice.get_state_mut().get_current_mut();
        grid.coordinates().for_each(|(x, y)| {
            let mut f = kernel::rest_equilibrium(0.1);
            f.iter_mut()
                .for_each(|f_i| *f_i *= rng.random_range(0.8..1.2));
            current.set_f(x, y, f);
        });
        lattice
    }

    #[test]
    fn compare_legacy_single_stage_sweeps() {
        let omega = rand::rng().random_range(0.6..1.9);
        let mut lattice = random_lattice(13, 9, omega);
        let mut staged = StagedLattice::from_lattice(&lattice);

        lattice.run().unwrap();
        (0..25).for_each(|_| staged.timestep());

        let current = lattice.get_state().get_current();
        for ((x, y), target) in lattice.get_grid().coordinates().zip(staged.cells.iter()) {
            let actual = current.get_f(x, y);
            for (a, b) in actual.iter().zip(target.iter()) {
                assert!((a - b).abs() < 1e-12);
            }
        }
        for (a, b) in lattice
            .get_av_velocities()
            .iter()
            .zip(staged.av_velocities.iter())
        {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn compare_legacy_on_rest_channel() {
        let parameters = Parameters {
            width: 8,
            height: 6,
            max_iterations: 10,
            reynolds_dim: 8,
            ..Parameters::default()
        };
        let obstacles =
            ObstacleMask::from_blocked_cells(parameters.get_grid(), &[(3, 2), (3, 3)]).unwrap();
        let mut lattice = Lattice::new(parameters, obstacles).unwrap();
        let mut staged = StagedLattice::from_lattice(&lattice);

        lattice.run().unwrap();
        (0..10).for_each(|_| staged.timestep());

        for (a, b) in lattice
            .get_av_velocities()
            .iter()
            .zip(staged.av_velocities.iter())
        {
            assert!((a - b).abs() < 1e-14);
        }
        assert_eq!(lattice.get_av_velocities().len(), staged.av_velocities.len());
    }
}
