// ------------------------------------------------------------------------------- IMPORTS

use super::Lattice;
use crate::io::format_scientific;
use crate::prelude_crate::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

impl Lattice {
    /// Writes one line per cell, `y` outer and `x` inner:
    /// `x y u_x u_y |u| pressure flag`.
    ///
    /// Solid cells report zero velocity and the reference pressure
    /// `density * c_s^2`.
    pub fn write_final_state<P: AsRef<Path>>(&self, path: P) -> LbResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| LbError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let state = self.get_state();
        let current = state.get_current();
        let obstacles = state.get_obstacles();
        let reference_pressure = self.get_parameters().density * CS_2;
        for (x, y) in self.get_grid().coordinates() {
            let node_type = obstacles.get_node_type(x, y);
            let (velocity, pressure) = match node_type {
                Solid => ([0.0; D], reference_pressure),
                Fluid => {
                    let (density, velocity) = kernel::compute_moments(&current.get_f(x, y));
                    (velocity, density * CS_2)
                }
            };
            let speed = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>().sqrt();
            writeln!(
                writer,
                "{x} {y} {} {} {} {} {}",
                format_scientific(velocity[0]),
                format_scientific(velocity[1]),
                format_scientific(speed),
                format_scientific(pressure),
                node_type as u8
            )
            .map_err(|e| LbError::io(path, e))?;
        }
        writer.flush().map_err(|e| LbError::io(path, e))?;
        tracing::info!(path = %path.display(), "final state written");
        Ok(())
    }

    /// Writes `step:\t<average velocity>` for every completed step.
    pub fn write_av_velocities<P: AsRef<Path>>(&self, path: P) -> LbResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| LbError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        for (step, av_velocity) in self.get_av_velocities().iter().enumerate() {
            writeln!(writer, "{step}:\t{}", format_scientific(*av_velocity))
                .map_err(|e| LbError::io(path, e))?;
        }
        writer.flush().map_err(|e| LbError::io(path, e))?;
        tracing::info!(path = %path.display(), "average velocities written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::{ObstacleMask, Parameters};
    use std::fs;

    #[test]
    fn test_write_final_state_rest_lattice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FINAL_STATE_FILE);
        let parameters = Parameters::test_default();
        let obstacles = ObstacleMask::from_blocked_cells(parameters.get_grid(), &[(2, 1)]).unwrap();
        let lattice = Lattice::new(parameters, obstacles).unwrap();

        lattice.write_final_state(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("0 0 0.000000000000E+00 0.000000000000E+00 "));
        assert!(lines[0].ends_with(" 0"));
        assert!(lines[1].starts_with("1 0 "));
        assert!(lines[4].starts_with("0 1 "));
        assert_eq!(
            lines[6],
            "2 1 0.000000000000E+00 0.000000000000E+00 0.000000000000E+00 3.333333333333E-02 1"
        );
    }

    #[test]
    fn test_write_final_state_fluid_pressure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FINAL_STATE_FILE);
        let mut lattice = Lattice::test_default();
        let doubled = kernel::rest_equilibrium(0.2);
        lattice.get_state_mut().get_current_mut().set_f(3, 3, doubled);

        lattice.write_final_state(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let last = contents.lines().last().unwrap();
        let pressure = last.split_whitespace().nth(5).unwrap().parse::<Float>().unwrap();
        assert!((pressure - 0.2 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_write_av_velocities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AV_VELS_FILE);
        let mut lattice = Lattice::test_default();
        lattice.timestep().unwrap();
        lattice.timestep().unwrap();

        lattice.write_av_velocities(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines = contents.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0:\t8.333333333333E-03"));
        assert!(lines[1].starts_with("1:\t"));
        let value = lines[1].split('\t').nth(1).unwrap().parse::<Float>().unwrap();
        assert!((value - lattice.get_av_velocities()[1]).abs() < 1e-14);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(AV_VELS_FILE);
        let lattice = Lattice::test_default();

        let result = lattice.write_av_velocities(&path);

        assert!(matches!(result, Err(LbError::Io { .. })));
    }
}
