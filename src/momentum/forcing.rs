use super::{DistributionField, ObstacleMask};
use crate::prelude_crate::*;
use crate::velocity_set::{Q_EAST, Q_WEST};

/// Shifts `density * accel` worth of momentum from the west-going to the
/// east-going directions of every fluid cell in row `y`.
///
/// A cell is skipped when any west-going value would drop to zero or below.
/// Returns the number of cells that were accelerated.
pub(crate) fn accelerate_flow(
    field: &mut DistributionField,
    obstacles: &ObstacleMask,
    y: usize,
    density: Float,
    accel: Float,
) -> usize {
    let w_1 = density * accel / 9.0;
    let w_2 = density * accel / 36.0;
    // Axis direction first, then the two diagonals.
    let increments = [w_1, w_2, w_2];
    let width = field.get_grid().get_width();
    let accelerated = (0..width)
        .filter(|&x| !obstacles.is_solid(x, y))
        .filter(|&x| {
            let f = field.get_f(x, y);
            Q_WEST
                .iter()
                .zip(increments.iter())
                .all(|(&i, w_i)| f[i] - w_i > 0.0)
        })
        .collect::<Vec<usize>>();
    accelerated.iter().for_each(|&x| {
        let mut f = field.get_f(x, y);
        Q_EAST
            .iter()
            .zip(Q_WEST.iter())
            .zip(increments.iter())
            .for_each(|((&i_east, &i_west), w_i)| {
                f[i_east] += w_i;
                f[i_west] -= w_i;
            });
        field.set_f(x, y, f);
    });
    accelerated.len()
}
