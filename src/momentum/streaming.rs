use super::{DistributionField, Grid};
use crate::prelude_crate::*;

/// Periodic neighbourhood of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Neighborhood {
    x: usize,
    y: usize,
    x_e: usize,
    x_w: usize,
    y_n: usize,
    y_s: usize,
}

impl Neighborhood {
    pub(crate) fn new(grid: &Grid, x: usize, y: usize) -> Self {
        Neighborhood {
            x,
            y,
            x_e: grid.east(x),
            x_w: grid.west(x),
            y_n: grid.north(y),
            y_s: grid.south(y),
        }
    }
}

/// Pulls the value of every direction from its upstream neighbour, i.e. the
/// cell one step against that direction's lattice vector.
pub(crate) fn compute_streaming(
    field: &DistributionField,
    neighborhood: &Neighborhood,
) -> [Float; Q] {
    let grid = field.get_grid();
    let Neighborhood {
        x,
        y,
        x_e,
        x_w,
        y_n,
        y_s,
    } = *neighborhood;
    [
        field.get_speed(0)[grid.index(x, y)],
        field.get_speed(1)[grid.index(x_w, y)],
        field.get_speed(2)[grid.index(x, y_s)],
        field.get_speed(3)[grid.index(x_e, y)],
        field.get_speed(4)[grid.index(x, y_n)],
        field.get_speed(5)[grid.index(x_w, y_s)],
        field.get_speed(6)[grid.index(x_e, y_s)],
        field.get_speed(7)[grid.index(x_e, y_n)],
        field.get_speed(8)[grid.index(x_w, y_n)],
    ]
}
