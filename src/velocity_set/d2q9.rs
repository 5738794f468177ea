use crate::constants::Float;

pub const D: usize = 2;

pub const Q: usize = 9;

pub const C: [[i32; D]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub const W: [Float; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

pub const Q_BAR: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

pub const Q_WEST: [usize; 3] = [3, 6, 7];

pub const Q_EAST: [usize; 3] = [1, 5, 8];

pub const Q_SOUTH: [usize; 3] = [4, 7, 8];

pub const Q_NORTH: [usize; 3] = [2, 5, 6];

/// Velocity from the first moment. The east-going and west-going sums are
/// formed before subtracting, so a symmetric cell gives exactly zero.
pub(crate) fn velocity_computation(density: Float, f: &[Float; Q]) -> [Float; D] {
    [
        (f[1] + f[5] + f[8] - (f[3] + f[6] + f[7])) / density,
        (f[2] + f[5] + f[6] - (f[4] + f[7] + f[8])) / density,
    ]
}

/// Projection of the bulk velocity on every lattice direction.
pub(crate) fn velocity_projection(velocity: &[Float; D]) -> [Float; Q] {
    let [u_x, u_y] = *velocity;
    [
        0.0,
        u_x,
        u_y,
        -u_x,
        -u_y,
        u_x + u_y,
        -u_x + u_y,
        -u_x - u_y,
        u_x - u_y,
    ]
}
