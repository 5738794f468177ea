use crate::prelude_crate::*;

pub(crate) fn compute_density(f: &[Float; Q]) -> Float {
    f.iter().sum::<Float>()
}

/// Density and bulk velocity of one cell.
pub(crate) fn compute_moments(f: &[Float; Q]) -> (Float, [Float; D]) {
    let density = compute_density(f);
    let velocity = velocity_set::velocity_computation(density, f);
    (density, velocity)
}

pub(crate) fn equilibrium(density: Float, velocity: &[Float; D]) -> [Float; Q] {
    let u_dot_u = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>();
    let u_dot_c = velocity_set::velocity_projection(velocity);
    let mut f_eq = [0.0; Q];
    (0..Q).for_each(|i| {
        f_eq[i] = W[i]
            * density
            * (1.0 + u_dot_c[i] * CS_2_INV + u_dot_c[i] * u_dot_c[i] * (0.5 * CS_4_INV)
                - u_dot_u * (0.5 * CS_2_INV));
    });
    f_eq
}

pub(crate) fn bgk_collision(f: &[Float; Q], f_eq: &[Float; Q], omega: Float) -> [Float; Q] {
    let mut f_star = [0.0; Q];
    (0..Q).for_each(|i| {
        f_star[i] = f[i] + omega * (f_eq[i] - f[i]);
    });
    f_star
}

/// Collides the streamed values of one fluid cell.
///
/// Returns the post-collision distribution and the cell's speed `|u|`, which
/// the caller accumulates for the step's average velocity.
pub(crate) fn compute_bgk_collision(f: &[Float; Q], omega: Float) -> ([Float; Q], Float) {
    let (density, velocity) = compute_moments(f);
    let f_eq = equilibrium(density, &velocity);
    let f_star = bgk_collision(f, &f_eq, omega);
    let speed = velocity.iter().map(|u_x| u_x * u_x).sum::<Float>().sqrt();
    (f_star, speed)
}

/// Rest equilibrium for a uniform density: `density * w_i`.
pub(crate) fn rest_equilibrium(density: Float) -> [Float; Q] {
    let mut f = [0.0; Q];
    (0..Q).for_each(|i| f[i] = W[i] * density);
    f
}
