use crate::prelude_crate::*;

/// Full-way bounce-back at a solid cell: every value leaves along the
/// reverse of the direction it arrived with. The rest value is carried over.
pub(crate) fn compute_inner_bounce_back(f: &[Float; Q]) -> [Float; Q] {
    std::array::from_fn(|i| f[velocity_set::get_opposite_direction(i)])
}
