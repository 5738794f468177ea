pub type Float = f64;

pub const DELTA_T: Float = 1.0;

pub const DELTA_X: Float = 1.0;

pub const CS_2: Float = 1.0 / 3.0 * DELTA_X * DELTA_X / DELTA_T / DELTA_T;

pub const CS_2_INV: Float = 3.0;

pub const CS_4_INV: Float = 9.0;

pub const FINAL_STATE_FILE: &str = "final_state.dat";

pub const AV_VELS_FILE: &str = "av_vels.dat";

pub(crate) const PROGRESS_BAR_UPDATES: usize = 200;
