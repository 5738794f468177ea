pub(crate) use crate::NodeType::{self, *};
pub(crate) use crate::cli::{self, Config};
pub(crate) use crate::constants::*;
pub(crate) use crate::error::{LbError, LbResult};
pub(crate) use crate::kernel;
pub(crate) use crate::velocity_set::{self, D, Q, W};
