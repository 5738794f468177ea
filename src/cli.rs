use crate::prelude_crate::*;
use clap::{Arg, ArgAction, Command};
use core_affinity::{get_core_ids, set_for_current};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) parameters_path: PathBuf,
    pub(crate) obstacles_path: PathBuf,
    pub(crate) number_of_threads: Option<NonZeroUsize>,
    pub(crate) core_affinity: bool,
    pub(crate) final_state_path: PathBuf,
    pub(crate) av_vels_path: PathBuf,
    pub(crate) check_stability: bool,
    pub(crate) verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parameters_path: PathBuf::from("input.params"),
            obstacles_path: PathBuf::from("obstacles.dat"),
            number_of_threads: None,
            core_affinity: false,
            final_state_path: PathBuf::from(FINAL_STATE_FILE),
            av_vels_path: PathBuf::from(AV_VELS_FILE),
            check_stability: false,
            verbosity: Verbosity::Normal,
        }
    }
}

pub(crate) fn build_command() -> Command {
    clap::command!()
        .arg(
            Arg::new("parameters_path")
                .value_name("PARAMFILE")
                .help("Parameter file: nx, ny, maxIters, reynolds_dim, density, accel, omega")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("obstacles_path")
                .value_name("OBSTACLEFILE")
                .help("Obstacle file with one `x y 1` line per blocked cell")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("number_of_threads")
                .short('n')
                .long("num-threads")
                .value_name("NTHREADS")
                .help("The number of threads used (min = 1, default = all cores)")
                .value_parser(clap::value_parser!(NonZeroUsize)),
        )
        .arg(
            Arg::new("core_affinity")
                .long("affinity")
                .help("Pin each worker thread to a core")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("final_state_path")
                .long("final-state")
                .value_name("PATH")
                .help("Where the final state of every cell is written")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(FINAL_STATE_FILE),
        )
        .arg(
            Arg::new("av_vels_path")
                .long("av-vels")
                .value_name("PATH")
                .help("Where the average velocity of every step is written")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(AV_VELS_FILE),
        )
        .arg(
            Arg::new("check_stability")
                .long("check-stability")
                .help("Abort as soon as the average velocity is no longer finite")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log every time step")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only report errors")
                .action(ArgAction::SetTrue),
        )
}

pub(crate) fn get_args() -> clap::ArgMatches {
    build_command().get_matches()
}

pub(crate) fn parse_matches(matches: &clap::ArgMatches) -> Config {
    let get_path = |id: &str| {
        matches
            .get_one::<PathBuf>(id)
            .cloned()
            .unwrap_or_default()
    };
    let verbosity = if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    };
    Config {
        parameters_path: get_path("parameters_path"),
        obstacles_path: get_path("obstacles_path"),
        number_of_threads: matches.get_one::<NonZeroUsize>("number_of_threads").copied(),
        core_affinity: matches.get_flag("core_affinity"),
        final_state_path: get_path("final_state_path"),
        av_vels_path: get_path("av_vels_path"),
        check_stability: matches.get_flag("check_stability"),
        verbosity,
    }
}

/// `RUST_LOG` overrides the level chosen on the command line.
pub(crate) fn init_logging(config: &Config) {
    let level = match config.verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn init_global_pool(
    number_of_threads: Option<NonZeroUsize>,
    pin_all_cores: bool,
) -> LbResult<()> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(number_of_threads) = number_of_threads {
        builder = builder.num_threads(number_of_threads.get());
    }
    if pin_all_cores {
        match get_core_ids() {
            Some(cores) if !cores.is_empty() => {
                builder = builder.start_handler(move |idx| {
                    let core = cores[idx % cores.len()];
                    if !set_for_current(core) {
                        tracing::warn!(worker = idx, "could not pin worker to a core");
                    }
                });
            }
            _ => tracing::warn!("core IDs are unavailable, running without affinity"),
        }
    }
    builder.build_global()?;
    Ok(())
}
