//! Input files, console progress and number formatting.

use crate::momentum::{Grid, ObstacleMask, Parameters};
use crate::prelude_crate::*;
use colored::*;
use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

pub fn read_parameters_file<P: AsRef<Path>>(path: P) -> LbResult<Parameters> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| LbError::io(path, e))?;
    let parameters = parse_parameters(&contents)?;
    tracing::info!(path = %path.display(), ?parameters, "parameters loaded");
    Ok(parameters)
}

/// Reads the seven scalars of a parameter file. Any whitespace separates them.
///
/// # Examples
/// ```
/// # use bgkflow::io::parse_parameters;
/// let parameters = parse_parameters("128\n64\n1000\n128\n0.1\n0.005\n1.7\n").unwrap();
///
/// assert_eq!(parameters.width, 128);
/// assert_eq!(parameters.height, 64);
/// assert_eq!(parameters.omega, 1.7);
/// ```
pub fn parse_parameters(contents: &str) -> LbResult<Parameters> {
    let mut tokens = contents.split_whitespace();
    Ok(Parameters {
        width: next_value(&mut tokens, "nx")?,
        height: next_value(&mut tokens, "ny")?,
        max_iterations: next_value(&mut tokens, "maxIters")?,
        reynolds_dim: next_value(&mut tokens, "reynolds_dim")?,
        density: next_value(&mut tokens, "density")?,
        accel: next_value(&mut tokens, "accel")?,
        omega: next_value(&mut tokens, "omega")?,
    })
}

fn next_value<T: FromStr>(tokens: &mut SplitWhitespace<'_>, name: &'static str) -> LbResult<T> {
    let token = tokens.next().ok_or(LbError::MissingParameter(name))?;
    token.parse::<T>().map_err(|_| LbError::ParseParameter {
        name,
        value: token.to_string(),
    })
}

pub fn read_obstacles_file<P: AsRef<Path>>(path: P, grid: &Grid) -> LbResult<ObstacleMask> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| LbError::io(path, e))?;
    let obstacles = parse_obstacles(&contents, grid)?;
    tracing::info!(
        path = %path.display(),
        solid_cells = grid.get_number_of_cells() - obstacles.get_number_of_fluid_cells(),
        "obstacles loaded"
    );
    Ok(obstacles)
}

/// Parses `x y flag` lines into an obstacle mask. Blank lines are skipped and
/// errors carry the 1-based line number.
///
/// # Examples
/// ```
/// # use bgkflow::prelude::*;
/// # use bgkflow::io::parse_obstacles;
/// let grid = Grid::new(4, 4);
/// let mask = parse_obstacles("0 0 1\n\n3 2 1\n", &grid).unwrap();
///
/// assert!(mask.is_solid(0, 0));
/// assert!(mask.is_solid(3, 2));
/// assert!(parse_obstacles("0 0 2\n", &grid).is_err());
/// ```
pub fn parse_obstacles(contents: &str, grid: &Grid) -> LbResult<ObstacleMask> {
    let mut cells = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|token| token.parse::<i64>())
            .collect::<Result<Vec<i64>, _>>()
            .map_err(|_| LbError::ObstacleFormat { line: line_number })?;
        let &[x, y, flag] = values.as_slice() else {
            return Err(LbError::ObstacleFormat { line: line_number });
        };
        let x = check_coordinate(x, grid.get_width(), "x", line_number)?;
        let y = check_coordinate(y, grid.get_height(), "y", line_number)?;
        if flag != 1 {
            return Err(LbError::ObstacleFlag {
                line: line_number,
                flag,
            });
        }
        cells.push((x, y));
    }
    ObstacleMask::from_blocked_cells(*grid, &cells)
}

fn check_coordinate(
    value: i64,
    extent: usize,
    axis: &'static str,
    line: usize,
) -> LbResult<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&coordinate| coordinate < extent)
        .ok_or(LbError::ObstacleOutOfRange { line, axis, value })
}

pub fn progress_bar(current: usize, total: usize) {
    let current = current + 1;
    let percentage = current as f64 / total as f64;
    let bar_length = 50;
    let filled_length = ((bar_length as f64 * percentage) as usize).min(bar_length);
    let completed = "█".repeat(filled_length);
    let remaining = "░".repeat(bar_length - filled_length);
    let bar = completed + &remaining;
    let percentage = percentage * 100.0;
    print!("\r{}", format!("{bar} {percentage:.2}%").green().bold());
    let _ = std::io::Write::flush(&mut std::io::stdout());
    if current >= total {
        println!();
        println!();
    }
}

/// Formats a value like C's `%.12E`: twelve decimals and an exponent with a
/// sign and at least two digits.
///
/// # Examples
/// ```
/// # use bgkflow::io::format_scientific;
/// assert_eq!(format_scientific(0.1 / 12.0), "8.333333333333E-03");
/// assert_eq!(format_scientific(1234.5), "1.234500000000E+03");
/// assert_eq!(format_scientific(0.0), "0.000000000000E+00");
/// assert_eq!(format_scientific(f64::NAN), "NAN");
/// ```
pub fn format_scientific(value: Float) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-NAN" } else { "NAN" }.to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-INF" } else { "INF" }.to_string();
    }
    let formatted = format!("{value:.12E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent = exponent.parse::<i32>().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}E{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}
