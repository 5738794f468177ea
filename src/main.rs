use bgkflow::prelude::*;
use colored::*;

fn main() {
    if let Err(e) = momentum::load() {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
