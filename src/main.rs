//! graphsh CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Delegates everything to `cli::run`
//! 2. Prints startup errors to stderr
//! 3. Exits with the code the run loop chose

use graphsh::cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
